//! Claim stores with injectable faults
//!
//! Wraps the in-memory store so tests can make a chosen write fail inside a
//! transaction and check that nothing was half applied.

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::adapters::InMemoryClaimStore;
use domain_claims::{ClaimRecord, ClaimStore, ClaimTransaction};

/// Write that fails when it happens inside a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every save fails
    Save,
    /// Every delete fails, so saves earlier in the transaction have already run
    Delete,
}

/// In-memory store that fails one kind of transactional write
#[derive(Debug)]
pub struct FaultyClaimStore {
    inner: InMemoryClaimStore,
    fault: Fault,
}

impl FaultyClaimStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: InMemoryClaimStore::new(),
            fault,
        }
    }

    /// The wrapped store, for inspecting what was committed
    pub fn inner(&self) -> &InMemoryClaimStore {
        &self.inner
    }
}

struct FaultyTransaction<'a> {
    inner: &'a mut dyn ClaimTransaction,
    fault: Fault,
}

impl ClaimTransaction for FaultyTransaction<'_> {
    fn save(&mut self, record: &ClaimRecord) -> Result<(), PortError> {
        match self.fault {
            Fault::Save => Err(PortError::connection("connection reset during save")),
            Fault::Delete => self.inner.save(record),
        }
    }

    fn delete(&mut self, id: ClaimId) -> Result<(), PortError> {
        match self.fault {
            Fault::Delete => Err(PortError::connection("connection reset during delete")),
            Fault::Save => self.inner.delete(id),
        }
    }
}

impl DomainPort for FaultyClaimStore {}

impl ClaimStore for FaultyClaimStore {
    fn find(&self, id: ClaimId) -> Result<ClaimRecord, PortError> {
        self.inner.find(id)
    }

    fn find_by_reference(&self, reference: &str) -> Result<ClaimRecord, PortError> {
        self.inner.find_by_reference(reference)
    }

    fn save(&self, record: &ClaimRecord) -> Result<(), PortError> {
        self.inner.save(record)
    }

    fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.inner.delete(id)
    }

    fn transaction(
        &self,
        work: &mut dyn FnMut(&mut dyn ClaimTransaction) -> Result<(), PortError>,
    ) -> Result<(), PortError> {
        let fault = self.fault;
        self.inner.transaction(&mut |tx: &mut dyn ClaimTransaction| {
            let mut faulty = FaultyTransaction { inner: tx, fault };
            work(&mut faulty)
        })
    }
}

//! Claims Domain Ports
//!
//! The engine performs no I/O of its own. Everything it needs from the
//! outside world is expressed here as a port:
//!
//! - **PolicyConfigurationProvider**: current academic year and maximum
//!   award per policy
//! - **ClaimStore**: persistence of claim records, with transactions
//! - **SchoolDirectory**: resolves school references into schools
//! - **NotificationSender**: delivers claimant and operator messages
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::adapters::{InMemoryClaimStore, StaticPolicyConfiguration};
//! use domain_claims::{ClaimAggregate, ClaimStore};
//!
//! let config = StaticPolicyConfiguration::new(AcademicYear::new(2022));
//! let store = InMemoryClaimStore::new();
//!
//! let mut claim = ClaimAggregate::start(Journey::AdditionalPayments, &config, Utc::now())?;
//! claim.submit(None, &store, Utc::now())?;
//! ```

use rust_decimal::Decimal;

use core_kernel::{AcademicYear, ClaimId, DomainPort, PortError, SchoolId};
use domain_eligibility::{Policy, School};

use crate::claim::ClaimRecord;
use crate::notification::Notification;

/// Per-policy configuration the engine reads but never changes
pub trait PolicyConfigurationProvider: DomainPort {
    /// Academic year claims for the policy are currently made in
    ///
    /// `None` when the policy is not configured.
    fn current_academic_year(&self, policy: Policy) -> Option<AcademicYear>;

    /// Largest award amount payable for the policy, top-ups included
    fn max_award_amount(&self, policy: Policy) -> Decimal;
}

/// Persistence of claim records
pub trait ClaimStore: DomainPort {
    // ========================================================================
    // Reads
    // ========================================================================

    /// Retrieves a claim record by ID
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if no record has the ID
    fn find(&self, id: ClaimId) -> Result<ClaimRecord, PortError>;

    /// Retrieves a submitted claim by its claimant-facing reference
    fn find_by_reference(&self, reference: &str) -> Result<ClaimRecord, PortError>;

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts or replaces a record
    fn save(&self, record: &ClaimRecord) -> Result<(), PortError>;

    /// Removes a record; removing a record that was never saved succeeds
    fn delete(&self, id: ClaimId) -> Result<(), PortError>;

    /// Runs `work` so that either all of its writes are kept or none are
    fn transaction(
        &self,
        work: &mut dyn FnMut(&mut dyn ClaimTransaction) -> Result<(), PortError>,
    ) -> Result<(), PortError>;
}

/// Writes staged inside [`ClaimStore::transaction`]
pub trait ClaimTransaction {
    fn save(&mut self, record: &ClaimRecord) -> Result<(), PortError>;

    fn delete(&mut self, id: ClaimId) -> Result<(), PortError>;
}

/// Reference data for schools
pub trait SchoolDirectory: DomainPort {
    /// Retrieves a school by ID
    fn find(&self, id: SchoolId) -> Result<School, PortError>;

    /// Searches open schools by name or URN
    ///
    /// # Errors
    ///
    /// `PortError::Validation` when the query is shorter than three characters
    fn search(&self, query: &str) -> Result<Vec<School>, PortError>;
}

/// Delivery of emails and text messages
pub trait NotificationSender: DomainPort {
    fn send(&self, notification: &Notification) -> Result<(), PortError>;
}

//! In-memory adapters
//!
//! Every adapter here is safe to share between request handlers. Locks are
//! held only for the duration of a single port call; a poisoned lock is
//! reported as `PortError::Internal` rather than a panic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};
use tracing::{debug, info};

use core_kernel::{AcademicYear, ClaimId, DomainPort, PortError, SchoolId};
use domain_eligibility::student_loans::STUDENT_LOANS_MAX_AWARD;
use domain_eligibility::{AwardTable, Policy, School};

use crate::claim::ClaimRecord;
use crate::notification::Notification;
use crate::ports::{
    ClaimStore, ClaimTransaction, NotificationSender, PolicyConfigurationProvider, SchoolDirectory,
};

/// Largest levelling up premium award, top-ups included
pub const LEVELLING_UP_PREMIUM_MAX_AWARD: Decimal = dec!(3000);

/// Shortest query [`SchoolDirectory::search`] accepts
pub const MIN_SCHOOL_SEARCH_LENGTH: usize = 3;

/// Most schools returned by a single search
pub const SCHOOL_SEARCH_LIMIT: usize = 50;

fn poisoned(what: &str) -> PortError {
    PortError::internal(format!("{} lock poisoned", what))
}

// ============================================================================
// Claim store
// ============================================================================

/// Claim store holding records in memory
///
/// A transaction works on a copy of the whole map and swaps it in only when
/// the work succeeds, so a failure part way leaves the store untouched.
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    records: RwLock<BTreeMap<ClaimId, ClaimRecord>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, PortError> {
        Ok(self.records.read().map_err(|_| poisoned("claim store"))?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PortError> {
        self.len().map(|len| len == 0)
    }

    /// Every stored record, in ID order
    pub fn all(&self) -> Result<Vec<ClaimRecord>, PortError> {
        Ok(self
            .records
            .read()
            .map_err(|_| poisoned("claim store"))?
            .values()
            .cloned()
            .collect())
    }
}

impl DomainPort for InMemoryClaimStore {}

impl ClaimStore for InMemoryClaimStore {
    fn find(&self, id: ClaimId) -> Result<ClaimRecord, PortError> {
        self.records
            .read()
            .map_err(|_| poisoned("claim store"))?
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    fn find_by_reference(&self, reference: &str) -> Result<ClaimRecord, PortError> {
        self.records
            .read()
            .map_err(|_| poisoned("claim store"))?
            .values()
            .find(|record| record.is_submitted() && record.reference.eq_ignore_ascii_case(reference))
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", reference))
    }

    fn save(&self, record: &ClaimRecord) -> Result<(), PortError> {
        self.records
            .write()
            .map_err(|_| poisoned("claim store"))?
            .insert(record.id, record.clone());
        debug!(claim_id = %record.id, "Saved claim");
        Ok(())
    }

    fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.records.write().map_err(|_| poisoned("claim store"))?.remove(&id);
        debug!(claim_id = %id, "Deleted claim");
        Ok(())
    }

    fn transaction(
        &self,
        work: &mut dyn FnMut(&mut dyn ClaimTransaction) -> Result<(), PortError>,
    ) -> Result<(), PortError> {
        let mut records = self.records.write().map_err(|_| poisoned("claim store"))?;
        let mut staged = StagedWrites {
            records: records.clone(),
        };

        work(&mut staged)?;
        *records = staged.records;
        Ok(())
    }
}

struct StagedWrites {
    records: BTreeMap<ClaimId, ClaimRecord>,
}

impl ClaimTransaction for StagedWrites {
    fn save(&mut self, record: &ClaimRecord) -> Result<(), PortError> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    fn delete(&mut self, id: ClaimId) -> Result<(), PortError> {
        self.records.remove(&id);
        Ok(())
    }
}

// ============================================================================
// Policy configuration
// ============================================================================

/// Fixed per-policy configuration
#[derive(Debug, Clone)]
pub struct StaticPolicyConfiguration {
    academic_years: BTreeMap<Policy, AcademicYear>,
    max_award_amounts: BTreeMap<Policy, Decimal>,
}

impl StaticPolicyConfiguration {
    /// Configures every policy for the same academic year with the standard maximum awards
    pub fn new(academic_year: AcademicYear) -> Self {
        let academic_years = Policy::ALL.into_iter().map(|policy| (policy, academic_year)).collect();
        let max_award_amounts = Policy::ALL
            .into_iter()
            .map(|policy| (policy, default_max_award_amount(policy)))
            .collect();

        Self {
            academic_years,
            max_award_amounts,
        }
    }

    /// Overrides one policy's academic year, `None` leaving it unconfigured
    pub fn with_academic_year(mut self, policy: Policy, academic_year: Option<AcademicYear>) -> Self {
        match academic_year {
            Some(year) => self.academic_years.insert(policy, year),
            None => self.academic_years.remove(&policy),
        };
        self
    }

    pub fn with_max_award_amount(mut self, policy: Policy, amount: Decimal) -> Self {
        self.max_award_amounts.insert(policy, amount);
        self
    }
}

fn default_max_award_amount(policy: Policy) -> Decimal {
    match policy {
        Policy::EarlyCareerPayments => AwardTable::early_career_payments().max_uplift_amount(),
        Policy::LevellingUpPremiumPayments => LEVELLING_UP_PREMIUM_MAX_AWARD,
        Policy::StudentLoans => STUDENT_LOANS_MAX_AWARD,
    }
}

impl DomainPort for StaticPolicyConfiguration {}

impl PolicyConfigurationProvider for StaticPolicyConfiguration {
    fn current_academic_year(&self, policy: Policy) -> Option<AcademicYear> {
        self.academic_years.get(&policy).copied()
    }

    fn max_award_amount(&self, policy: Policy) -> Decimal {
        self.max_award_amounts
            .get(&policy)
            .copied()
            .unwrap_or_else(|| default_max_award_amount(policy))
    }
}

// ============================================================================
// Schools
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemorySchoolDirectory {
    schools: Vec<School>,
}

impl InMemorySchoolDirectory {
    pub fn new(schools: Vec<School>) -> Self {
        Self { schools }
    }
}

impl DomainPort for InMemorySchoolDirectory {}

impl SchoolDirectory for InMemorySchoolDirectory {
    fn find(&self, id: SchoolId) -> Result<School, PortError> {
        self.schools
            .iter()
            .find(|school| school.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("School", id))
    }

    fn search(&self, query: &str) -> Result<Vec<School>, PortError> {
        let query = query.trim();
        if query.chars().count() < MIN_SCHOOL_SEARCH_LENGTH {
            return Err(PortError::validation_field(
                format!("Search for the school name with a minimum of {} characters", MIN_SCHOOL_SEARCH_LENGTH),
                "school_search",
            ));
        }

        let needle = query.to_lowercase();
        Ok(self
            .schools
            .iter()
            .filter(|school| {
                school.name.to_lowercase().contains(&needle) || school.urn.to_string().starts_with(query)
            })
            .take(SCHOOL_SEARCH_LIMIT)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Logs each notification and keeps it for inspection
#[derive(Debug, Default)]
pub struct TracingNotificationSender {
    sent: Mutex<Vec<Notification>>,
}

impl TracingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, oldest first
    pub fn sent(&self) -> Result<Vec<Notification>, PortError> {
        Ok(self.sent.lock().map_err(|_| poisoned("notification"))?.clone())
    }
}

impl DomainPort for TracingNotificationSender {}

impl NotificationSender for TracingNotificationSender {
    fn send(&self, notification: &Notification) -> Result<(), PortError> {
        info!(
            message_type = ?notification.message_type,
            claim_id = ?notification.claim_id,
            reminder_id = ?notification.reminder_id,
            subject = %notification.subject,
            "Notification sent"
        );
        self.sent
            .lock()
            .map_err(|_| poisoned("notification"))?
            .push(notification.clone());
        Ok(())
    }
}

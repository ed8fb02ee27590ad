//! The capability shared by a single claim record and a multi-policy claim
//!
//! [`ClaimRecord`] implements it directly. [`ClaimAggregate`](crate::ClaimAggregate)
//! implements it by forwarding reads to its main record and broadcasting
//! the mutating operations to every member.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use core_kernel::AcademicYear;
use domain_eligibility::{Eligibility, EligibilityAttribute, EligibilityStatus, Policy};

use crate::answers::ClaimantAnswers;
use crate::claim::ClaimRecord;
use crate::error::ClaimError;
use crate::ports::ClaimStore;

pub trait ClaimLike {
    // ========================================================================
    // Reads
    // ========================================================================

    fn policy(&self) -> Result<Policy, ClaimError>;

    fn academic_year(&self) -> Result<AcademicYear, ClaimError>;

    fn answers(&self) -> Result<&ClaimantAnswers, ClaimError>;

    fn eligibility(&self) -> Result<&Eligibility, ClaimError>;

    fn eligibility_status(&self) -> EligibilityStatus;

    fn award_amount(&self) -> Result<Decimal, ClaimError>;

    fn is_submitted(&self) -> bool;

    // ========================================================================
    // Broadcast mutations
    // ========================================================================

    fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), ClaimError>;

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Result<(), ClaimError>;

    /// Persists the claim and forgets its tracked changes
    fn save(&mut self, store: &dyn ClaimStore) -> Result<(), ClaimError>;
}

impl ClaimLike for ClaimRecord {
    fn policy(&self) -> Result<Policy, ClaimError> {
        Ok(ClaimRecord::policy(self))
    }

    fn academic_year(&self) -> Result<AcademicYear, ClaimError> {
        Ok(self.academic_year)
    }

    fn answers(&self) -> Result<&ClaimantAnswers, ClaimError> {
        Ok(&self.answers)
    }

    fn eligibility(&self) -> Result<&Eligibility, ClaimError> {
        Ok(&self.eligibility)
    }

    fn eligibility_status(&self) -> EligibilityStatus {
        self.status()
    }

    fn award_amount(&self) -> Result<Decimal, ClaimError> {
        Ok(ClaimRecord::award_amount(self))
    }

    fn is_submitted(&self) -> bool {
        ClaimRecord::is_submitted(self)
    }

    fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), ClaimError> {
        ClaimRecord::assign_attributes(self, attributes)
    }

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Result<(), ClaimError> {
        ClaimRecord::reset_dependent_answers(self, forced).map(|_| ())
    }

    fn save(&mut self, store: &dyn ClaimStore) -> Result<(), ClaimError> {
        store.save(self)?;
        self.clear_changes();
        Ok(())
    }
}

//! Claim records
//!
//! A claim record holds the claimant's answers and the eligibility for one
//! policy. Answers can change freely until the record is submitted; after
//! that only administrative fields change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use core_kernel::{AcademicYear, ClaimId, PaymentId};
use domain_eligibility::{
    Eligibility, EligibilityAttribute, EligibilityCheck, EligibilityStatus, IneligibilityReason, Policy,
};

use crate::answers::ClaimantAnswers;
use crate::decision::{Decision, DecisionResult};
use crate::error::ClaimError;
use crate::topup::Topup;

/// A policy the claimant was eligible for when they submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyOption {
    pub policy: Policy,
    pub award_amount: Decimal,
}

/// A claim for one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Unique identifier
    pub id: ClaimId,
    /// Eight character reference quoted to the claimant
    pub reference: String,
    /// Academic year the claim is made in
    pub academic_year: AcademicYear,
    /// Personal, contact and payment answers
    pub answers: ClaimantAnswers,
    /// Eligibility answers for the claim's policy
    pub eligibility: Eligibility,
    /// Policies the claimant could have chosen, stamped at submission
    pub policy_options_provided: Vec<PolicyOption>,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Whether a service operator has put the claim on hold
    pub held: bool,
    /// Decisions in the order they were made, undos included
    pub decisions: Vec<Decision>,
    /// Payroll payment the claim was paid in
    pub payment_id: Option<PaymentId>,
    pub topups: Vec<Topup>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Creates an unsubmitted claim with blank answers
    pub fn new(policy: Policy, academic_year: AcademicYear, now: DateTime<Utc>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            reference: generate_reference(),
            academic_year,
            answers: ClaimantAnswers::default(),
            eligibility: Eligibility::for_policy(policy),
            policy_options_provided: Vec::new(),
            submitted_at: None,
            held: false,
            decisions: Vec::new(),
            payment_id: None,
            topups: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn policy(&self) -> Policy {
        self.eligibility.policy()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Eligibility status in the claim's academic year
    pub fn status(&self) -> EligibilityStatus {
        self.eligibility.status(self.academic_year)
    }

    pub fn is_eligible_now(&self) -> bool {
        self.status() == EligibilityStatus::EligibleNow
    }

    pub fn award_amount(&self) -> Decimal {
        self.eligibility.award_amount(self.academic_year)
    }

    pub fn award_amount_with_topups(&self) -> Decimal {
        self.award_amount() + self.topups.iter().map(|topup| topup.award_amount).sum::<Decimal>()
    }

    pub fn ineligibility_reason(&self) -> Option<IneligibilityReason> {
        self.eligibility.ineligibility_reason(self.academic_year)
    }

    /// Assigns claimant and eligibility answers from a string-keyed map
    ///
    /// Claimant answer keys go to [`ClaimantAnswers`]; the rest go to the
    /// eligibility under its ignore-list rule. Nothing is applied if any
    /// key or value is rejected.
    pub fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), ClaimError> {
        self.ensure_not_submitted()?;

        let (claimant, eligibility): (Map<String, Value>, Map<String, Value>) = attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .partition(|(key, _)| ClaimantAnswers::is_field(key));

        let mut staged = self.clone();
        staged.answers.merge(&claimant)?;
        staged.eligibility.assign_attributes(&eligibility)?;
        *self = staged;
        Ok(())
    }

    /// Clears eligibility answers that depend on changed or forced attributes
    pub fn reset_dependent_answers(
        &mut self,
        forced: &[EligibilityAttribute],
    ) -> Result<Vec<EligibilityAttribute>, ClaimError> {
        self.ensure_not_submitted()?;
        let cleared = self.eligibility.reset_dependent_answers(forced);
        if !cleared.is_empty() {
            debug!(claim_id = %self.id, ?cleared, "Cleared dependent answers");
        }
        Ok(cleared)
    }

    /// Forgets tracked changes once the record has been persisted
    pub fn clear_changes(&mut self) {
        self.eligibility.clear_changes();
    }

    /// Stamps the award and policy options and marks the record submitted
    pub(crate) fn submit(
        &mut self,
        policy_options_provided: Vec<PolicyOption>,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        self.ensure_not_submitted()?;
        if !self.is_eligible_now() {
            return Err(ClaimError::NotEligible(self.policy()));
        }

        let award_amount = self.award_amount();
        self.eligibility.stamp_award_amount(award_amount);
        self.policy_options_provided = policy_options_provided;
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Puts a submitted claim on hold, blocking decisions
    pub fn hold(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.ensure_submitted()?;
        self.held = true;
        self.updated_at = now;
        info!(claim_id = %self.id, "Claim put on hold");
        Ok(())
    }

    pub fn unhold(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.ensure_submitted()?;
        self.held = false;
        self.updated_at = now;
        info!(claim_id = %self.id, "Claim taken off hold");
        Ok(())
    }

    /// Records the payroll payment an approved claim was paid in
    pub fn record_payment(&mut self, payment_id: PaymentId, now: DateTime<Utc>) -> Result<(), ClaimError> {
        let approved = self
            .active_decision()
            .is_some_and(|decision| decision.result == DecisionResult::Approved);
        if !approved {
            return Err(ClaimError::NotPayable(self.id));
        }

        self.payment_id = Some(payment_id);
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the award amount of a submitted early-career or levelling up premium claim
    pub fn amend_award_amount(
        &mut self,
        amount: Decimal,
        max: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        self.ensure_submitted()?;
        let policy = self.policy();
        if !policy.award_amount_editable() {
            return Err(ClaimError::AwardAmountNotEditable(policy));
        }
        if amount < Decimal::ZERO || amount > max {
            return Err(ClaimError::AwardAmountOutOfRange { amount, max });
        }

        let previous = self.award_amount();
        self.eligibility.stamp_award_amount(amount);
        self.updated_at = now;
        info!(claim_id = %self.id, %previous, %amount, "Award amount amended");
        Ok(())
    }

    fn ensure_not_submitted(&self) -> Result<(), ClaimError> {
        if self.is_submitted() {
            return Err(ClaimError::AlreadySubmitted(self.id));
        }
        Ok(())
    }

    pub(crate) fn ensure_submitted(&self) -> Result<(), ClaimError> {
        if !self.is_submitted() {
            return Err(ClaimError::NotSubmitted(self.id));
        }
        Ok(())
    }
}

fn generate_reference() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_new_record() {
        let record = ClaimRecord::new(Policy::StudentLoans, AcademicYear::new(2022), Utc::now());
        assert_eq!(record.policy(), Policy::StudentLoans);
        assert_eq!(record.reference.len(), 8);
        assert!(record.reference.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!record.is_submitted());
        assert_eq!(record.status(), EligibilityStatus::Undetermined);
    }

    #[test]
    fn test_assign_splits_claimant_and_eligibility_answers() {
        let mut record = ClaimRecord::new(Policy::StudentLoans, AcademicYear::new(2022), Utc::now());
        record
            .assign_attributes(&object(json!({
                "first_name": "Jo",
                "taught_eligible_subjects": true,
            })))
            .unwrap();

        assert_eq!(record.answers.first_name.as_deref(), Some("Jo"));
        assert_eq!(
            record.eligibility.as_student_loans().unwrap().taught_eligible_subjects,
            Some(true)
        );
    }

    #[test]
    fn test_assign_is_all_or_nothing() {
        let mut record = ClaimRecord::new(Policy::StudentLoans, AcademicYear::new(2022), Utc::now());
        let result = record.assign_attributes(&object(json!({
            "first_name": "Jo",
            "eligible_itt_subject": "mathematics",
        })));

        assert!(matches!(result, Err(ClaimError::Eligibility(_))));
        assert_eq!(record.answers.first_name, None);
    }

    #[test]
    fn test_amend_requires_submission() {
        let mut record = ClaimRecord::new(Policy::EarlyCareerPayments, AcademicYear::new(2022), Utc::now());
        let result = record.amend_award_amount(Decimal::ONE, Decimal::TEN, Utc::now());
        assert!(matches!(result, Err(ClaimError::NotSubmitted(_))));
    }
}

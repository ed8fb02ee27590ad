//! Claim Aggregate
//!
//! A claimant journey owns one claim record per policy it offers. The
//! combined journey keeps an early-career and a levelling up premium record
//! in lock-step until the claimant submits, at which point the aggregate
//! resolves down to the single record that was claimed.
//!
//! # Invariants
//!
//! - The aggregate always holds at least one record
//! - No two records share a policy
//! - Records are kept in policy order
//! - Submitting either commits the stamped winner and every deletion, or
//!   leaves the aggregate exactly as it was

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

use core_kernel::{AcademicYear, ClaimId};
use domain_eligibility::subject_eligibility::set_a_reminder;
use domain_eligibility::{
    Eligibility, EligibilityAttribute, EligibilityCheck, EligibilityStatus, Journey, Policy,
};

use crate::answers::ClaimantAnswers;
use crate::claim::{ClaimRecord, PolicyOption};
use crate::claim_like::ClaimLike;
use crate::error::ClaimError;
use crate::ports::{ClaimStore, ClaimTransaction, PolicyConfigurationProvider};

/// Policy whose record is main in a combined journey until one is selected
pub const DEFAULT_COMBINED_POLICY: Policy = Policy::EarlyCareerPayments;

/// One or more claim records sharing a claimant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimAggregate {
    records: Vec<ClaimRecord>,
    /// Policy the claimant chose, once a combined journey has resolved
    selected_policy: Option<Policy>,
}

impl ClaimAggregate {
    /// Wraps existing records
    ///
    /// # Errors
    ///
    /// `EmptyAggregate` for no records, `DuplicatePolicy` when two records
    /// share a policy and `PolicyNotInClaim` when the selected policy has no
    /// record.
    pub fn new(mut records: Vec<ClaimRecord>, selected_policy: Option<Policy>) -> Result<Self, ClaimError> {
        if records.is_empty() {
            return Err(ClaimError::EmptyAggregate);
        }

        records.sort_by_key(|record| record.policy());
        if let Some(pair) = records.windows(2).find(|pair| pair[0].policy() == pair[1].policy()) {
            return Err(ClaimError::DuplicatePolicy(pair[0].policy()));
        }

        let aggregate = Self { records, selected_policy: None };
        match selected_policy {
            Some(policy) if aggregate.for_policy(policy).is_none() => Err(ClaimError::PolicyNotInClaim(policy)),
            _ => Ok(Self { selected_policy, ..aggregate }),
        }
    }

    /// Starts a journey with one blank record per policy it offers
    ///
    /// # Errors
    ///
    /// Configuration errors when the journey's policies do not share one
    /// configured academic year.
    pub fn start(
        journey: Journey,
        config: &dyn PolicyConfigurationProvider,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        let academic_year = resolve_academic_year(journey.policies(), config)?;
        let records = journey
            .policies()
            .iter()
            .map(|policy| ClaimRecord::new(*policy, academic_year, now))
            .collect();

        debug!(%journey, %academic_year, "Started claim");
        Self::new(records, None)
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    pub fn for_policy(&self, policy: Policy) -> Option<&ClaimRecord> {
        self.records.iter().find(|record| record.policy() == policy)
    }

    pub fn policies(&self) -> Vec<Policy> {
        self.records.iter().map(ClaimRecord::policy).collect()
    }

    pub fn selected_policy(&self) -> Option<Policy> {
        self.selected_policy
    }

    /// Records the claimant's choice of policy
    pub fn select_policy(&mut self, policy: Policy) -> Result<(), ClaimError> {
        if self.for_policy(policy).is_none() {
            return Err(ClaimError::PolicyNotInClaim(policy));
        }
        self.selected_policy = Some(policy);
        Ok(())
    }

    /// The record reads are forwarded to
    ///
    /// A single record is always main. Otherwise the selected policy's
    /// record is main, and failing that the default combined policy's.
    ///
    /// # Errors
    ///
    /// `UnselectablePolicy` when none of these rules apply.
    pub fn main_record(&self) -> Result<&ClaimRecord, ClaimError> {
        let index = self.main_index()?;
        Ok(&self.records[index])
    }

    pub fn main_policy(&self) -> Result<Policy, ClaimError> {
        self.main_record().map(ClaimRecord::policy)
    }

    fn main_index(&self) -> Result<usize, ClaimError> {
        if self.records.len() == 1 {
            return Ok(0);
        }

        let policy = match self.selected_policy {
            Some(policy) => policy,
            None if self.records.iter().any(|record| record.policy().is_combinable()) => DEFAULT_COMBINED_POLICY,
            None => return Err(ClaimError::UnselectablePolicy),
        };

        self.records
            .iter()
            .position(|record| record.policy() == policy)
            .ok_or(ClaimError::UnselectablePolicy)
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Status across every member
    ///
    /// Eligible now or later if any member is. Ineligible only once every
    /// member is.
    pub fn eligibility_status(&self) -> EligibilityStatus {
        let statuses: Vec<EligibilityStatus> = self.records.iter().map(ClaimRecord::status).collect();
        let best = statuses
            .iter()
            .copied()
            .min_by_key(EligibilityStatus::precedence)
            .unwrap_or(EligibilityStatus::Undetermined);

        match best {
            EligibilityStatus::EligibleNow | EligibilityStatus::EligibleLater => best,
            _ if statuses.iter().all(|status| *status == EligibilityStatus::Ineligible) => {
                EligibilityStatus::Ineligible
            }
            _ => EligibilityStatus::Undetermined,
        }
    }

    /// Members eligible now, largest award first, then by display name
    pub fn eligible_now_and_sorted(&self) -> Vec<&ClaimRecord> {
        let mut eligible: Vec<&ClaimRecord> =
            self.records.iter().filter(|record| record.is_eligible_now()).collect();
        eligible.sort_by(|a, b| {
            b.award_amount()
                .cmp(&a.award_amount())
                .then_with(|| a.policy().short_name().cmp(b.policy().short_name()))
        });
        eligible
    }

    /// Attributes a claimant may revisit after reaching the check-answers page
    pub fn editable_attributes(&self) -> Vec<EligibilityAttribute> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .flat_map(|record| record.eligibility.editable_attributes().iter().copied())
            .filter(|attribute| seen.insert(*attribute))
            .collect()
    }

    /// Eligibility of the first member, in policy order, that is not ineligible
    pub fn preferred_eligibility(&self) -> Option<&Eligibility> {
        self.records
            .iter()
            .find(|record| record.status() != EligibilityStatus::Ineligible)
            .map(|record| &record.eligibility)
    }

    // ========================================================================
    // Academic year and reminders
    // ========================================================================

    /// The one academic year every member policy is configured for
    ///
    /// # Errors
    ///
    /// `MissingPolicyAcademicYear` when a policy has no year configured and
    /// `AmbiguousPolicyAcademicYear` when the members disagree.
    pub fn policy_academic_year(&self, config: &dyn PolicyConfigurationProvider) -> Result<AcademicYear, ClaimError> {
        resolve_academic_year(&self.policies(), config)
    }

    /// Whether the claimant can ask to be reminded when claims next open
    pub fn reminder_eligible(&self, config: &dyn PolicyConfigurationProvider) -> Result<bool, ClaimError> {
        let policy_year = self.policy_academic_year(config)?;
        let itt_academic_year = self.main_record()?.eligibility.itt_academic_year();
        Ok(set_a_reminder(policy_year, itt_academic_year))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Applies answers to the main record only
    pub fn apply_answers(&mut self, attributes: &Map<String, Value>) -> Result<(), ClaimError> {
        let index = self.main_index()?;
        self.records[index].assign_attributes(attributes)
    }

    /// Applies `work` to a copy of every member, keeping the copies only if all succeed
    fn broadcast<F>(&mut self, mut work: F) -> Result<(), ClaimError>
    where
        F: FnMut(&mut ClaimRecord) -> Result<(), ClaimError>,
    {
        let mut staged = self.records.clone();
        for record in staged.iter_mut() {
            work(record)?;
        }
        self.records = staged;
        Ok(())
    }

    /// Submits one policy and discards every other member
    ///
    /// The winner is stamped with the award amount and, for combined
    /// journeys, every policy the claimant was eligible for now. Saving the
    /// winner and deleting the rest happen in one store transaction; the
    /// aggregate is only changed once that transaction commits.
    ///
    /// # Errors
    ///
    /// - `PolicyNotInClaim` when `policy` has no record
    /// - `UnselectablePolicy` when no policy is given and none can be resolved
    /// - `NotEligible` when the chosen record is not eligible now
    /// - `Store` when the transaction fails
    #[instrument(skip(self, store), fields(policies = ?self.policies()))]
    pub fn submit(
        &mut self,
        policy: Option<Policy>,
        store: &dyn ClaimStore,
        now: DateTime<Utc>,
    ) -> Result<&ClaimRecord, ClaimError> {
        let policy = match policy {
            Some(policy) => policy,
            None => self.main_policy()?,
        };
        let winner = self.for_policy(policy).ok_or(ClaimError::PolicyNotInClaim(policy))?;

        let options = if policy.is_combinable() {
            self.eligible_now_and_sorted()
                .into_iter()
                .map(|record| PolicyOption {
                    policy: record.policy(),
                    award_amount: record.award_amount(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut submitted = winner.clone();
        submitted.submit(options, now)?;

        let discarded: Vec<ClaimId> = self
            .records
            .iter()
            .filter(|record| record.id != submitted.id)
            .map(|record| record.id)
            .collect();

        store.transaction(&mut |tx: &mut dyn ClaimTransaction| {
            tx.save(&submitted)?;
            for id in &discarded {
                tx.delete(*id)?;
            }
            Ok(())
        })?;

        submitted.clear_changes();
        info!(
            claim_id = %submitted.id,
            reference = %submitted.reference,
            %policy,
            discarded = discarded.len(),
            "Claim submitted"
        );

        self.records = vec![submitted];
        self.selected_policy = Some(policy);
        Ok(&self.records[0])
    }
}

impl ClaimLike for ClaimAggregate {
    fn policy(&self) -> Result<Policy, ClaimError> {
        self.main_policy()
    }

    fn academic_year(&self) -> Result<AcademicYear, ClaimError> {
        Ok(self.main_record()?.academic_year)
    }

    fn answers(&self) -> Result<&ClaimantAnswers, ClaimError> {
        Ok(&self.main_record()?.answers)
    }

    fn eligibility(&self) -> Result<&Eligibility, ClaimError> {
        Ok(&self.main_record()?.eligibility)
    }

    fn eligibility_status(&self) -> EligibilityStatus {
        ClaimAggregate::eligibility_status(self)
    }

    fn award_amount(&self) -> Result<Decimal, ClaimError> {
        Ok(self.main_record()?.award_amount())
    }

    fn is_submitted(&self) -> bool {
        self.records.iter().any(ClaimRecord::is_submitted)
    }

    fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), ClaimError> {
        self.broadcast(|record| record.assign_attributes(attributes))
    }

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Result<(), ClaimError> {
        self.broadcast(|record| record.reset_dependent_answers(forced).map(|_| ()))
    }

    fn save(&mut self, store: &dyn ClaimStore) -> Result<(), ClaimError> {
        let records = &self.records;
        store.transaction(&mut |tx: &mut dyn ClaimTransaction| records.iter().try_for_each(|record| tx.save(record)))?;

        for record in self.records.iter_mut() {
            record.clear_changes();
        }
        Ok(())
    }
}

fn resolve_academic_year(
    policies: &[Policy],
    config: &dyn PolicyConfigurationProvider,
) -> Result<AcademicYear, ClaimError> {
    let mut years = BTreeSet::new();
    for policy in policies {
        let year = config
            .current_academic_year(*policy)
            .ok_or(ClaimError::MissingPolicyAcademicYear(*policy))?;
        years.insert(year);
    }

    let mut iter = years.iter();
    match (iter.next(), iter.next()) {
        (Some(year), None) => Ok(*year),
        (None, _) => Err(ClaimError::EmptyAggregate),
        (Some(_), Some(_)) => Err(ClaimError::AmbiguousPolicyAcademicYear {
            years: years.into_iter().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_and_duplicates() {
        assert!(matches!(ClaimAggregate::new(Vec::new(), None), Err(ClaimError::EmptyAggregate)));

        let year = AcademicYear::new(2022);
        let records = vec![
            ClaimRecord::new(Policy::StudentLoans, year, Utc::now()),
            ClaimRecord::new(Policy::StudentLoans, year, Utc::now()),
        ];
        assert!(matches!(
            ClaimAggregate::new(records, None),
            Err(ClaimError::DuplicatePolicy(Policy::StudentLoans))
        ));
    }

    #[test]
    fn test_main_record_defaults_to_early_career_payments() {
        let year = AcademicYear::new(2022);
        let records = vec![
            ClaimRecord::new(Policy::LevellingUpPremiumPayments, year, Utc::now()),
            ClaimRecord::new(Policy::EarlyCareerPayments, year, Utc::now()),
        ];
        let mut aggregate = ClaimAggregate::new(records, None).unwrap();

        assert_eq!(aggregate.main_policy().unwrap(), Policy::EarlyCareerPayments);
        assert_eq!(
            aggregate.policies(),
            vec![Policy::EarlyCareerPayments, Policy::LevellingUpPremiumPayments]
        );

        aggregate.select_policy(Policy::LevellingUpPremiumPayments).unwrap();
        assert_eq!(aggregate.main_policy().unwrap(), Policy::LevellingUpPremiumPayments);
    }

    #[test]
    fn test_main_record_unselectable_without_combinable_policy() {
        let year = AcademicYear::new(2022);
        let aggregate = ClaimAggregate {
            records: vec![
                ClaimRecord::new(Policy::StudentLoans, year, Utc::now()),
                ClaimRecord::new(Policy::StudentLoans, year, Utc::now()),
            ],
            selected_policy: None,
        };
        assert!(matches!(aggregate.main_record(), Err(ClaimError::UnselectablePolicy)));
    }
}

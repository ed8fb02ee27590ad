//! Early-career payments eligibility
//!
//! Eligibility is driven by the award table: a claimant is eligible now when
//! their subject and training year match exactly one entry for the claim
//! year and no hard ineligibility predicate fires, and eligible later when a
//! matching entry exists for a later claim year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::AcademicYear;

use crate::attributes::{EligibilityAnswer, EligibilityAttribute};
use crate::award_table::{AwardEntry, AwardTable, CohortKey, EXCLUDED_ITT_COHORTS};
use crate::cohort::CohortAnswers;
use crate::eligibility::{transitive_dependents, Dependencies, EligibilityCheck};
use crate::error::EligibilityError;
use crate::policy::Policy;
use crate::status::{EligibilityStatus, IneligibilityReason};
use crate::subject::{IttAcademicYear, IttSubject};
use crate::subject_eligibility::current_and_future_subjects;

/// Early-career payments eligibility answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarlyCareerPaymentsEligibility {
    /// Answers to the combined journey's questions
    pub answers: CohortAnswers,
    /// Award amount stamped at submission or by amendment
    award_amount: Option<Decimal>,
    #[serde(skip)]
    changed: BTreeSet<EligibilityAttribute>,
}

impl EarlyCareerPaymentsEligibility {
    pub const DEPENDENCIES: Dependencies = &[
        (
            EligibilityAttribute::EmployedAsSupplyTeacher,
            &[
                EligibilityAttribute::HasEntireTermContract,
                EligibilityAttribute::EmployedDirectly,
            ],
        ),
        (
            EligibilityAttribute::Qualification,
            &[
                EligibilityAttribute::EligibleIttSubject,
                EligibilityAttribute::TeachingSubjectNow,
            ],
        ),
        (
            EligibilityAttribute::EligibleIttSubject,
            &[EligibilityAttribute::TeachingSubjectNow],
        ),
        (
            EligibilityAttribute::IttAcademicYear,
            &[EligibilityAttribute::EligibleIttSubject],
        ),
    ];

    /// Levelling up premium only fields posted to both claims in a combined journey
    pub const IGNORED_ATTRIBUTES: &'static [&'static str] = &["eligible_degree_subject"];

    pub const EDITABLE_ATTRIBUTES: &'static [EligibilityAttribute] = &CohortAnswers::ATTRIBUTES;

    pub fn new(answers: CohortAnswers) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    fn table() -> &'static AwardTable {
        AwardTable::early_career_payments()
    }

    fn cohort(&self) -> Option<(IttSubject, AcademicYear)> {
        let subject = self.answers.eligible_itt_subject?;
        let itt_year = self.answers.itt_academic_year?.year()?;
        Some((subject, itt_year))
    }

    /// Entries matching the claimant's cohort in the claim year
    pub fn exact_matches(&self, claim_year: AcademicYear) -> Vec<&'static AwardEntry> {
        match self.cohort() {
            Some((subject, itt_year)) => {
                Self::table().exact(CohortKey::new(subject, itt_year, claim_year))
            }
            None => Vec::new(),
        }
    }

    /// Entries matching the claimant's cohort in any claim year
    pub fn cohort_matches(&self) -> Vec<&'static AwardEntry> {
        match self.cohort() {
            Some((subject, itt_year)) => Self::table().partial_current(subject, itt_year),
            None => Vec::new(),
        }
    }

    /// Entries for the claimant's cohort in claim years after the given one
    pub fn eligible_later(&self, claim_year: AcademicYear) -> Vec<&'static AwardEntry> {
        self.cohort_matches()
            .into_iter()
            .filter(|entry| entry.key.claim_year > claim_year)
            .collect()
    }

    /// Training year of the first entry for the claimant's subject in the claim year
    pub fn first_eligible_itt_academic_year(&self, claim_year: AcademicYear) -> Option<AcademicYear> {
        let subject = self.answers.eligible_itt_subject?;
        Self::table()
            .partial_first(subject, claim_year)
            .map(|entry| entry.key.itt_year)
    }

    fn ineligible_current_school(&self) -> bool {
        self.answers
            .current_school
            .as_ref()
            .is_some_and(|school| !school.eligible_for_early_career_payments)
    }

    fn itt_subject_ineligible(&self, claim_year: AcademicYear) -> bool {
        let Some(subject) = self.answers.eligible_itt_subject else {
            return false;
        };

        // Without a usable training year the list is unknown, but "none of
        // the above" can still be ruled out.
        let subjects = self
            .answers
            .itt_academic_year
            .map(|itt_year| current_and_future_subjects(Policy::EarlyCareerPayments, claim_year, itt_year));
        match subjects {
            Some(Ok(subjects)) => !subjects.contains(&subject),
            _ => self.answers.itt_subject_none_of_the_above(),
        }
    }

    fn ineligible_cohort(&self, claim_year: AcademicYear) -> bool {
        if self
            .answers
            .itt_academic_year
            .is_some_and(|itt_year| EXCLUDED_ITT_COHORTS.contains(&itt_year))
        {
            return true;
        }
        if self.answers.without_cohort() || !self.eligible_later(claim_year).is_empty() {
            return false;
        }
        self.exact_matches(claim_year).is_empty()
    }

    fn generic_ineligibility(&self, claim_year: AcademicYear) -> bool {
        self.answers.no_entire_term_contract()
            || self.answers.not_employed_directly()
            || self.answers.poor_performance()
            || self.ineligible_cohort(claim_year)
    }

    /// True if any hard ineligibility predicate fires
    fn hard_predicate_fires(&self, claim_year: AcademicYear) -> bool {
        // Any trainee is blocked from claiming now. An award entry in a later
        // year can still make them eligible later.
        self.answers.trainee_teacher()
            || self.ineligible_current_school()
            || self.generic_ineligibility(claim_year)
            || self.itt_subject_ineligible(claim_year)
            || self.answers.not_teaching_now_in_eligible_itt_subject()
    }
}

impl EligibilityCheck for EarlyCareerPaymentsEligibility {
    fn policy(&self) -> Policy {
        Policy::EarlyCareerPayments
    }

    fn status(&self, claim_year: AcademicYear) -> EligibilityStatus {
        if self.exact_matches(claim_year).len() == 1 && !self.hard_predicate_fires(claim_year) {
            EligibilityStatus::EligibleNow
        } else if !self.eligible_later(claim_year).is_empty() {
            EligibilityStatus::EligibleLater
        } else if self.hard_predicate_fires(claim_year) {
            EligibilityStatus::Ineligible
        } else {
            EligibilityStatus::Undetermined
        }
    }

    fn award_amount(&self, claim_year: AcademicYear) -> Decimal {
        if let Some(amount) = self.award_amount {
            return amount;
        }
        let Some(school) = self.answers.current_school.as_ref() else {
            return Decimal::ZERO;
        };

        let entry = self
            .exact_matches(claim_year)
            .first()
            .copied()
            .or_else(|| self.cohort_matches().first().copied());
        entry
            .map(|entry| entry.amount(school.eligible_for_early_career_payments_as_uplift))
            .unwrap_or(Decimal::ZERO)
    }

    fn ineligibility_reason(&self, claim_year: AcademicYear) -> Option<IneligibilityReason> {
        if self.status(claim_year) != EligibilityStatus::Ineligible {
            return None;
        }

        let checks = [
            (IneligibilityReason::GenericIneligibility, self.generic_ineligibility(claim_year)),
            (IneligibilityReason::IttSubjectNoneOfTheAbove, self.answers.itt_subject_none_of_the_above()),
            (IneligibilityReason::IttSubjectNotEligible, self.itt_subject_ineligible(claim_year)),
            (IneligibilityReason::IneligibleCurrentSchool, self.ineligible_current_school()),
            (
                IneligibilityReason::NotTeachingNowInEligibleIttSubject,
                self.answers.not_teaching_now_in_eligible_itt_subject(),
            ),
            (IneligibilityReason::TraineeTeacher, self.answers.trainee_teacher()),
        ];
        checks.into_iter().find(|(_, fires)| *fires).map(|(reason, _)| reason)
    }

    fn supported_attributes(&self) -> &'static [EligibilityAttribute] {
        &CohortAnswers::ATTRIBUTES
    }

    fn ignored_attributes(&self) -> &'static [&'static str] {
        Self::IGNORED_ATTRIBUTES
    }

    fn editable_attributes(&self) -> &'static [EligibilityAttribute] {
        Self::EDITABLE_ATTRIBUTES
    }

    fn assign(&mut self, answer: EligibilityAnswer) -> Result<(), EligibilityError> {
        let attribute = answer.attribute();
        match self.answers.apply(answer) {
            Ok(true) => {
                self.changed.insert(attribute);
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(answer) => Err(EligibilityError::UnknownAttributes {
                keys: vec![answer.attribute().as_str().to_string()],
            }),
        }
    }

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Vec<EligibilityAttribute> {
        let governing = self.changed.iter().chain(forced).copied().collect::<Vec<_>>();
        let mut cleared = Vec::new();
        for attribute in transitive_dependents(Self::DEPENDENCIES, governing) {
            if self.answers.clear(attribute) {
                self.changed.insert(attribute);
                cleared.push(attribute);
            }
        }
        cleared
    }

    fn changed_attributes(&self) -> &BTreeSet<EligibilityAttribute> {
        &self.changed
    }

    fn clear_changes(&mut self) {
        self.changed.clear();
    }

    fn stamped_award_amount(&self) -> Option<Decimal> {
        self.award_amount
    }

    fn stamp_award_amount(&mut self, amount: Decimal) {
        self.award_amount = Some(amount);
    }

    fn itt_academic_year(&self) -> Option<IttAcademicYear> {
        self.answers.itt_academic_year
    }

    fn eligible_later_year(&self, claim_year: AcademicYear) -> Option<AcademicYear> {
        self.eligible_later(claim_year)
            .first()
            .map(|entry| entry.key.claim_year)
    }
}

//! Student loan repayment eligibility

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::AcademicYear;

use crate::attributes::{clear, replace, EligibilityAnswer, EligibilityAttribute};
use crate::eligibility::{transitive_dependents, Dependencies, EligibilityCheck};
use crate::error::EligibilityError;
use crate::policy::Policy;
use crate::school::School;
use crate::status::{EligibilityStatus, IneligibilityReason};

/// Largest student loan repayment that can be claimed
pub const STUDENT_LOANS_MAX_AWARD: Decimal = dec!(5000);

/// When qualified teacher status was awarded relative to the policy cut-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QtsAwardYear {
    BeforeCutOffDate,
    OnOrAfterCutOffDate,
}

/// Where the claimant is employed now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Still at the school the claim is for
    ClaimSchool,
    /// Teaching at another school
    DifferentSchool,
    NoLongerTeaching,
}

/// Student loans eligibility answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentLoansEligibility {
    pub qts_award_year: Option<QtsAwardYear>,
    /// School the claimant taught at during the claim year
    pub claim_school: Option<School>,
    pub taught_eligible_subjects: Option<bool>,
    pub employment_status: Option<EmploymentStatus>,
    /// Answered only when employed at a different school
    pub current_school: Option<School>,
    pub had_leadership_position: Option<bool>,
    pub mostly_performed_leadership_duties: Option<bool>,
    /// Repayment made during the claim year, in pounds
    pub student_loan_repayment_amount: Option<Decimal>,
    award_amount: Option<Decimal>,
    #[serde(skip)]
    changed: BTreeSet<EligibilityAttribute>,
}

const SUPPORTED_ATTRIBUTES: [EligibilityAttribute; 8] = [
    EligibilityAttribute::QtsAwardYear,
    EligibilityAttribute::ClaimSchool,
    EligibilityAttribute::TaughtEligibleSubjects,
    EligibilityAttribute::EmploymentStatus,
    EligibilityAttribute::CurrentSchool,
    EligibilityAttribute::HadLeadershipPosition,
    EligibilityAttribute::MostlyPerformedLeadershipDuties,
    EligibilityAttribute::StudentLoanRepaymentAmount,
];

impl StudentLoansEligibility {
    pub const DEPENDENCIES: Dependencies = &[
        (
            EligibilityAttribute::ClaimSchool,
            &[EligibilityAttribute::TaughtEligibleSubjects],
        ),
        (
            EligibilityAttribute::EmploymentStatus,
            &[EligibilityAttribute::CurrentSchool],
        ),
        (
            EligibilityAttribute::HadLeadershipPosition,
            &[EligibilityAttribute::MostlyPerformedLeadershipDuties],
        ),
    ];

    pub const EDITABLE_ATTRIBUTES: &'static [EligibilityAttribute] =
        &[EligibilityAttribute::StudentLoanRepaymentAmount];

    /// School the claimant works at now
    ///
    /// Claimants still at the claim school are not asked again.
    pub fn current_school(&self) -> Option<&School> {
        match self.employment_status {
            Some(EmploymentStatus::ClaimSchool) => self.claim_school.as_ref(),
            Some(EmploymentStatus::DifferentSchool) => self.current_school.as_ref(),
            _ => None,
        }
    }

    fn ineligible_qts_award_year(&self) -> bool {
        self.qts_award_year == Some(QtsAwardYear::BeforeCutOffDate)
    }

    fn ineligible_claim_school(&self) -> bool {
        self.claim_school
            .as_ref()
            .is_some_and(|school| !school.eligible_for_student_loans)
    }

    fn employed_at_no_school(&self) -> bool {
        self.employment_status == Some(EmploymentStatus::NoLongerTeaching)
    }

    fn ineligible_current_school(&self) -> bool {
        self.current_school().is_some_and(|school| !school.state_funded)
    }

    fn not_taught_eligible_subjects(&self) -> bool {
        self.taught_eligible_subjects == Some(false)
    }

    fn mostly_performed_leadership_duties(&self) -> bool {
        self.mostly_performed_leadership_duties == Some(true)
    }

    fn reasons(&self) -> [(IneligibilityReason, bool); 6] {
        [
            (IneligibilityReason::IneligibleQtsAwardYear, self.ineligible_qts_award_year()),
            (IneligibilityReason::IneligibleClaimSchool, self.ineligible_claim_school()),
            (IneligibilityReason::EmployedAtNoSchool, self.employed_at_no_school()),
            (IneligibilityReason::IneligibleCurrentSchool, self.ineligible_current_school()),
            (IneligibilityReason::NotTaughtEligibleSubjects, self.not_taught_eligible_subjects()),
            (IneligibilityReason::PerformedLeadershipDuties, self.mostly_performed_leadership_duties()),
        ]
    }

    fn all_answered(&self) -> bool {
        let school_answered = match self.employment_status {
            Some(EmploymentStatus::DifferentSchool) => self.current_school.is_some(),
            Some(_) => true,
            None => false,
        };
        let leadership_answered = match self.had_leadership_position {
            Some(true) => self.mostly_performed_leadership_duties.is_some(),
            Some(false) => true,
            None => false,
        };

        self.qts_award_year.is_some()
            && self.claim_school.is_some()
            && self.taught_eligible_subjects.is_some()
            && school_answered
            && leadership_answered
    }

    fn validate_repayment_amount(amount: Option<Decimal>) -> Result<(), EligibilityError> {
        match amount {
            Some(amount) if amount < Decimal::ZERO || amount > STUDENT_LOANS_MAX_AWARD => {
                Err(EligibilityError::AwardAmountOutOfRange {
                    amount,
                    max: STUDENT_LOANS_MAX_AWARD,
                })
            }
            _ => Ok(()),
        }
    }
}

impl EligibilityCheck for StudentLoansEligibility {
    fn policy(&self) -> Policy {
        Policy::StudentLoans
    }

    fn status(&self, _claim_year: AcademicYear) -> EligibilityStatus {
        if self.reasons().iter().any(|(_, fires)| *fires) {
            EligibilityStatus::Ineligible
        } else if self.all_answered() {
            EligibilityStatus::EligibleNow
        } else {
            EligibilityStatus::Undetermined
        }
    }

    fn award_amount(&self, _claim_year: AcademicYear) -> Decimal {
        self.award_amount
            .or(self.student_loan_repayment_amount)
            .unwrap_or(Decimal::ZERO)
    }

    fn ineligibility_reason(&self, _claim_year: AcademicYear) -> Option<IneligibilityReason> {
        self.reasons()
            .into_iter()
            .find(|(_, fires)| *fires)
            .map(|(reason, _)| reason)
    }

    fn supported_attributes(&self) -> &'static [EligibilityAttribute] {
        &SUPPORTED_ATTRIBUTES
    }

    fn ignored_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    fn editable_attributes(&self) -> &'static [EligibilityAttribute] {
        Self::EDITABLE_ATTRIBUTES
    }

    fn assign(&mut self, answer: EligibilityAnswer) -> Result<(), EligibilityError> {
        use EligibilityAnswer as A;

        let attribute = answer.attribute();
        let changed = match answer {
            A::QtsAwardYear(value) => replace(&mut self.qts_award_year, value),
            A::ClaimSchool(value) => replace(&mut self.claim_school, value),
            A::TaughtEligibleSubjects(value) => replace(&mut self.taught_eligible_subjects, value),
            A::EmploymentStatus(value) => replace(&mut self.employment_status, value),
            A::CurrentSchool(value) => replace(&mut self.current_school, value),
            A::HadLeadershipPosition(value) => replace(&mut self.had_leadership_position, value),
            A::MostlyPerformedLeadershipDuties(value) => {
                replace(&mut self.mostly_performed_leadership_duties, value)
            }
            A::StudentLoanRepaymentAmount(value) => {
                Self::validate_repayment_amount(value)?;
                replace(&mut self.student_loan_repayment_amount, value)
            }
            other => {
                return Err(EligibilityError::UnknownAttributes {
                    keys: vec![other.attribute().as_str().to_string()],
                })
            }
        };
        if changed {
            self.changed.insert(attribute);
        }
        Ok(())
    }

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Vec<EligibilityAttribute> {
        let governing = self.changed.iter().chain(forced).copied().collect::<Vec<_>>();
        let mut cleared = Vec::new();
        for attribute in transitive_dependents(Self::DEPENDENCIES, governing) {
            let was_set = match attribute {
                EligibilityAttribute::TaughtEligibleSubjects => clear(&mut self.taught_eligible_subjects),
                EligibilityAttribute::CurrentSchool => clear(&mut self.current_school),
                EligibilityAttribute::MostlyPerformedLeadershipDuties => {
                    clear(&mut self.mostly_performed_leadership_duties)
                }
                _ => false,
            };
            if was_set {
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
}

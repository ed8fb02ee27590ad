//! The eligibility capability and the closed set of per-policy shapes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

use core_kernel::AcademicYear;

use crate::attributes::{EligibilityAnswer, EligibilityAttribute};
use crate::early_career::EarlyCareerPaymentsEligibility;
use crate::error::EligibilityError;
use crate::levelling_up::LevellingUpPremiumPaymentsEligibility;
use crate::policy::Policy;
use crate::status::{EligibilityStatus, IneligibilityReason};
use crate::student_loans::StudentLoansEligibility;
use crate::subject::IttAcademicYear;

/// Attribute dependency map: changing the key invalidates every listed dependent
pub type Dependencies = &'static [(EligibilityAttribute, &'static [EligibilityAttribute])];

/// Capabilities every policy eligibility shape provides
///
/// All derived values take the claim academic year explicitly; a shape
/// holds answers only and never caches a status.
pub trait EligibilityCheck {
    /// Policy this shape decides eligibility for
    fn policy(&self) -> Policy;

    /// Eligibility status for the claim year
    fn status(&self, claim_year: AcademicYear) -> EligibilityStatus;

    /// Award amount for the claim year, or the stamped amount if one was recorded
    fn award_amount(&self, claim_year: AcademicYear) -> Decimal;

    /// First reason in priority order, only when the status is ineligible
    fn ineligibility_reason(&self, claim_year: AcademicYear) -> Option<IneligibilityReason>;

    /// Attributes this shape accepts
    fn supported_attributes(&self) -> &'static [EligibilityAttribute];

    /// Keys from sibling policies' forms that may be skipped silently
    fn ignored_attributes(&self) -> &'static [&'static str];

    /// Attributes a service operator may change after submission
    fn editable_attributes(&self) -> &'static [EligibilityAttribute];

    /// Applies one supported answer
    fn assign(&mut self, answer: EligibilityAnswer) -> Result<(), EligibilityError>;

    /// Clears every dependent of a changed or forced attribute
    ///
    /// Dependents are followed transitively in a single call, so calling it
    /// again with the same changed set clears nothing new. Returns the
    /// attributes that were cleared.
    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Vec<EligibilityAttribute>;

    /// Attributes changed since the shape was last persisted
    fn changed_attributes(&self) -> &BTreeSet<EligibilityAttribute>;

    /// Forgets changes once the shape has been persisted
    fn clear_changes(&mut self);

    /// Award amount recorded at submission or by amendment
    fn stamped_award_amount(&self) -> Option<Decimal>;

    /// Records an award amount, overriding the computed one
    fn stamp_award_amount(&mut self, amount: Decimal);

    /// Training year, for policies that ask for one
    fn itt_academic_year(&self) -> Option<IttAcademicYear> {
        None
    }

    /// First later claim year in which the claimant becomes eligible
    fn eligible_later_year(&self, _claim_year: AcademicYear) -> Option<AcademicYear> {
        None
    }

    fn is_eligible_now(&self, claim_year: AcademicYear) -> bool {
        self.status(claim_year) == EligibilityStatus::EligibleNow
    }

    fn is_eligible_later(&self, claim_year: AcademicYear) -> bool {
        self.status(claim_year) == EligibilityStatus::EligibleLater
    }

    fn is_ineligible(&self, claim_year: AcademicYear) -> bool {
        self.status(claim_year) == EligibilityStatus::Ineligible
    }

    fn supports(&self, attribute: EligibilityAttribute) -> bool {
        self.supported_attributes().contains(&attribute)
    }

    /// Assigns answers from a string-keyed map
    ///
    /// Unknown keys are skipped only if every one of them is on the ignore
    /// list; otherwise nothing is applied and `UnknownAttributes` is returned.
    fn assign_attributes(&mut self, attributes: &Map<String, Value>) -> Result<(), EligibilityError>
    where
        Self: Sized + Clone,
    {
        let mut answers = Vec::with_capacity(attributes.len());
        let mut unknown = Vec::new();

        for (key, value) in attributes {
            match key.parse::<EligibilityAttribute>() {
                Ok(attribute) if self.supports(attribute) => {
                    answers.push(EligibilityAnswer::parse(attribute, value)?);
                }
                _ => unknown.push(key.clone()),
            }
        }

        check_unknown(self.policy(), self.ignored_attributes(), unknown)?;
        apply_all(self, answers)
    }

    /// Assigns typed answers under the same ignore-list rule as [`Self::assign_attributes`]
    fn assign_answers(&mut self, answers: Vec<EligibilityAnswer>) -> Result<(), EligibilityError>
    where
        Self: Sized + Clone,
    {
        let (supported, unsupported): (Vec<_>, Vec<_>) = answers
            .into_iter()
            .partition(|answer| self.supports(answer.attribute()));

        let unknown = unsupported
            .iter()
            .map(|answer| answer.attribute().as_str().to_string())
            .collect();
        check_unknown(self.policy(), self.ignored_attributes(), unknown)?;
        apply_all(self, supported)
    }
}

fn check_unknown(
    policy: Policy,
    ignored: &[&str],
    unknown: Vec<String>,
) -> Result<(), EligibilityError> {
    if unknown.is_empty() {
        return Ok(());
    }
    if unknown.iter().all(|key| ignored.contains(&key.as_str())) {
        debug!(%policy, keys = ?unknown, "Ignoring attributes from a sibling policy");
        return Ok(());
    }
    Err(EligibilityError::UnknownAttributes { keys: unknown })
}

fn apply_all<E>(shape: &mut E, answers: Vec<EligibilityAnswer>) -> Result<(), EligibilityError>
where
    E: EligibilityCheck + Clone,
{
    let mut staged = shape.clone();
    for answer in answers {
        staged.assign(answer)?;
    }
    *shape = staged;
    Ok(())
}

/// Every attribute that must be cleared when `governing` attributes change
///
/// Follows the dependency map to a fixed point.
pub(crate) fn transitive_dependents(
    dependencies: Dependencies,
    governing: impl IntoIterator<Item = EligibilityAttribute>,
) -> BTreeSet<EligibilityAttribute> {
    let mut governing: BTreeSet<EligibilityAttribute> = governing.into_iter().collect();
    let mut dependents = BTreeSet::new();

    loop {
        let before = dependents.len();
        for (attribute, attribute_dependents) in dependencies {
            if governing.contains(attribute) {
                dependents.extend(attribute_dependents.iter().copied());
            }
        }
        governing.extend(dependents.iter().copied());
        if dependents.len() == before {
            return dependents;
        }
    }
}

/// Eligibility of one claim, closed over the known policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Eligibility {
    EarlyCareerPayments(EarlyCareerPaymentsEligibility),
    LevellingUpPremiumPayments(LevellingUpPremiumPaymentsEligibility),
    StudentLoans(StudentLoansEligibility),
}

macro_rules! forward {
    ($self:ident, $shape:ident => $body:expr) => {
        match $self {
            Eligibility::EarlyCareerPayments($shape) => $body,
            Eligibility::LevellingUpPremiumPayments($shape) => $body,
            Eligibility::StudentLoans($shape) => $body,
        }
    };
}

impl Eligibility {
    /// Creates a blank eligibility for the policy
    pub fn for_policy(policy: Policy) -> Self {
        match policy {
            Policy::EarlyCareerPayments => {
                Eligibility::EarlyCareerPayments(EarlyCareerPaymentsEligibility::default())
            }
            Policy::LevellingUpPremiumPayments => Eligibility::LevellingUpPremiumPayments(
                LevellingUpPremiumPaymentsEligibility::default(),
            ),
            Policy::StudentLoans => Eligibility::StudentLoans(StudentLoansEligibility::default()),
        }
    }

    pub fn as_early_career_payments(&self) -> Option<&EarlyCareerPaymentsEligibility> {
        match self {
            Eligibility::EarlyCareerPayments(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_levelling_up_premium_payments(&self) -> Option<&LevellingUpPremiumPaymentsEligibility> {
        match self {
            Eligibility::LevellingUpPremiumPayments(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_student_loans(&self) -> Option<&StudentLoansEligibility> {
        match self {
            Eligibility::StudentLoans(shape) => Some(shape),
            _ => None,
        }
    }

    /// Returns true if the shape holds an answer for the attribute
    ///
    /// Attributes the shape does not support are never answered.
    pub fn is_answered(&self, attribute: EligibilityAttribute) -> bool {
        use EligibilityAttribute as K;

        match self {
            Eligibility::StudentLoans(shape) => match attribute {
                K::QtsAwardYear => shape.qts_award_year.is_some(),
                K::ClaimSchool => shape.claim_school.is_some(),
                K::TaughtEligibleSubjects => shape.taught_eligible_subjects.is_some(),
                K::EmploymentStatus => shape.employment_status.is_some(),
                K::CurrentSchool => shape.current_school().is_some(),
                K::HadLeadershipPosition => shape.had_leadership_position.is_some(),
                K::MostlyPerformedLeadershipDuties => shape.mostly_performed_leadership_duties.is_some(),
                K::StudentLoanRepaymentAmount => shape.student_loan_repayment_amount.is_some(),
                _ => false,
            },
            Eligibility::LevellingUpPremiumPayments(shape) if attribute == K::EligibleDegreeSubject => {
                shape.eligible_degree_subject.is_some()
            }
            Eligibility::EarlyCareerPayments(shape) => shape.answers.is_answered(attribute),
            Eligibility::LevellingUpPremiumPayments(shape) => shape.answers.is_answered(attribute),
        }
    }

    /// Shared answers of the combined journey shapes
    pub fn cohort_answers(&self) -> Option<&crate::cohort::CohortAnswers> {
        match self {
            Eligibility::EarlyCareerPayments(shape) => Some(&shape.answers),
            Eligibility::LevellingUpPremiumPayments(shape) => Some(&shape.answers),
            Eligibility::StudentLoans(_) => None,
        }
    }
}

impl EligibilityCheck for Eligibility {
    fn policy(&self) -> Policy {
        forward!(self, shape => shape.policy())
    }

    fn status(&self, claim_year: AcademicYear) -> EligibilityStatus {
        forward!(self, shape => shape.status(claim_year))
    }

    fn award_amount(&self, claim_year: AcademicYear) -> Decimal {
        forward!(self, shape => shape.award_amount(claim_year))
    }

    fn ineligibility_reason(&self, claim_year: AcademicYear) -> Option<IneligibilityReason> {
        forward!(self, shape => shape.ineligibility_reason(claim_year))
    }

    fn supported_attributes(&self) -> &'static [EligibilityAttribute] {
        forward!(self, shape => shape.supported_attributes())
    }

    fn ignored_attributes(&self) -> &'static [&'static str] {
        forward!(self, shape => shape.ignored_attributes())
    }

    fn editable_attributes(&self) -> &'static [EligibilityAttribute] {
        forward!(self, shape => shape.editable_attributes())
    }

    fn assign(&mut self, answer: EligibilityAnswer) -> Result<(), EligibilityError> {
        forward!(self, shape => shape.assign(answer))
    }

    fn reset_dependent_answers(&mut self, forced: &[EligibilityAttribute]) -> Vec<EligibilityAttribute> {
        forward!(self, shape => shape.reset_dependent_answers(forced))
    }

    fn changed_attributes(&self) -> &BTreeSet<EligibilityAttribute> {
        forward!(self, shape => shape.changed_attributes())
    }

    fn clear_changes(&mut self) {
        forward!(self, shape => shape.clear_changes())
    }

    fn stamped_award_amount(&self) -> Option<Decimal> {
        forward!(self, shape => shape.stamped_award_amount())
    }

    fn stamp_award_amount(&mut self, amount: Decimal) {
        forward!(self, shape => shape.stamp_award_amount(amount))
    }

    fn itt_academic_year(&self) -> Option<IttAcademicYear> {
        forward!(self, shape => shape.itt_academic_year())
    }

    fn eligible_later_year(&self, claim_year: AcademicYear) -> Option<AcademicYear> {
        forward!(self, shape => shape.eligible_later_year(claim_year))
    }
}

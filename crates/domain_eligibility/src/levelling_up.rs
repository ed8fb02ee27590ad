//! Levelling up premium payments eligibility
//!
//! Eligibility depends on the school's award for the claim year rather than
//! on an award table. Claimants who trained in none of the listed subjects
//! may still qualify through a relevant degree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::AcademicYear;

use crate::attributes::{replace, EligibilityAnswer, EligibilityAttribute};
use crate::cohort::CohortAnswers;
use crate::eligibility::{transitive_dependents, Dependencies, EligibilityCheck};
use crate::error::EligibilityError;
use crate::policy::Policy;
use crate::status::{EligibilityStatus, IneligibilityReason};
use crate::subject::{IttAcademicYear, IttSubject};
use crate::subject_eligibility::{
    current_and_future_subjects, policy_years, FINAL_COMBINED_POLICY_YEAR, LEVELLING_UP_PREMIUM_SUBJECTS,
};

/// Levelling up premium payments eligibility answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevellingUpPremiumPaymentsEligibility {
    /// Answers to the combined journey's questions
    pub answers: CohortAnswers,
    /// Whether the claimant holds a degree in an eligible subject
    pub eligible_degree_subject: Option<bool>,
    /// Award amount stamped at submission or by amendment
    award_amount: Option<Decimal>,
    #[serde(skip)]
    changed: BTreeSet<EligibilityAttribute>,
}

const SUPPORTED_ATTRIBUTES: [EligibilityAttribute; 12] = [
    EligibilityAttribute::NqtInAcademicYearAfterItt,
    EligibilityAttribute::CurrentSchool,
    EligibilityAttribute::EmployedAsSupplyTeacher,
    EligibilityAttribute::HasEntireTermContract,
    EligibilityAttribute::EmployedDirectly,
    EligibilityAttribute::SubjectToFormalPerformanceAction,
    EligibilityAttribute::SubjectToDisciplinaryAction,
    EligibilityAttribute::Qualification,
    EligibilityAttribute::EligibleIttSubject,
    EligibilityAttribute::TeachingSubjectNow,
    EligibilityAttribute::IttAcademicYear,
    EligibilityAttribute::EligibleDegreeSubject,
];

impl LevellingUpPremiumPaymentsEligibility {
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
            &[
                EligibilityAttribute::TeachingSubjectNow,
                EligibilityAttribute::EligibleDegreeSubject,
            ],
        ),
        (
            EligibilityAttribute::EligibleDegreeSubject,
            &[EligibilityAttribute::TeachingSubjectNow],
        ),
        (
            EligibilityAttribute::IttAcademicYear,
            &[EligibilityAttribute::EligibleIttSubject],
        ),
    ];

    pub const EDITABLE_ATTRIBUTES: &'static [EligibilityAttribute] = &SUPPORTED_ATTRIBUTES;

    pub fn new(answers: CohortAnswers) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    fn policy_not_running(&self, claim_year: AcademicYear) -> bool {
        policy_years(Policy::LevellingUpPremiumPayments)
            .map_or(true, |(first, last)| claim_year < first || claim_year > last)
    }

    fn school_eligible(&self, claim_year: AcademicYear) -> bool {
        self.answers
            .current_school
            .as_ref()
            .is_some_and(|school| school.eligible_for_levelling_up_premium(claim_year))
    }

    fn ineligible_current_school(&self, claim_year: AcademicYear) -> bool {
        self.answers.current_school.is_some() && !self.school_eligible(claim_year)
    }

    fn subjects(&self, claim_year: AcademicYear) -> Option<Result<Vec<IttSubject>, EligibilityError>> {
        self.answers.itt_academic_year.map(|itt_year| {
            current_and_future_subjects(Policy::LevellingUpPremiumPayments, claim_year, itt_year)
        })
    }

    /// True when the subject answer alone rules the claimant out
    ///
    /// "None of the above" only rules them out once they have said they
    /// hold no eligible degree.
    fn itt_subject_ineligible(&self, claim_year: AcademicYear) -> bool {
        let Some(subject) = self.answers.eligible_itt_subject else {
            return false;
        };

        match self.subjects(claim_year) {
            None => {
                subject == IttSubject::NoneOfTheAbove || !LEVELLING_UP_PREMIUM_SUBJECTS.contains(&subject)
            }
            Some(Ok(subjects)) if subjects.contains(&subject) => false,
            Some(Ok(_)) if subject == IttSubject::NoneOfTheAbove => {
                self.eligible_degree_subject == Some(false)
            }
            Some(Ok(_)) => true,
            Some(Err(_)) => subject == IttSubject::NoneOfTheAbove,
        }
    }

    fn subject_qualifies(&self, claim_year: AcademicYear) -> bool {
        let Some(subject) = self.answers.eligible_itt_subject else {
            return false;
        };
        match self.subjects(claim_year) {
            Some(Ok(subjects)) if subjects.contains(&subject) => true,
            _ => subject == IttSubject::NoneOfTheAbove && self.eligible_degree_subject == Some(true),
        }
    }

    /// A trainee becomes eligible in a later year at an eligible school in a listed subject
    pub fn eligible_later(&self, claim_year: AcademicYear) -> bool {
        self.answers.trainee_teacher()
            && self.school_eligible(claim_year)
            && self
                .answers
                .eligible_itt_subject
                .is_some_and(|subject| LEVELLING_UP_PREMIUM_SUBJECTS.contains(&subject))
            && claim_year < FINAL_COMBINED_POLICY_YEAR
    }

    fn trainee_without_future(&self, claim_year: AcademicYear) -> bool {
        self.answers.trainee_teacher()
            && self.answers.eligible_itt_subject.is_some()
            && !self.eligible_later(claim_year)
    }

    fn generic_ineligibility(&self, claim_year: AcademicYear) -> bool {
        self.policy_not_running(claim_year)
            || self.answers.no_entire_term_contract()
            || self.answers.not_employed_directly()
            || self.answers.poor_performance()
    }

    fn hard_predicate_fires(&self, claim_year: AcademicYear) -> bool {
        self.generic_ineligibility(claim_year)
            || self.ineligible_current_school(claim_year)
            || self.itt_subject_ineligible(claim_year)
            || self.answers.not_teaching_now_in_eligible_itt_subject()
            || self.trainee_without_future(claim_year)
    }

    fn eligible_now(&self, claim_year: AcademicYear) -> bool {
        let answers = &self.answers;

        !answers.trainee_teacher()
            && answers.nqt_in_academic_year_after_itt == Some(true)
            && !self.policy_not_running(claim_year)
            && self.school_eligible(claim_year)
            && answers.employment_answered_favourably()
            && answers.performance_answered_favourably()
            && answers.qualification.is_some()
            && answers.itt_academic_year.is_some()
            && self.subject_qualifies(claim_year)
            && answers.teaching_subject_now == Some(true)
            && !self.hard_predicate_fires(claim_year)
    }
}

impl EligibilityCheck for LevellingUpPremiumPaymentsEligibility {
    fn policy(&self) -> Policy {
        Policy::LevellingUpPremiumPayments
    }

    fn status(&self, claim_year: AcademicYear) -> EligibilityStatus {
        if self.eligible_now(claim_year) {
            EligibilityStatus::EligibleNow
        } else if self.eligible_later(claim_year) {
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
        self.answers
            .current_school
            .as_ref()
            .and_then(|school| school.levelling_up_premium_award(claim_year))
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
            (IneligibilityReason::IneligibleCurrentSchool, self.ineligible_current_school(claim_year)),
            (
                IneligibilityReason::NotTeachingNowInEligibleIttSubject,
                self.answers.not_teaching_now_in_eligible_itt_subject(),
            ),
            (IneligibilityReason::TraineeTeacher, self.trainee_without_future(claim_year)),
        ];
        checks.into_iter().find(|(_, fires)| *fires).map(|(reason, _)| reason)
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
        let attribute = answer.attribute();
        let changed = match answer {
            EligibilityAnswer::EligibleDegreeSubject(value) => {
                replace(&mut self.eligible_degree_subject, value)
            }
            other => self.answers.apply(other).map_err(|answer| EligibilityError::UnknownAttributes {
                keys: vec![answer.attribute().as_str().to_string()],
            })?,
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
                EligibilityAttribute::EligibleDegreeSubject => {
                    crate::attributes::clear(&mut self.eligible_degree_subject)
                }
                other => self.answers.clear(other),
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

    fn itt_academic_year(&self) -> Option<IttAcademicYear> {
        self.answers.itt_academic_year
    }

    fn eligible_later_year(&self, claim_year: AcademicYear) -> Option<AcademicYear> {
        self.eligible_later(claim_year).then(|| claim_year.next())
    }
}

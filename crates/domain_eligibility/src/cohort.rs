//! Answers shared by the early-career and levelling up premium shapes

use serde::{Deserialize, Serialize};

use crate::attributes::{replace, EligibilityAnswer, EligibilityAttribute};
use crate::school::School;
use crate::subject::{IttAcademicYear, IttSubject, Qualification};

/// Answers to the combined journey's eligibility questions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortAnswers {
    /// Whether the claimant started as a newly qualified teacher the year after training
    pub nqt_in_academic_year_after_itt: Option<bool>,
    /// School the claimant currently teaches at
    pub current_school: Option<School>,
    pub employed_as_supply_teacher: Option<bool>,
    pub has_entire_term_contract: Option<bool>,
    pub employed_directly: Option<bool>,
    pub subject_to_formal_performance_action: Option<bool>,
    pub subject_to_disciplinary_action: Option<bool>,
    /// Route into teaching
    pub qualification: Option<Qualification>,
    /// Subject of initial teacher training
    pub eligible_itt_subject: Option<IttSubject>,
    /// Whether at least half of contracted hours are spent teaching eligible subjects
    pub teaching_subject_now: Option<bool>,
    /// Year initial teacher training was completed
    pub itt_academic_year: Option<IttAcademicYear>,
}

impl CohortAnswers {
    /// Attributes these answers hold
    pub const ATTRIBUTES: [EligibilityAttribute; 11] = [
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
    ];

    /// A claimant who is still training answers "no" to the NQT question
    pub fn trainee_teacher(&self) -> bool {
        self.nqt_in_academic_year_after_itt == Some(false)
    }

    pub fn supply_teacher(&self) -> bool {
        self.employed_as_supply_teacher == Some(true)
    }

    pub fn no_entire_term_contract(&self) -> bool {
        self.supply_teacher() && self.has_entire_term_contract == Some(false)
    }

    pub fn not_employed_directly(&self) -> bool {
        self.supply_teacher() && self.employed_directly == Some(false)
    }

    pub fn poor_performance(&self) -> bool {
        self.subject_to_formal_performance_action == Some(true)
            || self.subject_to_disciplinary_action == Some(true)
    }

    pub fn not_teaching_now_in_eligible_itt_subject(&self) -> bool {
        self.teaching_subject_now == Some(false)
    }

    pub fn itt_subject_none_of_the_above(&self) -> bool {
        self.eligible_itt_subject == Some(IttSubject::NoneOfTheAbove)
    }

    /// True until both subject and training year are known
    pub fn without_cohort(&self) -> bool {
        self.eligible_itt_subject.is_none() || self.itt_academic_year.is_none()
    }

    /// True once the employment questions clear the claimant
    pub fn employment_answered_favourably(&self) -> bool {
        match self.employed_as_supply_teacher {
            Some(false) => true,
            Some(true) => self.has_entire_term_contract == Some(true) && self.employed_directly == Some(true),
            None => false,
        }
    }

    /// True once both performance questions are answered "no"
    pub fn performance_answered_favourably(&self) -> bool {
        self.subject_to_formal_performance_action == Some(false)
            && self.subject_to_disciplinary_action == Some(false)
    }

    /// Applies an answer, returning whether the stored value changed
    ///
    /// Hands the answer back if it is not one of the shared attributes.
    /// Answering "no" to the NQT question also records the postgraduate
    /// training route, since that is the only route still in training.
    pub fn apply(&mut self, answer: EligibilityAnswer) -> Result<bool, EligibilityAnswer> {
        use EligibilityAnswer as A;

        let changed = match answer {
            A::NqtInAcademicYearAfterItt(value) => {
                let changed = replace(&mut self.nqt_in_academic_year_after_itt, value);
                if self.trainee_teacher() {
                    self.qualification = Some(Qualification::PostgraduateItt);
                }
                changed
            }
            A::CurrentSchool(value) => replace(&mut self.current_school, value),
            A::EmployedAsSupplyTeacher(value) => replace(&mut self.employed_as_supply_teacher, value),
            A::HasEntireTermContract(value) => replace(&mut self.has_entire_term_contract, value),
            A::EmployedDirectly(value) => replace(&mut self.employed_directly, value),
            A::SubjectToFormalPerformanceAction(value) => {
                replace(&mut self.subject_to_formal_performance_action, value)
            }
            A::SubjectToDisciplinaryAction(value) => {
                replace(&mut self.subject_to_disciplinary_action, value)
            }
            A::Qualification(value) => replace(&mut self.qualification, value),
            A::EligibleIttSubject(value) => replace(&mut self.eligible_itt_subject, value),
            A::TeachingSubjectNow(value) => replace(&mut self.teaching_subject_now, value),
            A::IttAcademicYear(value) => replace(&mut self.itt_academic_year, value),
            other => return Err(other),
        };

        Ok(changed)
    }

    /// Returns true if the shared attribute has an answer
    pub fn is_answered(&self, attribute: EligibilityAttribute) -> bool {
        use EligibilityAttribute as K;

        match attribute {
            K::NqtInAcademicYearAfterItt => self.nqt_in_academic_year_after_itt.is_some(),
            K::CurrentSchool => self.current_school.is_some(),
            K::EmployedAsSupplyTeacher => self.employed_as_supply_teacher.is_some(),
            K::HasEntireTermContract => self.has_entire_term_contract.is_some(),
            K::EmployedDirectly => self.employed_directly.is_some(),
            K::SubjectToFormalPerformanceAction => self.subject_to_formal_performance_action.is_some(),
            K::SubjectToDisciplinaryAction => self.subject_to_disciplinary_action.is_some(),
            K::Qualification => self.qualification.is_some(),
            K::EligibleIttSubject => self.eligible_itt_subject.is_some(),
            K::TeachingSubjectNow => self.teaching_subject_now.is_some(),
            K::IttAcademicYear => self.itt_academic_year.is_some(),
            _ => false,
        }
    }

    /// Clears an answer, returning true if it held a value
    pub fn clear(&mut self, attribute: EligibilityAttribute) -> bool {
        use crate::attributes::clear;
        use EligibilityAttribute as K;

        match attribute {
            K::NqtInAcademicYearAfterItt => clear(&mut self.nqt_in_academic_year_after_itt),
            K::CurrentSchool => clear(&mut self.current_school),
            K::EmployedAsSupplyTeacher => clear(&mut self.employed_as_supply_teacher),
            K::HasEntireTermContract => clear(&mut self.has_entire_term_contract),
            K::EmployedDirectly => clear(&mut self.employed_directly),
            K::SubjectToFormalPerformanceAction => clear(&mut self.subject_to_formal_performance_action),
            K::SubjectToDisciplinaryAction => clear(&mut self.subject_to_disciplinary_action),
            K::Qualification => clear(&mut self.qualification),
            K::EligibleIttSubject => clear(&mut self.eligible_itt_subject),
            K::TeachingSubjectNow => clear(&mut self.teaching_subject_now),
            K::IttAcademicYear => clear(&mut self.itt_academic_year),
            _ => false,
        }
    }
}

//! Eligibility attributes and typed answers
//!
//! Answers arrive from forms as a string-keyed map. Each key names an
//! [`EligibilityAttribute`] and each value is parsed into an
//! [`EligibilityAnswer`] before any shape is touched, so a bad value never
//! leaves a shape half-assigned.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::EligibilityError;
use crate::school::School;
use crate::student_loans::{EmploymentStatus, QtsAwardYear};
use crate::subject::{IttAcademicYear, IttSubject, Qualification};

/// Name of an answer held by an eligibility shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityAttribute {
    NqtInAcademicYearAfterItt,
    CurrentSchool,
    EmployedAsSupplyTeacher,
    HasEntireTermContract,
    EmployedDirectly,
    SubjectToFormalPerformanceAction,
    SubjectToDisciplinaryAction,
    Qualification,
    EligibleIttSubject,
    TeachingSubjectNow,
    IttAcademicYear,
    EligibleDegreeSubject,
    QtsAwardYear,
    ClaimSchool,
    TaughtEligibleSubjects,
    EmploymentStatus,
    HadLeadershipPosition,
    MostlyPerformedLeadershipDuties,
    StudentLoanRepaymentAmount,
}

impl EligibilityAttribute {
    pub const ALL: [EligibilityAttribute; 19] = [
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
        EligibilityAttribute::QtsAwardYear,
        EligibilityAttribute::ClaimSchool,
        EligibilityAttribute::TaughtEligibleSubjects,
        EligibilityAttribute::EmploymentStatus,
        EligibilityAttribute::HadLeadershipPosition,
        EligibilityAttribute::MostlyPerformedLeadershipDuties,
        EligibilityAttribute::StudentLoanRepaymentAmount,
    ];

    /// Returns the key used in answer maps
    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityAttribute::NqtInAcademicYearAfterItt => "nqt_in_academic_year_after_itt",
            EligibilityAttribute::CurrentSchool => "current_school",
            EligibilityAttribute::EmployedAsSupplyTeacher => "employed_as_supply_teacher",
            EligibilityAttribute::HasEntireTermContract => "has_entire_term_contract",
            EligibilityAttribute::EmployedDirectly => "employed_directly",
            EligibilityAttribute::SubjectToFormalPerformanceAction => {
                "subject_to_formal_performance_action"
            }
            EligibilityAttribute::SubjectToDisciplinaryAction => "subject_to_disciplinary_action",
            EligibilityAttribute::Qualification => "qualification",
            EligibilityAttribute::EligibleIttSubject => "eligible_itt_subject",
            EligibilityAttribute::TeachingSubjectNow => "teaching_subject_now",
            EligibilityAttribute::IttAcademicYear => "itt_academic_year",
            EligibilityAttribute::EligibleDegreeSubject => "eligible_degree_subject",
            EligibilityAttribute::QtsAwardYear => "qts_award_year",
            EligibilityAttribute::ClaimSchool => "claim_school",
            EligibilityAttribute::TaughtEligibleSubjects => "taught_eligible_subjects",
            EligibilityAttribute::EmploymentStatus => "employment_status",
            EligibilityAttribute::HadLeadershipPosition => "had_leadership_position",
            EligibilityAttribute::MostlyPerformedLeadershipDuties => {
                "mostly_performed_leadership_duties"
            }
            EligibilityAttribute::StudentLoanRepaymentAmount => "student_loan_repayment_amount",
        }
    }
}

impl fmt::Display for EligibilityAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EligibilityAttribute {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EligibilityAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.as_str() == s)
            .ok_or_else(|| EligibilityError::UnknownAttributes {
                keys: vec![s.to_string()],
            })
    }
}

/// A typed answer to one eligibility question
///
/// `None` clears the answer.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityAnswer {
    NqtInAcademicYearAfterItt(Option<bool>),
    CurrentSchool(Option<School>),
    EmployedAsSupplyTeacher(Option<bool>),
    HasEntireTermContract(Option<bool>),
    EmployedDirectly(Option<bool>),
    SubjectToFormalPerformanceAction(Option<bool>),
    SubjectToDisciplinaryAction(Option<bool>),
    Qualification(Option<Qualification>),
    EligibleIttSubject(Option<IttSubject>),
    TeachingSubjectNow(Option<bool>),
    IttAcademicYear(Option<IttAcademicYear>),
    EligibleDegreeSubject(Option<bool>),
    QtsAwardYear(Option<QtsAwardYear>),
    ClaimSchool(Option<School>),
    TaughtEligibleSubjects(Option<bool>),
    EmploymentStatus(Option<EmploymentStatus>),
    HadLeadershipPosition(Option<bool>),
    MostlyPerformedLeadershipDuties(Option<bool>),
    StudentLoanRepaymentAmount(Option<Decimal>),
}

impl EligibilityAnswer {
    /// Returns the attribute this answer is for
    pub fn attribute(&self) -> EligibilityAttribute {
        use EligibilityAnswer as A;
        use EligibilityAttribute as K;

        match self {
            A::NqtInAcademicYearAfterItt(_) => K::NqtInAcademicYearAfterItt,
            A::CurrentSchool(_) => K::CurrentSchool,
            A::EmployedAsSupplyTeacher(_) => K::EmployedAsSupplyTeacher,
            A::HasEntireTermContract(_) => K::HasEntireTermContract,
            A::EmployedDirectly(_) => K::EmployedDirectly,
            A::SubjectToFormalPerformanceAction(_) => K::SubjectToFormalPerformanceAction,
            A::SubjectToDisciplinaryAction(_) => K::SubjectToDisciplinaryAction,
            A::Qualification(_) => K::Qualification,
            A::EligibleIttSubject(_) => K::EligibleIttSubject,
            A::TeachingSubjectNow(_) => K::TeachingSubjectNow,
            A::IttAcademicYear(_) => K::IttAcademicYear,
            A::EligibleDegreeSubject(_) => K::EligibleDegreeSubject,
            A::QtsAwardYear(_) => K::QtsAwardYear,
            A::ClaimSchool(_) => K::ClaimSchool,
            A::TaughtEligibleSubjects(_) => K::TaughtEligibleSubjects,
            A::EmploymentStatus(_) => K::EmploymentStatus,
            A::HadLeadershipPosition(_) => K::HadLeadershipPosition,
            A::MostlyPerformedLeadershipDuties(_) => K::MostlyPerformedLeadershipDuties,
            A::StudentLoanRepaymentAmount(_) => K::StudentLoanRepaymentAmount,
        }
    }

    /// Parses a JSON value into a typed answer for the attribute
    ///
    /// Schools are expected as full school objects; resolving a school
    /// reference into one is the caller's job.
    pub fn parse(attribute: EligibilityAttribute, value: &Value) -> Result<Self, EligibilityError> {
        use EligibilityAnswer as A;
        use EligibilityAttribute as K;

        let answer = match attribute {
            K::NqtInAcademicYearAfterItt => A::NqtInAcademicYearAfterItt(field(attribute, value)?),
            K::CurrentSchool => A::CurrentSchool(field(attribute, value)?),
            K::EmployedAsSupplyTeacher => A::EmployedAsSupplyTeacher(field(attribute, value)?),
            K::HasEntireTermContract => A::HasEntireTermContract(field(attribute, value)?),
            K::EmployedDirectly => A::EmployedDirectly(field(attribute, value)?),
            K::SubjectToFormalPerformanceAction => {
                A::SubjectToFormalPerformanceAction(field(attribute, value)?)
            }
            K::SubjectToDisciplinaryAction => A::SubjectToDisciplinaryAction(field(attribute, value)?),
            K::Qualification => A::Qualification(field(attribute, value)?),
            K::EligibleIttSubject => A::EligibleIttSubject(field(attribute, value)?),
            K::TeachingSubjectNow => A::TeachingSubjectNow(field(attribute, value)?),
            K::IttAcademicYear => A::IttAcademicYear(field(attribute, value)?),
            K::EligibleDegreeSubject => A::EligibleDegreeSubject(field(attribute, value)?),
            K::QtsAwardYear => A::QtsAwardYear(field(attribute, value)?),
            K::ClaimSchool => A::ClaimSchool(field(attribute, value)?),
            K::TaughtEligibleSubjects => A::TaughtEligibleSubjects(field(attribute, value)?),
            K::EmploymentStatus => A::EmploymentStatus(field(attribute, value)?),
            K::HadLeadershipPosition => A::HadLeadershipPosition(field(attribute, value)?),
            K::MostlyPerformedLeadershipDuties => {
                A::MostlyPerformedLeadershipDuties(field(attribute, value)?)
            }
            K::StudentLoanRepaymentAmount => A::StudentLoanRepaymentAmount(field(attribute, value)?),
        };

        Ok(answer)
    }
}

fn field<T: DeserializeOwned>(
    attribute: EligibilityAttribute,
    value: &Value,
) -> Result<Option<T>, EligibilityError> {
    serde_json::from_value::<Option<T>>(value.clone())
        .map_err(|e| EligibilityError::invalid_answer(attribute.as_str(), e.to_string()))
}

/// Clears a single optional answer, returning true if it held a value
pub(crate) fn clear<T>(slot: &mut Option<T>) -> bool {
    slot.take().is_some()
}

/// Replaces an optional answer, returning true if the value changed
pub(crate) fn replace<T: PartialEq>(slot: &mut Option<T>, value: Option<T>) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

//! Step validation
//!
//! Each page lists the answers it must collect before the claimant may move
//! on, with the message shown when one is missing. Eligibility answers count
//! if any member of the claim holds them, since some questions belong to
//! one policy only.

use domain_claims::{ClaimAggregate, ClaimLike, ClaimantAnswers};
use domain_eligibility::{EligibilityAttribute, EligibilityStatus};

use crate::error::{FieldError, JourneyError};
use crate::sequencer::slug_sequence;
use crate::slug::Slug;

/// Where a required answer is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// A field of [`ClaimantAnswers`]
    Claimant(&'static str),
    Eligibility(EligibilityAttribute),
}

impl Answer {
    pub fn key(&self) -> &'static str {
        match self {
            Answer::Claimant(field) => *field,
            Answer::Eligibility(attribute) => attribute.as_str(),
        }
    }
}

/// An answer a page must collect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub answer: Answer,
    /// Message shown when the answer is missing
    pub message: &'static str,
}

macro_rules! eligibility {
    ($attribute:expr, $message:expr $(,)?) => {
        Requirement {
            answer: Answer::Eligibility($attribute),
            message: $message,
        }
    };
}

macro_rules! claimant {
    ($field:literal, $message:expr $(,)?) => {
        Requirement {
            answer: Answer::Claimant($field),
            message: $message,
        }
    };
}

const SELECT_SCHOOL: &str = "Select the school you teach at";
const ENTER_PASSCODE: &str = "Enter the correct passcode";
const ACCOUNT_NAME: Requirement = claimant!("banking_name", "Enter a name on the account");
const SORT_CODE: Requirement = claimant!("bank_sort_code", "Enter a sort code");
const ACCOUNT_NUMBER: Requirement = claimant!("bank_account_number", "Enter an account number");

/// Answers the page must collect, in the order they are asked
///
/// Pages that only show information require nothing.
pub fn requirements(slug: Slug) -> &'static [Requirement] {
    use EligibilityAttribute as K;

    match slug {
        Slug::CurrentSchool => &[eligibility!(K::CurrentSchool, SELECT_SCHOOL)],
        Slug::NqtInAcademicYearAfterItt => &[eligibility!(
            K::NqtInAcademicYearAfterItt,
            "Select yes if you are currently teaching as a qualified teacher",
        )],
        Slug::SupplyTeacher => &[eligibility!(
            K::EmployedAsSupplyTeacher,
            "Select yes if you are a supply teacher",
        )],
        Slug::EntireTermContract => &[eligibility!(
            K::HasEntireTermContract,
            "Select yes if you have a contract to teach at the same school for an entire term or longer",
        )],
        Slug::EmployedDirectly => &[eligibility!(
            K::EmployedDirectly,
            "Select yes if you are employed directly by your school",
        )],
        Slug::PoorPerformance => &[
            eligibility!(
                K::SubjectToFormalPerformanceAction,
                "Select yes if you are subject to formal action for poor performance at work",
            ),
            eligibility!(
                K::SubjectToDisciplinaryAction,
                "Select yes if you are subject to disciplinary action",
            ),
        ],
        Slug::Qualification => &[eligibility!(K::Qualification, "Select the route you took into teaching")],
        Slug::IttYear => &[eligibility!(
            K::IttAcademicYear,
            "Select the academic year you started your initial teacher training",
        )],
        Slug::EligibleIttSubject => &[eligibility!(
            K::EligibleIttSubject,
            "Select the subject you did your initial teacher training in",
        )],
        Slug::EligibleDegreeSubject => &[eligibility!(
            K::EligibleDegreeSubject,
            "Select yes if you have a degree in an eligible subject",
        )],
        Slug::TeachingSubjectNow => &[eligibility!(
            K::TeachingSubjectNow,
            "Select yes if you spend at least half of your contracted hours teaching eligible subjects",
        )],

        Slug::QtsYear => &[eligibility!(
            K::QtsAwardYear,
            "Select when you completed your initial teacher training",
        )],
        Slug::ClaimSchool => &[eligibility!(K::ClaimSchool, "Select the school you taught at")],
        Slug::SubjectsTaught => &[eligibility!(
            K::TaughtEligibleSubjects,
            "Select if you taught any of the eligible subjects",
        )],
        Slug::StillTeaching => &[eligibility!(
            K::EmploymentStatus,
            "Select if you still work at the school you taught at",
        )],
        Slug::LeadershipPosition => &[eligibility!(
            K::HadLeadershipPosition,
            "Select yes if you were employed in a leadership position",
        )],
        Slug::MostlyPerformedLeadershipDuties => &[eligibility!(
            K::MostlyPerformedLeadershipDuties,
            "Select yes if you spent more than half your working hours on leadership duties",
        )],
        Slug::StudentLoanAmount => &[eligibility!(
            K::StudentLoanRepaymentAmount,
            "Enter your student loan repayment amount",
        )],

        Slug::PersonalDetails => &[
            claimant!("first_name", "Enter your first name"),
            claimant!("surname", "Enter your last name"),
            claimant!("date_of_birth", "Enter your date of birth"),
            claimant!(
                "national_insurance_number",
                "Enter a National Insurance number in the correct format",
            ),
        ],
        Slug::PostcodeSearch => &[claimant!("postcode", "Enter a real postcode")],
        Slug::SelectHomeAddress => &[claimant!("address_line_1", "Select an address from the list")],
        Slug::Address => &[
            claimant!("address_line_1", "Enter a house number or name"),
            claimant!("address_line_3", "Enter a town or city"),
            claimant!("postcode", "Enter a real postcode"),
        ],
        Slug::EmailAddress => &[claimant!("email_address", "Enter an email address")],
        Slug::EmailVerification => &[claimant!("email_verified", ENTER_PASSCODE)],
        Slug::ProvideMobileNumber => &[claimant!(
            "provide_mobile_number",
            "Select yes if you would like to provide your mobile number",
        )],
        Slug::MobileNumber => &[claimant!(
            "mobile_number",
            "Enter a mobile number, like 07700 900 982 or +44 7700 900 982",
        )],
        Slug::MobileVerification => &[claimant!("mobile_verified", ENTER_PASSCODE)],
        Slug::BankOrBuildingSociety => &[claimant!(
            "bank_or_building_society",
            "Select if you want the money paid in to a personal bank account or building society",
        )],
        Slug::PersonalBankAccount => &[ACCOUNT_NAME, SORT_CODE, ACCOUNT_NUMBER],
        Slug::BuildingSocietyAccount => &[
            ACCOUNT_NAME,
            SORT_CODE,
            ACCOUNT_NUMBER,
            claimant!("building_society_roll_number", "Enter a roll number"),
        ],
        Slug::Gender => &[claimant!(
            "payroll_gender",
            "Select the gender recorded on your school’s payroll system or select whether you do not know",
        )],
        Slug::TeacherReferenceNumber => &[claimant!(
            "teacher_reference_number",
            "Enter your teacher reference number",
        )],
        Slug::StudentLoan => &[claimant!("has_student_loan", "Select yes if you are repaying a student loan")],
        Slug::StudentLoanCountry => &[claimant!(
            "student_loan_country",
            "Select where your home address was when you applied for your student loan",
        )],
        Slug::HowManyCourses => &[claimant!(
            "student_loan_courses",
            "Select how many higher education courses you took out a student loan for",
        )],
        Slug::StartDate => &[claimant!(
            "student_loan_start_date",
            "Select when the first year of your higher education course started",
        )],
        Slug::MastersDoctoralLoan => &[claimant!(
            "has_masters_doctoral_loan",
            "Select yes if you have a Postgraduate Master’s or Doctoral Loan",
        )],
        Slug::MastersLoan => &[claimant!(
            "postgraduate_masters_loan",
            "Select yes if you have a Postgraduate Master’s Loan",
        )],
        Slug::DoctoralLoan => &[claimant!(
            "postgraduate_doctoral_loan",
            "Select yes if you have a Postgraduate Doctoral Loan",
        )],

        Slug::CheckYourAnswersPartOne
        | Slug::EligibilityConfirmed
        | Slug::EligibleLater
        | Slug::FutureEligibility
        | Slug::InformationProvided
        | Slug::CheckYourAnswers
        | Slug::Ineligible => &[],
    }
}

fn answered(claim: &ClaimAggregate, answers: &ClaimantAnswers, answer: Answer) -> bool {
    match answer {
        Answer::Claimant(field) => answers.is_answered(field),
        Answer::Eligibility(attribute) => claim
            .records()
            .iter()
            .any(|record| record.eligibility.is_answered(attribute)),
    }
}

/// Checks that the page's questions have all been answered
///
/// # Errors
///
/// `Validation` listing every unanswered question, in the order asked.
pub fn validate_step(claim: &ClaimAggregate, slug: Slug) -> Result<(), JourneyError> {
    let answers = claim.answers()?;
    let errors: Vec<FieldError> = requirements(slug)
        .iter()
        .filter(|requirement| !answered(claim, answers, requirement.answer))
        .map(|requirement| FieldError {
            field: requirement.answer.key(),
            message: requirement.message,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(JourneyError::Validation { slug, errors })
    }
}

/// Checks every page in the claim's current sequence
///
/// # Errors
///
/// The first page, in sequence order, with an unanswered question.
pub fn validate_journey(claim: &ClaimAggregate) -> Result<(), JourneyError> {
    slug_sequence(claim)?
        .into_iter()
        .try_for_each(|slug| validate_step(claim, slug))
}

/// Whether every page is answered and the claim can be submitted now
pub fn ready_to_submit(claim: &ClaimAggregate) -> bool {
    claim.eligibility_status() == EligibilityStatus::EligibleNow && validate_journey(claim).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_page_has_requirements() {
        let information_pages = [
            Slug::CheckYourAnswersPartOne,
            Slug::EligibilityConfirmed,
            Slug::EligibleLater,
            Slug::FutureEligibility,
            Slug::InformationProvided,
            Slug::CheckYourAnswers,
            Slug::Ineligible,
        ];
        for slug in Slug::ALL {
            assert_eq!(
                requirements(*slug).is_empty(),
                information_pages.contains(slug),
                "{} requirements",
                slug
            );
        }
    }

    #[test]
    fn test_claimant_fields_are_known() {
        for slug in Slug::ALL {
            for requirement in requirements(*slug) {
                if let Answer::Claimant(field) = requirement.answer {
                    assert!(ClaimantAnswers::is_field(field), "{} on {}", field, slug);
                }
            }
        }
    }
}

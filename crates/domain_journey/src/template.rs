//! Master page templates
//!
//! A template lists every page a journey could show, in order. The page
//! sequence for a claim is always a subsequence of its journey's template.

use domain_eligibility::Journey;

use crate::slug::Slug;

/// Early-career and levelling up premium payments
pub const ADDITIONAL_PAYMENTS: &[Slug] = &[
    Slug::CurrentSchool,
    Slug::NqtInAcademicYearAfterItt,
    Slug::SupplyTeacher,
    Slug::EntireTermContract,
    Slug::EmployedDirectly,
    Slug::PoorPerformance,
    Slug::Qualification,
    Slug::IttYear,
    Slug::EligibleIttSubject,
    Slug::EligibleDegreeSubject,
    Slug::TeachingSubjectNow,
    Slug::CheckYourAnswersPartOne,
    Slug::EligibilityConfirmed,
    Slug::EligibleLater,
    Slug::FutureEligibility,
    Slug::InformationProvided,
    Slug::PersonalDetails,
    Slug::PostcodeSearch,
    Slug::SelectHomeAddress,
    Slug::Address,
    Slug::EmailAddress,
    Slug::EmailVerification,
    Slug::ProvideMobileNumber,
    Slug::MobileNumber,
    Slug::MobileVerification,
    Slug::BankOrBuildingSociety,
    Slug::PersonalBankAccount,
    Slug::BuildingSocietyAccount,
    Slug::Gender,
    Slug::TeacherReferenceNumber,
    Slug::StudentLoan,
    Slug::StudentLoanCountry,
    Slug::HowManyCourses,
    Slug::StartDate,
    Slug::MastersDoctoralLoan,
    Slug::MastersLoan,
    Slug::DoctoralLoan,
    Slug::CheckYourAnswers,
    Slug::Ineligible,
];

/// Teachers claiming back student loan repayments
pub const STUDENT_LOANS: &[Slug] = &[
    Slug::QtsYear,
    Slug::ClaimSchool,
    Slug::SubjectsTaught,
    Slug::StillTeaching,
    Slug::CurrentSchool,
    Slug::LeadershipPosition,
    Slug::MostlyPerformedLeadershipDuties,
    Slug::EligibilityConfirmed,
    Slug::InformationProvided,
    Slug::PersonalDetails,
    Slug::PostcodeSearch,
    Slug::SelectHomeAddress,
    Slug::Address,
    Slug::EmailAddress,
    Slug::EmailVerification,
    Slug::ProvideMobileNumber,
    Slug::MobileNumber,
    Slug::MobileVerification,
    Slug::BankOrBuildingSociety,
    Slug::PersonalBankAccount,
    Slug::BuildingSocietyAccount,
    Slug::Gender,
    Slug::TeacherReferenceNumber,
    Slug::StudentLoan,
    Slug::StudentLoanCountry,
    Slug::HowManyCourses,
    Slug::StartDate,
    Slug::MastersDoctoralLoan,
    Slug::MastersLoan,
    Slug::DoctoralLoan,
    Slug::StudentLoanAmount,
    Slug::CheckYourAnswers,
    Slug::Ineligible,
];

/// Returns the master template for a journey
pub fn template(journey: Journey) -> &'static [Slug] {
    match journey {
        Journey::AdditionalPayments => ADDITIONAL_PAYMENTS,
        Journey::StudentLoans => STUDENT_LOANS,
    }
}

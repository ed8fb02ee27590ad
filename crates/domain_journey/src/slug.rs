//! Page identifiers
//!
//! Every page of every journey has one slug. The string form is the URL
//! segment the page is served under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JourneyError;

macro_rules! define_slugs {
    ($($variant:ident => $slug:literal),+ $(,)?) => {
        /// A page in a claimant journey
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum Slug {
            $(
                #[serde(rename = $slug)]
                $variant,
            )+
        }

        impl Slug {
            /// Every slug known to any journey
            pub const ALL: &'static [Slug] = &[$(Slug::$variant),+];

            /// Returns the URL segment for this page
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Slug::$variant => $slug,)+
                }
            }
        }

        impl FromStr for Slug {
            type Err = JourneyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($slug => Ok(Slug::$variant),)+
                    _ => Err(JourneyError::UnknownSlug(s.to_string())),
                }
            }
        }
    };
}

define_slugs! {
    // Combined journey eligibility
    CurrentSchool => "current-school",
    NqtInAcademicYearAfterItt => "nqt-in-academic-year-after-itt",
    SupplyTeacher => "supply-teacher",
    EntireTermContract => "entire-term-contract",
    EmployedDirectly => "employed-directly",
    PoorPerformance => "poor-performance",
    Qualification => "qualification",
    IttYear => "itt-year",
    EligibleIttSubject => "eligible-itt-subject",
    EligibleDegreeSubject => "eligible-degree-subject",
    TeachingSubjectNow => "teaching-subject-now",
    CheckYourAnswersPartOne => "check-your-answers-part-one",
    EligibleLater => "eligible-later",
    FutureEligibility => "future-eligibility",

    // Student loans eligibility
    QtsYear => "qts-year",
    ClaimSchool => "claim-school",
    SubjectsTaught => "subjects-taught",
    StillTeaching => "still-teaching",
    LeadershipPosition => "leadership-position",
    MostlyPerformedLeadershipDuties => "mostly-performed-leadership-duties",

    // Shared
    EligibilityConfirmed => "eligibility-confirmed",
    InformationProvided => "information-provided",
    PersonalDetails => "personal-details",
    PostcodeSearch => "postcode-search",
    SelectHomeAddress => "select-home-address",
    Address => "address",
    EmailAddress => "email-address",
    EmailVerification => "email-verification",
    ProvideMobileNumber => "provide-mobile-number",
    MobileNumber => "mobile-number",
    MobileVerification => "mobile-verification",
    BankOrBuildingSociety => "bank-or-building-society",
    PersonalBankAccount => "personal-bank-account",
    BuildingSocietyAccount => "building-society-account",
    Gender => "gender",
    TeacherReferenceNumber => "teacher-reference-number",
    StudentLoan => "student-loan",
    StudentLoanCountry => "student-loan-country",
    HowManyCourses => "how-many-courses",
    StartDate => "start-date",
    MastersDoctoralLoan => "masters-doctoral-loan",
    MastersLoan => "masters-loan",
    DoctoralLoan => "doctoral-loan",
    StudentLoanAmount => "student-loan-amount",
    CheckYourAnswers => "check-your-answers",
    Ineligible => "ineligible",
}

impl Slug {
    /// Pages a claimant cannot go back from
    pub const DEAD_ENDS: [Slug; 3] = [Slug::EligibleLater, Slug::FutureEligibility, Slug::Ineligible];

    pub fn is_dead_end(&self) -> bool {
        Self::DEAD_ENDS.contains(self)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

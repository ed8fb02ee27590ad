//! Eligibility outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eligibility status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    /// Eligible for a payment in the current claim year
    EligibleNow,
    /// Not eligible yet, but will be in a later claim year
    EligibleLater,
    /// Cannot claim
    Ineligible,
    /// Not enough answers to decide
    Undetermined,
}

impl EligibilityStatus {
    /// Returns the precedence rank, lower wins
    pub fn precedence(&self) -> u8 {
        match self {
            EligibilityStatus::EligibleNow => 0,
            EligibilityStatus::EligibleLater => 1,
            EligibilityStatus::Ineligible => 2,
            EligibilityStatus::Undetermined => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityStatus::EligibleNow => "eligible_now",
            EligibilityStatus::EligibleLater => "eligible_later",
            EligibilityStatus::Ineligible => "ineligible",
            EligibilityStatus::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a claim is ineligible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    // Early-career and levelling up premium payments
    GenericIneligibility,
    IttSubjectNoneOfTheAbove,
    IttSubjectNotEligible,
    IneligibleCurrentSchool,
    NotTeachingNowInEligibleIttSubject,
    TraineeTeacher,

    // Student loans
    IneligibleQtsAwardYear,
    IneligibleClaimSchool,
    EmployedAtNoSchool,
    NotTaughtEligibleSubjects,
    PerformedLeadershipDuties,
}

impl IneligibilityReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibilityReason::GenericIneligibility => "generic_ineligibility",
            IneligibilityReason::IttSubjectNoneOfTheAbove => "itt_subject_none_of_the_above",
            IneligibilityReason::IttSubjectNotEligible => "itt_subject_not_eligible",
            IneligibilityReason::IneligibleCurrentSchool => "ineligible_current_school",
            IneligibilityReason::NotTeachingNowInEligibleIttSubject => {
                "not_teaching_now_in_eligible_itt_subject"
            }
            IneligibilityReason::TraineeTeacher => "trainee_teacher",
            IneligibilityReason::IneligibleQtsAwardYear => "ineligible_qts_award_year",
            IneligibilityReason::IneligibleClaimSchool => "ineligible_claim_school",
            IneligibilityReason::EmployedAtNoSchool => "employed_at_no_school",
            IneligibilityReason::NotTaughtEligibleSubjects => "not_taught_eligible_subjects",
            IneligibilityReason::PerformedLeadershipDuties => "performed_leadership_duties",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

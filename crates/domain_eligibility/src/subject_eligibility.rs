//! Which training years and subjects are offered for a claim year
//!
//! The combined journey only offers training years and subjects that could
//! lead to a payment, now or in a later claim year of the same policy.

use core_kernel::AcademicYear;

use crate::award_table::AwardTable;
use crate::error::EligibilityError;
use crate::policy::Policy;
use crate::subject::{IttAcademicYear, IttSubject};

/// Number of training years offered on the training year question
pub const SELECTABLE_ITT_YEARS: u16 = 5;

/// Last academic year in which the combined journey runs
pub const FINAL_COMBINED_POLICY_YEAR: AcademicYear = AcademicYear::new(2024);

/// First academic year of levelling up premium payments
pub const FIRST_LEVELLING_UP_PREMIUM_YEAR: AcademicYear = AcademicYear::new(2022);

/// Subjects that attract a levelling up premium payment
pub const LEVELLING_UP_PREMIUM_SUBJECTS: [IttSubject; 4] = [
    IttSubject::Chemistry,
    IttSubject::Computing,
    IttSubject::Mathematics,
    IttSubject::Physics,
];

/// Returns the first and last claim years a combinable policy runs for
pub fn policy_years(policy: Policy) -> Option<(AcademicYear, AcademicYear)> {
    match policy {
        Policy::EarlyCareerPayments => AwardTable::early_career_payments().claim_year_range(),
        Policy::LevellingUpPremiumPayments => {
            Some((FIRST_LEVELLING_UP_PREMIUM_YEAR, FINAL_COMBINED_POLICY_YEAR))
        }
        Policy::StudentLoans => None,
    }
}

/// Training years offered for a claim year: the five preceding academic years
pub fn selectable_itt_years(claim_year: AcademicYear) -> Vec<AcademicYear> {
    claim_year
        .years_before(SELECTABLE_ITT_YEARS)
        .through(claim_year.previous())
        .collect()
}

/// Subjects that make a claimant eligible for `policy` in the claim year or a later one
///
/// # Errors
///
/// Returns `ClaimYearOutOfRange` when the policy does not run in the claim
/// year, and `IttYearOutOfRange` when the training year is not offered for it.
pub fn current_and_future_subjects(
    policy: Policy,
    claim_year: AcademicYear,
    itt_year: IttAcademicYear,
) -> Result<Vec<IttSubject>, EligibilityError> {
    let (first, last) = policy_years(policy).ok_or(EligibilityError::ClaimYearOutOfRange {
        policy,
        year: claim_year,
    })?;
    if claim_year < first || claim_year > last {
        return Err(EligibilityError::ClaimYearOutOfRange {
            policy,
            year: claim_year,
        });
    }

    let itt_year = match itt_year {
        IttAcademicYear::NoneOfTheAbove => return Ok(Vec::new()),
        IttAcademicYear::Year(year) => year,
    };
    if !selectable_itt_years(claim_year).contains(&itt_year) {
        return Err(EligibilityError::IttYearOutOfRange {
            itt_year,
            claim_year,
        });
    }

    let subjects = match policy {
        Policy::EarlyCareerPayments => {
            let mut subjects: Vec<IttSubject> = AwardTable::early_career_payments()
                .entries()
                .iter()
                .filter(|entry| entry.key.itt_year == itt_year && entry.key.claim_year >= claim_year)
                .map(|entry| entry.key.subject)
                .collect();
            subjects.sort();
            subjects.dedup();
            subjects
        }
        Policy::LevellingUpPremiumPayments => LEVELLING_UP_PREMIUM_SUBJECTS.to_vec(),
        Policy::StudentLoans => Vec::new(),
    };

    Ok(subjects)
}

/// Subjects offered on the subject question, in display order
///
/// The union of every policy's current and future subjects, alphabetical,
/// always followed by "none of the above".
pub fn selectable_subjects(
    policies: &[Policy],
    claim_year: AcademicYear,
    itt_year: IttAcademicYear,
) -> Vec<IttSubject> {
    let mut subjects: Vec<IttSubject> = policies
        .iter()
        .filter_map(|policy| current_and_future_subjects(*policy, claim_year, itt_year).ok())
        .flatten()
        .collect();
    subjects.sort_by_key(|subject| subject.as_str());
    subjects.dedup();
    subjects.push(IttSubject::NoneOfTheAbove);
    subjects
}

/// Whether a claimant may set a reminder for next year's claim window
///
/// Never once the combined journey has reached its final year; otherwise
/// only if the training year will still be offered next year.
pub fn set_a_reminder(policy_year: AcademicYear, itt_year: Option<IttAcademicYear>) -> bool {
    if policy_year >= FINAL_COMBINED_POLICY_YEAR {
        return false;
    }

    match itt_year {
        Some(IttAcademicYear::Year(year)) => selectable_itt_years(policy_year.next()).contains(&year),
        _ => false,
    }
}

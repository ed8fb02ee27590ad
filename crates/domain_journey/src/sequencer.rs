//! Page sequencing
//!
//! The pages a claimant passes through are not stored. They are computed
//! from the claim's current answers and status each time they are needed,
//! by filtering the journey's master template. Pages whose deciding answer
//! is still missing are included; pages that depend on an answer the
//! claimant has ruled out are dropped.

use tracing::debug;

use domain_claims::{ClaimAggregate, ClaimLike, ClaimantAnswers, PaymentMethod};
use domain_eligibility::subject_eligibility::current_and_future_subjects;
use domain_eligibility::{
    CohortAnswers, EligibilityStatus, EmploymentStatus, IttSubject, Journey, Policy, StudentLoansEligibility,
};

use crate::error::JourneyError;
use crate::slug::Slug;
use crate::template::{ADDITIONAL_PAYMENTS, STUDENT_LOANS};

/// Journey the claim was started through
pub fn journey_of(claim: &ClaimAggregate) -> Journey {
    claim
        .policies()
        .first()
        .map_or(Journey::AdditionalPayments, |policy| Journey::for_policy(*policy))
}

/// Ordered pages the claimant must pass through with the answers given so far
///
/// # Errors
///
/// `Claim` when the aggregate has no main record to read answers from.
pub fn slug_sequence(claim: &ClaimAggregate) -> Result<Vec<Slug>, JourneyError> {
    let journey = journey_of(claim);
    let status = claim.eligibility_status();
    let answers = claim.answers()?;

    let slugs = match journey {
        Journey::AdditionalPayments => additional_payments(claim, answers, status)?,
        Journey::StudentLoans => student_loans(claim, answers, status)?,
    };

    debug!(%journey, ?status, pages = slugs.len(), "Computed page sequence");
    Ok(slugs)
}

fn additional_payments(
    claim: &ClaimAggregate,
    answers: &ClaimantAnswers,
    status: EligibilityStatus,
) -> Result<Vec<Slug>, JourneyError> {
    let unanswered = CohortAnswers::default();
    let cohort = claim.eligibility()?.cohort_answers().unwrap_or(&unanswered);

    // A trainee only says which subject they are training in before
    // learning whether they can claim in a later year. The already
    // answered current-school page stays so back links still reach it.
    if cohort.trainee_teacher() {
        return Ok(ADDITIONAL_PAYMENTS
            .iter()
            .copied()
            .filter(|slug| match slug {
                Slug::CurrentSchool | Slug::NqtInAcademicYearAfterItt | Slug::EligibleIttSubject => true,
                Slug::FutureEligibility => status == EligibilityStatus::EligibleLater,
                Slug::Ineligible => status == EligibilityStatus::Ineligible,
                _ => false,
            })
            .collect());
    }

    let degree_page = degree_subject_required(claim);
    let teaching_page = !(degree_page && early_career_payments_ineligible(claim) && !holds_eligible_degree(claim));

    Ok(ADDITIONAL_PAYMENTS
        .iter()
        .copied()
        .filter(|slug| match slug {
            Slug::EntireTermContract | Slug::EmployedDirectly => cohort.supply_teacher(),
            Slug::EligibleDegreeSubject => degree_page,
            Slug::TeachingSubjectNow => teaching_page,
            Slug::CheckYourAnswersPartOne => status != EligibilityStatus::Ineligible,
            Slug::EligibilityConfirmed => status == EligibilityStatus::EligibleNow,
            Slug::EligibleLater => status == EligibilityStatus::EligibleLater,
            Slug::FutureEligibility => false,
            Slug::Ineligible => status == EligibilityStatus::Ineligible,
            slug => claimant_page_included(*slug, answers),
        })
        .collect())
}

fn student_loans(
    claim: &ClaimAggregate,
    answers: &ClaimantAnswers,
    status: EligibilityStatus,
) -> Result<Vec<Slug>, JourneyError> {
    let unanswered = StudentLoansEligibility::default();
    let eligibility = claim.eligibility()?.as_student_loans().unwrap_or(&unanswered);

    Ok(STUDENT_LOANS
        .iter()
        .copied()
        .filter(|slug| match slug {
            Slug::CurrentSchool => eligibility.employment_status == Some(EmploymentStatus::DifferentSchool),
            Slug::MostlyPerformedLeadershipDuties => eligibility.had_leadership_position == Some(true),
            Slug::EligibilityConfirmed => status == EligibilityStatus::EligibleNow,
            Slug::Ineligible => status == EligibilityStatus::Ineligible,
            slug => claimant_page_included(*slug, answers),
        })
        .collect())
}

/// Inclusion rules for the personal, contact and payment pages
fn claimant_page_included(slug: Slug, answers: &ClaimantAnswers) -> bool {
    let has_student_loan = answers.has_student_loan == Some(true);

    match slug {
        Slug::SelectHomeAddress => answers.address_from_lookup != Some(false),
        Slug::Address => answers.address_from_lookup != Some(true),
        Slug::MobileNumber | Slug::MobileVerification => answers.provide_mobile_number == Some(true),
        Slug::PersonalBankAccount => answers.bank_or_building_society == Some(PaymentMethod::PersonalBankAccount),
        Slug::BuildingSocietyAccount => answers.bank_or_building_society == Some(PaymentMethod::BuildingSociety),
        Slug::StudentLoanCountry => has_student_loan,
        // Scotland and Northern Ireland have a single repayment plan
        Slug::HowManyCourses | Slug::StartDate => {
            has_student_loan && !answers.student_loan_country.is_some_and(|country| country.has_single_plan())
        }
        Slug::MastersDoctoralLoan => answers.has_student_loan != Some(true),
        Slug::MastersLoan | Slug::DoctoralLoan => {
            has_student_loan || answers.has_masters_doctoral_loan == Some(true)
        }
        _ => true,
    }
}

/// Whether the levelling up premium needs to know about the claimant's degree
///
/// Asked at a school with an award for the claim year when the training
/// subject is "none of the above" or not one the premium covers.
fn degree_subject_required(claim: &ClaimAggregate) -> bool {
    let Some(record) = claim.for_policy(Policy::LevellingUpPremiumPayments) else {
        return false;
    };
    let Some(cohort) = record.eligibility.cohort_answers() else {
        return false;
    };
    let Some(subject) = cohort.eligible_itt_subject else {
        return false;
    };

    let claim_year = record.academic_year;
    let school_eligible = cohort
        .current_school
        .as_ref()
        .is_some_and(|school| school.eligible_for_levelling_up_premium(claim_year));
    if !school_eligible {
        return false;
    }
    if subject == IttSubject::NoneOfTheAbove {
        return true;
    }

    cohort
        .itt_academic_year
        .and_then(|itt_year| {
            current_and_future_subjects(Policy::LevellingUpPremiumPayments, claim_year, itt_year).ok()
        })
        .is_some_and(|subjects| !subjects.contains(&subject))
}

fn early_career_payments_ineligible(claim: &ClaimAggregate) -> bool {
    claim
        .for_policy(Policy::EarlyCareerPayments)
        .map_or(true, |record| record.status() == EligibilityStatus::Ineligible)
}

fn holds_eligible_degree(claim: &ClaimAggregate) -> bool {
    claim
        .for_policy(Policy::LevellingUpPremiumPayments)
        .and_then(|record| record.eligibility.as_levelling_up_premium_payments())
        .is_some_and(|eligibility| eligibility.eligible_degree_subject == Some(true))
}

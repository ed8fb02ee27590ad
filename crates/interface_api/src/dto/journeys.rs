//! Journey DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::{ClaimId, JourneyId};
use domain_claims::{ClaimAggregate, ClaimRecord, PolicyOption};
use domain_eligibility::{EligibilityStatus, Journey, Policy};
use domain_journey::{requirements, PageSequence, Slug};

#[derive(Debug, Deserialize)]
pub struct StartJourneyRequest {
    pub journey: Journey,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Answers keyed by attribute name, empty for pages that only inform
    #[serde(default)]
    pub answers: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    /// Policy to claim; a combined journey defaults to the claimant's selection
    pub policy: Option<Policy>,
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub journey_id: JourneyId,
    pub journey: Journey,
    pub status: EligibilityStatus,
    pub policies: Vec<Policy>,
    pub slugs: Vec<Slug>,
}

impl JourneyResponse {
    pub fn new(journey_id: JourneyId, journey: Journey, claim: &ClaimAggregate, slugs: Vec<Slug>) -> Self {
        Self {
            journey_id,
            journey,
            status: claim.eligibility_status(),
            policies: claim.policies(),
            slugs,
        }
    }
}

/// A question the page asks
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub slug: Slug,
    pub status: EligibilityStatus,
    pub questions: Vec<QuestionResponse>,
    pub next_slug: Option<Slug>,
    pub previous_slug: Option<Slug>,
}

impl PageResponse {
    pub fn new(claim: &ClaimAggregate, pages: &PageSequence<'_>) -> Self {
        let slug = pages.current();
        Self {
            slug,
            status: claim.eligibility_status(),
            questions: requirements(slug)
                .iter()
                .map(|requirement| QuestionResponse {
                    field: requirement.answer.key(),
                    message: requirement.message,
                })
                .collect(),
            next_slug: pages.next_slug(),
            previous_slug: pages.previous_slug(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub status: EligibilityStatus,
    pub next_slug: Option<Slug>,
}

#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub claim_id: ClaimId,
    pub reference: String,
    pub policy: Policy,
    pub award_amount: Decimal,
    pub policy_options_provided: Vec<PolicyOption>,
}

impl From<&ClaimRecord> for SubmittedResponse {
    fn from(claim: &ClaimRecord) -> Self {
        Self {
            claim_id: claim.id,
            reference: claim.reference.clone(),
            policy: claim.policy(),
            award_amount: claim.award_amount(),
            policy_options_provided: claim.policy_options_provided.clone(),
        }
    }
}

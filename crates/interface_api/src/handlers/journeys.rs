//! Claimant journey handlers
//!
//! The claim lives in the journey session until it is submitted. Answers
//! for a page are applied to a copy of the claim and kept only when the
//! page validates, mirroring a form that is re-rendered with its errors.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;

use core_kernel::{JourneyId, SchoolId};
use domain_claims::{ClaimAggregate, ClaimLike, Notification, SchoolDirectory};
use domain_eligibility::EligibilityAttribute;
use domain_journey::{journey_of, slug_sequence, validate_journey, validate_step, PageSequence, Slug};

use crate::dto::journeys::*;
use crate::error::{ApiError, FieldMessage};
use crate::handlers::notify;
use crate::AppState;

/// Answers that name a school by its directory ID
const SCHOOL_ANSWERS: [EligibilityAttribute; 2] = [EligibilityAttribute::CurrentSchool, EligibilityAttribute::ClaimSchool];

/// Starts a journey and opens its session
pub async fn start_journey(
    State(state): State<AppState>,
    Json(request): Json<StartJourneyRequest>,
) -> Result<(StatusCode, Json<JourneyResponse>), ApiError> {
    let now = Utc::now();
    let claim = ClaimAggregate::start(request.journey, state.policy_config.as_ref(), now)?;
    let slugs = slug_sequence(&claim)?;
    let response_claim = claim.clone();

    let journey_id = state.sessions.open(claim, now).await;
    info!(%journey_id, journey = %request.journey, "Journey started");

    Ok((
        StatusCode::CREATED,
        Json(JourneyResponse::new(journey_id, request.journey, &response_claim, slugs)),
    ))
}

/// Current status and page sequence of a journey
pub async fn get_journey(
    State(state): State<AppState>,
    Path(journey_id): Path<JourneyId>,
) -> Result<Json<JourneyResponse>, ApiError> {
    state
        .sessions
        .update(journey_id, Utc::now(), |claim| {
            let slugs = slug_sequence(claim)?;
            Ok(JourneyResponse::new(journey_id, journey_of(claim), claim, slugs))
        })
        .await
        .map(Json)
}

/// Questions on a page and where its links lead
pub async fn show_page(
    State(state): State<AppState>,
    Path((journey_id, slug)): Path<(JourneyId, String)>,
) -> Result<Json<PageResponse>, ApiError> {
    let slug: Slug = slug.parse()?;

    state
        .sessions
        .update(journey_id, Utc::now(), |claim| {
            let pages = PageSequence::new(claim, slug)?;
            pages.ensure_current_in_sequence()?;
            Ok(PageResponse::new(claim, &pages))
        })
        .await
        .map(Json)
}

/// Answers a page and returns the page to show next
pub async fn answer_page(
    State(state): State<AppState>,
    Path((journey_id, slug)): Path<(JourneyId, String)>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let slug: Slug = slug.parse()?;
    let answers = resolve_schools(state.schools.as_ref(), request.answers)?;
    let store = state.claims.clone();

    state
        .sessions
        .update(journey_id, Utc::now(), |claim| {
            PageSequence::new(claim, slug)?.ensure_current_in_sequence()?;

            claim.assign_attributes(&answers)?;
            claim.reset_dependent_answers(&[])?;
            validate_step(claim, slug)?;
            claim.save(store.as_ref())?;

            let pages = PageSequence::new(claim, slug)?;
            Ok(AnswerResponse {
                status: claim.eligibility_status(),
                next_slug: pages.next_slug(),
            })
        })
        .await
        .map(Json)
}

/// Submits the claim and closes the journey
pub async fn submit_journey(
    State(state): State<AppState>,
    Path(journey_id): Path<JourneyId>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmittedResponse>), ApiError> {
    let now = Utc::now();
    let store = state.claims.clone();

    let submitted = state
        .sessions
        .update(journey_id, now, |claim| {
            if let Some(policy) = request.policy {
                claim.select_policy(policy)?;
            }
            validate_journey(claim)?;
            Ok(claim.submit(request.policy, store.as_ref(), now)?.clone())
        })
        .await?;

    state.sessions.close(journey_id).await;
    notify(state.notifications.as_ref(), Notification::claim_submitted(&submitted));

    Ok((StatusCode::CREATED, Json(SubmittedResponse::from(&submitted))))
}

/// Replaces school IDs in school answers with the directory's school
fn resolve_schools(
    directory: &dyn SchoolDirectory,
    mut answers: Map<String, Value>,
) -> Result<Map<String, Value>, ApiError> {
    for attribute in SCHOOL_ANSWERS {
        let key = attribute.as_str();
        let Some(Value::String(reference)) = answers.get(key) else {
            continue;
        };

        let id: SchoolId = reference.parse().map_err(|_| ApiError::Validation {
            message: format!("Unknown school {}", reference),
            details: vec![FieldMessage {
                field: key.to_string(),
                message: "Select the school you teach at".to_string(),
            }],
        })?;
        let school = directory.find(id)?;
        let value = serde_json::to_value(&school).map_err(|e| ApiError::Internal(e.to_string()))?;
        answers.insert(key.to_string(), value);
    }

    Ok(answers)
}

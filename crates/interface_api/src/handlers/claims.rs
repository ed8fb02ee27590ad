//! Admin claim handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{ClaimRecord, DecisionResult, Notification};

use crate::dto::claims::*;
use crate::error::ApiError;
use crate::handlers::notify;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReferenceQuery {
    pub reference: String,
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.find(id)?;
    Ok(Json(ClaimResponse::from(&claim)))
}

/// Finds a submitted claim by its claimant-facing reference
pub async fn find_claim(
    State(state): State<AppState>,
    Query(query): Query<ReferenceQuery>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.find_by_reference(query.reference.trim())?;
    Ok(Json(ClaimResponse::from(&claim)))
}

/// Approves or rejects a claim
pub async fn create_decision(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(request): Json<DecisionRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;

    let claim = modify_claim(&state, id, |claim, now| {
        match request.result {
            DecisionResult::Approved => claim.approve(request.created_by, request.notes, now)?,
            DecisionResult::Rejected => {
                claim.reject(request.rejected_reasons, request.created_by, request.notes, now)?
            }
        };
        Ok(())
    })
    .await?;

    notify(state.notifications.as_ref(), Notification::decision_made(&claim));
    Ok((StatusCode::CREATED, Json(ClaimResponse::from(&claim))))
}

/// Reverses the claim's active decision
pub async fn undo_decision(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(request): Json<UndoDecisionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;

    let claim = modify_claim(&state, id, |claim, now| {
        claim.undo_decision(request.created_by, request.notes, now)?;
        Ok(())
    })
    .await?;

    Ok(Json(ClaimResponse::from(&claim)))
}

/// Puts a claim on hold or takes it off
pub async fn set_hold(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(request): Json<HoldRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = modify_claim(&state, id, |claim, now| {
        if request.held {
            claim.hold(now)?;
        } else {
            claim.unhold(now)?;
        }
        Ok(())
    })
    .await?;

    Ok(Json(ClaimResponse::from(&claim)))
}

/// Marks an approved claim as paid
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = modify_claim(&state, id, |claim, now| {
        claim.record_payment(request.payment_id, now)?;
        Ok(())
    })
    .await?;

    Ok(Json(ClaimResponse::from(&claim)))
}

/// Loads, changes and saves a stored claim while holding the admin write lock
async fn modify_claim<F>(state: &AppState, id: ClaimId, change: F) -> Result<ClaimRecord, ApiError>
where
    F: FnOnce(&mut ClaimRecord, chrono::DateTime<Utc>) -> Result<(), ApiError>,
{
    let _guard = state.admin_writes.lock().await;

    let mut claim = state.claims.find(id)?;
    change(&mut claim, Utc::now())?;
    state.claims.save(&claim)?;
    Ok(claim)
}

//! School search handler

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::dto::schools::*;
use crate::error::ApiError;
use crate::AppState;

/// Searches open schools by name or URN
pub async fn search_schools(
    State(state): State<AppState>,
    Query(query): Query<SchoolSearchQuery>,
) -> Result<Json<Vec<SchoolResponse>>, ApiError> {
    query.validate()?;

    let schools = state.schools.search(&query.query)?;
    Ok(Json(schools.into_iter().map(SchoolResponse::from).collect()))
}

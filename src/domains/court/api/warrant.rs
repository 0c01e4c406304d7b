//! Warrant API handlers

use crate::api::SuccessResponse;
use crate::domain::NewWarrant;
use crate::domains::court::context::CourtContext;
use crate::error::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn issue<S: CourtContext>(
    State(state): State<S>,
    Json(input): Json<NewWarrant>,
) -> Result<impl IntoResponse> {
    let warrant = state.warrant_service().issue(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(warrant))))
}

/// Warrants for a subject. Called by MUP before accepting a permit or
/// registration request.
pub async fn for_subject<S: CourtContext>(
    State(state): State<S>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let warrants = state.warrant_service().for_subject(&subject).await?;
    Ok(Json(SuccessResponse::new(warrants)))
}

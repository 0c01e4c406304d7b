//! Driving ban API handlers

use crate::api::SuccessResponse;
use crate::domain::{DrivingBanStatus, NewDrivingBan};
use crate::domains::mup::context::MupContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Issue a driving ban. Court calls this for every license suspension.
pub async fn issue<S: MupContext>(
    State(state): State<S>,
    Json(input): Json<NewDrivingBan>,
) -> Result<impl IntoResponse> {
    let ban = state.driving_ban_service().issue(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(ban))))
}

pub async fn check<S: MupContext>(
    State(state): State<S>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let driving_ban = state.driving_ban_service().has_active(&subject).await?;
    Ok(Json(SuccessResponse::new(DrivingBanStatus { driving_ban })))
}

/// Bans of the caller. Admins may read any subject's bans.
pub async fn held_by<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let subject = caller.acting_for(Some(&subject))?;
    let bans = state.driving_ban_service().for_subject(&subject).await?;
    Ok(Json(SuccessResponse::new(bans)))
}

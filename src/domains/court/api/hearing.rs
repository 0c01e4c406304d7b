//! Court hearing API handlers

use crate::api::SuccessResponse;
use crate::domain::{NewHearing, RescheduleHearingInput};
use crate::domains::court::context::CourtContext;
use crate::error::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Get a hearing of either kind
pub async fn get<S: CourtContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let hearing = state.hearing_service().get(&id).await?;
    Ok(Json(SuccessResponse::new(hearing)))
}

pub async fn create_person<S: CourtContext>(
    State(state): State<S>,
    Json(input): Json<NewHearing>,
) -> Result<impl IntoResponse> {
    let hearing = state.hearing_service().create_person(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(hearing))))
}

pub async fn create_legal_entity<S: CourtContext>(
    State(state): State<S>,
    Json(input): Json<NewHearing>,
) -> Result<impl IntoResponse> {
    let hearing = state.hearing_service().create_legal_entity(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(hearing))))
}

/// Move a hearing to a later date and time
pub async fn reschedule<S: CourtContext>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(input): Json<RescheduleHearingInput>,
) -> Result<impl IntoResponse> {
    let hearing = state
        .hearing_service()
        .reschedule(&id, &input.date_time)
        .await?;
    Ok(Json(SuccessResponse::new(hearing)))
}

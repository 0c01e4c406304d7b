//! Suspension API handlers

use crate::api::SuccessResponse;
use crate::client::Deadline;
use crate::domain::NewSuspension;
use crate::domains::court::context::CourtContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Store a suspension and issue the matching driving ban in MUP
pub async fn create<S: CourtContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<NewSuspension>,
) -> Result<impl IntoResponse> {
    let created = state
        .suspension_service()
        .create(&deadline, input, &caller.token)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(created))))
}

pub async fn get<S: CourtContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let suspension = state.suspension_service().get(&id).await?;
    Ok(Json(SuccessResponse::new(suspension)))
}

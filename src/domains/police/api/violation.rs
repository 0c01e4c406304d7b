//! Traffic violation API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{NewTrafficViolation, UpdateTrafficViolation};
use crate::domains::police::context::PoliceContext;
use crate::error::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn create<S: PoliceContext>(
    State(state): State<S>,
    Json(input): Json<NewTrafficViolation>,
) -> Result<impl IntoResponse> {
    let violation = state.violation_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(violation))))
}

pub async fn list<S: PoliceContext>(State(state): State<S>) -> Result<impl IntoResponse> {
    let violations = state.violation_service().list().await?;
    Ok(Json(SuccessResponse::new(violations)))
}

pub async fn get<S: PoliceContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let violation = state.violation_service().get(&id).await?;
    Ok(Json(SuccessResponse::new(violation)))
}

/// Partial update; absent or blank fields are left as they are
pub async fn update<S: PoliceContext>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTrafficViolation>,
) -> Result<impl IntoResponse> {
    let violation = state.violation_service().update(&id, input).await?;
    Ok(Json(SuccessResponse::new(violation)))
}

pub async fn delete<S: PoliceContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.violation_service().delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Traffic violation deleted successfully",
    )))
}

pub async fn for_violator<S: PoliceContext>(
    State(state): State<S>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let violations = state.violation_service().for_violator(&subject).await?;
    Ok(Json(SuccessResponse::new(violations)))
}

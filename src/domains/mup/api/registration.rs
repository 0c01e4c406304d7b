//! Vehicle registration API handlers

use crate::api::SuccessResponse;
use crate::client::Deadline;
use crate::domain::SubmitRegistrationInput;
use crate::domains::mup::context::MupContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Request registration of a vehicle owned by the caller. An admin submits
/// on behalf of the vehicle's owner.
pub async fn submit<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<SubmitRegistrationInput>,
) -> Result<impl IntoResponse> {
    let subject = if caller.is_admin() {
        state
            .vehicle_service()
            .get(&input.vehicle_id)
            .await?
            .subject
    } else {
        caller.subject.clone()
    };

    let registration = state
        .registration_service()
        .submit(&deadline, &subject, &input.vehicle_id, &caller.token)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(registration))))
}

pub async fn pending<S: MupContext>(State(state): State<S>) -> Result<impl IntoResponse> {
    let registrations = state.registration_service().pending().await?;
    Ok(Json(SuccessResponse::new(registrations)))
}

pub async fn approve<S: MupContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let approved = state.registration_service().approve(&id).await?;
    Ok(Json(SuccessResponse::new(approved)))
}

pub async fn by_plate<S: MupContext>(
    State(state): State<S>,
    Path(plate): Path<String>,
) -> Result<impl IntoResponse> {
    let registration = state.registration_service().by_plate(&plate).await?;
    Ok(Json(SuccessResponse::new(registration)))
}

pub async fn held_by<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let subject = caller.acting_for(Some(&subject))?;
    let registrations = state.registration_service().for_subject(&subject).await?;
    Ok(Json(SuccessResponse::new(registrations)))
}

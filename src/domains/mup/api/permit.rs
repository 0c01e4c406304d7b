//! Traffic permit API handlers

use crate::api::SuccessResponse;
use crate::client::Deadline;
use crate::domain::SubmitPermitInput;
use crate::domains::mup::context::MupContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Request a traffic permit. Users request for themselves; admins may name
/// the subject.
pub async fn submit<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<SubmitPermitInput>,
) -> Result<impl IntoResponse> {
    let subject = caller.acting_for(input.subject.as_deref())?;
    let permit = state
        .permit_service()
        .submit(&deadline, &subject, &caller.token)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(permit))))
}

pub async fn pending<S: MupContext>(State(state): State<S>) -> Result<impl IntoResponse> {
    let permits = state.permit_service().pending().await?;
    Ok(Json(SuccessResponse::new(permits)))
}

pub async fn approve<S: MupContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let permit = state.permit_service().approve(&id).await?;
    Ok(Json(SuccessResponse::new(permit)))
}

/// Current driving permit of a subject, used by roadside checks
pub async fn check<S: MupContext>(
    State(state): State<S>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let permit = state.permit_service().current_for(&subject).await?;
    Ok(Json(SuccessResponse::new(permit)))
}

/// Permits of the caller, or of any subject for an admin
pub async fn held_by<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let subject = caller.acting_for(Some(&subject))?;
    let permits = state.permit_service().for_subject(&subject).await?;
    Ok(Json(SuccessResponse::new(permits)))
}

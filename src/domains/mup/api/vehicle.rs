use crate::api::SuccessResponse;
use crate::domain::NewVehicle;
use crate::domains::mup::context::MupContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn create<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    Json(input): Json<NewVehicle>,
) -> Result<impl IntoResponse> {
    let owner = caller.acting_for(input.subject.as_deref())?;
    let vehicle = state.vehicle_service().create(&owner, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(vehicle))))
}

pub async fn owned_by<S: MupContext>(
    State(state): State<S>,
    caller: Caller,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse> {
    let subject = caller.acting_for(Some(&subject))?;
    let vehicles = state.vehicle_service().owned_by(&subject).await?;
    Ok(Json(SuccessResponse::new(vehicles)))
}

pub async fn registered<S: MupContext>(State(state): State<S>) -> Result<impl IntoResponse> {
    let vehicles = state.vehicle_service().registered().await?;
    Ok(Json(SuccessResponse::new(vehicles)))
}

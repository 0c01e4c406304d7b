//! Roadside check handlers
//!
//! A passed check answers 200; a check that recorded a violation answers 201.

use crate::api::SuccessResponse;
use crate::client::Deadline;
use crate::domain::{AlcoholTest, DriverCheck, InspectionOutcome, VehicleCheck};
use crate::domains::police::context::PoliceContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

fn respond(outcome: InspectionOutcome) -> impl IntoResponse {
    let status = if outcome.passed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, Json(SuccessResponse::new(outcome)))
}

pub async fn alcohol<S: PoliceContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<AlcoholTest>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .inspection_service()
        .alcohol(&deadline, input, &caller.token)
        .await?;
    Ok(respond(outcome))
}

pub async fn driver_ban<S: PoliceContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<DriverCheck>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .inspection_service()
        .driver_ban(&deadline, input, &caller.token)
        .await?;
    Ok(respond(outcome))
}

pub async fn driver_permit<S: PoliceContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<DriverCheck>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .inspection_service()
        .driver_permit(&deadline, input, &caller.token)
        .await?;
    Ok(respond(outcome))
}

pub async fn vehicle_registration<S: PoliceContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<VehicleCheck>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .inspection_service()
        .vehicle_registration(&deadline, input, &caller.token)
        .await?;
    Ok(respond(outcome))
}

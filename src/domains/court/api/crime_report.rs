use crate::api::SuccessResponse;
use crate::client::Deadline;
use crate::domain::TrafficViolation;
use crate::domains::court::context::CourtContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{extract::State, response::IntoResponse, Json};

/// Accept a crime report filed by the police
pub async fn receive<S: CourtContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(violation): Json<TrafficViolation>,
) -> Result<impl IntoResponse> {
    let receipt = state
        .crime_report_service()
        .receive(&deadline, violation, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(receipt)))
}

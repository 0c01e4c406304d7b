//! Traffic statistics API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::client::Deadline;
use crate::domain::{GenerateStatisticsInput, NewTrafficStatistic};
use crate::domains::statistics::context::StatisticsContext;
use crate::error::Result;
use crate::middleware::Caller;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<S: StatisticsContext>(State(state): State<S>) -> Result<impl IntoResponse> {
    let statistics = state.statistics_service().list().await?;
    Ok(Json(SuccessResponse::new(statistics)))
}

pub async fn get<S: StatisticsContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let statistic = state.statistics_service().get(&id).await?;
    Ok(Json(SuccessResponse::new(statistic)))
}

pub async fn create<S: StatisticsContext>(
    State(state): State<S>,
    Json(input): Json<NewTrafficStatistic>,
) -> Result<impl IntoResponse> {
    let statistic = state.statistics_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(statistic))))
}

pub async fn update<S: StatisticsContext>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(input): Json<NewTrafficStatistic>,
) -> Result<impl IntoResponse> {
    let statistic = state.statistics_service().update(&id, input).await?;
    Ok(Json(SuccessResponse::new(statistic)))
}

pub async fn delete<S: StatisticsContext>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.statistics_service().delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Traffic statistic deleted successfully",
    )))
}

/// Derive statistics for one month from police and MUP records
pub async fn generate<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Json(input): Json<GenerateStatisticsInput>,
) -> Result<impl IntoResponse> {
    let generated = state
        .statistics_service()
        .generate(&deadline, input, &caller.token)
        .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(generated))))
}

pub async fn registered_vehicles<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
) -> Result<impl IntoResponse> {
    let vehicles = state
        .statistics_service()
        .registered_vehicles(&deadline, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(vehicles)))
}

pub async fn vehicles_by_year<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
) -> Result<impl IntoResponse> {
    let counts = state
        .statistics_service()
        .vehicles_by_year(&deadline, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(counts)))
}

pub async fn registered_in_year<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse> {
    let count = state
        .statistics_service()
        .registered_in_year(&deadline, year, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(count)))
}

pub async fn popular_brands<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse> {
    let brands = state
        .statistics_service()
        .popular_brands(&deadline, year, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(brands)))
}

/// Per-reason violation counts for one year, with a `Total Violations` entry
pub async fn violations_report<S: StatisticsContext>(
    State(state): State<S>,
    caller: Caller,
    deadline: Deadline,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse> {
    let report = state
        .statistics_service()
        .violations_report(&deadline, year, &caller.token)
        .await?;
    Ok(Json(SuccessResponse::new(report)))
}

use crate::domain::Role;
use crate::domains::statistics::api as statistics_api;
use crate::domains::statistics::context::StatisticsContext;
use crate::jwt::JwtManager;
use crate::middleware::RoleGate;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: StatisticsContext,
{
    let admin = RoleGate::new(jwt.clone(), &[Role::Admin]);
    let reader = RoleGate::new(jwt.clone(), &[Role::User, Role::Admin]);

    Router::new()
        .route(
            "/traffic-statistics",
            reader
                .clone()
                .protect_method(get(statistics_api::list::<S>))
                .merge(admin.clone().protect_method(post(statistics_api::create::<S>))),
        )
        .route(
            "/traffic-statistics/{id}",
            reader
                .clone()
                .protect_method(get(statistics_api::get::<S>))
                .merge(admin.clone().protect_method(put(statistics_api::update::<S>)))
                .merge(admin.clone().protect_method(delete(statistics_api::delete::<S>))),
        )
        .route(
            "/traffic-statistics/generate",
            admin.protect_method(post(statistics_api::generate::<S>)),
        )
        .route(
            "/registered-vehicles",
            reader
                .clone()
                .protect_method(get(statistics_api::registered_vehicles::<S>)),
        )
        .route(
            "/registered-vehicles/{year}",
            reader
                .clone()
                .protect_method(get(statistics_api::registered_in_year::<S>)),
        )
        .route(
            "/vehicle-statistics-by-year",
            reader
                .clone()
                .protect_method(get(statistics_api::vehicles_by_year::<S>)),
        )
        .route(
            "/most-popular-brands/{year}",
            reader
                .clone()
                .protect_method(get(statistics_api::popular_brands::<S>)),
        )
        .route(
            "/traffic-violations-report/{year}",
            reader.protect_method(get(statistics_api::violations_report::<S>)),
        )
}

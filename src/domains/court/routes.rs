use crate::domain::Role;
use crate::domains::court::api as court_api;
use crate::domains::court::context::CourtContext;
use crate::jwt::JwtManager;
use crate::middleware::RoleGate;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Routes open to both users and administrators
pub fn reader_routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: CourtContext,
{
    let router = Router::new().route(
        "/warrants/{subject}",
        get(court_api::warrant::for_subject::<S>),
    );
    RoleGate::new(jwt.clone(), &[Role::User, Role::Admin]).protect(router)
}

pub fn admin_routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: CourtContext,
{
    let router = Router::new()
        .route("/hearings/{id}", get(court_api::hearing::get::<S>))
        .route(
            "/hearings/person",
            post(court_api::hearing::create_person::<S>),
        )
        .route(
            "/hearings/legal-entity",
            post(court_api::hearing::create_legal_entity::<S>),
        )
        .route(
            "/hearings/{id}/reschedule",
            put(court_api::hearing::reschedule::<S>),
        )
        .route("/warrants", post(court_api::warrant::issue::<S>))
        .route("/suspensions", post(court_api::suspension::create::<S>))
        .route("/suspensions/{id}", get(court_api::suspension::get::<S>))
        .route(
            "/crime-report",
            post(court_api::crime_report::receive::<S>),
        );
    RoleGate::new(jwt.clone(), &[Role::Admin]).protect(router)
}

pub fn routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: CourtContext,
{
    reader_routes(jwt).merge(admin_routes(jwt))
}

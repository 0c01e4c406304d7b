use crate::domain::Role;
use crate::domains::mup::api as mup_api;
use crate::domains::mup::context::MupContext;
use crate::jwt::JwtManager;
use crate::middleware::RoleGate;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Requests citizens submit for themselves and reads of their own records
pub fn citizen_routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: MupContext,
{
    let router = Router::new()
        .route("/traffic-permit", post(mup_api::permit::submit::<S>))
        .route("/vehicle", post(mup_api::vehicle::create::<S>))
        .route(
            "/persons-vehicles/{subject}",
            get(mup_api::vehicle::owned_by::<S>),
        )
        .route("/registration", post(mup_api::registration::submit::<S>))
        .route(
            "/persons-registrations/{subject}",
            get(mup_api::registration::held_by::<S>),
        )
        .route(
            "/persons-driving-permit/{subject}",
            get(mup_api::permit::held_by::<S>),
        )
        .route(
            "/driving-bans/{subject}",
            get(mup_api::driving_ban::held_by::<S>),
        );
    RoleGate::new(jwt.clone(), &[Role::User, Role::Admin]).protect(router)
}

pub fn admin_routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: MupContext,
{
    let router = Router::new()
        .route(
            "/traffic-permit/pending",
            get(mup_api::permit::pending::<S>),
        )
        .route(
            "/traffic-permit/{id}/approve",
            put(mup_api::permit::approve::<S>),
        )
        .route(
            "/check-for-persons-driving-permit/{subject}",
            get(mup_api::permit::check::<S>),
        )
        .route(
            "/registered-vehicles",
            get(mup_api::vehicle::registered::<S>),
        )
        .route(
            "/registration/pending",
            get(mup_api::registration::pending::<S>),
        )
        .route(
            "/registration/{id}/approve",
            put(mup_api::registration::approve::<S>),
        )
        .route(
            "/registration-by-plate/{plate}",
            get(mup_api::registration::by_plate::<S>),
        )
        .route("/driving-ban", post(mup_api::driving_ban::issue::<S>))
        .route(
            "/driving-ban/{subject}",
            get(mup_api::driving_ban::held_by::<S>),
        )
        .route(
            "/check-persons-driving-ban/{subject}",
            get(mup_api::driving_ban::check::<S>),
        );
    RoleGate::new(jwt.clone(), &[Role::Admin]).protect(router)
}

pub fn routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: MupContext,
{
    citizen_routes(jwt).merge(admin_routes(jwt))
}

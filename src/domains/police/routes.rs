use crate::domain::Role;
use crate::domains::police::api as police_api;
use crate::domains::police::context::PoliceContext;
use crate::jwt::JwtManager;
use crate::middleware::RoleGate;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn routes<S>(jwt: &JwtManager) -> Router<S>
where
    S: PoliceContext,
{
    let admin = RoleGate::new(jwt.clone(), &[Role::Admin]);
    let reader = RoleGate::new(jwt.clone(), &[Role::User, Role::Admin]);

    // Reads are open to users, writes on the same paths are not.
    let records = Router::new()
        .route(
            "/traffic-violation",
            admin
                .clone()
                .protect_method(post(police_api::violation::create::<S>))
                .merge(
                    reader
                        .clone()
                        .protect_method(get(police_api::violation::list::<S>)),
                ),
        )
        .route(
            "/traffic-violation/{id}",
            admin
                .clone()
                .protect_method(
                    put(police_api::violation::update::<S>)
                        .merge(delete(police_api::violation::delete::<S>)),
                )
                .merge(
                    reader
                        .clone()
                        .protect_method(get(police_api::violation::get::<S>)),
                ),
        )
        .route(
            "/traffic-violation/violator/{subject}",
            reader.protect_method(get(police_api::violation::for_violator::<S>)),
        );

    let checks = Router::new()
        .route(
            "/check-alcohol-level",
            post(police_api::inspection::alcohol::<S>),
        )
        .route(
            "/check-driver-ban",
            post(police_api::inspection::driver_ban::<S>),
        )
        .route(
            "/check-driver-permit",
            post(police_api::inspection::driver_permit::<S>),
        )
        .route(
            "/check-vehicle-registration",
            post(police_api::inspection::vehicle_registration::<S>),
        );

    records.merge(admin.protect(checks))
}

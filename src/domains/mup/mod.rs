//! MUP: traffic permits, vehicles, registrations and driving bans

pub mod api;
pub mod context;
pub mod routes;
pub mod service;

//! Traffic police: violation records and roadside checks

pub mod api;
pub mod context;
pub mod routes;
pub mod service;

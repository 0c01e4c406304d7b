//! Traffic statistics derived from police and MUP records

pub mod api;
pub mod context;
pub mod routes;
pub mod service;

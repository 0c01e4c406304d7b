//! Court: hearings, warrants, license suspensions and crime report intake

pub mod api;
pub mod context;
pub mod routes;
pub mod service;

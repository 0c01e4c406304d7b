//! One module per service, each grouping its API, service and route layers.
//!
//! The binary serves one of them per process; see [`crate::server`].

pub mod court;
pub mod mup;
pub mod police;
pub mod statistics;

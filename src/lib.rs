//! Uprava Core - traffic enforcement backend
//!
//! This crate provides the court, MUP (vehicle and driving authority),
//! traffic police and statistics services. Each runs as its own process and
//! calls its peers over HTTP with the caller's bearer token.

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod domains;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};

//! HTTP middleware
//!
//! - `role_gate`: bearer token verification and per-route role allow-lists
//! - `auth`: the admitted [`Caller`] extractor and authentication errors
//! - `deadline`: per-request deadline for outbound calls
//! - `metrics`: request id propagation and HTTP metrics
//! - `trace`: request spans with personal data redacted

pub mod auth;
pub mod deadline;
pub mod metrics;
pub mod role_gate;
pub mod trace;

pub use auth::{AuthError, Caller};
pub use deadline::deadline_middleware;
pub use self::metrics::ObservabilityLayer;
pub use role_gate::{role_gate_middleware, RoleGate};
pub use trace::SanitizedMakeSpan;

//! Domain models shared by the court, MUP, police and statistics services

pub mod common;
pub mod court;
pub mod mup;
pub mod person;
pub mod police;
pub mod statistics;

pub use common::{Role, TIMESTAMP_FORMAT};
pub use court::*;
pub use mup::*;
pub use person::*;
pub use police::*;
pub use statistics::*;

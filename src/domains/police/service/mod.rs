//! Traffic police business logic

pub mod inspection;
pub mod violation;

pub use inspection::InspectionService;
pub use violation::ViolationService;

//! Court business logic

pub mod crime_report;
pub mod hearing;
pub mod suspension;
pub mod warrant;

pub use crime_report::CrimeReportService;
pub use hearing::HearingService;
pub use suspension::SuspensionService;
pub use warrant::WarrantService;

pub mod crime_report;
pub mod hearing;
pub mod suspension;
pub mod warrant;

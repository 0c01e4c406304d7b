pub mod driving_ban;
pub mod permit;
pub mod registration;
pub mod vehicle;

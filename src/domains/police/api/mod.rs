pub mod inspection;
pub mod violation;

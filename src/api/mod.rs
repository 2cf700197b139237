pub mod admin;
pub mod analytics;
pub mod attendance;
pub mod employee;

pub mod domain;
pub mod forms;
pub mod hooks;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "admin";

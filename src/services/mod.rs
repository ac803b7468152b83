pub use pushkind_common::services::errors::ServiceError;

pub mod products;

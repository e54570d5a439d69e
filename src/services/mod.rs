pub mod customers;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};

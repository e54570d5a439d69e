//! Domain aggregates exposed by the service layer.

pub mod customer;
pub mod types;

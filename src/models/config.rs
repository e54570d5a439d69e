//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::types::{DEFAULT_PAGE_LIMIT, PageLimit, TypeConstraintError};

fn default_page_size() -> i64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Page size applied when a listing request omits `limit`.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl ServerConfig {
    /// Configured page size, checked against the allowed listing bounds.
    pub fn page_limit(&self) -> Result<PageLimit, TypeConstraintError> {
        PageLimit::new(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(page_size: i64) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "app.db".to_string(),
            page_size,
        }
    }

    #[test]
    fn page_size_within_bounds_is_accepted() {
        assert_eq!(config(20).page_limit().unwrap().get(), 20);
    }

    #[test]
    fn page_size_out_of_bounds_is_rejected() {
        assert_eq!(config(0).page_limit(), Err(TypeConstraintError::InvalidLimit));
        assert_eq!(config(101).page_limit(), Err(TypeConstraintError::InvalidLimit));
    }
}

//! DTOs shaped for the customer list and detail endpoints.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::types::{SortField, SortOrder};
use crate::forms::customers::{CustomerListPayload, CustomersQuery};
use crate::pagination::Page;
use crate::services::ServiceError;

/// Base path of the customer list, also used to clear all filters.
pub const CUSTOMERS_PATH: &str = "/customers";

/// Normalized filters echoed back so the client can keep its controls in sync.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilters {
    pub query: Option<String>,
    pub sales_area: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl From<&CustomerListPayload> for CustomerFilters {
    fn from(payload: &CustomerListPayload) -> Self {
        Self {
            query: payload.search.as_ref().map(|s| s.as_str().to_string()),
            sales_area: payload.sales_area.as_ref().map(|s| s.as_str().to_string()),
            sort_by: payload.sort_by,
            sort_order: payload.sort_order,
        }
    }
}

/// Data required to render the customer list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersPageData {
    pub customers: Page<Customer>,
    /// Options of the sales-area filter; empty when they could not be loaded.
    pub sales_areas: Vec<String>,
    pub filters: CustomerFilters,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Validation,
    Connection,
    Unexpected,
}

impl From<&ServiceError> for ErrorCategory {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => ErrorCategory::Validation,
            ServiceError::Connection(_) => ErrorCategory::Connection,
            ServiceError::NotFound | ServiceError::Internal(_) => ErrorCategory::Unexpected,
        }
    }
}

/// Error state of the customer list with a retry link replaying the filters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPanel {
    pub error: String,
    pub category: ErrorCategory,
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
    pub retry_url: String,
    pub clear_url: &'static str,
}

impl ErrorPanel {
    pub fn for_listing(err: &ServiceError, query: &CustomersQuery) -> Self {
        let category = ErrorCategory::from(err);
        let (title, message, action) = match category {
            ErrorCategory::Validation => (
                "Nieprawidłowe parametry",
                "Wyczyść filtry i spróbuj ponownie.",
                "Wyczyść filtry",
            ),
            ErrorCategory::Connection => (
                "Problem z bazą danych",
                "Sprawdź połączenie z internetem lub spróbuj ponownie za chwilę.",
                "Spróbuj ponownie",
            ),
            ErrorCategory::Unexpected => (
                "Wystąpił nieoczekiwany błąd",
                "Odśwież stronę lub skontaktuj się z administratorem.",
                "Spróbuj ponownie",
            ),
        };

        // Infrastructure details stay in the logs.
        let error = if err.is_client_error() {
            err.to_string()
        } else {
            "Failed to fetch customers".to_string()
        };

        Self {
            error,
            category,
            title,
            message,
            action,
            retry_url: retry_url(query),
            clear_url: CUSTOMERS_PATH,
        }
    }
}

/// Listing URL replaying the current search, filter and sort from the first page.
pub fn retry_url(query: &CustomersQuery) -> String {
    match serde_html_form::to_string(query.without_position()) {
        Ok(encoded) if !encoded.is_empty() => format!("{CUSTOMERS_PATH}?{encoded}"),
        _ => CUSTOMERS_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_url_keeps_filters_and_drops_position() {
        let query = CustomersQuery {
            query: Some("acme & co".to_string()),
            sales_area: Some("PL-N".to_string()),
            sort_order: Some("desc".to_string()),
            cursor: Some("abc".to_string()),
            limit: Some("5".to_string()),
            ..CustomersQuery::default()
        };

        let url = retry_url(&query);

        assert!(url.starts_with("/customers?"));
        assert!(url.contains("query=acme+%26+co"));
        assert!(url.contains("salesArea=PL-N"));
        assert!(url.contains("sortOrder=desc"));
        assert!(!url.contains("cursor"));
        assert!(!url.contains("limit"));
    }

    #[test]
    fn retry_url_without_filters_is_plain_path() {
        assert_eq!(retry_url(&CustomersQuery::default()), "/customers");
    }

    #[test]
    fn panel_categories_follow_error_kind() {
        let query = CustomersQuery::default();

        let connection = ErrorPanel::for_listing(
            &ServiceError::Connection("timed out".to_string()),
            &query,
        );
        assert_eq!(connection.category, ErrorCategory::Connection);
        assert_eq!(connection.error, "Failed to fetch customers");

        let unexpected =
            ErrorPanel::for_listing(&ServiceError::Internal("boom".to_string()), &query);
        assert_eq!(unexpected.category, ErrorCategory::Unexpected);

        let not_found = ErrorPanel::for_listing(&ServiceError::NotFound, &query);
        assert_eq!(not_found.category, ErrorCategory::Unexpected);

        let validation =
            ErrorPanel::for_listing(&ServiceError::Form("bad sort".to_string()), &query);
        assert_eq!(validation.category, ErrorCategory::Validation);
        assert!(validation.error.contains("bad sort"));
    }
}

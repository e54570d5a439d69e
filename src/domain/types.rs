//! Strongly-typed value objects used by domain entities and listing requests.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! non-blank filters, bounded page sizes, allow-listed sort keys) so that once
//! a value reaches the repository layer it can be treated as trusted.
use std::{fmt::Display, fmt::Formatter, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided identifier is not a number at all.
    #[error("id must be numeric")]
    NonNumericId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Page size outside of `1..=MAX_PAGE_LIMIT`.
    #[error("limit must be between 1 and {MAX_PAGE_LIMIT}")]
    InvalidLimit,
    /// Sort key outside of the allow-list.
    #[error("unsupported sort field: {0}")]
    InvalidSortField(String),
    /// Sort direction other than `asc`/`desc`.
    #[error("unsupported sort order: {0}")]
    InvalidSortOrder(String),
    /// Cursor token could not be decoded.
    #[error("malformed cursor")]
    InvalidCursor,
    /// Cursor token was issued for a different sort.
    #[error("cursor was issued for a different sort order")]
    StaleCursor,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::NonNumericId)?;
                Self::new(value)
            }
        }
    };
}

id_newtype!(CustomerId, "Unique identifier for a customer.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text search term matched against the searchable customer columns.
pub type SearchTerm = NonEmptyString;

/// Exact sales area filter value.
pub type SalesArea = NonEmptyString;

/// Number of rows a page may hold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageLimit(i64);

impl PageLimit {
    /// Accepts values in `1..=MAX_PAGE_LIMIT`.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if (1..=MAX_PAGE_LIMIT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidLimit)
        }
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Rows to fetch so that the presence of a further page can be detected.
    pub const fn with_lookahead(self) -> i64 {
        self.0 + 1
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(DEFAULT_PAGE_LIMIT)
    }
}

/// Columns a customer listing may be ordered by.
///
/// Independent from the set of searchable columns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "customer_code")]
    Code,
    #[default]
    #[serde(rename = "customer_name")]
    Name,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Code => "customer_code",
            SortField::Name => "customer_name",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "customer_code" => Ok(SortField::Code),
            "customer_name" => Ok(SortField::Name),
            other => Err(TypeConstraintError::InvalidSortField(other.to_string())),
        }
    }
}

/// Direction of a customer listing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TypeConstraintError::InvalidSortOrder(other.to_string())),
        }
    }
}

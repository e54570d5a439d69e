//! Cursor-based pagination primitives.
//!
//! A [`Cursor`] is handed to clients as an opaque URL-safe token. It carries
//! the sort signature it was issued under together with the sort-key value and
//! id of the last row the client has seen, so a follow-up request can resume
//! strictly after that row and a token replayed under a different sort can be
//! rejected instead of silently skipping or repeating rows.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::domain::types::{PageLimit, SortField, SortOrder, TypeConstraintError};

/// Sort-key value of the last row of a page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnchorValue {
    Integer(i32),
    Text(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cursor {
    #[serde(rename = "s")]
    pub sort_by: SortField,
    #[serde(rename = "o")]
    pub sort_order: SortOrder,
    #[serde(rename = "v")]
    pub value: AnchorValue,
    /// Id of the last row; breaks ties between equal sort keys.
    #[serde(rename = "i")]
    pub id: i32,
}

impl Cursor {
    pub fn new(sort_by: SortField, sort_order: SortOrder, value: AnchorValue, id: i32) -> Self {
        Self {
            sort_by,
            sort_order,
            value,
            id,
        }
    }

    /// Serializes the cursor into an opaque token.
    pub fn encode(&self) -> String {
        // Only strings and integers are serialized here, which cannot fail.
        serde_json::to_vec(self)
            .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
            .unwrap_or_default()
    }

    /// Parses a token previously produced by [`Cursor::encode`].
    pub fn decode(token: &str) -> Result<Self, TypeConstraintError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| TypeConstraintError::InvalidCursor)?;
        let cursor: Cursor =
            serde_json::from_slice(&bytes).map_err(|_| TypeConstraintError::InvalidCursor)?;

        let value_fits = matches!(
            (cursor.sort_by, &cursor.value),
            (SortField::Id, AnchorValue::Integer(_))
                | (SortField::Code | SortField::Name, AnchorValue::Text(_))
        );
        if !value_fits || cursor.id <= 0 {
            return Err(TypeConstraintError::InvalidCursor);
        }

        Ok(cursor)
    }

    /// Rejects cursors issued under another sort field or direction.
    pub fn ensure_matches(
        &self,
        sort_by: SortField,
        sort_order: SortOrder,
    ) -> Result<(), TypeConstraintError> {
        if self.sort_by == sort_by && self.sort_order == sort_order {
            Ok(())
        } else {
            Err(TypeConstraintError::StaleCursor)
        }
    }
}

/// One page of a cursor-paginated listing.
///
/// `has_more` is `true` exactly when `next_cursor` is present.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Terminal page without rows.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }

    /// Builds a page from up to `limit + 1` fetched rows.
    ///
    /// The extra lookahead row, when present, only signals that another page
    /// exists and is dropped. `cursor_for` is applied to the last retained
    /// row.
    pub fn from_lookahead<F>(mut rows: Vec<T>, limit: PageLimit, cursor_for: F) -> Self
    where
        F: FnOnce(&T) -> Cursor,
    {
        let limit = limit.get() as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = if has_more {
            rows.last().map(|row| cursor_for(row).encode())
        } else {
            None
        };

        Self {
            has_more: next_cursor.is_some(),
            data: rows,
            next_cursor,
        }
    }
}

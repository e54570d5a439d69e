//! Query parameters of the customer listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{
    NonEmptyString, PageLimit, SalesArea, SearchTerm, SortField, SortOrder, TypeConstraintError,
};
use crate::forms::FormError;
use crate::pagination::Cursor;
use crate::repository::CustomerListQuery;

/// Raw listing parameters as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomersQuery {
    /// Free-text search; `search` is accepted as an alias.
    #[serde(default, alias = "search", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub sales_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1024))]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl CustomersQuery {
    /// Same filters and sort without the position, used to restart a listing.
    pub fn without_position(&self) -> Self {
        Self {
            cursor: None,
            limit: None,
            ..self.clone()
        }
    }
}

/// Blank parameters are treated as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerListPayload {
    pub search: Option<SearchTerm>,
    pub sales_area: Option<SalesArea>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub cursor: Option<Cursor>,
    pub limit: Option<PageLimit>,
}

impl TryFrom<CustomersQuery> for CustomerListPayload {
    type Error = FormError;

    fn try_from(form: CustomersQuery) -> Result<Self, Self::Error> {
        form.validate()?;

        let sort_by = present(form.sort_by.as_deref())
            .map(str::parse::<SortField>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = present(form.sort_order.as_deref())
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let limit = present(form.limit.as_deref())
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| TypeConstraintError::InvalidLimit)
                    .and_then(PageLimit::new)
            })
            .transpose()?;

        let cursor = present(form.cursor.as_deref())
            .map(Cursor::decode)
            .transpose()?;
        if let Some(cursor) = &cursor {
            cursor.ensure_matches(sort_by, sort_order)?;
        }

        let search = present(form.query.as_deref())
            .map(NonEmptyString::new)
            .transpose()?;
        let sales_area = present(form.sales_area.as_deref())
            .map(NonEmptyString::new)
            .transpose()?;

        Ok(Self {
            search,
            sales_area,
            sort_by,
            sort_order,
            cursor,
            limit,
        })
    }
}

impl CustomerListPayload {
    pub fn into_query(self, default_limit: PageLimit) -> CustomerListQuery {
        let mut query = CustomerListQuery::new()
            .sort(self.sort_by, self.sort_order)
            .limit(self.limit.unwrap_or(default_limit));
        if let Some(term) = self.search {
            query = query.search(term);
        }
        if let Some(area) = self.sales_area {
            query = query.sales_area(area);
        }
        if let Some(cursor) = self.cursor {
            query = query.after(cursor);
        }
        query
    }
}

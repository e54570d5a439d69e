//! Services backing the customer list, its filters and the detail view.

use crate::domain::customer::{Customer, CustomerCode};
use crate::domain::types::{CustomerId, PageLimit};
use crate::dto::customers::{CustomerFilters, CustomersPageData};
use crate::forms::customers::{CustomerListPayload, CustomersQuery};
use crate::pagination::{Cursor, Page};
use crate::repository::{CustomerListQuery, CustomerReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of active customers matching the query.
pub fn list_customers<R>(repo: &R, query: CustomerListQuery) -> ServiceResult<Page<Customer>>
where
    R: CustomerReader + ?Sized,
{
    if let Some(cursor) = &query.after {
        cursor.ensure_matches(query.sort_by, query.sort_order)?;
    }

    let (sort_by, sort_order, limit) = (query.sort_by, query.sort_order, query.limit);

    let rows = repo.list_customers(query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })?;

    Ok(Page::from_lookahead(rows, limit, |last| {
        Cursor::new(sort_by, sort_order, last.sort_key(sort_by), last.id.get())
    }))
}

/// Looks up an active customer by the raw id taken from the path.
///
/// `Ok(None)` means no active customer carries the id.
pub fn get_customer<R>(repo: &R, raw_id: &str) -> ServiceResult<Option<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let id: CustomerId = raw_id.parse()?;

    let customer = repo.get_customer_by_id(id).map_err(|err| {
        log::error!("Failed to load customer {id}: {err}");
        err
    })?;

    Ok(customer)
}

/// Distinct sales areas for the filter control.
///
/// A failure here degrades to an empty list so the page still renders.
pub fn list_sales_areas<R>(repo: &R) -> Vec<String>
where
    R: CustomerReader + ?Sized,
{
    repo.list_sales_areas().unwrap_or_else(|err| {
        log::warn!("Failed to load sales areas: {err}");
        Vec::new()
    })
}

pub fn list_customer_codes<R>(repo: &R) -> ServiceResult<Vec<CustomerCode>>
where
    R: CustomerReader + ?Sized,
{
    let codes = repo.list_customer_codes().map_err(|err| {
        log::error!("Failed to list customer codes: {err}");
        err
    })?;

    Ok(codes)
}

/// Validates the listing parameters into a repository query and echoed filters.
fn parse_listing(
    query: CustomersQuery,
    default_limit: PageLimit,
) -> ServiceResult<(CustomerListQuery, CustomerFilters)> {
    let payload = CustomerListPayload::try_from(query).map_err(|err| {
        log::warn!("Rejected customer listing parameters: {err}");
        ServiceError::from(err)
    })?;
    let filters = CustomerFilters::from(&payload);

    Ok((payload.into_query(default_limit), filters))
}

/// Loads the first (or cursor-addressed) page of the customer list together
/// with the sales-area options.
pub fn load_customers_page<R>(
    repo: &R,
    query: CustomersQuery,
    default_limit: PageLimit,
) -> ServiceResult<CustomersPageData>
where
    R: CustomerReader + ?Sized,
{
    let (list_query, filters) = parse_listing(query, default_limit)?;

    let customers = list_customers(repo, list_query)?;
    let sales_areas = list_sales_areas(repo);

    Ok(CustomersPageData {
        customers,
        sales_areas,
        filters,
    })
}

/// Next page for incremental loading; same parameters as the list page.
pub fn load_more_customers<R>(
    repo: &R,
    query: CustomersQuery,
    default_limit: PageLimit,
) -> ServiceResult<Page<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let (list_query, _) = parse_listing(query, default_limit)?;

    list_customers(repo, list_query)
}

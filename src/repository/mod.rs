use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        customer::{Customer, CustomerCode},
        types::{CustomerId, PageLimit, SalesArea, SearchTerm, SortField, SortOrder},
    },
    pagination::Cursor,
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed repository sharing one connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Filter, order and window of a customer listing.
///
/// Values reaching this type are already validated; the repository only
/// translates them into a parameterized statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerListQuery {
    pub search: Option<SearchTerm>,
    pub sales_area: Option<SalesArea>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// Resume strictly after this row.
    pub after: Option<Cursor>,
    pub limit: PageLimit,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: SearchTerm) -> Self {
        self.search = Some(term);
        self
    }

    pub fn sales_area(mut self, area: SalesArea) -> Self {
        self.sales_area = Some(area);
        self
    }

    pub fn sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn after(mut self, cursor: Cursor) -> Self {
        self.after = Some(cursor);
        self
    }

    pub fn limit(mut self, limit: PageLimit) -> Self {
        self.limit = limit;
        self
    }
}

pub trait CustomerReader {
    /// Active customer with all nested addresses, contacts and credits.
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    /// Loads up to `query.limit + 1` active customers in listing order.
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
    fn list_sales_areas(&self) -> RepositoryResult<Vec<String>>;
    fn list_customer_codes(&self) -> RepositoryResult<Vec<CustomerCode>>;
}

//! Repository implementation for customers.
//!
//! Listings are assembled as a single boxed Diesel statement: the predicate
//! (status, sales area, search) and the keyset window are composed as bound
//! expressions and the ordering is picked from typed columns, so no
//! caller-supplied text ever becomes SQL.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::lower_unicode,
    domain::{
        customer::{CURRENT_ADDRESS_TYPE, Customer, CustomerCode},
        types::{CustomerId, SortField, SortOrder},
    },
    models::customer::{
        Customer as DbCustomer, CustomerAddress as DbCustomerAddress,
        CustomerContact as DbCustomerContact, CustomerCredit as DbCustomerCredit,
    },
    pagination::{AnchorValue, Cursor},
    repository::{
        CustomerListQuery, CustomerReader, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{customer_addresses, customer_contacts, customer_credits, customers},
};

type CustomerPredicate =
    Box<dyn BoxableExpression<customers::table, Sqlite, SqlType = Nullable<Bool>>>;

/// Character used to escape `%`, `_` and itself inside `LIKE` patterns.
const LIKE_ESCAPE: char = '\\';

/// Wraps a user term into a substring `LIKE` pattern matching it literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Conjunction of the status flag with the optional filters.
fn customer_predicate(query: &CustomerListQuery) -> CustomerPredicate {
    let mut predicate: CustomerPredicate = Box::new(customers::customer_status.eq(true).nullable());

    if let Some(area) = &query.sales_area {
        predicate = Box::new(
            predicate.and(customers::customer_sales_area.eq(area.as_str().to_string())),
        );
    }

    // Both sides are lowercased with Unicode rules, so `łódź` finds `ŁÓDŹ`.
    if let Some(term) = &query.search {
        let pattern = like_pattern(&term.as_str().to_lowercase());
        let matches = lower_unicode(customers::customer_code.nullable())
            .like(pattern.clone())
            .escape(LIKE_ESCAPE)
            .or(lower_unicode(customers::customer_name.nullable())
                .like(pattern.clone())
                .escape(LIKE_ESCAPE))
            .or(lower_unicode(customers::customer_sales_owner)
                .like(pattern.clone())
                .escape(LIKE_ESCAPE))
            .or(lower_unicode(customers::customer_service_owner)
                .like(pattern)
                .escape(LIKE_ESCAPE));
        predicate = Box::new(predicate.and(matches));
    }

    predicate
}

/// Rows strictly after the cursor in `(sort key, id)` order of the listing.
fn after_cursor(
    cursor: &Cursor,
    sort_by: SortField,
    order: SortOrder,
) -> RepositoryResult<CustomerPredicate> {
    let last_id = cursor.id;

    let window: CustomerPredicate = match (sort_by, &cursor.value, order) {
        (SortField::Id, AnchorValue::Integer(_), SortOrder::Asc) => {
            Box::new(customers::id.gt(last_id).nullable())
        }
        (SortField::Id, AnchorValue::Integer(_), SortOrder::Desc) => {
            Box::new(customers::id.lt(last_id).nullable())
        }
        (SortField::Code, AnchorValue::Text(code), SortOrder::Asc) => Box::new(
            customers::customer_code
                .gt(code.clone())
                .or(customers::customer_code
                    .eq(code.clone())
                    .and(customers::id.gt(last_id)))
                .nullable(),
        ),
        (SortField::Code, AnchorValue::Text(code), SortOrder::Desc) => Box::new(
            customers::customer_code
                .lt(code.clone())
                .or(customers::customer_code
                    .eq(code.clone())
                    .and(customers::id.lt(last_id)))
                .nullable(),
        ),
        (SortField::Name, AnchorValue::Text(name), SortOrder::Asc) => Box::new(
            customers::customer_name
                .gt(name.clone())
                .or(customers::customer_name
                    .eq(name.clone())
                    .and(customers::id.gt(last_id)))
                .nullable(),
        ),
        (SortField::Name, AnchorValue::Text(name), SortOrder::Desc) => Box::new(
            customers::customer_name
                .lt(name.clone())
                .or(customers::customer_name
                    .eq(name.clone())
                    .and(customers::id.lt(last_id)))
                .nullable(),
        ),
        _ => {
            return Err(RepositoryError::ValidationError(
                "cursor value does not match sort field".to_string(),
            ));
        }
    };

    Ok(window)
}

fn attach_current_addresses(
    conn: &mut SqliteConnection,
    db_customers: Vec<DbCustomer>,
) -> RepositoryResult<Vec<Customer>> {
    if db_customers.is_empty() {
        return Ok(Vec::new());
    }

    let customer_ids: Vec<i32> = db_customers.iter().map(|c| c.id).collect();

    let db_addresses = customer_addresses::table
        .filter(customer_addresses::customer_id.eq_any(customer_ids))
        .filter(customer_addresses::address_type.eq(CURRENT_ADDRESS_TYPE))
        .order(customer_addresses::id.asc())
        .load::<DbCustomerAddress>(conn)?;

    let mut current_by_customer: HashMap<i32, DbCustomerAddress> = HashMap::new();
    for address in db_addresses {
        current_by_customer
            .entry(address.customer_id)
            .or_insert(address);
    }

    db_customers
        .into_iter()
        .map(|db_customer| {
            let current = current_by_customer.remove(&db_customer.id);
            let mut customer = Customer::try_from(db_customer).map_err(RepositoryError::from)?;
            customer.current_address = current.map(Into::into);
            Ok(customer)
        })
        .collect()
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;

        let db_customer = customers::table
            .filter(customers::id.eq(id.get()))
            .filter(customers::customer_status.eq(true))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        let Some(db_customer) = db_customer else {
            return Ok(None);
        };

        let addresses = DbCustomerAddress::belonging_to(&db_customer)
            .order(customer_addresses::id.asc())
            .load::<DbCustomerAddress>(&mut conn)?;
        let contacts = DbCustomerContact::belonging_to(&db_customer)
            .order(customer_contacts::id.asc())
            .load::<DbCustomerContact>(&mut conn)?;
        let credits = DbCustomerCredit::belonging_to(&db_customer)
            .order(customer_credits::id.asc())
            .load::<DbCustomerCredit>(&mut conn)?;

        let mut customer = Customer::try_from(db_customer).map_err(RepositoryError::from)?;
        customer.addresses = addresses.into_iter().map(Into::into).collect();
        customer.current_address = customer
            .addresses
            .iter()
            .find(|address| address.is_current())
            .cloned();
        customer.contacts = contacts.into_iter().map(Into::into).collect();
        customer.credits = credits.into_iter().map(Into::into).collect();

        Ok(Some(customer))
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>> {
        let mut conn = self.conn()?;

        let mut items = customers::table
            .filter(customer_predicate(&query))
            .into_boxed::<Sqlite>();

        if let Some(cursor) = &query.after {
            items = items.filter(after_cursor(cursor, query.sort_by, query.sort_order)?);
        }

        // The id tie-break makes the order total, which keeps page boundaries stable.
        items = match (query.sort_by, query.sort_order) {
            (SortField::Id, SortOrder::Asc) => items.order_by(customers::id.asc()),
            (SortField::Id, SortOrder::Desc) => items.order_by(customers::id.desc()),
            (SortField::Code, SortOrder::Asc) => {
                items.order_by((customers::customer_code.asc(), customers::id.asc()))
            }
            (SortField::Code, SortOrder::Desc) => {
                items.order_by((customers::customer_code.desc(), customers::id.desc()))
            }
            (SortField::Name, SortOrder::Asc) => {
                items.order_by((customers::customer_name.asc(), customers::id.asc()))
            }
            (SortField::Name, SortOrder::Desc) => {
                items.order_by((customers::customer_name.desc(), customers::id.desc()))
            }
        };

        let db_customers = items
            .limit(query.limit.with_lookahead())
            .load::<DbCustomer>(&mut conn)?;

        attach_current_addresses(&mut conn, db_customers)
    }

    fn list_sales_areas(&self) -> RepositoryResult<Vec<String>> {
        let mut conn = self.conn()?;

        let areas = customers::table
            .filter(customers::customer_status.eq(true))
            .filter(customers::customer_sales_area.is_not_null())
            .filter(customers::customer_sales_area.ne(""))
            .select(customers::customer_sales_area)
            .distinct()
            .order(customers::customer_sales_area.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(areas.into_iter().flatten().collect())
    }

    fn list_customer_codes(&self) -> RepositoryResult<Vec<CustomerCode>> {
        let mut conn = self.conn()?;

        customers::table
            .filter(customers::customer_status.eq(true))
            .select((customers::id, customers::customer_code))
            .order((customers::customer_code.asc(), customers::id.asc()))
            .load::<(i32, String)>(&mut conn)?
            .into_iter()
            .map(|row| CustomerCode::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

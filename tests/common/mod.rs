#![allow(dead_code)]

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use textile_crm::db::{DbPool, establish_connection_pool};
use textile_crm::schema::{customer_addresses, customer_contacts, customer_credits, customers};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite database living in a temporary directory for the duration of a test.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();

        let pool = establish_connection_pool(&url).expect("build pool");
        let mut conn = pool.get().expect("get connection");
        let conn: &mut SqliteConnection = &mut conn;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn insert_customer(&self, seed: CustomerSeed) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(customers::table)
            .values((
                customers::customer_code.eq(seed.code),
                customers::customer_name.eq(seed.name),
                customers::customer_sales_area.eq(seed.sales_area),
                customers::customer_sales_owner.eq(seed.sales_owner),
                customers::customer_service_owner.eq(seed.service_owner),
                customers::customer_status.eq(seed.active),
            ))
            .execute(&mut conn)
            .expect("insert customer");

        customers::table
            .select(customers::id)
            .order(customers::id.desc())
            .first(&mut conn)
            .expect("load inserted id")
    }

    pub fn insert_address(&self, customer_id: i32, address_type: &str, city: &str) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(customer_addresses::table)
            .values((
                customer_addresses::customer_id.eq(customer_id),
                customer_addresses::address_type.eq(address_type),
                customer_addresses::address_city.eq(city),
            ))
            .execute(&mut conn)
            .expect("insert address");
    }

    pub fn insert_contact(&self, customer_id: i32, name: &str, email: &str) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(customer_contacts::table)
            .values((
                customer_contacts::customer_id.eq(customer_id),
                customer_contacts::contact_name.eq(name),
                customer_contacts::contact_email.eq(email),
            ))
            .execute(&mut conn)
            .expect("insert contact");
    }

    pub fn insert_credit(&self, customer_id: i32, value: f64, currency: &str) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(customer_credits::table)
            .values((
                customer_credits::customer_id.eq(customer_id),
                customer_credits::credit_value.eq(value),
                customer_credits::credit_currency.eq(currency),
            ))
            .execute(&mut conn)
            .expect("insert credit");
    }
}

#[derive(Clone, Debug)]
pub struct CustomerSeed {
    pub code: String,
    pub name: String,
    pub sales_area: Option<String>,
    pub sales_owner: Option<String>,
    pub service_owner: Option<String>,
    pub active: bool,
}

impl CustomerSeed {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            sales_area: None,
            sales_owner: None,
            service_owner: None,
            active: true,
        }
    }

    pub fn area(mut self, area: &str) -> Self {
        self.sales_area = Some(area.to_string());
        self
    }

    pub fn sales_owner(mut self, owner: &str) -> Self {
        self.sales_owner = Some(owner.to_string());
        self
    }

    pub fn service_owner(mut self, owner: &str) -> Self {
        self.service_owner = Some(owner.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

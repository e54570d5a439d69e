//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::customer::{Customer, CustomerCode};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerListQuery, CustomerReader};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
        fn list_sales_areas(&self) -> RepositoryResult<Vec<String>>;
        fn list_customer_codes(&self) -> RepositoryResult<Vec<CustomerCode>>;
    }
}

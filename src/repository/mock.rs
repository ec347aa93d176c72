//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::category::Category;
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;
        fn list_customers(
            &self,
            query: CustomerListQuery,
        ) -> RepositoryResult<(usize, Vec<Customer>)>;
        fn count_customers(&self) -> RepositoryResult<i64>;
        fn count_by_category(&self) -> RepositoryResult<Vec<(Category, i64)>>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(
            &self,
            customer_id: i32,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
    }
}

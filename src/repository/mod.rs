use serde::Deserialize;

use crate::{
    domain::{
        category::Category,
        customer::{Customer, NewCustomer, UpdateCustomer},
    },
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod errors;
#[cfg(test)]
pub mod mock;

pub use customer::DieselRepository;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Sortable customer columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerOrder {
    #[default]
    Id,
    FirstName,
    LastName,
    Email,
    Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Structured description of a customer listing: filters, ordering and an
/// optional page. The Diesel adapter translates it into SQL; callers never
/// build query fragments themselves.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    /// Case-insensitive substring matched against first OR last name.
    pub name: Option<String>,
    pub category: Option<Category>,
    pub pagination: Option<Pagination>,
    pub order: CustomerOrder,
    pub direction: SortDirection,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    pub fn order(mut self, order: CustomerOrder) -> Self {
        self.order = order;
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;
    /// Returns the total number of matches before paging plus one page.
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    fn count_customers(&self) -> RepositoryResult<i64>;
    /// One group-by pass over the whole table. Categories without customers
    /// do not appear.
    fn count_by_category(&self) -> RepositoryResult<Vec<(Category, i64)>>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    /// Deleting an unknown id is an error, not a no-op.
    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
}

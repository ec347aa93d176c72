//! DTOs exposed by the customer grid endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::validation::ValidationError;
use crate::repository::{CustomerOrder, SortDirection};

/// Query parameters accepted by the customer read endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    /// Optional free-form name filter matched against first and last name.
    pub name: Option<String>,
    /// Optional category filter; blank or `"All"` means no restriction.
    pub category: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
    /// Optional page size, defaults to the repository page size.
    pub per_page: Option<usize>,
    pub sort: Option<CustomerOrder>,
    pub dir: Option<SortDirection>,
}

/// Result payload returned by [`crate::services::customer::list_customers`].
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    /// Total number of customers matching the filter before paging.
    pub total: usize,
    /// Page of customers requested by the caller.
    pub customers: Vec<Customer>,
}

/// Outcome of a validated create/update. `Rejected` means nothing was
/// persisted.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(Customer),
    Rejected(Vec<ValidationError>),
}

/// One row of the category report.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryData {
    pub category: String,
    /// Share of the total customer population, two fraction digits.
    pub percent: Decimal,
}

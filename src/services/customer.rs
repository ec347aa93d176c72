//! Application logic for the customer grid: filtered reads, the validated
//! write pipeline and the category report.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::category::Category;
use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::validation::ValidationError;
use crate::dto::customer::{CategoryData, CustomersQuery, CustomersResponse, SaveOutcome};
use crate::forms::customer::CustomerForm;
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DEFAULT_ITEMS_PER_PAGE,
};
use crate::services::{ServiceError, ServiceResult};

/// Builds a [`CustomerListQuery`] from the request filters and returns the
/// matching page together with the unpaged total.
pub fn list_customers<R>(repo: &R, params: CustomersQuery) -> ServiceResult<CustomersResponse>
where
    R: CustomerReader + ?Sized,
{
    let mut query = CustomerListQuery::new();

    let name = params
        .name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(name) = name {
        query = query.name(name);
    }

    match params.category.as_deref().map(str::trim) {
        None | Some("") => {}
        Some(value) if value == Category::ALL => {}
        Some(value) => {
            let category = value
                .parse::<Category>()
                .map_err(|_| ServiceError::InvalidCategory(value.to_string()))?;
            query = query.category(category);
        }
    }

    // A bare `per_page` means the first page; no paging parameters at all
    // means the full result set.
    if params.page.is_some() || params.per_page.is_some() {
        query = query.paginate(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        );
    }
    if let Some(order) = params.sort {
        query = query.order(order);
    }
    if let Some(direction) = params.dir {
        query = query.direction(direction);
    }

    let (total, customers) = repo.list_customers(query)?;
    Ok(CustomersResponse { total, customers })
}

/// Runs the validation pipeline and inserts the customer when it passes.
pub fn create_customer<R>(repo: &R, form: CustomerForm) -> ServiceResult<SaveOutcome>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let mut errors = CustomerForm::rules().validate(&form);
    let new_customer = NewCustomer::from(&form);

    if let Some(error) = check_email_unique(repo, new_customer.email.as_deref(), None)? {
        errors.push(error);
    }

    if !errors.is_empty() {
        return Ok(SaveOutcome::Rejected(errors));
    }

    let inserted = repo.create_customer(&new_customer)?;
    log::info!("New customer: {}", inserted.id);
    Ok(SaveOutcome::Saved(inserted))
}

/// Same pipeline as [`create_customer`], applied to an existing record.
pub fn update_customer<R>(repo: &R, customer_id: i32, form: CustomerForm) -> ServiceResult<SaveOutcome>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let mut errors = CustomerForm::rules().validate(&form);
    let updates = UpdateCustomer::from(&form);

    if let Some(error) = check_email_unique(repo, updates.email.as_deref(), Some(customer_id))? {
        errors.push(error);
    }

    if !errors.is_empty() {
        return Ok(SaveOutcome::Rejected(errors));
    }

    let saved = repo.update_customer(customer_id, &updates)?;
    Ok(SaveOutcome::Saved(saved))
}

/// Removes the customer unconditionally. Storage failures propagate.
pub fn delete_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    repo.delete_customer(customer_id).map_err(ServiceError::from)
}

/// Share of the total population per category, half-up to two fraction
/// digits. An empty table yields an empty report.
pub fn category_report<R>(repo: &R) -> ServiceResult<Vec<CategoryData>>
where
    R: CustomerReader + ?Sized,
{
    let total = repo.count_customers()?;
    if total == 0 {
        return Ok(Vec::new());
    }
    let total = Decimal::from(total);

    let report = repo
        .count_by_category()?
        .into_iter()
        .map(|(category, count)| {
            let mut percent = (Decimal::from(count * 100) / total)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            // Exact divisions come back at scale 0; the report always carries
            // two fraction digits.
            percent.rescale(2);
            CategoryData {
                category: category.as_str().to_string(),
                percent,
            }
        })
        .collect();

    Ok(report)
}

/// Appends no error when the email is absent or belongs to the customer
/// being updated. Lookup failures propagate.
fn check_email_unique<R>(
    repo: &R,
    email: Option<&str>,
    customer_id: Option<i32>,
) -> ServiceResult<Option<ValidationError>>
where
    R: CustomerReader + ?Sized,
{
    let Some(email) = email else {
        return Ok(None);
    };

    match repo.get_customer_by_email(email)? {
        Some(existing) if customer_id != Some(existing.id) => {
            Ok(Some(ValidationError::new("email", "Email not unique")))
        }
        _ => Ok(None),
    }
}

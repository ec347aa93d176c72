use serde::Deserialize;
use validator::ValidateEmail;

use crate::domain::category::Category;
use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::validation::{Rule, RuleSet};

/// Write payload for creating or updating a customer. An unknown `category`
/// value is rejected during deserialization, before validation runs.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub category: Category,
}

impl CustomerForm {
    /// Field rules checked before any write.
    pub fn rules() -> RuleSet<CustomerForm> {
        RuleSet::new(vec![
            Rule::new("first_name", "First name is required", |f: &CustomerForm| {
                !f.first_name.trim().is_empty()
            }),
            Rule::new(
                "first_name",
                "First name must be at most 100 characters",
                |f: &CustomerForm| f.first_name.trim().len() <= 100,
            ),
            Rule::new("last_name", "Last name is required", |f: &CustomerForm| {
                !f.last_name.trim().is_empty()
            }),
            Rule::new(
                "last_name",
                "Last name must be at most 100 characters",
                |f: &CustomerForm| f.last_name.trim().len() <= 100,
            ),
            Rule::new("email", "Invalid email address", |f: &CustomerForm| {
                let email = f.email.trim();
                email.is_empty() || email.validate_email()
            }),
        ])
    }
}

impl From<&CustomerForm> for NewCustomer {
    fn from(form: &CustomerForm) -> Self {
        NewCustomer::new(
            form.first_name.clone(),
            form.last_name.clone(),
            Some(form.email.clone()),
            Some(form.phone.clone()),
            form.category,
        )
    }
}

impl From<&CustomerForm> for UpdateCustomer {
    fn from(form: &CustomerForm) -> Self {
        UpdateCustomer::new(
            form.first_name.clone(),
            form.last_name.clone(),
            Some(form.email.clone()),
            Some(form.phone.clone()),
            form.category,
        )
    }
}

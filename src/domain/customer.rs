use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Category,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Category,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
        category: Category,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Category,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
        category: Category,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_normalizes_email_and_drops_blanks() {
        let customer = NewCustomer::new(
            " Anna ".to_string(),
            "Lee".to_string(),
            Some(" Anna@Example.COM ".to_string()),
            Some("   ".to_string()),
            Category::Gold,
        );
        assert_eq!(customer.first_name, "Anna");
        assert_eq!(customer.email.as_deref(), Some("anna@example.com"));
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn update_customer_treats_empty_email_as_none() {
        let updates = UpdateCustomer::new(
            "Bob".to_string(),
            "Stone".to_string(),
            Some(String::new()),
            None,
            Category::Silver,
        );
        assert_eq!(updates.email, None);
    }
}

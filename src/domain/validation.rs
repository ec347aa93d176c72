//! Explicit field validation rules.
//!
//! A [`RuleSet`] is an ordered list of `(field, predicate, message)` rules
//! evaluated against a payload. Failures are grouped per field into one
//! [`ValidationError`] carrying the messages in rule order.

use serde::Serialize;

/// One or more validation messages attached to a single field.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            messages: vec![message.into()],
        }
    }
}

/// A single validation rule. `check` returns `true` when the value is valid.
pub struct Rule<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

impl<T> Rule<T> {
    pub fn new(field: &'static str, message: &'static str, check: fn(&T) -> bool) -> Self {
        Self {
            field,
            message,
            check,
        }
    }
}

pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// Evaluates every rule, grouping failures by field.
    pub fn validate(&self, value: &T) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = Vec::new();
        for rule in &self.rules {
            if (rule.check)(value) {
                continue;
            }
            match errors.iter_mut().find(|e| e.field == rule.field) {
                Some(error) => error.messages.push(rule.message.to_string()),
                None => errors.push(ValidationError::new(rule.field, rule.message)),
            }
        }
        errors
    }
}

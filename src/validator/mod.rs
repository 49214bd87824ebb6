//! Field validation for user and task records.
//!
//! Each field runs its rules in order and stops at the first failure; all
//! fields are checked, so one call can report several violations.

mod task;
mod user;

use std::fmt;

pub use task::{StandardTaskValidator, TaskValidator};
pub use user::{StandardUserValidator, UserValidator};

/// A single failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Violations collected while validating one record, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.violations.push(FieldViolation { field, message });
        self.violations.sort_by(|a, b| a.field.cmp(b.field));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Message for `field`, if that field failed.
    pub fn field(&self, field: &str) -> Option<&'static str> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        if !self.violations.is_empty() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Ordered rule chain for one string field.
pub(crate) struct FieldCheck<'a> {
    value: &'a str,
    failed: Option<&'static str>,
}

impl<'a> FieldCheck<'a> {
    pub(crate) fn new(value: &'a str) -> Self {
        Self {
            value,
            failed: None,
        }
    }

    pub(crate) fn required(mut self, message: &'static str) -> Self {
        if self.failed.is_none() && self.value.is_empty() {
            self.failed = Some(message);
        }
        self
    }

    /// Length in chars, not bytes. Empty values are left to `required`.
    pub(crate) fn rune_length(mut self, min: usize, max: usize, message: &'static str) -> Self {
        if self.failed.is_none() && !self.value.is_empty() {
            let len = self.value.chars().count();
            if len < min || len > max {
                self.failed = Some(message);
            }
        }
        self
    }

    pub(crate) fn matches(mut self, rule: impl Fn(&str) -> bool, message: &'static str) -> Self {
        if self.failed.is_none() && !self.value.is_empty() && !rule(self.value) {
            self.failed = Some(message);
        }
        self
    }

    pub(crate) fn record(self, field: &'static str, errors: &mut ValidationErrors) {
        if let Some(message) = self.failed {
            errors.add(field, message);
        }
    }
}

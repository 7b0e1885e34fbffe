//! Constraint violation reporting.
//!
//! Entities declare their field constraints with `validator::Validate`; the
//! resulting [`ValidationErrors`] are flattened here into a set of
//! `{field, message}` pairs keyed by the serialized (camelCase) field path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::error::{DomainError, DomainResult};

/// A reported constraint failure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Set of violations produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(BTreeSet<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, violation: Violation) -> bool {
        self.0.insert(violation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Violations reported for `field`.
    pub fn on_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// Whether any violation on `field` has a message containing `needle`.
    pub fn contains(&self, field: &str, needle: &str) -> bool {
        self.on_field(field).any(|v| v.message.contains(needle))
    }

    /// `Ok(())` when empty, otherwise a [`DomainError::Validation`] listing
    /// every `field: message` pair.
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(self.to_string()))
        }
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(v, f)?;
        }
        Ok(())
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::collections::btree_set::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&ValidationErrors> for Violations {
    fn from(errors: &ValidationErrors) -> Self {
        let mut violations = Violations::new();
        for (field, field_errors) in errors.field_errors() {
            let path = field_path(&field.to_string());
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("validation failed for field '{path}'"));
                violations.insert(Violation::new(path.clone(), message));
            }
        }
        violations
    }
}

/// Serialized path for a struct field name (`date_added` -> `dateAdded`).
fn field_path(name: &str) -> String {
    let mut path = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            path.extend(c.to_uppercase());
            upper_next = false;
        } else {
            path.push(c);
        }
    }
    path
}

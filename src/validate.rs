// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::options::{Constraint, Descriptor, FieldSpec, Kind, Record, Value};

/// A broken constraint.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Violation {
    /// Path to the field (`name`, or `db.host` for a composite's field).
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl Violation {
    /// Create a new violation.
    pub fn new(field: &str, message: &str) -> Self {
        Violation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait used to check a bound record before it is handed to a command.
pub trait Validator {
    /// Returns every violation found in `record`, which was bound from
    /// `descriptor`. An empty list means the record is valid.
    fn validate(&self, descriptor: &Descriptor, record: &Record) -> Vec<Violation>;
}

impl<'a> fmt::Debug for dyn Validator + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Validator: {:p}", self)
    }
}

/// The default [Validator]: checks the [Constraint] declared on each field.
///
/// Composite fields that were bound are checked too.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConstraintValidator {}

impl ConstraintValidator {
    /// Create a new constraint validator.
    pub fn new() -> Self {
        ConstraintValidator::default()
    }

    fn check(&self, prefix: &str, descriptor: &Descriptor, record: &Record) -> Vec<Violation> {
        let mut violations = Vec::<Violation>::new();

        for field in descriptor.fields() {
            let path = format!("{}{}", prefix, field.name);
            let value = record.get(&field.name);

            if let Some(message) = broken(field, value) {
                violations.push(Violation::new(&path, message));
            }

            if let (Kind::Composite(nested), Some(Value::Record(inner))) = (&field.kind, value) {
                let nested_prefix = format!("{}.", path);
                violations.extend(self.check(&nested_prefix, nested, inner));
            }
        }

        violations
    }
}

impl Validator for ConstraintValidator {
    fn validate(&self, descriptor: &Descriptor, record: &Record) -> Vec<Violation> {
        self.check("", descriptor, record)
    }
}

// Returns the message for the constraint `value` breaks, if any.
fn broken(field: &FieldSpec, value: Option<&Value>) -> Option<&'static str> {
    let constraint = field.constraint?;

    match (constraint, value) {
        (Constraint::NotNull, None) => Some("must not be null"),
        (Constraint::NotEmpty, None) => Some("must not be empty"),
        (Constraint::NotEmpty, Some(Value::Str(s))) if s.is_empty() => Some("must not be empty"),
        (Constraint::NotBlank, None) => Some("must not be blank"),
        (Constraint::NotBlank, Some(Value::Str(s))) if s.trim().is_empty() => {
            Some("must not be blank")
        }
        _ => None,
    }
}

// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::error::{Error, Result};

/// The type of value an options field holds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Free text (the default).
    String,
    /// Base-10 signed integer.
    Integer,
    /// Switch: set to `true` by the presence of its flag.
    Boolean,
    /// Nested options structure, populated from the tokens that follow its
    /// flag.
    Composite(Descriptor),
}

impl Default for Kind {
    fn default() -> Self {
        Kind::String
    }
}

impl Kind {
    /// Convert the text of a token into a value of this kind.
    pub fn coerce(&self, text: &str) -> Result<Value> {
        match self {
            Kind::String => Ok(Value::Str(text.into())),
            Kind::Integer => text.parse::<i64>().map(Value::Int).map_err(|e| {
                Error::InvalidOptions(format!("invalid integer value {:?}: {}", text, e))
            }),
            Kind::Boolean => match text {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(Error::InvalidOptions(format!(
                    "invalid boolean value {:?}: expected \"true\" or \"false\"",
                    text
                ))),
            },
            Kind::Composite(descriptor) => Err(Error::InvalidOptions(format!(
                "cannot convert {:?} to {}",
                text,
                descriptor.name()
            ))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::String => write!(f, "String"),
            Kind::Integer => write!(f, "Integer"),
            Kind::Boolean => write!(f, "Boolean"),
            Kind::Composite(descriptor) => write!(f, "{}", descriptor.name()),
        }
    }
}

/// A declared constraint. Any constraint makes a field "required".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Constraint {
    /// A value must have been bound.
    NotNull,
    /// A value must have been bound and, for strings, must not be empty.
    NotEmpty,
    /// A value must have been bound and, for strings, must contain
    /// something other than whitespace.
    NotBlank,
}

/// Metadata for a single bindable field of an options type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldSpec {
    /// Field name, also usable as a long option (`--name`).
    pub name: String,
    /// Type of value held by the field.
    pub kind: Kind,
    /// Alternative option name (`-a` or `--alias`).
    pub alias: Option<String>,
    /// Constraint checked after binding.
    pub constraint: Option<Constraint>,
    /// If set, the field can only be set using its flag, never
    /// positionally.
    pub flag_only: bool,
}

impl FieldSpec {
    /// Create a new string field.
    pub fn new(name: &str) -> Self {
        FieldSpec {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Specify the type of the field.
    pub fn kind(self, kind: Kind) -> Self {
        FieldSpec { kind, ..self }
    }

    /// Specify an alternative option name for the field.
    pub fn alias(self, alias: &str) -> Self {
        FieldSpec {
            alias: Some(alias.into()),
            ..self
        }
    }

    /// Specify that a value must be bound to the field.
    pub fn required(self) -> Self {
        self.constraint(Constraint::NotNull)
    }

    /// Specify that the field must be bound to a non-empty value.
    pub fn not_empty(self) -> Self {
        self.constraint(Constraint::NotEmpty)
    }

    /// Specify that the field must be bound to a non-blank value.
    pub fn not_blank(self) -> Self {
        self.constraint(Constraint::NotBlank)
    }

    /// Specify the constraint for the field.
    pub fn constraint(self, constraint: Constraint) -> Self {
        FieldSpec {
            constraint: Some(constraint),
            ..self
        }
    }

    /// Specify that the field can only be set using its flag.
    pub fn flag_only(self) -> Self {
        FieldSpec {
            flag_only: true,
            ..self
        }
    }

    /// Returns `true` if any constraint is declared for the field.
    pub fn is_required(&self) -> bool {
        self.constraint.is_some()
    }

    /// Returns `true` if the field can consume a positional token.
    pub fn is_positional(&self) -> bool {
        !self.flag_only && matches!(self.kind, Kind::String | Kind::Integer)
    }

    /// Returns `true` if `id` (an option with its prefix removed) refers to
    /// this field by name.
    pub fn is_named(&self, id: &str) -> bool {
        self.name == id
    }

    /// Returns `true` if `id` (an option with its prefix removed) is this
    /// field's alias.
    pub fn is_alias(&self, id: &str) -> bool {
        self.alias.as_deref() == Some(id)
    }
}

/// Ordered description of all the bindable fields of an options type.
///
/// Declaration order matters: positional tokens are assigned to fields in
/// this order and help is rendered in this order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Descriptor {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Descriptor {
    /// Create a new descriptor for the options type called `name`.
    pub fn new(name: &str) -> Self {
        Descriptor {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Name of the options type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the field an option refers to, matching the field name
    /// first, then the aliases.
    pub fn find(&self, id: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.is_named(id))
            .or_else(|| self.fields.iter().find(|f| f.is_alias(id)))
    }
}

/// A bound value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Value of a [Kind::String] field.
    Str(String),
    /// Value of a [Kind::Integer] field.
    Int(i64),
    /// Value of a [Kind::Boolean] field.
    Bool(bool),
    /// Value of a [Kind::Composite] field.
    Record(Record),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Record(r) => write!(f, "{}", r),
        }
    }
}

/// An options instance: one (possibly unset) value slot per field of a
/// [Descriptor], in declaration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    name: String,
    entries: Vec<(String, Option<Value>)>,
}

impl Record {
    /// Create a record with every field of `descriptor` unset.
    pub fn new(descriptor: &Descriptor) -> Self {
        Record {
            name: descriptor.name().into(),
            entries: descriptor
                .fields()
                .iter()
                .map(|f| (f.name.clone(), None))
                .collect(),
        }
    }

    /// Name of the options type the record was created for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the value of a field.
    pub fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some(slot) => {
                slot.1 = Some(value);
                Ok(())
            }
            None => Err(self.unknown_field(field)),
        }
    }

    /// Returns the value of a field, or `None` if it was never bound (or
    /// is not a field of the record).
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.slot(field).ok().flatten()
    }

    /// Returns `true` if a value was bound to the field.
    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Returns a string field (empty if unset).
    ///
    /// All the typed accessors fail if `field` is not a field of the
    /// record.
    pub fn string(&self, field: &str) -> Result<String> {
        match self.slot(field)? {
            None => Ok(String::new()),
            Some(Value::Str(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch(field, "String", other)),
        }
    }

    /// Returns an integer field (zero if unset).
    pub fn integer(&self, field: &str) -> Result<i64> {
        match self.slot(field)? {
            None => Ok(0),
            Some(Value::Int(i)) => Ok(*i),
            Some(other) => Err(self.mismatch(field, "Integer", other)),
        }
    }

    /// Returns a boolean field (false if unset).
    pub fn boolean(&self, field: &str) -> Result<bool> {
        match self.slot(field)? {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(field, "Boolean", other)),
        }
    }

    /// Returns a composite field (`None` if unset).
    pub fn record(&self, field: &str) -> Result<Option<&Record>> {
        match self.slot(field)? {
            None => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r)),
            Some(other) => Err(self.mismatch(field, "composite", other)),
        }
    }

    /// Builds the typed options held by a composite field (`None` if
    /// unset).
    pub fn nested<T: Options>(&self, field: &str) -> Result<Option<T>> {
        self.record(field)?.map(T::from_record).transpose()
    }

    // Value of a declared field; an undeclared field is an error.
    fn slot(&self, field: &str) -> Result<Option<&Value>> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_ref())
            .ok_or_else(|| self.unknown_field(field))
    }

    fn unknown_field(&self, field: &str) -> Error {
        Error::InvalidOptions(format!("{} has no field {:?}", self.name, field))
    }

    fn mismatch(&self, field: &str, expected: &str, found: &Value) -> Error {
        Error::InvalidOptions(format!(
            "{}.{}: expected {} value, found {}",
            self.name, field, expected, found
        ))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fields: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}: {}", name, v)))
            .collect();

        write!(f, "{} {{{}}}", self.name, fields.join(", "))
    }
}

/// Trait that a typed options structure must implement.
///
/// The [Descriptor] is the static description of the type's fields; the
/// binder fills a [Record] from it and `from_record()` converts that record
/// into the structure handed to the command handler.
pub trait Options: Sized {
    /// Describe the bindable fields of the type.
    fn descriptor() -> Descriptor;

    /// Build the type from a bound record. Unset fields should take their
    /// zero value.
    fn from_record(record: &Record) -> Result<Self>;
}

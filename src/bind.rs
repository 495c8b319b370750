// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::options::{Descriptor, Kind, Options, Record, Value};
use crate::segment::{flag_name, is_flag, split};

/// Bind `tokens` onto a new [Record] for `descriptor`.
///
/// Returns the populated record and any positional tokens left over once
/// every positional field has been filled.
///
/// # Notes
///
/// - Each option ("flag span") consumes the tokens that follow it up to the
///   next option:
///   - A [Kind::Boolean] field is set to `true` and consumes nothing.
///   - A [Kind::Composite] field is bound recursively from those tokens.
///   - Any other field consumes exactly one token.
///
///   Unconsumed tokens rejoin the positional tokens.
/// - Positional tokens are then assigned in order to the fields that
///   accept them ([crate::FieldSpec::is_positional]), in declaration order.
///   If a field was also set by an option, the option's value is kept and
///   the positional token for that field is dropped.
/// - On error, no record is returned.
pub fn bind(descriptor: &Descriptor, tokens: &[String]) -> Result<(Record, Vec<String>)> {
    let mut record = Record::new(descriptor);

    // Tokens not consumed by an option, in the order found.
    let mut positional = Vec::<String>::new();

    // Fields set by an option.
    let mut flagged = HashSet::<String>::new();

    for span in split(tokens, is_flag, true) {
        // Leading run of plain values (or nothing at all).
        if !span.first().map_or(false, |t| is_flag(t)) {
            positional.extend(span);
            continue;
        }

        let flag = &span[0];

        let id = flag_name(flag)?;

        let field = descriptor.find(id).ok_or_else(|| {
            Error::InvalidOptions(format!(
                "unknown option {:?} for {}",
                flag,
                descriptor.name()
            ))
        })?;

        let rest = &span[1..];

        match &field.kind {
            Kind::Boolean => {
                record.set(&field.name, Value::Bool(true))?;
                positional.extend(rest.iter().cloned());
            }
            Kind::Composite(nested) => {
                let (inner, leftover) = bind(nested, rest)?;

                record.set(&field.name, Value::Record(inner))?;
                positional.extend(leftover);
            }
            kind => {
                let (value, others) = rest.split_first().ok_or_else(|| {
                    Error::InvalidOptions(format!("missing argument for option {:?}", flag))
                })?;

                record.set(&field.name, kind.coerce(value)?)?;
                positional.extend(others.iter().cloned());
            }
        }

        flagged.insert(field.name.clone());
    }

    let leftover = assign_positional(descriptor, &mut record, &flagged, positional)?;

    Ok((record, leftover))
}

/// Assign positional tokens to the eligible fields, returning the tokens
/// that did not fit.
fn assign_positional(
    descriptor: &Descriptor,
    record: &mut Record,
    flagged: &HashSet<String>,
    positional: Vec<String>,
) -> Result<Vec<String>> {
    let mut tokens = positional.into_iter();

    for field in descriptor.fields().iter().filter(|f| f.is_positional()) {
        let token = match tokens.next() {
            Some(token) => token,
            None => break,
        };

        // The option wins.
        if flagged.contains(&field.name) {
            debug!(field = %field.name, %token, "field already set by option");
            continue;
        }

        record.set(&field.name, field.kind.coerce(&token)?)?;
    }

    Ok(tokens.collect())
}

/// Bind `tokens` onto the typed options `T`.
///
/// Extra positional tokens are ignored.
pub fn bind_options<T: Options>(tokens: &[String]) -> Result<T> {
    let descriptor = T::descriptor();

    let (record, leftover) = bind(&descriptor, tokens)?;

    if !leftover.is_empty() {
        debug!(options = descriptor.name(), ?leftover, "ignoring extra arguments");
    }

    T::from_record(&record)
}

// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::options::{Descriptor, FieldSpec, Kind};
use crate::segment::{LONG_OPT_PREFIX, OPT_PREFIX};

const USAGE_PREFIX_SPACES: &str = "    ";

/// String to show in usage if a field is constrained.
const REQUIRED_STR: &str = " - REQUIRED";

/// Render the usage statement for a single command.
///
/// `summary` is omitted if empty; `options` is `None` for a command that
/// takes no options.
///
/// # Example
///
/// ```text
/// Command:  deploy
///     Deploy a build
/// Options:
///     name - String - REQUIRED
///     --force, -f - Boolean
///     --db, -d - Database
///         host - String - REQUIRED
///         port - Integer
/// ```
pub fn render_command(name: &str, summary: &str, options: Option<&Descriptor>) -> String {
    let mut lines = Vec::<String>::new();

    lines.push(format!("Command:  {}", name));

    if !summary.is_empty() {
        lines.push(format!("{}{}", USAGE_PREFIX_SPACES, summary.trim()));
    }

    if let Some(descriptor) = options {
        lines.push("Options:".into());

        for field in descriptor.fields() {
            lines.push(format!("{}{}", USAGE_PREFIX_SPACES, field_line(field)));

            // Only one level of nesting is shown.
            if let Kind::Composite(nested) = &field.kind {
                for nested_field in nested.fields() {
                    lines.push(format!(
                        "{}{}{}",
                        USAGE_PREFIX_SPACES,
                        USAGE_PREFIX_SPACES,
                        field_line(nested_field)
                    ));
                }
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');

    text
}

/// Render the usage statement for the whole program from the rendered
/// usage of each command.
pub fn render_global<I>(description: &str, commands: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut lines = Vec::<String>::new();

    if !description.is_empty() {
        lines.push(format!("{}\n", description.trim()));
    }

    lines.push("Usage:".into());

    for command in commands {
        lines.push(format!("\n{}", command.trim_end()));
    }

    // Join all the lines together, remove white space at either end and
    // finally append a single newline.
    let mut text = lines.join("\n").trim().to_string();
    text.push('\n');

    text
}

fn field_line(field: &FieldSpec) -> String {
    let name = match &field.alias {
        Some(alias) => format!(
            "{}{}, {}{}",
            LONG_OPT_PREFIX, field.name, OPT_PREFIX, alias
        ),
        None => field.name.clone(),
    };

    let required = if field.is_required() { REQUIRED_STR } else { "" };

    format!("{} - {}{}", name, field.kind, required)
}

// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Crate for running one or more chained sub-commands from a single
//! command line.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Details](#details)
//! * [Exit codes](#exit-codes)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! Given a command line such as:
//!
//! ```bash
//! $ mytool build --fast + deploy target --db localhost 5432
//! ```
//!
//! this crate:
//!
//! 1. Splits the arguments into one segment per command (using the
//!    separator `+` by default).
//! 1. Binds each segment's arguments onto the options declared for the
//!    command: positional values, flags and options, including options
//!    whose value is itself a structure ("composite" options).
//! 1. Validates the bound options against the declared constraints.
//! 1. Calls each command's handler with its options, in order, stopping at
//!    the first failure.
//!
//! # Quickstart
//!
//! 1. Create a `struct` for the options of each command that takes some and
//!    implement the [Options] trait for it: describe its fields with a
//!    [Descriptor] and build it from the bound [Record].
//!
//!    ```rust
//!    use cmdchain::{Descriptor, FieldSpec, Kind, Options, Record, Result};
//!
//!    #[derive(Clone, Debug, Default)]
//!    struct Deploy {
//!        name: String,
//!        force: bool,
//!    }
//!
//!    impl Options for Deploy {
//!        fn descriptor() -> Descriptor {
//!            Descriptor::new("Deploy")
//!                .field(FieldSpec::new("name").not_blank())
//!                .field(FieldSpec::new("force").kind(Kind::Boolean).alias("f"))
//!        }
//!
//!        fn from_record(record: &Record) -> Result<Self> {
//!            Ok(Deploy {
//!                name: record.string("name")?,
//!                force: record.boolean("force")?,
//!            })
//!        }
//!    }
//!    ```
//!
//! 1. Register a [Command] for each command in a [Registry], then create a
//!    [Runner] and run it:
//!
//!    ```rust
//!    # use cmdchain::{Descriptor, FieldSpec, Kind, Options, Record, Result};
//!    #
//!    # #[derive(Clone, Debug, Default)]
//!    # struct Deploy {
//!    #     name: String,
//!    #     force: bool,
//!    # }
//!    #
//!    # impl Options for Deploy {
//!    #     fn descriptor() -> Descriptor {
//!    #         Descriptor::new("Deploy")
//!    #             .field(FieldSpec::new("name").not_blank())
//!    #             .field(FieldSpec::new("force").kind(Kind::Boolean).alias("f"))
//!    #     }
//!    #
//!    #     fn from_record(record: &Record) -> Result<Self> {
//!    #         Ok(Deploy {
//!    #             name: record.string("name")?,
//!    #             force: record.boolean("force")?,
//!    #         })
//!    #     }
//!    # }
//!    use cmdchain::{Command, Registry, Runner};
//!
//!    let registry = Registry::new()
//!        .command(Command::new("clean", || {
//!            println!("cleaning");
//!            Ok(())
//!        }))
//!        .command(Command::with_options("deploy", |options: Deploy| {
//!            println!("deploying {} (force: {})", options.name, options.force);
//!            Ok(())
//!        }));
//!
//!    let mut runner = Runner::new("my tool").registry(registry);
//!
//!    let cli_args = vec!["clean", "+", "deploy", "-f", "target"]
//!        .into_iter()
//!        .map(String::from)
//!        .collect();
//!
//!    // Use `runner.run()` to parse the real command line and exit.
//!    assert_eq!(runner.run_with_args(cli_args), 0);
//!    ```
//!
//! # Details
//!
//! - A "segment" is the list of arguments for a single command: the command
//!   name followed by its arguments.
//! - Within a segment, an argument starting with a dash (`-f` or
//!   `--force`) is an option. An option and the arguments that follow it,
//!   up to the next option, form a "flag span".
//! - An option refers to a field by name or by alias:
//!   - A [Kind::Boolean] field is a flag: it is set to `true` and consumes
//!     no arguments.
//!   - A [Kind::Composite] field consumes all the arguments in its span,
//!     which are bound to the fields of the nested options structure.
//!   - Any other field consumes one argument.
//! - Arguments not consumed by options are "positional": they are assigned
//!   in order to the string and integer fields not marked
//!   [FieldSpec::flag_only], in declaration order. If an option also set
//!   the field, the option's value is kept.
//! - A help statement is displayed if `-h` or `--help` is found anywhere on
//!   the command line. In that case no command is run.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |-|-|
//! | `0` | All commands ran (or help was shown). |
//! | `1` | Unknown command (or a handler failed). |
//! | `2` | Invalid options for a command. |
//!
//! # Limitations
//!
//! - Positional arguments beyond the number of positional fields are
//!   silently ignored.
//! - Composite options are only shown one level deep in the help output.
//! - Option values cannot start with a dash (so negative numbers cannot be
//!   specified).
//! - Commands cannot pass output to one another.

mod bind;
mod command;
mod error;
mod help;
mod options;
mod runner;
mod segment;
mod validate;

pub use error::{Error, Result, EXIT_INVALID_OPTIONS, EXIT_SUCCESS, EXIT_UNKNOWN_COMMAND};

pub use bind::{bind, bind_options};
pub use command::{Command, Handler, Registry};
pub use help::{render_command, render_global};
pub use options::{Constraint, Descriptor, FieldSpec, Kind, Options, Record, Value};
pub use runner::{get_args, Runner, Settings, COMMAND_SEPARATOR};
pub use segment::{flag_name, is_flag, split};
pub use validate::{ConstraintValidator, Validator, Violation};

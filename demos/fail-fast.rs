// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! An example showing that the first failing command stops the run and
//! that commands can be chained by name alone.
//!
//! Try:
//!
//! ```bash
//! $ cargo run --example fail-fast -- greet world count 3 greet
//! $ cargo run --example fail-fast -- greet world count three greet
//! $ cargo run --example fail-fast -- greet world refuse greet
//! ```
use cmdchain::{
    Command, Descriptor, Error, FieldSpec, Kind, Options, Record, Registry, Result, Runner,
    Settings,
};

#[derive(Clone, Debug, Default)]
struct Greet {
    name: String,
}

impl Options for Greet {
    fn descriptor() -> Descriptor {
        Descriptor::new("Greet").field(FieldSpec::new("name"))
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Greet {
            name: record.string("name")?,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct Count {
    to: i64,
}

impl Options for Count {
    fn descriptor() -> Descriptor {
        Descriptor::new("Count").field(FieldSpec::new("to").kind(Kind::Integer).required())
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Count {
            to: record.integer("to")?,
        })
    }
}

fn main() {
    let registry = Registry::new()
        .command(Command::with_options("greet", |options: Greet| {
            if options.name.is_empty() {
                println!("hello");
            } else {
                println!("hello, {}", options.name);
            }
            Ok(())
        }))
        .command(Command::with_options("count", |options: Count| {
            for i in 1..=options.to {
                println!("{}", i);
            }
            Ok(())
        }))
        .command(Command::new("refuse", || {
            Err(Error::HandlerError("refusing to run".into()))
        }));

    let code = Runner::new("Greet and count.")
        .settings(Settings::new().split_on_command_names())
        .registry(registry)
        .run_with_args(cmdchain::get_args());

    println!("exit code: {}", code);

    std::process::exit(code);
}

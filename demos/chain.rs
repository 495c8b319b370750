// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! An example showing chained commands with flags, positional arguments
//! and a composite option.
//!
//! Try:
//!
//! ```bash
//! $ cargo run --example chain -- build --fast + deploy web --db localhost 5432 -r 3
//! $ RUST_LOG=debug cargo run --example chain -- clean + build
//! $ cargo run --example chain -- --help
//! ```
use cmdchain::{
    Command, Descriptor, FieldSpec, Kind, Options, Record, Registry, Result, Runner, Settings,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct Build {
    fast: bool,
    target: String,
}

impl Options for Build {
    fn descriptor() -> Descriptor {
        Descriptor::new("Build")
            .field(FieldSpec::new("fast").kind(Kind::Boolean).alias("f"))
            .field(FieldSpec::new("target"))
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Build {
            fast: record.boolean("fast")?,
            target: record.string("target")?,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct Database {
    host: String,
    port: i64,
}

impl Options for Database {
    fn descriptor() -> Descriptor {
        Descriptor::new("Database")
            .field(FieldSpec::new("host").not_blank())
            .field(FieldSpec::new("port").kind(Kind::Integer))
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Database {
            host: record.string("host")?,
            port: record.integer("port")?,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct Deploy {
    name: String,
    replicas: i64,
    db: Option<Database>,
}

impl Options for Deploy {
    fn descriptor() -> Descriptor {
        Descriptor::new("Deploy")
            .field(FieldSpec::new("name").not_blank())
            .field(FieldSpec::new("replicas").kind(Kind::Integer).alias("r"))
            .field(
                FieldSpec::new("db")
                    .kind(Kind::Composite(Database::descriptor()))
                    .alias("d"),
            )
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Deploy {
            name: record.string("name")?,
            replicas: record.integer("replicas")?,
            db: record.nested("db")?,
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Registry::new()
        .command(
            Command::with_options("build", |options: Build| {
                println!("INFO: build: {:?}", options);
                Ok(())
            })
            .summary("Compile the project"),
        )
        .command(
            Command::with_options("deploy", |options: Deploy| {
                println!("INFO: deploy: {:?}", options);
                Ok(())
            })
            .summary("Deploy a build"),
        )
        .command(Command::new("clean", || {
            println!("INFO: clean");
            Ok(())
        }));

    let mut runner = Runner::new("Build and deploy, one step after another.")
        .settings(Settings::new())
        .registry(registry);

    runner.run()
}

// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

use crate::validate::Violation;

/// Exit code for a successful run (or when help was shown).
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when a command name is not registered.
pub const EXIT_UNKNOWN_COMMAND: i32 = 1;

/// Exit code when a command's options could not be bound or validated.
pub const EXIT_INVALID_OPTIONS: i32 = 2;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// The first token of a segment is not a registered command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// The tokens of a segment could not be bound onto the command's
    /// options (unknown option, bad value, missing option argument, ...).
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The bound options broke one or more declared constraints.
    #[error("invalid options for command {command:?}: {}", join_violations(.violations))]
    ValidationFailed {
        /// Name of the command whose options failed validation.
        command: String,
        /// Every constraint that was broken.
        violations: Vec<Violation>,
    },

    //------------------------------
    // Handler and output errors
    //------------------------------
    /// A command handler reported a failure.
    #[error("handler error: {0}")]
    HandlerError(String),

    /// Writing the help text failed.
    #[error("io error: {0}")]
    Io(String),
}

impl Error {
    /// The process exit code this error terminates a run with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownCommand(_) => EXIT_UNKNOWN_COMMAND,
            Error::InvalidOptions(_) | Error::ValidationFailed { .. } => EXIT_INVALID_OPTIONS,
            Error::HandlerError(_) | Error::Io(_) => EXIT_UNKNOWN_COMMAND,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        #[derive(Debug)]
        struct TestData {
            error: Error,
            exit_code: i32,
        }

        let tests = &[
            TestData {
                error: Error::UnknownCommand("foo".into()),
                exit_code: 1,
            },
            TestData {
                error: Error::InvalidOptions("unknown option --bogus".into()),
                exit_code: 2,
            },
            TestData {
                error: Error::ValidationFailed {
                    command: "deploy".into(),
                    violations: vec![],
                },
                exit_code: 2,
            },
            TestData {
                error: Error::HandlerError("dang".into()),
                exit_code: 1,
            },
            TestData {
                error: Error::Io("broken pipe".into()),
                exit_code: 1,
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.error.exit_code(), d.exit_code, "{}", msg);
        }
    }

    #[test]
    fn test_validation_failed_display() {
        let error = Error::ValidationFailed {
            command: "deploy".into(),
            violations: vec![
                Violation::new("name", "must not be blank"),
                Violation::new("port", "must not be null"),
            ],
        };

        assert_eq!(
            error.to_string(),
            "invalid options for command \"deploy\": name: must not be blank, port: must not be null"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "dang");

        let error = Error::from(io_error);

        assert_eq!(error, Error::Io("dang".into()));
        assert_eq!(error.exit_code(), EXIT_UNKNOWN_COMMAND);
    }
}

// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;
use std::io::Write;

use tracing::{debug, error};

use crate::bind::bind;
use crate::command::Registry;
use crate::error::{Error, Result, EXIT_SUCCESS};
use crate::help::render_global;
use crate::segment::split;
use crate::validate::{ConstraintValidator, Validator};

const HELP_OPTION: &str = "-h";
const LONG_HELP_OPTION: &str = "--help";

/// Default token used to chain commands (`build + deploy target`).
pub const COMMAND_SEPARATOR: &str = "+";

/// Settings used to control how the command-line is split into commands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Token separating chained commands.
    separator: String,

    /// If set, a new command starts at every token that is the name of a
    /// registered command (as well as at the separator).
    split_on_command_names: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            separator: COMMAND_SEPARATOR.into(),
            split_on_command_names: false,
        }
    }
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify the token used to chain commands.
    pub fn separator(self, separator: &str) -> Self {
        Settings {
            separator: separator.into(),
            ..self
        }
    }

    /// Start a new command whenever a registered command name is found,
    /// so no separator is needed (`build --fast deploy target`).
    ///
    /// # Note
    ///
    /// With this setting, a command name can never be used as a value.
    pub fn split_on_command_names(self) -> Self {
        Settings {
            split_on_command_names: true,
            ..self
        }
    }
}

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
pub fn get_args() -> Vec<String> {
    env::args().skip(1).collect()
}

/// The object that runs a program's commands.
///
/// All consumers of the crate need to create a single object of this type.
#[derive(Debug)]
pub struct Runner<'a> {
    description: String,
    settings: Settings,
    registry: Registry<'a>,
    validator: Box<dyn Validator + 'a>,
}

impl<'a> Default for Runner<'a> {
    fn default() -> Self {
        Runner {
            description: String::new(),
            settings: Settings::default(),
            registry: Registry::default(),
            validator: Box::new(ConstraintValidator::new()),
        }
    }
}

impl<'a> Runner<'a> {
    /// Create a new runner. The description heads the help text.
    pub fn new(description: &str) -> Self {
        Runner {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Specify the commands the program supports.
    pub fn registry(self, registry: Registry<'a>) -> Self {
        Runner { registry, ..self }
    }

    /// Specify any settings for the program.
    pub fn settings(self, settings: Settings) -> Self {
        Runner { settings, ..self }
    }

    /// Specify the validator used to check bound options
    /// (a [ConstraintValidator] by default).
    pub fn validator(self, validator: Box<dyn Validator + 'a>) -> Self {
        Runner { validator, ..self }
    }

    /// Generate the help/usage statement for all registered commands.
    ///
    /// This is called automatically when the user specifies `-h` or
    /// `--help` _anywhere_ on the command line, and when a run fails.
    pub fn generate_help<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        let text = render_global(&self.description, self.registry.iter().map(|c| c.help()));

        writeln!(writer, "{}", text)?;

        Ok(())
    }

    /// Split the command-line into one segment per command.
    fn segments(&self, cli_args: &[String]) -> Vec<Vec<String>> {
        if self.settings.split_on_command_names {
            let separator = self.settings.separator.as_str();

            let mut segments = Vec::<Vec<String>>::new();

            for group in split(cli_args, |t| t == separator, false) {
                let mut groups = split(&group, |t| self.registry.exists(t), true);

                // Drop the empty group in front of a leading command name.
                if groups.len() > 1 && groups[0].is_empty() {
                    groups.remove(0);
                }

                segments.extend(groups);
            }

            segments
        } else {
            split(cli_args, |t| t == self.settings.separator, false)
        }
    }

    /// Bind, validate and run a single command segment.
    fn run_segment(&mut self, segment: &[String]) -> Result<()> {
        let (name, tokens) = match segment.split_first() {
            Some((name, tokens)) => (name.as_str(), tokens),
            None => return Err(Error::UnknownCommand(String::new())),
        };

        debug!(command = name, ?tokens, "running command");

        let command = self
            .registry
            .lookup_mut(name)
            .ok_or_else(|| Error::UnknownCommand(name.into()))?;

        let record = match command.options() {
            None if !tokens.is_empty() => {
                return Err(Error::InvalidOptions(format!(
                    "command {:?} takes no options but was given {:?}",
                    name, tokens
                )))
            }
            None => None,
            Some(descriptor) => {
                let (record, leftover) = bind(descriptor, tokens)?;

                if !leftover.is_empty() {
                    debug!(command = name, ?leftover, "ignoring extra arguments");
                }

                let violations = self.validator.validate(descriptor, &record);

                if !violations.is_empty() {
                    return Err(Error::ValidationFailed {
                        command: name.into(),
                        violations,
                    });
                }

                Some(record)
            }
        };

        command.execute(record.as_ref())
    }

    /// Run all the commands specified on a command line
    /// (without the program name).
    ///
    /// # Notes
    ///
    /// - Commands run strictly in order: a command finishes before the
    ///   next is looked up and bound.
    /// - The first failure stops the run: the error, followed by help, is
    ///   written to `writer` and the error is returned. Commands already
    ///   run are not undone.
    /// - If help is requested, it is written to `writer` and no command is
    ///   run.
    pub fn dispatch<W>(&mut self, cli_args: Vec<String>, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        debug!(args = ?cli_args, "starting run");

        // Show help if requested.
        if cli_args
            .iter()
            .any(|a| a == HELP_OPTION || a == LONG_HELP_OPTION)
        {
            return self.generate_help(writer);
        }

        for segment in self.segments(&cli_args) {
            if let Err(e) = self.run_segment(&segment) {
                error!(?segment, error = %e, "run failed");

                writeln!(writer, "error: {}\n", e)?;
                self.generate_help(writer)?;

                return Err(e);
            }
        }

        debug!(args = ?cli_args, "finished run");

        Ok(())
    }

    /// Run the specified command line, writing any help to stdout, and
    /// return the exit code for the run.
    pub fn run_with_args(&mut self, cli_args: Vec<String>) -> i32 {
        match self.dispatch(cli_args, &mut std::io::stdout()) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => e.exit_code(),
        }
    }

    /// Simplest interface: run the program's command line and exit the
    /// process with the resulting exit code.
    pub fn run(&mut self) -> ! {
        let code = self.run_with_args(get_args());

        std::process::exit(code)
    }
}

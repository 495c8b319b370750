// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::help::render_command;
use crate::options::{Descriptor, Options, Record};

/// Trait that a command handler must implement.
pub trait Handler {
    /// Function called to run a command.
    ///
    /// # Parameters
    ///
    /// `options` - The bound and validated options, or `None` if the
    ///             command takes no options.
    ///
    /// # Return value
    ///
    /// - If the command succeeds, return `Ok(())`.
    /// - If the command needs to fail, return [Error::HandlerError].
    ///
    /// # Notes
    ///
    /// If a handler call fails, the run stops and no later command
    /// is run.
    fn handle(&mut self, options: Option<&Record>) -> Result<()>;
}

impl<'a> fmt::Debug for dyn Handler + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler: {:p}", self)
    }
}

// Handler for a command that takes no options.
struct Optionless<F> {
    run: F,
}

impl<F> Handler for Optionless<F>
where
    F: FnMut() -> Result<()>,
{
    fn handle(&mut self, options: Option<&Record>) -> Result<()> {
        match options {
            None => (self.run)(),
            Some(record) => Err(Error::InvalidOptions(format!(
                "command takes no options but was given {}",
                record
            ))),
        }
    }
}

// Handler converting the bound record into typed options.
struct Typed<T, F> {
    run: F,
    options: PhantomData<fn() -> T>,
}

impl<T, F> Handler for Typed<T, F>
where
    T: Options,
    F: FnMut(T) -> Result<()>,
{
    fn handle(&mut self, options: Option<&Record>) -> Result<()> {
        let record = options
            .ok_or_else(|| Error::InvalidOptions("command requires options".into()))?;

        let options = T::from_record(record)?;

        (self.run)(options)
    }
}

/// A registered command: its name, the description of its options and the
/// handler that runs it.
pub struct Command<'a> {
    name: String,
    summary: String,
    options: Option<Descriptor>,
    handler: Box<dyn Handler + 'a>,
}

impl<'a> Command<'a> {
    /// Create a command that takes no options.
    pub fn new<F>(name: &str, run: F) -> Self
    where
        F: FnMut() -> Result<()> + 'a,
    {
        Command::custom(name, None, Box::new(Optionless { run }))
    }

    /// Create a command whose options are the type `T`.
    ///
    /// The descriptor for `T` is built once, here.
    pub fn with_options<T, F>(name: &str, run: F) -> Self
    where
        T: Options + 'a,
        F: FnMut(T) -> Result<()> + 'a,
    {
        let handler = Typed {
            run,
            options: PhantomData,
        };

        Command::custom(name, Some(T::descriptor()), Box::new(handler))
    }

    /// Create a command from an explicit descriptor and handler.
    pub fn custom(name: &str, options: Option<Descriptor>, handler: Box<dyn Handler + 'a>) -> Self {
        Command {
            name: name.into(),
            summary: String::new(),
            options,
            handler,
        }
    }

    /// Specify brief explanatory text for the command.
    pub fn summary(self, summary: &str) -> Self {
        Command {
            summary: summary.into(),
            ..self
        }
    }

    /// The name used to invoke the command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description of the command's options (`None` if it takes none).
    pub fn options(&self) -> Option<&Descriptor> {
        self.options.as_ref()
    }

    /// Usage statement for the command.
    pub fn help(&self) -> String {
        render_command(&self.name, &self.summary, self.options())
    }

    /// Run the command.
    pub fn execute(&mut self, options: Option<&Record>) -> Result<()> {
        self.handler.handle(options)
    }
}

impl<'a> fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("options", &self.options)
            .field("handler", &self.handler)
            .finish()
    }
}

/// The set of commands a program supports, in registration order.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    commands: Vec<Command<'a>>,
}

impl<'a> Registry<'a> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a command, replacing any command with the same name.
    pub fn add(&mut self, command: Command<'a>) {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    /// Register a command (builder form).
    pub fn command(mut self, command: Command<'a>) -> Self {
        self.add(command);
        self
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Determine if a command called `name` has been registered.
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the command called `name`.
    pub fn lookup(&self, name: &str) -> Option<&Command<'a>> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Returns the command called `name` so it can be run.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Command<'a>> {
        self.commands.iter_mut().find(|c| c.name == name)
    }

    /// Iterate over all commands, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command<'a>> {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::options::{FieldSpec, Kind, Value};

    #[derive(Debug, Default, PartialEq)]
    struct Deploy {
        name: String,
        force: bool,
    }

    impl Options for Deploy {
        fn descriptor() -> Descriptor {
            Descriptor::new("Deploy")
                .field(FieldSpec::new("name").required())
                .field(FieldSpec::new("force").kind(Kind::Boolean).alias("f"))
        }

        fn from_record(record: &Record) -> Result<Self> {
            Ok(Deploy {
                name: record.string("name")?,
                force: record.boolean("force")?,
            })
        }
    }

    #[test]
    fn test_optionless_command() {
        let calls = RefCell::new(0);

        let mut command = Command::new("version", || {
            *calls.borrow_mut() += 1;
            Ok(())
        })
        .summary("Show the version");

        assert_eq!(command.name(), "version");
        assert_eq!(command.options(), None);
        assert_eq!(command.help(), "Command:  version\n    Show the version\n");

        assert_eq!(command.execute(None), Ok(()));
        assert_eq!(*calls.borrow(), 1);

        let record = Record::new(&Descriptor::new("Stray"));
        let result = command.execute(Some(&record));

        assert!(matches!(result, Err(Error::InvalidOptions(_))), "{:?}", result);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_typed_command() {
        let seen = RefCell::new(Vec::<Deploy>::new());

        let mut command = Command::with_options("deploy", |options: Deploy| {
            seen.borrow_mut().push(options);
            Ok(())
        });

        assert_eq!(command.options(), Some(&Deploy::descriptor()));

        let descriptor = Deploy::descriptor();
        let mut record = Record::new(&descriptor);
        record.set("name", Value::Str("target".into())).unwrap();
        record.set("force", Value::Bool(true)).unwrap();

        assert_eq!(command.execute(Some(&record)), Ok(()));

        assert_eq!(
            *seen.borrow(),
            vec![Deploy {
                name: "target".into(),
                force: true,
            }]
        );

        let result = command.execute(None);
        assert!(matches!(result, Err(Error::InvalidOptions(_))), "{:?}", result);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_handler_error() {
        const TEST_ERR: &str = "dang";

        let mut command = Command::new("fail", || Err(Error::HandlerError(TEST_ERR.into())));

        assert_eq!(
            command.execute(None),
            Err(Error::HandlerError(TEST_ERR.into()))
        );
    }

    #[test]
    fn test_custom_handler() {
        #[derive(Debug, Default)]
        struct CountHandler {
            count: usize,
        }

        impl Handler for &mut CountHandler {
            fn handle(&mut self, options: Option<&Record>) -> Result<()> {
                assert!(options.is_some());

                self.count += 1;

                Ok(())
            }
        }

        let mut handler = CountHandler::default();

        let descriptor = Descriptor::new("Empty");
        let record = Record::new(&descriptor);

        let mut command =
            Command::custom("count", Some(descriptor.clone()), Box::new(&mut handler));

        assert_eq!(command.execute(Some(&record)), Ok(()));
        assert_eq!(command.execute(Some(&record)), Ok(()));

        let value = format!("{:?}", command);
        assert!(value.contains("Handler: "), "{}", value);

        drop(command);

        assert_eq!(handler.count, 2);
    }

    #[test]
    fn test_registry() {
        let new_registry = Registry::new();
        let def_registry = Registry::default();

        assert_eq!(new_registry.len(), def_registry.len());
        assert!(new_registry.is_empty());

        let mut registry = Registry::new()
            .command(Command::new("build", || Ok(())))
            .command(Command::with_options("deploy", |_: Deploy| Ok(())));

        assert_eq!(registry.len(), 2);
        assert!(registry.exists("build"));
        assert!(registry.exists("deploy"));
        assert!(!registry.exists("bogus"));
        assert!(!registry.exists(""));
        assert!(registry.lookup("bogus").is_none());

        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["build", "deploy"]);

        // Re-registering replaces in place.
        registry.add(Command::new("build", || Ok(())).summary("Build it"));

        assert_eq!(registry.len(), 2);

        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["build", "deploy"]);

        let build = registry.lookup("build").unwrap();
        assert_eq!(build.help(), "Command:  build\n    Build it\n");

        assert!(registry.lookup_mut("deploy").is_some());
    }
}

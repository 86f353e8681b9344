#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ArgumentGroup, Member, MutuallyExclusiveGroup, Parameter, SubCommands};
use crate::error::ConfigError;
use crate::model::{DefaultValue, ParserConfig};
use crate::parser::{ConsoleInterface, GeneralParser, UserInterface};
use crate::registry::Registry;

/// The base command line parser.
///
/// Registration is validated eagerly: every fallible call returns the [`ConfigError`] right away,
/// so a parser that builds is always well formed.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::CommandLineParser;
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add and CommandLineParser::branch.
///     .build();
/// parser.try_parse_tokens(&[]).unwrap();
/// ```
#[derive(Debug)]
pub struct CommandLineParser {
    registry: Registry,
}

impl CommandLineParser {
    /// Create a command line parser with the default [`ParserConfig`].
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            registry: Registry::new(program, ParserConfig::default()),
        }
    }

    /// Create a command line parser with an explicit [`ParserConfig`].
    pub fn with_config(program: impl Into<String>, config: ParserConfig) -> Result<Self, ConfigError> {
        if config.prefix_chars.is_empty() {
            return Err(ConfigError::EmptyPrefixChars);
        }

        Ok(Self {
            registry: Registry::new(program, config),
        })
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final message applies.
    ///
    /// For a sub-command, the about message doubles as its help line in the parent.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.registry.about.replace(description.into());
        self
    }

    /// Add an argument/option to the command line parser.
    ///
    /// The order of arguments is their positional order during parsing.
    /// The order of options does not affect the parsing semantics.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument("a"))
    ///     .unwrap()
    ///     .add(Parameter::argument("b"))
    ///     .unwrap()
    ///     .build();
    /// let namespace = parser.try_parse_tokens(&["1", "2"]).unwrap();
    ///
    /// assert_eq!(namespace.get::<u32>("a").unwrap(), 1);
    /// assert_eq!(namespace.get::<u32>("b").unwrap(), 2);
    /// ```
    pub fn add(mut self, parameter: Parameter) -> Result<Self, ConfigError> {
        let spec = parameter.into_spec(&self.registry.config)?;
        self.registry.insert(spec, None)?;
        Ok(self)
    }

    /// Add an argument group.
    pub fn add_group(mut self, group: ArgumentGroup) -> Result<Self, ConfigError> {
        let ArgumentGroup {
            title,
            description,
            argument_default,
            members,
        } = group;
        let index = self
            .registry
            .add_group(title, description, argument_default);

        for member in members {
            match member {
                Member::Parameter(parameter) => {
                    let spec = parameter.into_spec(&self.registry.config)?;
                    self.registry.insert(spec, Some(index))?;
                }
                Member::Exclusive(exclusive) => {
                    self.insert_exclusive(exclusive, Some(index))?;
                }
            }
        }

        Ok(self)
    }

    /// Add a mutually exclusive group.
    ///
    /// Fails when a member is positional or individually required.
    pub fn add_exclusive(mut self, exclusive: MutuallyExclusiveGroup) -> Result<Self, ConfigError> {
        self.insert_exclusive(exclusive, None)?;
        Ok(self)
    }

    fn insert_exclusive(
        &mut self,
        exclusive: MutuallyExclusiveGroup,
        group: Option<usize>,
    ) -> Result<(), ConfigError> {
        let specs = exclusive
            .members
            .into_iter()
            .map(|parameter| parameter.into_spec(&self.registry.config))
            .collect::<Result<Vec<_>, _>>()?;
        self.registry.add_exclusive(specs, exclusive.required, group)
    }

    /// Set a parser level default for `dest`.
    ///
    /// It applies to parameters storing into `dest` without a nearer default,
    /// and is inserted as is when no parameter stores into `dest`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, DefaultValue, Parameter};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(["--level"]))
    ///     .unwrap()
    ///     .set_default("level", "3")
    ///     .set_default("handler", "run")
    ///     .build();
    /// assert_eq!(parser.get_default("level"), Some(DefaultValue::from("3")));
    ///
    /// let namespace = parser.try_parse_tokens(&[]).unwrap();
    /// assert_eq!(namespace.get::<u8>("level").unwrap(), 3);
    /// assert_eq!(namespace.get::<String>("handler").unwrap(), "run");
    /// ```
    pub fn set_default(mut self, dest: impl Into<String>, value: impl Into<DefaultValue>) -> Self {
        self.registry.set_default(dest.into(), value.into());
        self
    }

    /// The default which `dest` would take, if nothing on the command line sets it.
    pub fn get_default(&self, dest: &str) -> Option<DefaultValue> {
        self.registry.get_default(dest)
    }

    /// Branch into a sub-command parser.
    ///
    /// The slot is matched as a positional after every positional added before it.
    /// Sub-commands are added with [`CommandLineParser::command`].
    /// A parser may only branch once.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, SubCommands};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument("belongs_to_root"))
    ///     .unwrap()
    ///     .branch(SubCommands::new("sub_command"))
    ///     .unwrap()
    ///     .command("the-command", |sub| {
    ///         sub.add(Parameter::argument("belongs_to_sub_command"))
    ///     })
    ///     .unwrap()
    ///     .build();
    /// let namespace = parser.try_parse_tokens(&["1", "the-command", "2"]).unwrap();
    ///
    /// assert_eq!(namespace.get::<u32>("belongs_to_root").unwrap(), 1);
    /// assert_eq!(namespace.get::<String>("sub_command").unwrap(), "the-command");
    /// assert_eq!(namespace.get::<u32>("belongs_to_sub_command").unwrap(), 2);
    /// ```
    pub fn branch(mut self, sub_commands: SubCommands) -> Result<Self, ConfigError> {
        self.registry.branch(sub_commands.into_spec())?;
        Ok(self)
    }

    /// Setup the sub-command `name`.
    ///
    /// The sub-command parser inherits this parser's config, and is named `"{program} {name}"`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, SubCommands};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .branch(SubCommands::new("sub_command").required(true))
    ///     .unwrap()
    ///     .command("a", |sub| sub.add(Parameter::argument("value_a")))
    ///     .unwrap()
    ///     .command("b", |sub| {
    ///         sub.about("Description for the sub-command 'b'.")
    ///             .add(Parameter::argument("value_b"))
    ///     })
    ///     .unwrap()
    ///     .build();
    /// let namespace = parser.try_parse_tokens(&["a", "1"]).unwrap();
    ///
    /// assert_eq!(namespace.get::<String>("sub_command").unwrap(), "a");
    /// assert_eq!(namespace.get::<u32>("value_a").unwrap(), 1);
    /// assert!(!namespace.contains("value_b"));
    /// ```
    pub fn command<F>(mut self, name: impl Into<String>, setup_fn: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(CommandLineParser) -> Result<CommandLineParser, ConfigError>,
    {
        let name = name.into();
        let child = CommandLineParser {
            registry: Registry::new(
                format!("{program} {name}", program = self.registry.program),
                self.registry.config.clone(),
            ),
        };
        let child = setup_fn(child)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering sub-command '{name}' on '{}'.", self.registry.program);
        }

        self.registry.add_command(name, child.registry)?;
        Ok(self)
    }

    pub(crate) fn build_with_interface(self, user_interface: Box<dyn UserInterface>) -> GeneralParser {
        GeneralParser::new(self.registry, user_interface)
    }

    /// Build the command line parser.
    pub fn build(self) -> GeneralParser {
        self.build_with_interface(Box::<ConsoleInterface>::default())
    }
}

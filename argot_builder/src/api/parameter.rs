use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::constant::{HELP_MESSAGE, NEGATION_PREFIX, VERSION_MESSAGE};
use crate::error::ConfigError;
use crate::model::{Action, DefaultValue, Nargs, ParserConfig};
use crate::namespace::Stored;
use crate::registry::{Converter, Handler, Spec, SpecKind};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Declared {
    Argument(String),
    Option(Vec<String>),
}

/// One declared parameter: a positional argument or an option.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Action, CommandLineParser, Nargs, Parameter};
///
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::argument("files").nargs(Nargs::AtLeastOne))
///     .unwrap()
///     .add(Parameter::option(["-v", "--verbose"]).action(Action::StoreTrue))
///     .unwrap()
///     .build();
/// let namespace = parser.try_parse_tokens(&["a.txt", "-v", "b.txt"]).unwrap();
/// assert_eq!(namespace.get_all::<String>("files").unwrap(), vec!["a.txt"]);
/// ```
#[derive(Clone)]
pub struct Parameter {
    declared: Declared,
    action: Action,
    nargs: Option<Nargs>,
    handler: Option<Handler>,
    converter: Option<Converter>,
    choices: Option<Vec<String>>,
    required: Option<bool>,
    default: Option<DefaultValue>,
    constant: Option<Stored>,
    dest: Option<String>,
    metavar: Option<String>,
    help: Option<String>,
    version: Option<String>,
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (class, names) = match &self.declared {
            Declared::Argument(name) => ("Arg", name.clone()),
            Declared::Option(names) => ("Opt", names.join(", ")),
        };
        let nargs = self
            .nargs
            .map(|nargs| nargs.to_string())
            .unwrap_or_default();

        write!(f, "{class}[{names}, {action}, {nargs}]", action = self.action)
    }
}

impl Parameter {
    fn new(declared: Declared) -> Self {
        Self {
            declared,
            action: Action::Store,
            nargs: None,
            handler: None,
            converter: None,
            choices: None,
            required: None,
            default: None,
            constant: None,
            dest: None,
            metavar: None,
            help: None,
            version: None,
        }
    }

    /// Create a positional argument.
    /// Positional arguments are matched in the order they are added.
    pub fn argument(name: impl Into<String>) -> Self {
        Self::new(Declared::Argument(name.into()))
    }

    /// Create an option from its option strings, such as `["-f", "--foo"]`.
    ///
    /// The destination is derived from the first long option string (else the first):
    /// the prefix characters are stripped and `-` becomes `_`.
    pub fn option<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Declared::Option(names.into_iter().map(Into::into).collect()))
    }

    /// Set the number of values one occurrence consumes.
    pub fn nargs(mut self, nargs: Nargs) -> Self {
        self.nargs.replace(nargs);
        self
    }

    /// Set the action (default [`Action::Store`]).
    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Use a [`Action::Custom`] action.
    ///
    /// The handler receives the currently stored value and the occurrence's (converted) values,
    /// and returns the new stored value.
    /// An `Err` fails the parse with [`ParseError::InvalidValue`](crate::ParseError::InvalidValue).
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter, Stored};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(["--upper"]).custom(|_, values| {
    ///         Ok(Stored::from(values[0].to_uppercase()))
    ///     }))
    ///     .unwrap()
    ///     .build();
    /// let namespace = parser.try_parse_tokens(&["--upper", "abc"]).unwrap();
    /// assert_eq!(namespace.get::<String>("upper").unwrap(), "ABC");
    /// ```
    pub fn custom<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Stored, &[String]) -> Result<Stored, String> + Send + Sync + 'static,
    {
        self.action = Action::Custom;
        self.handler.replace(Arc::new(handler));
        self
    }

    /// Convert each value (and each string default) before it is stored.
    /// An `Err` fails the parse with [`ParseError::InvalidValue`](crate::ParseError::InvalidValue).
    pub fn converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        self.converter.replace(Arc::new(converter));
        self
    }

    /// Reject values which do not parse as `T`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Exit, Parameter, ParseError};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument("count").parse_as::<u8>())
    ///     .unwrap()
    ///     .build();
    /// assert!(parser.try_parse_tokens(&["7"]).is_ok());
    /// assert!(matches!(
    ///     parser.try_parse_tokens(&["seven"]),
    ///     Err(Exit::Error { error: ParseError::InvalidValue { .. }, .. })
    /// ));
    /// ```
    pub fn parse_as<T>(self) -> Self
    where
        T: FromStr,
        <T as FromStr>::Err: fmt::Display,
    {
        self.converter(|value| {
            T::from_str(value)
                .map(|_| value.to_string())
                .map_err(|error| error.to_string())
        })
    }

    /// Restrict the raw values to `choices`.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices
            .replace(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the option must appear (options only).
    pub fn required(mut self, required: bool) -> Self {
        self.required.replace(required);
        self
    }

    /// The value stored when the parameter is not matched.
    pub fn default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default.replace(default.into());
        self
    }

    /// The constant used by [`Action::StoreConst`], [`Action::AppendConst`] and by a
    /// `Nargs::Optional` option given without a value.
    pub fn constant(mut self, constant: impl Into<Stored>) -> Self {
        self.constant.replace(constant.into());
        self
    }

    /// Override the derived destination (options only).
    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest.replace(dest.into());
        self
    }

    /// The name of the parameter's values in the help.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar.replace(metavar.into());
        self
    }

    /// Document the parameter.
    /// If repeated, only the final message applies.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Use a [`Action::Version`] action reporting `version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.action = Action::Version;
        self.version.replace(version.into());
        self
    }

    /// Validate the parameter into a spec for a parser configured with `config`.
    pub(crate) fn into_spec(self, config: &ParserConfig) -> Result<Spec, ConfigError> {
        let mut spec = match &self.declared {
            Declared::Argument(name) => self.argument_spec(name, config)?,
            Declared::Option(names) => self.option_spec(names, config)?,
        };
        let name = spec.display_name();

        match (self.action, &self.handler, &self.version) {
            (Action::Custom, None, _) => return Err(ConfigError::MissingHandler(name)),
            (Action::Version, _, None) => return Err(ConfigError::MissingVersion(name)),
            _ => {}
        }

        validate_nargs(&name, spec.kind, self.action, self.nargs)?;

        match (self.action, &self.constant) {
            (Action::StoreConst | Action::AppendConst, None) => {
                return Err(ConfigError::MissingConstant {
                    name,
                    action: self.action,
                });
            }
            (Action::StoreConst | Action::AppendConst | Action::Custom, Some(_)) => {}
            (Action::Store | Action::Append | Action::Extend, Some(_))
                if self.nargs == Some(Nargs::Optional) && spec.kind == SpecKind::Option => {}
            (_, Some(_)) => return Err(ConfigError::UnexpectedConstant(name)),
            (_, None) => {}
        }

        if self.action == Action::BooleanOptional {
            spec.negations = negations(&spec.names, config);
            spec.names.extend(spec.negations.iter().cloned());
        }

        let default_help = match self.action {
            Action::Help => Some(HELP_MESSAGE.to_string()),
            Action::Version => Some(VERSION_MESSAGE.to_string()),
            _ => None,
        };
        let default = match self.action {
            Action::Help | Action::Version => self.default.or(Some(DefaultValue::Suppress)),
            _ => self.default,
        };

        spec.nargs = self.nargs;
        spec.handler = self.handler;
        spec.converter = self.converter;
        spec.choices = self.choices;
        spec.required = self.required.unwrap_or(false);
        spec.default = default;
        spec.constant = self.constant;
        spec.metavar = self.metavar;
        spec.help = self.help.or(default_help);
        spec.version = self.version;
        Ok(spec)
    }

    fn argument_spec(&self, name: &str, config: &ParserConfig) -> Result<Spec, ConfigError> {
        if name.is_empty() || name.starts_with(|c| config.is_prefix(c)) {
            return Err(ConfigError::InvalidArgumentName(name.to_string()));
        }

        let reason = if self.dest.is_some() {
            Some("cannot override its dest".to_string())
        } else if self.required.is_some() {
            Some("cannot set required".to_string())
        } else if !self.action.takes_values() {
            Some(format!("cannot use the {} action", self.action))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidArgument {
                name: name.to_string(),
                reason,
            }),
            None => Ok(Spec::new(
                SpecKind::Positional,
                vec![name.to_string()],
                name,
                self.action,
            )),
        }
    }

    fn option_spec(&self, names: &[String], config: &ParserConfig) -> Result<Spec, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::InvalidArgumentName(String::default()));
        }

        for name in names {
            let mut chars = name.chars();

            if !matches!((chars.next(), chars.next()), (Some(c), Some(_)) if config.is_prefix(c)) {
                return Err(ConfigError::InvalidOptionString {
                    option: name.clone(),
                    prefix_chars: config.prefix_chars.clone(),
                });
            }
        }

        let dest = match &self.dest {
            Some(dest) => dest.clone(),
            None => {
                let primary = names
                    .iter()
                    .find(|name| config.is_long(name))
                    .unwrap_or(&names[0]);
                let dest = primary
                    .trim_start_matches(|c| config.is_prefix(c))
                    .replace('-', "_");

                if dest.is_empty() {
                    return Err(ConfigError::InvalidOptionString {
                        option: primary.clone(),
                        prefix_chars: config.prefix_chars.clone(),
                    });
                }

                dest
            }
        };

        Ok(Spec::new(SpecKind::Option, names.to_vec(), dest, self.action))
    }
}

fn validate_nargs(
    name: &str,
    kind: SpecKind,
    action: Action,
    nargs: Option<Nargs>,
) -> Result<(), ConfigError> {
    let nargs = match nargs {
        Some(nargs) => nargs,
        None => return Ok(()),
    };

    let valid = match nargs {
        Nargs::AnyChunks(0) | Nargs::AtLeastOneChunks(0) => false,
        Nargs::Precisely(0) => action == Action::Custom && kind == SpecKind::Option,
        _ => action.takes_values(),
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidNargs {
            name: name.to_string(),
            action,
            nargs,
        })
    }
}

/// The `--no-X` strings for every long option string `--X`.
fn negations(names: &[String], config: &ParserConfig) -> Vec<String> {
    names
        .iter()
        .filter(|name| config.is_long(name))
        .map(|name| {
            let split = name
                .char_indices()
                .nth(2)
                .map(|(index, _)| index)
                .unwrap_or(name.len());
            let (prefix, rest) = name.split_at(split);
            format!("{prefix}{NEGATION_PREFIX}{rest}")
        })
        .collect()
}

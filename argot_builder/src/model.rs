use std::fmt;

use crate::constant::DEFAULT_PREFIX_CHARS;
use crate::namespace::Stored;

/// The number of values one occurrence of a parameter consumes.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nargs {
    /// `N`: Precisely `N` values.
    Precisely(u8),
    /// `?`: Zero or one value.
    Optional,
    /// `*`: Any number of values, including none.
    Any,
    /// `+`: At least one value.
    AtLeastOne,
    /// `...`: Every remaining token, taken verbatim.
    Remainder,
    /// `(N)*`: Any number of groups, each of precisely `N` values.
    AnyChunks(u8),
    /// `(N)+`: At least one group of precisely `N` values.
    AtLeastOneChunks(u8),
}

impl fmt::Display for Nargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nargs::Precisely(n) => write!(f, "{n}"),
            Nargs::Optional => write!(f, "?"),
            Nargs::Any => write!(f, "*"),
            Nargs::AtLeastOne => write!(f, "+"),
            Nargs::Remainder => write!(f, "..."),
            Nargs::AnyChunks(n) => write!(f, "({n})*"),
            Nargs::AtLeastOneChunks(n) => write!(f, "({n})+"),
        }
    }
}

/// What a matched parameter does to the namespace.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#action>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Replace the destination with the matched value(s).
    Store,
    /// Replace the destination with the parameter's constant.
    StoreConst,
    /// Replace the destination with `true`.
    StoreTrue,
    /// Replace the destination with `false`.
    StoreFalse,
    /// Push the matched value(s) onto the destination, one element per occurrence.
    Append,
    /// Push the parameter's constant onto the destination.
    AppendConst,
    /// Increment the destination.
    Count,
    /// Push the matched values onto the destination, flattened.
    Extend,
    /// Interrupt parsing with the help message.
    Help,
    /// Interrupt parsing with the version string.
    Version,
    /// A `--flag`/`--no-flag` pair storing `true`/`false`.
    BooleanOptional,
    /// Delegate to the parameter's handler.
    Custom,
}

impl Action {
    /// Whether the action consumes values from the command line.
    pub(crate) fn takes_values(&self) -> bool {
        matches!(
            self,
            Action::Store | Action::Append | Action::Extend | Action::Custom
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Store => "store",
            Action::StoreConst => "store_const",
            Action::StoreTrue => "store_true",
            Action::StoreFalse => "store_false",
            Action::Append => "append",
            Action::AppendConst => "append_const",
            Action::Count => "count",
            Action::Extend => "extend",
            Action::Help => "help",
            Action::Version => "version",
            Action::BooleanOptional => "boolean_optional",
            Action::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

/// The default of a destination which no occurrence set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Fill the destination with this value.
    Value(Stored),
    /// Omit the destination unless it is explicitly set.
    Suppress,
}

impl From<Stored> for DefaultValue {
    fn from(value: Stored) -> Self {
        DefaultValue::Value(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Value(Stored::from(value))
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Value(Stored::from(value))
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Value(Stored::from(value))
    }
}

impl From<Vec<&str>> for DefaultValue {
    fn from(value: Vec<&str>) -> Self {
        DefaultValue::Value(Stored::from(value))
    }
}

impl From<Vec<String>> for DefaultValue {
    fn from(value: Vec<String>) -> Self {
        DefaultValue::Value(Stored::from(value))
    }
}

/// How to treat an option string registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictHandler {
    /// Fail the registration.
    #[default]
    Error,
    /// Drop the conflicting strings from the earlier registration.
    Resolve,
}

/// Parser level configuration.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{CommandLineParser, ConflictHandler, ParserConfig};
///
/// let config = ParserConfig::default()
///     .prefix_chars("-+")
///     .allow_abbrev(false)
///     .conflict_handler(ConflictHandler::Resolve);
/// let parser = CommandLineParser::with_config("program", config).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub(crate) prefix_chars: String,
    pub(crate) allow_abbrev: bool,
    pub(crate) conflict_handler: ConflictHandler,
    pub(crate) add_help: bool,
    pub(crate) exit_on_error: bool,
    pub(crate) argument_default: Option<DefaultValue>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            prefix_chars: DEFAULT_PREFIX_CHARS.to_string(),
            allow_abbrev: true,
            conflict_handler: ConflictHandler::default(),
            add_help: true,
            exit_on_error: true,
            argument_default: None,
        }
    }
}

impl ParserConfig {
    /// The characters which introduce an option (default `-`).
    pub fn prefix_chars(mut self, prefix_chars: impl Into<String>) -> Self {
        self.prefix_chars = prefix_chars.into();
        self
    }

    /// Whether long options may be abbreviated to a unique prefix (default `true`).
    pub fn allow_abbrev(mut self, allow_abbrev: bool) -> Self {
        self.allow_abbrev = allow_abbrev;
        self
    }

    /// How to treat option strings registered twice (default [`ConflictHandler::Error`]).
    pub fn conflict_handler(mut self, conflict_handler: ConflictHandler) -> Self {
        self.conflict_handler = conflict_handler;
        self
    }

    /// Whether to register `-h/--help` (default `true`).
    pub fn add_help(mut self, add_help: bool) -> Self {
        self.add_help = add_help;
        self
    }

    /// Whether `GeneralParser::parse` exits the process on a parse error (default `true`).
    pub fn exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.exit_on_error = exit_on_error;
        self
    }

    /// The default applied to every parameter without a nearer default.
    pub fn argument_default(mut self, argument_default: impl Into<DefaultValue>) -> Self {
        self.argument_default = Some(argument_default.into());
        self
    }

    pub(crate) fn is_prefix(&self, c: char) -> bool {
        self.prefix_chars.contains(c)
    }

    /// The prefix used for generated options, such as help.
    pub(crate) fn default_prefix(&self) -> char {
        if self.prefix_chars.contains('-') {
            '-'
        } else {
            self.prefix_chars.chars().next().unwrap_or('-')
        }
    }

    /// Whether `option` starts with two prefix characters.
    pub(crate) fn is_long(&self, option: &str) -> bool {
        let mut chars = option.chars();
        matches!((chars.next(), chars.next()), (Some(a), Some(b)) if self.is_prefix(a) && self.is_prefix(b))
    }
}

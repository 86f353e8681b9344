use thiserror::Error;

use crate::model::{Action, Nargs};

/// Error for an invalid registration.
/// Registration fails eagerly; a parser that builds is always well formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Option strings already claimed by another parameter.
    #[error("Conflicting option string(s): {}.", .0.join(", "))]
    ConflictingOption(Vec<String>),

    /// An option string which does not start with a prefix character.
    #[error("Invalid option string '{option}': must start with one of '{prefix_chars}'.")]
    InvalidOptionString {
        /// The offending option string.
        option: String,
        /// The configured prefix characters.
        prefix_chars: String,
    },

    /// A positional argument name which is empty or looks like an option.
    #[error("Invalid argument name '{0}'.")]
    InvalidArgumentName(String),

    /// The parameter's nargs cannot be used with its action.
    #[error("Parameter '{name}' cannot use nargs '{nargs}' with the {action} action.")]
    InvalidNargs {
        /// The parameter.
        name: String,
        /// The action.
        action: Action,
        /// The rejected nargs.
        nargs: Nargs,
    },

    /// The action needs a constant, but none was given.
    #[error("Parameter '{name}' requires a constant for the {action} action.")]
    MissingConstant {
        /// The parameter.
        name: String,
        /// The action.
        action: Action,
    },

    /// A constant was given to a value action whose nargs is not `?`.
    #[error("Parameter '{0}' may only supply a constant with nargs '?'.")]
    UnexpectedConstant(String),

    /// The version action needs a version string.
    #[error("Parameter '{0}' requires a version string for the version action.")]
    MissingVersion(String),

    /// The custom action needs a handler.
    #[error("Parameter '{0}' requires a handler for the custom action.")]
    MissingHandler(String),

    /// A positional argument used a feature reserved for options.
    #[error("Argument '{name}' {reason}.")]
    InvalidArgument {
        /// The argument.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// A destination already owned by a positional argument.
    #[error("Cannot duplicate the destination '{0}'.")]
    DuplicateDestination(String),

    /// A parameter which cannot join a mutually exclusive group.
    #[error("Parameter '{name}' cannot join a mutually exclusive group: {reason}.")]
    InvalidExclusiveMember {
        /// The parameter.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// The parser was branched twice.
    #[error("Cannot branch the parser more than once.")]
    DuplicateBranch,

    /// A sub-command was added before the parser was branched.
    #[error("Cannot add the sub-command '{0}' before branching the parser.")]
    MissingBranch(String),

    /// A sub-command name was added twice.
    #[error("Cannot duplicate the sub-command '{0}'.")]
    DuplicateSubCommand(String),

    /// No prefix characters were configured.
    #[error("Prefix characters cannot be empty.")]
    EmptyPrefixChars,
}

/// Error for a command line which does not fit the grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An abbreviation matching several options.
    #[error("Ambiguous option '{option}' could match {}.", .candidates.join(", "))]
    AmbiguousOption {
        /// The token as given.
        option: String,
        /// Every option string it could match.
        candidates: Vec<String>,
    },

    /// An option-like token matching no option.
    #[error("Unrecognized option '{0}'.")]
    UnknownOption(String),

    /// An explicit `=value` (or attached value) which the option cannot take.
    #[error("Option '{option}' cannot take the explicit value '{value}'.")]
    IgnoredExplicitValue {
        /// The option string.
        option: String,
        /// The value which was attached to it.
        value: String,
    },

    /// Not enough values for an occurrence.
    #[error("Not enough tokens provided to parameter '{name}': expected {expected}.")]
    Undercomplete {
        /// The parameter.
        name: String,
        /// A description of the expected count.
        expected: String,
    },

    /// Tokens which no parameter took.
    #[error("Too many tokens provided: '{}'.", .0.join(" "))]
    Overcomplete(Vec<String>),

    /// Required parameters which were never matched.
    #[error("The following parameters are required: {}.", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// A required mutually exclusive group with no matched member.
    #[error("One of the parameters {} is required.", .0.join(" "))]
    MissingExclusive(Vec<String>),

    /// Two members of a mutually exclusive group were matched.
    #[error("Parameter '{name}' is not allowed with parameter '{other}'.")]
    MutuallyExclusive {
        /// The later parameter.
        name: String,
        /// The earlier parameter.
        other: String,
    },

    /// A value outside of the parameter's choices.
    #[error("Invalid choice '{value}' for parameter '{name}' (choose from {}).", .choices.join(", "))]
    InvalidChoice {
        /// The parameter.
        name: String,
        /// The rejected value.
        value: String,
        /// The allowed values.
        choices: Vec<String>,
    },

    /// A value which the parameter's converter or handler rejected.
    #[error("Invalid value '{value}' for parameter '{name}': {message}.")]
    InvalidValue {
        /// The parameter.
        name: String,
        /// The rejected value.
        value: String,
        /// The converter's message.
        message: String,
    },

    /// A sub-command name which is not registered.
    #[error("Unknown sub-command '{command}' for '{name}' (choose from {}).", .choices.join(", "))]
    UnknownSubCommand {
        /// The sub-command destination.
        name: String,
        /// The given command.
        command: String,
        /// The registered commands.
        choices: Vec<String>,
    },

    /// Intermixed parsing cannot handle this positional.
    #[error("Cannot intermix the parameter '{0}': it consumes every remaining token.")]
    IntermixedUnsupported(String),
}

/// Error for retrieving a typed value from a `Namespace`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// The destination holds nothing.
    #[error("Destination '{0}' is not set.")]
    Missing(String),

    /// The destination holds a different shape of value.
    #[error("Destination '{dest}' holds {found}, not {expected}.")]
    Shape {
        /// The destination.
        dest: String,
        /// The requested shape.
        expected: &'static str,
        /// The stored shape.
        found: &'static str,
    },

    /// A stored value which does not parse as the requested type.
    #[error("Destination '{dest}' value '{value}' cannot convert to {type_name}.")]
    Conversion {
        /// The destination.
        dest: String,
        /// The stored value.
        value: String,
        /// The requested type.
        type_name: &'static str,
    },
}

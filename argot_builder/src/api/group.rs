use crate::api::Parameter;
use crate::model::{Action, DefaultValue};
use crate::registry::{Spec, SpecKind};

/// A set of options of which at most one may appear.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{Action, CommandLineParser, MutuallyExclusiveGroup, Parameter};
///
/// let parser = CommandLineParser::new("program")
///     .add_exclusive(
///         MutuallyExclusiveGroup::new()
///             .add(Parameter::option(["--fast"]).action(Action::StoreTrue))
///             .add(Parameter::option(["--slow"]).action(Action::StoreTrue)),
///     )
///     .unwrap()
///     .build();
/// assert!(parser.try_parse_tokens(&["--fast"]).is_ok());
/// assert!(parser.try_parse_tokens(&["--fast", "--slow"]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MutuallyExclusiveGroup {
    pub(super) members: Vec<Parameter>,
    pub(super) required: bool,
}

impl MutuallyExclusiveGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option to the group.
    /// Members must be options, and must not be individually required.
    pub fn add(mut self, parameter: Parameter) -> Self {
        self.members.push(parameter);
        self
    }

    /// Whether exactly one member must appear (default `false`).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

#[derive(Debug, Clone)]
pub(super) enum Member {
    Parameter(Parameter),
    Exclusive(MutuallyExclusiveGroup),
}

/// A titled section of parameters in the help.
///
/// Grouping does not change how tokens are matched.
/// The group's `argument_default` applies to members without a default of their own.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{ArgumentGroup, CommandLineParser, Parameter};
///
/// let parser = CommandLineParser::new("program")
///     .add_group(
///         ArgumentGroup::new("network")
///             .description("Where to connect.")
///             .argument_default("unset")
///             .add(Parameter::option(["--host"]))
///             .add(Parameter::option(["--port"])),
///     )
///     .unwrap()
///     .build();
/// let namespace = parser.try_parse_tokens(&["--port", "80"]).unwrap();
/// assert_eq!(namespace.get::<String>("host").unwrap(), "unset");
/// assert_eq!(namespace.get::<u16>("port").unwrap(), 80);
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentGroup {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) argument_default: Option<DefaultValue>,
    pub(super) members: Vec<Member>,
}

impl ArgumentGroup {
    /// Create a group with the section `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            argument_default: None,
            members: Vec::default(),
        }
    }

    /// Document the group, below its title.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// The default of members without a default of their own.
    pub fn argument_default(mut self, argument_default: impl Into<DefaultValue>) -> Self {
        self.argument_default.replace(argument_default.into());
        self
    }

    /// Add a parameter to the group.
    pub fn add(mut self, parameter: Parameter) -> Self {
        self.members.push(Member::Parameter(parameter));
        self
    }

    /// Add a mutually exclusive group whose members belong to this group.
    pub fn add_exclusive(mut self, exclusive: MutuallyExclusiveGroup) -> Self {
        self.members.push(Member::Exclusive(exclusive));
        self
    }
}

/// The positional slot which selects a sub-command.
/// Register it with [`CommandLineParser::branch`](crate::CommandLineParser::branch).
///
/// The selected sub-command's name is stored under `dest`.
#[derive(Debug, Clone)]
pub struct SubCommands {
    dest: String,
    required: bool,
    metavar: Option<String>,
    help: Option<String>,
}

impl SubCommands {
    /// Create a sub-command slot storing the selected name under `dest`.
    pub fn new(dest: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            required: false,
            metavar: None,
            help: None,
        }
    }

    /// Whether a sub-command must be selected (default `false`).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The name of the slot in the usage and help, in place of the sub-command names.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar.replace(metavar.into());
        self
    }

    /// Document the slot.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    pub(super) fn into_spec(self) -> Spec {
        let mut spec = Spec::new(
            SpecKind::Command,
            vec![self.dest.clone()],
            self.dest,
            Action::Store,
        );
        spec.required = self.required;
        spec.metavar = self.metavar;
        spec.help = self.help;
        spec
    }
}

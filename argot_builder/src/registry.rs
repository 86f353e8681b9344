use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::*;
use crate::error::ConfigError;
use crate::matcher::{is_negative_number, Bound};
use crate::model::*;
use crate::namespace::Stored;

pub(crate) type SpecId = usize;
pub(crate) type Converter = Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>;
pub(crate) type Handler = Arc<dyn Fn(&Stored, &[String]) -> Result<Stored, String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpecKind {
    Positional,
    Option,
    /// The slot selecting a sub-command.
    Command,
}

/// One validated parameter.
#[derive(Clone)]
pub(crate) struct Spec {
    pub(crate) kind: SpecKind,
    pub(crate) names: Vec<String>,
    /// Option strings generated as the negative side of a `BooleanOptional`.
    pub(crate) negations: Vec<String>,
    pub(crate) dest: String,
    pub(crate) nargs: Option<Nargs>,
    pub(crate) action: Action,
    pub(crate) handler: Option<Handler>,
    pub(crate) converter: Option<Converter>,
    pub(crate) choices: Option<Vec<String>>,
    pub(crate) required: bool,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) constant: Option<Stored>,
    pub(crate) metavar: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) group: Option<usize>,
    retired: bool,
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("kind", &self.kind)
            .field("names", &self.names)
            .field("dest", &self.dest)
            .field("nargs", &self.nargs)
            .field("action", &self.action)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("group", &self.group)
            .field("retired", &self.retired)
            .finish()
    }
}

impl Spec {
    pub(crate) fn new(kind: SpecKind, names: Vec<String>, dest: impl Into<String>, action: Action) -> Self {
        Self {
            kind,
            names,
            negations: Vec::default(),
            dest: dest.into(),
            nargs: None,
            action,
            handler: None,
            converter: None,
            choices: None,
            required: false,
            default: None,
            constant: None,
            metavar: None,
            help: None,
            version: None,
            group: None,
            retired: false,
        }
    }

    fn help(prefix: char) -> Self {
        let mut spec = Spec::new(
            SpecKind::Option,
            vec![
                format!("{prefix}{HELP_SHORT}"),
                format!("{prefix}{prefix}{HELP_NAME}"),
            ],
            HELP_NAME,
            Action::Help,
        );
        spec.default = Some(DefaultValue::Suppress);
        spec.help = Some(HELP_MESSAGE.to_string());
        spec
    }

    pub(crate) fn is_positional(&self) -> bool {
        self.kind != SpecKind::Option
    }

    pub(crate) fn bound(&self) -> Bound {
        match (self.kind, self.nargs) {
            (SpecKind::Command, _) => Bound::Command,
            (_, Some(nargs)) => Bound::from(nargs),
            (_, None) if self.action.takes_values() => Bound::Range(1, 1),
            (_, None) => Bound::Range(0, 0),
        }
    }

    /// The name used for this parameter in messages.
    pub(crate) fn display_name(&self) -> String {
        match self.kind {
            SpecKind::Option => self.names.join("/"),
            SpecKind::Positional | SpecKind::Command => {
                self.metavar.clone().unwrap_or_else(|| self.dest.clone())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GroupSpec {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) argument_default: Option<DefaultValue>,
    pub(crate) members: Vec<SpecId>,
}

#[derive(Debug, Clone)]
pub(crate) struct ExclusiveSpec {
    pub(crate) required: bool,
    pub(crate) members: Vec<SpecId>,
}

#[derive(Debug, Clone)]
pub(crate) struct SubCommandSpec {
    pub(crate) commands: Vec<(String, Registry)>,
}

/// Every declaration of one parser level.
/// Immutable once the parser is built.
#[derive(Debug, Clone)]
pub(crate) struct Registry {
    pub(crate) program: String,
    pub(crate) about: Option<String>,
    pub(crate) config: ParserConfig,
    specs: Vec<Spec>,
    options: HashMap<String, SpecId>,
    positionals: Vec<SpecId>,
    groups: Vec<GroupSpec>,
    exclusives: Vec<ExclusiveSpec>,
    defaults: BTreeMap<String, DefaultValue>,
    sub_commands: Option<SubCommandSpec>,
    negative_number_options: bool,
}

impl Registry {
    pub(crate) fn new(program: impl Into<String>, config: ParserConfig) -> Self {
        let mut registry = Self {
            program: program.into(),
            about: None,
            config,
            specs: Vec::default(),
            options: HashMap::default(),
            positionals: Vec::default(),
            groups: Vec::default(),
            exclusives: Vec::default(),
            defaults: BTreeMap::default(),
            sub_commands: None,
            negative_number_options: false,
        };

        if registry.config.add_help {
            let help = Spec::help(registry.config.default_prefix());
            registry
                .insert(help, None)
                .expect("internal error - help must register into an empty registry");
        }

        registry
    }

    pub(crate) fn insert(&mut self, mut spec: Spec, group: Option<usize>) -> Result<SpecId, ConfigError> {
        if spec.is_positional() {
            if let Some(terminal) = self
                .positionals
                .iter()
                .map(|id| &self.specs[*id])
                .find(|s| s.bound().is_terminal())
            {
                return Err(ConfigError::InvalidArgument {
                    name: spec.dest,
                    reason: format!(
                        "cannot follow '{}', which consumes every remaining token",
                        terminal.display_name()
                    ),
                });
            }

            if self.live().any(|s| s.dest == spec.dest) {
                return Err(ConfigError::DuplicateDestination(spec.dest));
            }
        } else if self.live().any(|s| s.is_positional() && s.dest == spec.dest) {
            return Err(ConfigError::DuplicateDestination(spec.dest));
        }

        if spec.kind == SpecKind::Option {
            let conflicts: Vec<String> = spec
                .names
                .iter()
                .filter(|name| self.options.contains_key(*name))
                .cloned()
                .collect();

            if !conflicts.is_empty() {
                match self.config.conflict_handler {
                    ConflictHandler::Error => return Err(ConfigError::ConflictingOption(conflicts)),
                    ConflictHandler::Resolve => {
                        for option in &conflicts {
                            self.retire_option(option);
                        }
                    }
                }
            }
        }

        let id = self.specs.len();

        if spec.kind == SpecKind::Option {
            for name in &spec.names {
                self.options.insert(name.clone(), id);
            }
        } else {
            self.positionals.push(id);
        }

        if let Some(index) = group {
            self.groups[index].members.push(id);
        }

        spec.group = group;
        self.specs.push(spec);
        self.negative_number_options = self.options.keys().any(|o| is_negative_number(o));
        Ok(id)
    }

    fn retire_option(&mut self, option: &str) {
        if let Some(id) = self.options.remove(option) {
            let spec = &mut self.specs[id];
            spec.names.retain(|name| name != option);
            spec.negations.retain(|name| name != option);
            let retired = spec.names.is_empty();

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Resolved the conflict on '{option}' by dropping it from '{}'.", spec.dest);
            }

            if retired {
                spec.retired = true;

                for group in &mut self.groups {
                    group.members.retain(|member| *member != id);
                }

                for exclusive in &mut self.exclusives {
                    exclusive.members.retain(|member| *member != id);
                }
            }
        }
    }

    pub(crate) fn add_group(
        &mut self,
        title: String,
        description: Option<String>,
        argument_default: Option<DefaultValue>,
    ) -> usize {
        self.groups.push(GroupSpec {
            title,
            description,
            argument_default,
            members: Vec::default(),
        });
        self.groups.len() - 1
    }

    pub(crate) fn add_exclusive(
        &mut self,
        members: Vec<Spec>,
        required: bool,
        group: Option<usize>,
    ) -> Result<(), ConfigError> {
        for spec in &members {
            if spec.is_positional() {
                return Err(ConfigError::InvalidExclusiveMember {
                    name: spec.display_name(),
                    reason: "it is positional".to_string(),
                });
            }

            if spec.required {
                return Err(ConfigError::InvalidExclusiveMember {
                    name: spec.display_name(),
                    reason: "it is individually required".to_string(),
                });
            }
        }

        let mut ids = Vec::default();

        for spec in members {
            ids.push(self.insert(spec, group)?);
        }

        self.exclusives.push(ExclusiveSpec {
            required,
            members: ids,
        });
        Ok(())
    }

    pub(crate) fn set_default(&mut self, dest: String, value: DefaultValue) {
        self.defaults.insert(dest, value);
    }

    pub(crate) fn branch(&mut self, spec: Spec) -> Result<(), ConfigError> {
        if self.sub_commands.is_some() {
            return Err(ConfigError::DuplicateBranch);
        }

        self.insert(spec, None)?;
        self.sub_commands = Some(SubCommandSpec {
            commands: Vec::default(),
        });
        Ok(())
    }

    pub(crate) fn add_command(&mut self, name: String, registry: Registry) -> Result<(), ConfigError> {
        match &mut self.sub_commands {
            None => Err(ConfigError::MissingBranch(name)),
            Some(sub_commands) => {
                if sub_commands.commands.iter().any(|(existing, _)| existing == &name) {
                    return Err(ConfigError::DuplicateSubCommand(name));
                }

                sub_commands.commands.push((name, registry));
                Ok(())
            }
        }
    }

    pub(crate) fn spec(&self, id: SpecId) -> &Spec {
        &self.specs[id]
    }

    pub(crate) fn exact(&self, option: &str) -> Option<SpecId> {
        self.options.get(option).copied()
    }

    /// Every option string, sorted.
    pub(crate) fn options(&self) -> Vec<(&str, SpecId)> {
        let mut options: Vec<(&str, SpecId)> = self
            .options
            .iter()
            .map(|(option, id)| (option.as_str(), *id))
            .collect();
        options.sort();
        options
    }

    pub(crate) fn positionals(&self) -> &[SpecId] {
        &self.positionals
    }

    /// Every spec which was not retired by conflict resolution, in registration order.
    pub(crate) fn live(&self) -> impl Iterator<Item = &Spec> {
        self.specs.iter().filter(|spec| !spec.retired)
    }

    pub(crate) fn live_ids(&self) -> impl Iterator<Item = (SpecId, &Spec)> {
        self.specs.iter().enumerate().filter(|(_, spec)| !spec.retired)
    }

    pub(crate) fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    pub(crate) fn exclusives(&self) -> &[ExclusiveSpec] {
        &self.exclusives
    }

    pub(crate) fn defaults(&self) -> &BTreeMap<String, DefaultValue> {
        &self.defaults
    }

    pub(crate) fn sub_commands(&self) -> Option<&SubCommandSpec> {
        self.sub_commands.as_ref()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&Registry> {
        self.sub_commands.as_ref().and_then(|sub_commands| {
            sub_commands
                .commands
                .iter()
                .find(|(command, _)| command == name)
                .map(|(_, registry)| registry)
        })
    }

    pub(crate) fn command_names(&self) -> Vec<String> {
        self.sub_commands
            .as_ref()
            .map(|sub_commands| sub_commands.commands.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn has_negative_number_options(&self) -> bool {
        self.negative_number_options
    }

    /// The default of `dest` as the namespace builder would resolve it.
    pub(crate) fn get_default(&self, dest: &str) -> Option<DefaultValue> {
        match self.live().find(|spec| spec.dest == dest) {
            Some(spec) => self.resolve_default(spec),
            None => self.defaults.get(dest).cloned(),
        }
    }

    /// Local, then group, then parser (`set_default`, then `argument_default`), then intrinsic.
    pub(crate) fn resolve_default(&self, spec: &Spec) -> Option<DefaultValue> {
        spec.default
            .clone()
            .or_else(|| {
                spec.group
                    .and_then(|index| self.groups[index].argument_default.clone())
            })
            .or_else(|| self.defaults.get(&spec.dest).cloned())
            .or_else(|| self.config.argument_default.clone())
            .or_else(|| intrinsic_default(spec))
    }
}

fn intrinsic_default(spec: &Spec) -> Option<DefaultValue> {
    let stored = match spec.action {
        Action::StoreTrue => Stored::from(false),
        Action::StoreFalse => Stored::from(true),
        Action::Count => Stored::from("0"),
        Action::Append | Action::AppendConst | Action::Extend => Stored::Sequence(Vec::default()),
        Action::Store if spec.kind == SpecKind::Positional => match spec.bound() {
            Bound::Lower(0) | Bound::Chunks(_, 0) | Bound::Remainder => {
                Stored::Sequence(Vec::default())
            }
            _ => return None,
        },
        _ => return None,
    };

    Some(DefaultValue::Value(stored))
}

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::error::ParseError;
use crate::matcher::{classify, Extra, Located, Matches, TokenMatcher};
use crate::namespace::Namespace;
use crate::parser::capture::{Applied, Applier};
use crate::parser::defaults::fill_defaults;
use crate::parser::enforcer::enforce;
use crate::parser::printer::Printer;
use crate::registry::Registry;

/// How operands are matched against the positionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Each contiguous run of operands is matched as it is reached.
    Ordered,
    /// Every option first, then every operand as one run.
    Intermixed,
}

/// What stopped a parse short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Help(String),
    Version(String),
    /// A parse error, with the position of the token at fault when there is one.
    Error(Option<usize>, ParseError),
}

impl Interrupt {
    /// Re-position errors from a sub-command's tokens into the parent's tokens.
    fn shift(self, offset: usize) -> Self {
        match self {
            Interrupt::Error(index, error) => Interrupt::Error(index.map(|i| i + offset), error),
            other => other,
        }
    }
}

impl From<Located> for Interrupt {
    fn from((index, error): Located) -> Self {
        Interrupt::Error(index, error)
    }
}

/// The outcome of a parse which ran to the end.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Consumed {
    pub(crate) namespace: Namespace,
    /// Tokens which no parameter took, in input order.
    pub(crate) extras: Vec<Extra>,
}

/// Runs the full pipeline for one parser level, recursing into the selected sub-command.
pub(crate) struct Parser<'r> {
    registry: &'r Registry,
    /// Destinations the caller seeded above this level, which defaults must not replace.
    seeded: Vec<String>,
}

impl<'r> Parser<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            seeded: Vec::default(),
        }
    }

    fn seeded(mut self, seeded: Vec<String>) -> Self {
        self.seeded = seeded;
        self
    }

    pub(crate) fn parse(
        &self,
        tokens: &[String],
        seed: Namespace,
        mode: Mode,
    ) -> Result<Consumed, Interrupt> {
        let registry = self.registry;
        let classified = classify(registry, tokens);
        let matcher = TokenMatcher::new(registry, classified);
        let Matches {
            occurrences,
            mut extras,
            dispatch,
            ..
        } = match mode {
            Mode::Ordered => matcher.consume()?,
            Mode::Intermixed => matcher.consume_intermixed()?,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Matched {} occurrence(s) and {} extra(s) for '{}'.",
                occurrences.len(),
                extras.len(),
                registry.program
            );
        }

        let inherited: Vec<String> = self
            .seeded
            .iter()
            .cloned()
            .chain(seed.iter().map(|(dest, _)| dest.to_string()))
            .collect();
        let applier = Applier::new(registry);
        let mut namespace = seed;
        let mut seen = Vec::default();

        for occurrence in &occurrences {
            let applied = applier
                .apply(occurrence, &namespace)
                .map_err(|error| Interrupt::Error(occurrence.index, error))?;

            match applied {
                Applied::Stored(stored) => {
                    let dest = &registry.spec(occurrence.spec).dest;
                    namespace.set(dest.clone(), stored);
                    seen.push((occurrence.spec, occurrence.index));
                }
                Applied::Skipped => {}
                Applied::Help => {
                    return Err(Interrupt::Help(Printer::terminal(registry).render_help()));
                }
                Applied::Version(version) => return Err(Interrupt::Version(version)),
            }
        }

        // The sub-command runs before this level is defaulted and enforced.
        let child = match dispatch {
            None => None,
            Some(dispatch) => {
                let child_registry = registry.command(&dispatch.name).ok_or_else(|| {
                    Interrupt::Error(
                        Some(dispatch.index),
                        ParseError::UnknownSubCommand {
                            name: registry.spec(dispatch.spec).display_name(),
                            command: dispatch.name.clone(),
                            choices: registry.command_names(),
                        },
                    )
                })?;
                let offset = dispatch.index + 1;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Dispatching {:?} to '{}'.", dispatch.remaining, child_registry.program);
                }

                let consumed = Parser::new(child_registry)
                    .seeded(inherited)
                    .parse(&dispatch.remaining, Namespace::new(), mode)
                    .map_err(|interrupt| interrupt.shift(offset))?;
                extras.extend(consumed.extras.into_iter().map(|mut extra| {
                    extra.index += offset;
                    extra
                }));
                Some(consumed.namespace)
            }
        };

        fill_defaults(registry, &mut namespace, &self.seeded).map_err(|error| Interrupt::Error(None, error))?;
        enforce(registry, &seen)?;

        if let Some(child) = child {
            namespace.merge(child);
        }

        Ok(Consumed { namespace, extras })
    }
}

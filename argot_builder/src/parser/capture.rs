use crate::error::ParseError;
use crate::matcher::Occurrence;
use crate::model::{Action, DefaultValue, Nargs};
use crate::namespace::{Namespace, Stored};
use crate::registry::{Registry, Spec, SpecKind};

/// What applying one occurrence amounts to.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Applied {
    /// The new stored value of the spec's dest.
    Stored(Stored),
    /// Nothing to store (a positional which matched no tokens).
    Skipped,
    Help,
    Version(String),
}

/// The values of one occurrence, shaped by its nargs.
enum Captured {
    Nothing,
    One(String),
    Many(Vec<String>),
}

/// Applies occurrences to a namespace, one at a time.
pub(crate) struct Applier<'r> {
    registry: &'r Registry,
}

impl<'r> Applier<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub(crate) fn apply(
        &self,
        occurrence: &Occurrence,
        namespace: &Namespace,
    ) -> Result<Applied, ParseError> {
        let spec = self.registry.spec(occurrence.spec);

        match spec.action {
            Action::Help => return Ok(Applied::Help),
            Action::Version => {
                return Ok(Applied::Version(spec.version.clone().unwrap_or_default()));
            }
            _ => {}
        }

        if spec.kind == SpecKind::Command {
            return Ok(Applied::Stored(Stored::from(occurrence.values[0].clone())));
        }

        if spec.kind == SpecKind::Positional && occurrence.values.is_empty() {
            return Ok(Applied::Skipped);
        }

        let values = self.convert(spec, &occurrence.values)?;
        let captured = match (spec.action.takes_values(), spec.nargs) {
            (false, _) => Captured::Nothing,
            (true, None) => Captured::One(values.into_iter().next().unwrap_or_default()),
            (true, Some(Nargs::Optional)) => match values.into_iter().next() {
                Some(value) => Captured::One(value),
                None => Captured::Nothing,
            },
            (true, Some(_)) => Captured::Many(values),
        };
        let current = namespace.stored(&spec.dest).clone();
        let constant = spec.constant.clone();

        let stored = match spec.action {
            Action::Store => match captured {
                Captured::One(value) => Stored::from(value),
                Captured::Many(values) => Stored::from(values),
                Captured::Nothing => constant.unwrap_or_default(),
            },
            Action::StoreConst => constant.unwrap_or_default(),
            Action::StoreTrue => Stored::from(true),
            Action::StoreFalse => Stored::from(false),
            Action::Append => match captured {
                Captured::One(value) => current.push_item(value),
                Captured::Many(values) => current.push_group(values),
                Captured::Nothing => push_constant(current, constant),
            },
            Action::AppendConst => push_constant(current, constant),
            Action::Extend => match captured {
                Captured::One(value) => current.push_item(value),
                Captured::Many(values) => current.extend(values),
                Captured::Nothing => current,
            },
            Action::Count => {
                let count = match &current {
                    Stored::Single(value) => value.parse::<i64>().ok(),
                    _ => None,
                }
                .or_else(|| self.count_baseline(spec))
                .unwrap_or(0);
                Stored::from((count + 1).to_string())
            }
            Action::BooleanOptional => {
                let negated = occurrence
                    .option
                    .as_ref()
                    .map(|option| spec.negations.contains(option))
                    .unwrap_or(false);
                Stored::from(!negated)
            }
            Action::Custom => {
                let handler = spec
                    .handler
                    .as_ref()
                    .expect("internal error - custom actions must have a handler");
                let values = match captured {
                    Captured::Nothing => Vec::default(),
                    Captured::One(value) => vec![value],
                    Captured::Many(values) => values,
                };
                handler(&current, &values).map_err(|message| ParseError::InvalidValue {
                    name: spec.display_name(),
                    value: values.join(" "),
                    message,
                })?
            }
            Action::Help | Action::Version => unreachable!("internal error - handled above"),
        };

        Ok(Applied::Stored(stored))
    }

    /// Check the raw values against the choices, then run the converter.
    fn convert(&self, spec: &Spec, values: &[String]) -> Result<Vec<String>, ParseError> {
        values
            .iter()
            .map(|value| {
                if let Some(choices) = &spec.choices {
                    if !choices.contains(value) {
                        return Err(ParseError::InvalidChoice {
                            name: spec.display_name(),
                            value: value.clone(),
                            choices: choices.clone(),
                        });
                    }
                }

                match &spec.converter {
                    Some(converter) => {
                        converter(value).map_err(|message| ParseError::InvalidValue {
                            name: spec.display_name(),
                            value: value.clone(),
                            message,
                        })
                    }
                    None => Ok(value.clone()),
                }
            })
            .collect()
    }

    fn count_baseline(&self, spec: &Spec) -> Option<i64> {
        match self.registry.resolve_default(spec) {
            Some(DefaultValue::Value(Stored::Single(value))) => value.parse::<i64>().ok(),
            _ => None,
        }
    }
}

fn push_constant(current: Stored, constant: Option<Stored>) -> Stored {
    match constant {
        Some(Stored::Single(value)) => current.push_item(value),
        Some(Stored::Sequence(values)) => current.push_group(values),
        _ => current,
    }
}

use crate::registry::{Registry, SpecId};

/// What an option-like token refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Known {
        spec: SpecId,
        option: String,
        explicit: Option<String>,
    },
    Ambiguous(Vec<String>),
    Unknown,
}

pub(crate) struct FlagResolver<'r> {
    registry: &'r Registry,
}

impl<'r> FlagResolver<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve an option-like token.
    /// Returns `None` when the token turns out to be an operand.
    pub(crate) fn resolve(&self, token: &str) -> Option<Resolution> {
        if let Some(spec) = self.registry.exact(token) {
            return Some(Resolution::Known {
                spec,
                option: token.to_string(),
                explicit: None,
            });
        }

        if let Some((flag, value)) = token.split_once('=') {
            if let Some(spec) = self.registry.exact(flag) {
                return Some(Resolution::Known {
                    spec,
                    option: flag.to_string(),
                    explicit: Some(value.to_string()),
                });
            }
        }

        let mut candidates = self.candidates(token);

        match candidates.len() {
            0 => {
                if token.contains(' ') {
                    None
                } else {
                    Some(Resolution::Unknown)
                }
            }
            1 => {
                let (spec, option, explicit) = candidates.remove(0);
                Some(Resolution::Known {
                    spec,
                    option,
                    explicit,
                })
            }
            _ => Some(Resolution::Ambiguous(
                candidates.into_iter().map(|(_, option, _)| option).collect(),
            )),
        }
    }

    /// Abbreviations of long options, or a short option with its value attached.
    /// Only tokens led by two prefix characters may abbreviate.
    fn candidates(&self, token: &str) -> Vec<(SpecId, String, Option<String>)> {
        let config = &self.registry.config;
        let mut chars = token.chars();
        let (first, second) = match (chars.next(), chars.next()) {
            (Some(first), Some(second)) => (first, second),
            _ => return Vec::default(),
        };
        let mut found: Vec<(SpecId, String, Option<String>)> = Vec::default();

        if config.is_prefix(first) && config.is_prefix(second) {
            if config.allow_abbrev {
                let (prefix, explicit) = match token.split_once('=') {
                    Some((prefix, value)) => (prefix, Some(value.to_string())),
                    None => (token, None),
                };

                for (option, spec) in self.registry.options() {
                    if option.starts_with(prefix) {
                        found.push((spec, option.to_string(), explicit.clone()));
                    }
                }
            }
        } else if config.is_prefix(first) {
            let (short, attached) = token.split_at(first.len_utf8() + second.len_utf8());

            for (option, spec) in self.registry.options() {
                if option == short {
                    found.push((spec, option.to_string(), Some(attached.to_string())));
                }
            }
        }

        // Several strings of the same parameter are not ambiguous.
        let mut unique: Vec<(SpecId, String, Option<String>)> = Vec::default();

        for candidate in found {
            if !unique.iter().any(|(spec, _, _)| *spec == candidate.0) {
                unique.push(candidate);
            }
        }

        unique
    }
}

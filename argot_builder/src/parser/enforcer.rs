use std::collections::HashMap;

use crate::error::ParseError;
use crate::matcher::Located;
use crate::registry::{Registry, SpecId, SpecKind};

/// Check the required parameters and exclusive groups against what was seen.
/// `seen` lists every applied occurrence in order, with the position of its token.
pub(crate) fn enforce(registry: &Registry, seen: &[(SpecId, Option<usize>)]) -> Result<(), Located> {
    let mut chosen: HashMap<usize, SpecId> = HashMap::default();

    for (spec, index) in seen {
        for (group, exclusive) in registry.exclusives().iter().enumerate() {
            if !exclusive.members.contains(spec) {
                continue;
            }

            match chosen.get(&group) {
                Some(other) if other != spec => {
                    return Err((
                        *index,
                        ParseError::MutuallyExclusive {
                            name: registry.spec(*spec).display_name(),
                            other: registry.spec(*other).display_name(),
                        },
                    ));
                }
                Some(_) => {}
                None => {
                    chosen.insert(group, *spec);
                }
            }
        }
    }

    let was_seen = |id: SpecId| seen.iter().any(|(spec, _)| *spec == id);
    let missing: Vec<String> = registry
        .live_ids()
        .filter(|(id, spec)| {
            let required = match spec.kind {
                SpecKind::Option | SpecKind::Command => spec.required,
                SpecKind::Positional => spec.bound().minimum() > 0,
            };
            required && !was_seen(*id)
        })
        .map(|(_, spec)| spec.display_name())
        .collect();

    if !missing.is_empty() {
        return Err((None, ParseError::MissingRequired(missing)));
    }

    for exclusive in registry.exclusives() {
        if exclusive.required && !exclusive.members.iter().any(|member| was_seen(*member)) {
            let names = exclusive
                .members
                .iter()
                .map(|member| registry.spec(*member).display_name())
                .collect();
            return Err((None, ParseError::MissingExclusive(names)));
        }
    }

    Ok(())
}

use crate::error::ParseError;
use crate::model::DefaultValue;
use crate::namespace::{Namespace, Stored};
use crate::registry::Registry;

/// Fill every destination which was not set by an occurrence or the caller's seed.
/// The `seeded` destinations came from a seed at an outer level, and are left alone.
pub(crate) fn fill_defaults(
    registry: &Registry,
    namespace: &mut Namespace,
    seeded: &[String],
) -> Result<(), ParseError> {
    let inherited = |dest: &str| seeded.iter().any(|s| s == dest);

    for spec in registry.live() {
        if namespace.is_set(&spec.dest) || inherited(&spec.dest) {
            continue;
        }

        let stored = match registry.resolve_default(spec) {
            None => Stored::Absent,
            Some(DefaultValue::Suppress) => Stored::Suppressed,
            Some(DefaultValue::Value(Stored::Single(value))) => match &spec.converter {
                Some(converter) => {
                    Stored::Single(converter(&value).map_err(|message| ParseError::InvalidValue {
                        name: spec.display_name(),
                        value,
                        message,
                    })?)
                }
                None => Stored::Single(value),
            },
            Some(DefaultValue::Value(stored)) => stored,
        };

        namespace.set(spec.dest.clone(), stored);
    }

    for (dest, value) in registry.defaults() {
        if namespace.is_set(dest) || inherited(dest) {
            continue;
        }

        if let DefaultValue::Value(stored) = value {
            namespace.set(dest.clone(), stored.clone());
        }
    }

    Ok(())
}

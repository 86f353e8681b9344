use std::cmp;

use crate::model::Nargs;

/// The count of tokens one occurrence may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    /// Inclusive `(lower, upper)`.
    Range(u8, u8),
    /// At least `lower`, without an upper limit.
    Lower(u8),
    /// Multiples of `unit`, at least `units` of them.
    Chunks(u8, u8),
    /// Everything remaining, verbatim.
    Remainder,
    /// A sub-command name, followed by everything remaining.
    Command,
}

impl From<Nargs> for Bound {
    fn from(value: Nargs) -> Self {
        match value {
            Nargs::Precisely(n) => Bound::Range(n, n),
            Nargs::Optional => Bound::Range(0, 1),
            Nargs::Any => Bound::Lower(0),
            Nargs::AtLeastOne => Bound::Lower(1),
            Nargs::Remainder => Bound::Remainder,
            Nargs::AnyChunks(unit) => Bound::Chunks(unit, 0),
            Nargs::AtLeastOneChunks(unit) => Bound::Chunks(unit, 1),
        }
    }
}

impl Bound {
    pub(crate) fn minimum(&self) -> usize {
        match *self {
            Bound::Range(lower, _) | Bound::Lower(lower) => lower as usize,
            Bound::Chunks(unit, units) => unit as usize * units as usize,
            Bound::Remainder => 0,
            Bound::Command => 1,
        }
    }

    /// Whether the bound swallows the rest of the input once reached.
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Bound::Remainder | Bound::Command)
    }

    /// The largest count, no greater than `available`, which satisfies the bound.
    pub(crate) fn fit(&self, available: usize) -> Option<usize> {
        if available < self.minimum() {
            return None;
        }

        match *self {
            Bound::Range(_, upper) => Some(cmp::min(upper as usize, available)),
            Bound::Chunks(unit, _) => {
                let unit = unit as usize;

                if unit == 0 {
                    Some(0)
                } else {
                    Some((available / unit) * unit)
                }
            }
            Bound::Lower(_) | Bound::Remainder | Bound::Command => Some(available),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match *self {
            Bound::Range(lower, upper) if lower == upper => format!("precisely {lower}"),
            Bound::Range(lower, upper) => format!("between {lower} and {upper}"),
            Bound::Lower(lower) => format!("at least {lower}"),
            Bound::Chunks(unit, units) => {
                format!("a multiple of {unit} (at least {})", unit as usize * units as usize)
            }
            Bound::Remainder => "any remaining".to_string(),
            Bound::Command => "a sub-command".to_string(),
        }
    }
}

use crate::registry::SpecId;

/// One matched occurrence of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub(crate) spec: SpecId,
    /// The option string as matched; `None` for positionals.
    pub(crate) option: Option<String>,
    pub(crate) values: Vec<String>,
    /// The position of the token which introduced the occurrence, if any.
    pub(crate) index: Option<usize>,
}

impl Occurrence {
    pub(crate) fn new(
        spec: SpecId,
        option: Option<String>,
        values: Vec<String>,
        index: Option<usize>,
    ) -> Self {
        Self {
            spec,
            option,
            values,
            index,
        }
    }
}

/// A token which no parameter took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Extra {
    pub(crate) index: usize,
    pub(crate) value: String,
    /// Whether the token was an unrecognized option (rather than a stray operand).
    pub(crate) unknown_option: bool,
}

impl Extra {
    pub(crate) fn new(index: usize, value: impl Into<String>, unknown_option: bool) -> Self {
        Self {
            index,
            value: value.into(),
            unknown_option,
        }
    }
}

/// The sub-command selected by the command slot, and the tokens left for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub(crate) spec: SpecId,
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) remaining: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Matches {
    pub(crate) occurrences: Vec<Occurrence>,
    pub(crate) extras: Vec<Extra>,
    pub(crate) dispatch: Option<Dispatch>,
    interrupted: bool,
    exhausted: bool,
}

impl Matches {
    pub(crate) fn push(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
    }

    pub(crate) fn extra(&mut self, extra: Extra) {
        self.extras.push(extra);
    }

    /// Help or version was matched; nothing after it matters.
    pub(crate) fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// A remainder took every token left.
    pub(crate) fn exhaust(&mut self) {
        self.exhausted = true;
    }

    pub(crate) fn dispatch(&mut self, dispatch: Dispatch) {
        self.dispatch = Some(dispatch);
        self.exhausted = true;
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.interrupted || self.exhausted
    }
}

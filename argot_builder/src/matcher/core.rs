use std::collections::VecDeque;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::error::ParseError;
use crate::matcher::arity::allocate;
use crate::matcher::*;
use crate::model::Action;
use crate::registry::{Registry, SpecId};

/// A parse error, with the position of the token at fault when there is one.
pub(crate) type Located = (Option<usize>, ParseError);

/// Walks the classified tokens, pulling option values and matching positional runs.
pub(crate) struct TokenMatcher<'r> {
    registry: &'r Registry,
    tokens: Vec<Token>,
    positionals: VecDeque<SpecId>,
    matches: Matches,
}

impl<'r> TokenMatcher<'r> {
    pub(crate) fn new(registry: &'r Registry, tokens: Vec<Token>) -> Self {
        Self {
            registry,
            tokens,
            positionals: registry.positionals().iter().copied().collect(),
            matches: Matches::default(),
        }
    }

    /// Match the tokens in order, positionals in contiguous runs.
    pub(crate) fn consume(mut self) -> Result<Matches, Located> {
        let mut cursor = 0;

        while cursor < self.tokens.len() && !self.matches.is_finished() {
            cursor = match self.tokens[cursor].kind() {
                TokenKind::Terminator => cursor + 1,
                TokenKind::Option => self.consume_optional(cursor)?,
                TokenKind::Operand => self.consume_run(cursor)?,
            };
        }

        if !self.matches.is_finished() {
            // Give the remaining '?' and '*' positionals their empty match.
            let end = self.tokens.len();
            self.consume_positionals(&[], end, false)?;
        }

        Ok(self.finish())
    }

    /// Match every option first, then every operand against the positionals as one run.
    pub(crate) fn consume_intermixed(mut self) -> Result<Matches, Located> {
        if let Some(id) = self
            .positionals
            .iter()
            .find(|id| self.registry.spec(**id).bound().is_terminal())
        {
            let name = self.registry.spec(*id).display_name();
            return Err((None, ParseError::IntermixedUnsupported(name)));
        }

        let mut cursor = 0;
        let mut operands = Vec::default();

        while cursor < self.tokens.len() && !self.matches.is_finished() {
            cursor = match self.tokens[cursor].kind() {
                TokenKind::Terminator => cursor + 1,
                TokenKind::Option => self.consume_optional(cursor)?,
                TokenKind::Operand => {
                    operands.push(cursor);
                    cursor + 1
                }
            };
        }

        if !self.matches.is_finished() {
            let end = self.tokens.len();
            let used = self.consume_positionals(&operands, end, false)?;
            self.extra_operands(&operands[used..]);
        }

        Ok(self.finish())
    }

    fn finish(mut self) -> Matches {
        self.matches.extras.sort_by_key(|extra| extra.index);
        self.matches
    }

    fn consume_run(&mut self, start: usize) -> Result<usize, Located> {
        let mut run = Vec::default();
        let mut end = start;

        while end < self.tokens.len() {
            match self.tokens[end].kind() {
                TokenKind::Operand => run.push(end),
                TokenKind::Terminator => {}
                TokenKind::Option => break,
            }

            end += 1;
        }

        let followed_by_option = end < self.tokens.len();
        let used = self.consume_positionals(&run, end, followed_by_option)?;

        if self.matches.is_finished() {
            return Ok(self.tokens.len());
        }

        self.extra_operands(&run[used..]);
        Ok(end)
    }

    fn extra_operands(&mut self, positions: &[usize]) {
        for position in positions {
            let value = self.tokens[*position].raw().to_string();
            self.matches.extra(Extra::new(*position, value, false));
        }
    }

    /// Every raw token from `start` to the end, leaving out the terminator.
    fn raw_from(&self, start: usize) -> Vec<String> {
        self.tokens[start..]
            .iter()
            .filter(|token| token.kind() != TokenKind::Terminator)
            .map(|token| token.raw().to_string())
            .collect()
    }

    /// Match the operands at `run` against the pending positionals.
    /// Returns how many of the operands were used.
    fn consume_positionals(
        &mut self,
        run: &[usize],
        end: usize,
        followed_by_option: bool,
    ) -> Result<usize, Located> {
        let bounds: Vec<Bound> = self
            .positionals
            .iter()
            .map(|id| self.registry.spec(*id).bound())
            .collect();
        let mut counts = allocate(&bounds, run.len());

        if followed_by_option {
            // Empty matches wait for a later run.
            while counts.last() == Some(&0) && !bounds[counts.len() - 1].is_terminal() {
                counts.pop();
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Allocated {counts:?} of {} operand(s) across {bounds:?}.", run.len());
        }

        let mut used = 0;

        for (count, bound) in counts.into_iter().zip(bounds) {
            let spec = self
                .positionals
                .pop_front()
                .expect("internal error - allocation exceeds the pending positionals");

            match bound {
                Bound::Remainder => {
                    let start = run.get(used).copied().unwrap_or(end);
                    let values = self.raw_from(start);
                    self.matches
                        .push(Occurrence::new(spec, None, values, Some(start)));
                    self.matches.exhaust();
                    return Ok(run.len());
                }
                Bound::Command => {
                    let position = run[used];
                    let name = self.tokens[position].raw().to_string();
                    let remaining = self.tokens[position + 1..]
                        .iter()
                        .map(|token| token.raw().to_string())
                        .collect();
                    self.matches.push(Occurrence::new(
                        spec,
                        None,
                        vec![name.clone()],
                        Some(position),
                    ));
                    self.matches.dispatch(Dispatch {
                        spec,
                        index: position,
                        name,
                        remaining,
                    });
                    return Ok(run.len());
                }
                _ => {
                    let values = run[used..used + count]
                        .iter()
                        .map(|position| self.tokens[*position].raw().to_string())
                        .collect();
                    let index = run.get(used).copied();
                    self.matches.push(Occurrence::new(spec, None, values, index));
                    used += count;
                }
            }
        }

        Ok(used)
    }

    /// Match the option at `position` (including any bundle), returning the next cursor.
    fn consume_optional(&mut self, position: usize) -> Result<usize, Located> {
        let (raw, resolution) = match &self.tokens[position] {
            Token::Option { raw, resolution } => (raw.clone(), resolution.clone()),
            _ => unreachable!("internal error - options start at an option token"),
        };

        let (mut spec, mut option, mut explicit) = match resolution {
            Resolution::Unknown => {
                self.matches.extra(Extra::new(position, raw, true));
                return Ok(position + 1);
            }
            Resolution::Ambiguous(candidates) => {
                return Err((
                    Some(position),
                    ParseError::AmbiguousOption {
                        option: raw,
                        candidates,
                    },
                ));
            }
            Resolution::Known {
                spec,
                option,
                explicit,
            } => (spec, option, explicit),
        };

        let registry = self.registry;
        let config = &registry.config;
        let mut pending = Vec::default();

        let next = loop {
            let bound = self.registry.spec(spec).bound();

            match explicit.take() {
                Some(value) => match bound.fit(1) {
                    Some(1) => {
                        pending.push(Occurrence::new(spec, Some(option), vec![value], Some(position)));
                        break position + 1;
                    }
                    Some(_) => {
                        let mut chars = option.chars();
                        let short = match (chars.next(), chars.next(), chars.next()) {
                            (Some(prefix), Some(c), None) if !config.is_prefix(c) => Some(prefix),
                            _ => None,
                        };
                        let mut attached = value.chars();

                        match (short, attached.next()) {
                            (Some(prefix), Some(first)) if !config.is_prefix(first) => {
                                // A bundle of short flags, like `-xyz`.
                                let bundled = format!("{prefix}{first}");
                                let bundled_spec = match registry.exact(&bundled) {
                                    Some(bundled_spec) => bundled_spec,
                                    None => {
                                        return Err((
                                            Some(position),
                                            ParseError::IgnoredExplicitValue { option, value },
                                        ));
                                    }
                                };
                                let rest = attached.as_str();
                                explicit = if rest.is_empty() {
                                    None
                                } else {
                                    Some(rest.strip_prefix('=').unwrap_or(rest).to_string())
                                };
                                pending.push(Occurrence::new(spec, Some(option), Vec::default(), Some(position)));
                                spec = bundled_spec;
                                option = bundled;
                            }
                            _ => {
                                return Err((
                                    Some(position),
                                    ParseError::IgnoredExplicitValue { option, value },
                                ));
                            }
                        }
                    }
                    None => {
                        return Err((
                            Some(position),
                            ParseError::Undercomplete {
                                name: self.registry.spec(spec).display_name(),
                                expected: bound.describe(),
                            },
                        ));
                    }
                },
                None => {
                    if bound == Bound::Remainder {
                        let values = self.raw_from(position + 1);
                        pending.push(Occurrence::new(spec, Some(option), values, Some(position)));
                        self.matches.exhaust();
                        break self.tokens.len();
                    }

                    let available = self.tokens[position + 1..]
                        .iter()
                        .take_while(|token| token.kind() == TokenKind::Operand)
                        .count();

                    match bound.fit(available) {
                        Some(count) => {
                            let values = self.tokens[position + 1..position + 1 + count]
                                .iter()
                                .map(|token| token.raw().to_string())
                                .collect();
                            pending.push(Occurrence::new(spec, Some(option), values, Some(position)));
                            break position + 1 + count;
                        }
                        None => {
                            return Err((
                                Some(position),
                                ParseError::Undercomplete {
                                    name: self.registry.spec(spec).display_name(),
                                    expected: bound.describe(),
                                },
                            ));
                        }
                    }
                }
            }
        };

        for occurrence in pending {
            let action = self.registry.spec(occurrence.spec).action;
            self.matches.push(occurrence);

            if matches!(action, Action::Help | Action::Version) {
                self.matches.interrupt();
                return Ok(self.tokens.len());
            }
        }

        Ok(next)
    }
}

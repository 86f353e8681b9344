use std::cmp;
use std::fmt;

use terminal_size::{terminal_size, Width};

use crate::matcher::Bound;
use crate::parser::interface::ColumnRenderer;
use crate::registry::{Registry, Spec, SpecKind};

// Used when the terminal width cannot be detected.
const DEFAULT_TOTAL_WIDTH: usize = 80;
// Left columns wider than this go on their own line.
const MAXIMUM_LEFT_WIDTH: usize = 24;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;
const CHOICE_INDENT: usize = 2;

/// Renders the usage and help of one parser level.
pub(crate) struct Printer<'r> {
    registry: &'r Registry,
    terminal_width: Option<usize>,
}

impl<'r> Printer<'r> {
    pub(crate) fn terminal(registry: &'r Registry) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(registry, terminal_width)
    }

    pub(crate) fn new(registry: &'r Registry, terminal_width: Option<usize>) -> Self {
        Self {
            registry,
            terminal_width,
        }
    }

    pub(crate) fn render_usage(&self) -> String {
        let registry = self.registry;
        let mut summary = vec![format!("usage: {}", registry.program)];
        let mut rendered_exclusives = vec![false; registry.exclusives().len()];

        for (id, spec) in registry.live_ids() {
            if spec.kind != SpecKind::Option {
                continue;
            }

            let exclusive = registry
                .exclusives()
                .iter()
                .position(|exclusive| exclusive.members.contains(&id));

            match exclusive {
                Some(index) => {
                    if !rendered_exclusives[index] {
                        rendered_exclusives[index] = true;
                        let exclusive = &registry.exclusives()[index];
                        let members: Vec<String> = exclusive
                            .members
                            .iter()
                            .map(|member| self.usage_option(registry.spec(*member)))
                            .collect();

                        if exclusive.required {
                            summary.push(format!("({})", members.join(" | ")));
                        } else {
                            summary.push(format!("[{}]", members.join(" | ")));
                        }
                    }
                }
                None => {
                    let usage = self.usage_option(spec);

                    if spec.required {
                        summary.push(usage);
                    } else {
                        summary.push(format!("[{usage}]"));
                    }
                }
            }
        }

        for id in registry.positionals() {
            let grammar = self.grammar(registry.spec(*id));

            if !grammar.is_empty() {
                summary.push(grammar);
            }
        }

        summary.join(" ")
    }

    pub(crate) fn render_help(&self) -> String {
        let registry = self.registry;
        let mut sections: Vec<(String, Option<String>, Vec<(usize, String, String)>)> = Vec::default();
        let mut positionals = Vec::default();
        let mut options = Vec::default();
        let mut groups: Vec<Vec<(usize, String, String)>> = vec![Vec::default(); registry.groups().len()];

        for spec in registry.live() {
            let rows = self.rows(spec);

            match (spec.group, spec.kind) {
                (Some(index), _) => groups[index].extend(rows),
                (None, SpecKind::Option) => options.extend(rows),
                (None, _) => positionals.extend(rows),
            }
        }

        if !positionals.is_empty() {
            sections.push(("positional arguments".to_string(), None, positionals));
        }

        if !options.is_empty() {
            sections.push(("options".to_string(), None, options));
        }

        for (group, rows) in registry.groups().iter().zip(groups) {
            sections.push((group.title.clone(), group.description.clone(), rows));
        }

        let left_width = sections
            .iter()
            .flat_map(|(_, _, rows)| rows.iter())
            .map(|(indent, left, _)| indent + left.chars().count())
            .filter(|width| *width <= MAXIMUM_LEFT_WIDTH)
            .max()
            .unwrap_or(0);
        let middle_width = sections
            .iter()
            .flat_map(|(_, _, rows)| rows.iter())
            .map(|(_, _, help)| help.chars().count())
            .max()
            .unwrap_or(0);
        let column_renderer = ColumnRenderer::guided(
            PADDING_WIDTH,
            left_width,
            middle_width,
            self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH),
        );

        let mut out = vec![self.render_usage()];

        if let Some(about) = &registry.about {
            out.push("".to_string());
            out.push(about.clone());
        }

        for (title, description, rows) in sections {
            out.push("".to_string());
            out.push(format!("{title}:"));

            if let Some(description) = description {
                out.push(format!("{:MAIN_INDENT$}{description}", ""));
            }

            for (indent, left, help) in rows {
                out.extend(column_renderer.render(indent, &left, &help));
            }
        }

        out.join("\n")
    }

    /// `(indent, left, help)` rows describing `spec`.
    fn rows(&self, spec: &Spec) -> Vec<(usize, String, String)> {
        let help = spec.help.clone().unwrap_or_default();

        match spec.kind {
            SpecKind::Option => {
                let grammar = self.option_grammar(spec);
                let left = spec
                    .names
                    .iter()
                    .map(|name| format!("{name}{grammar}"))
                    .collect::<Vec<String>>()
                    .join(", ");
                vec![(MAIN_INDENT, left, help)]
            }
            SpecKind::Positional => vec![(MAIN_INDENT, self.metavar(spec), help)],
            SpecKind::Command => {
                let mut rows = vec![(MAIN_INDENT, self.metavar(spec), help)];

                if let Some(sub_commands) = self.registry.sub_commands() {
                    for (name, child) in &sub_commands.commands {
                        rows.push((
                            MAIN_INDENT + CHOICE_INDENT,
                            name.clone(),
                            child.about.clone().unwrap_or_default(),
                        ));
                    }
                }

                rows
            }
        }
    }

    fn usage_option(&self, spec: &Spec) -> String {
        format!("{}{}", spec.names[0], self.option_grammar(spec))
    }

    /// The value grammar of an option, with a leading space when non-empty.
    fn option_grammar(&self, spec: &Spec) -> String {
        let grammar = self.grammar(spec);

        if grammar.is_empty() {
            grammar
        } else {
            format!(" {grammar}")
        }
    }

    fn metavar(&self, spec: &Spec) -> String {
        if let Some(metavar) = &spec.metavar {
            return metavar.clone();
        }

        let choices = match spec.kind {
            SpecKind::Command => Some(self.registry.command_names()),
            _ => spec.choices.clone(),
        };

        match choices {
            Some(choices) => format!("{{{}}}", choices.join(",")),
            None => spec.dest.to_ascii_uppercase(),
        }
    }

    fn grammar(&self, spec: &Spec) -> String {
        let metavar = self.metavar(spec);
        let repeat = |n: u8| vec![metavar.clone(); n as usize].join(" ");

        match spec.bound() {
            Bound::Range(0, 0) => "".to_string(),
            Bound::Range(0, 1) => format!("[{metavar}]"),
            Bound::Range(lower, upper) => {
                let optional = vec![format!("[{metavar}]"); upper.saturating_sub(lower) as usize];
                let mut parts = vec![repeat(lower)];
                parts.extend(optional);
                parts.retain(|part| !part.is_empty());
                parts.join(" ")
            }
            Bound::Lower(0) => format!("[{metavar} ...]"),
            Bound::Lower(lower) => format!("{} [{metavar} ...]", repeat(lower)),
            Bound::Chunks(unit, _) => format!("({}) ...", repeat(cmp::max(unit, 1))),
            Bound::Remainder => "...".to_string(),
            Bound::Command => format!("{metavar} ..."),
        }
    }
}

/// The input tokens, with a caret under the token at fault.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{CommandLineParser, Exit, ParserConfig};
///
/// let parser = CommandLineParser::with_config("program", ParserConfig::default().exit_on_error(false))
///     .unwrap()
///     .build();
/// match parser.try_parse_tokens(&["abc", "--what"]) {
///     Err(Exit::Error { context, .. }) => assert_eq!(context.to_string(), "abc --what\n    ^"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    index: Option<usize>,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: Option<usize>, tokens: &[String]) -> Self {
        Self {
            index,
            tokens: tokens.to_vec(),
        }
    }

    /// The position of the token at fault, if a single token is at fault.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The tokens which were parsed.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let projection = self.tokens.join(" ");
        let offset = match self.index {
            Some(index) if index < self.tokens.len() => self.tokens[..index]
                .iter()
                .map(|token| token.chars().count() + 1)
                .sum(),
            _ => projection.chars().count(),
        };

        write!(f, "{projection}\n{:offset$}^", "")
    }
}

use std::env;
use std::fmt;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::error::ParseError;
use crate::matcher::Extra;
use crate::model::DefaultValue;
use crate::namespace::Namespace;
use crate::parser::base::{Consumed, Interrupt, Mode, Parser};
use crate::parser::interface::UserInterface;
use crate::parser::printer::{ErrorContext, Printer};
use crate::registry::Registry;

/// Why a parse did not produce a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Help was requested; carries the rendered help.
    Help(String),
    /// The version was requested; carries the version string.
    Version(String),
    /// The command line does not fit the grammar.
    Error {
        /// What went wrong.
        error: ParseError,
        /// Where it went wrong.
        context: ErrorContext,
    },
}

impl Exit {
    /// The process exit code for this outcome: `0` for help and version, `1` for errors.
    pub fn code(&self) -> i32 {
        match self {
            Exit::Help(_) | Exit::Version(_) => 0,
            Exit::Error { .. } => 1,
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exit::Help(message) | Exit::Version(message) => write!(f, "{message}"),
            Exit::Error { error, context } => write!(f, "Parse error: {error}\n{context}"),
        }
    }
}

/// The built command line parser.
///
/// The `try_` entry points are pure: they never print and never exit.
/// `parse_tokens` and `parse` report through the user interface.
pub struct GeneralParser {
    registry: Registry,
    user_interface: Box<dyn UserInterface>,
}

impl fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.registry.program)
            .finish()
    }
}

impl GeneralParser {
    pub(crate) fn new(registry: Registry, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            registry,
            user_interface,
        }
    }

    /// Parse `tokens`, failing on any token which no parameter takes.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{Action, CommandLineParser, Parameter};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(["-v", "--verbose"]).action(Action::Count))
    ///     .unwrap()
    ///     .build();
    /// let namespace = parser.try_parse_tokens(&["-vvv"]).unwrap();
    /// assert_eq!(namespace.get::<u32>("verbose").unwrap(), 3);
    /// assert!(parser.try_parse_tokens(&["-x"]).is_err());
    /// ```
    pub fn try_parse_tokens(&self, tokens: &[&str]) -> Result<Namespace, Exit> {
        self.try_parse_tokens_into(tokens, Namespace::new())
    }

    /// Parse `tokens` on top of `namespace`.
    /// Seeded destinations are only replaced by explicit occurrences, never by defaults.
    pub fn try_parse_tokens_into(&self, tokens: &[&str], namespace: Namespace) -> Result<Namespace, Exit> {
        let tokens = owned(tokens);
        let consumed = self.run(&tokens, namespace, Mode::Ordered)?;
        self.strict(consumed, &tokens)
    }

    /// Parse `tokens`, returning the tokens which no parameter takes alongside the namespace.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::{CommandLineParser, Parameter};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(["--known"]))
    ///     .unwrap()
    ///     .build();
    /// let (namespace, extras) = parser
    ///     .try_parse_known_tokens(&["--known", "1", "--unknown", "2"])
    ///     .unwrap();
    /// assert_eq!(namespace.get::<u32>("known").unwrap(), 1);
    /// assert_eq!(extras, vec!["--unknown", "2"]);
    /// ```
    pub fn try_parse_known_tokens(&self, tokens: &[&str]) -> Result<(Namespace, Vec<String>), Exit> {
        let tokens = owned(tokens);
        let Consumed { namespace, extras } = self.run(&tokens, Namespace::new(), Mode::Ordered)?;
        Ok((namespace, extras.into_iter().map(|extra| extra.value).collect()))
    }

    /// Parse `tokens`, matching every option first and then every operand against the positionals.
    ///
    /// Fails with [`ParseError::IntermixedUnsupported`] when a positional consumes every
    /// remaining token (`Nargs::Remainder` or sub-commands).
    pub fn try_parse_intermixed_tokens(&self, tokens: &[&str]) -> Result<Namespace, Exit> {
        let tokens = owned(tokens);
        let consumed = self.run(&tokens, Namespace::new(), Mode::Intermixed)?;
        self.strict(consumed, &tokens)
    }

    /// Parse `tokens`, reporting help, version and errors through the user interface.
    /// Returns the exit code when no namespace was produced.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Namespace, i32> {
        self.try_parse_tokens(tokens).map_err(|exit| {
            self.report(&exit);
            exit.code()
        })
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Help and version are printed, and exit the process with code `0`.
    /// Errors are printed and exit the process with code `1` when the parser was configured to
    /// `exit_on_error` (the default); otherwise they are returned unreported.
    pub fn parse(&self) -> Result<Namespace, Exit> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        match self.try_parse_tokens(&tokens) {
            Ok(namespace) => Ok(namespace),
            Err(exit @ Exit::Error { .. }) if !self.registry.config.exit_on_error => Err(exit),
            Err(exit) => {
                self.report(&exit);
                std::process::exit(exit.code());
            }
        }
    }

    /// The default which `dest` would take, if nothing on the command line sets it.
    pub fn get_default(&self, dest: &str) -> Option<DefaultValue> {
        self.registry.get_default(dest)
    }

    /// The rendered help.
    pub fn format_help(&self) -> String {
        Printer::terminal(&self.registry).render_help()
    }

    /// The rendered usage line.
    pub fn format_usage(&self) -> String {
        Printer::terminal(&self.registry).render_usage()
    }

    fn run(&self, tokens: &[String], seed: Namespace, mode: Mode) -> Result<Consumed, Exit> {
        Parser::new(&self.registry)
            .parse(tokens, seed, mode)
            .map_err(|interrupt| match interrupt {
                Interrupt::Help(message) => Exit::Help(message),
                Interrupt::Version(version) => Exit::Version(version),
                Interrupt::Error(index, error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Parse error at {index:?}: {error:?}.");
                    }

                    Exit::Error {
                        error,
                        context: ErrorContext::new(index, tokens),
                    }
                }
            })
    }

    fn strict(&self, consumed: Consumed, tokens: &[String]) -> Result<Namespace, Exit> {
        let Consumed { namespace, extras } = consumed;

        if extras.is_empty() {
            return Ok(namespace);
        }

        let (index, error) = match extras.iter().find(|extra| extra.unknown_option) {
            Some(Extra { index, value, .. }) => (*index, ParseError::UnknownOption(value.clone())),
            None => (
                extras[0].index,
                ParseError::Overcomplete(extras.iter().map(|extra| extra.value.clone()).collect()),
            ),
        };

        Err(Exit::Error {
            error,
            context: ErrorContext::new(Some(index), tokens),
        })
    }

    fn report(&self, exit: &Exit) {
        match exit {
            Exit::Help(message) | Exit::Version(message) => {
                self.user_interface.print(message.clone());
            }
            Exit::Error { error, context } => {
                self.user_interface.print_error(error.clone());
                self.user_interface.print_error_context(context.clone());
            }
        }
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, Nargs, ParserConfig};
    use crate::namespace::Stored;
    use crate::parser::util::InMemoryInterface;
    use crate::registry::{Spec, SpecKind};
    use crate::test::assert_contains;
    use rstest::rstest;

    /// `program [-h] [--flag] item`
    fn general_parser() -> (GeneralParser, InMemoryInterface) {
        let mut registry = Registry::new("program", ParserConfig::default());
        registry
            .insert(
                Spec::new(SpecKind::Option, vec!["--flag".to_string()], "flag", Action::StoreTrue),
                None,
            )
            .unwrap();
        registry
            .insert(
                Spec::new(SpecKind::Positional, vec!["item".to_string()], "item", Action::Store),
                None,
            )
            .unwrap();
        let interface = InMemoryInterface::default();
        let general_parser = GeneralParser::new(registry, Box::new(interface.clone()));
        (general_parser, interface)
    }

    #[rstest]
    #[case(vec!["x"], false)]
    #[case(vec!["--flag", "x"], true)]
    #[case(vec!["x", "--flag"], true)]
    #[case(vec!["--fl", "x"], true)]
    fn parse_tokens(#[case] tokens: Vec<&str>, #[case] flag: bool) {
        // Setup
        let (general_parser, interface) = general_parser();

        // Execute
        let namespace = general_parser.parse_tokens(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(namespace.get::<String>("item").unwrap(), "x");
        assert_eq!(namespace.get::<bool>("flag").unwrap(), flag);
        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    #[case(vec!["x", "-h", "y"])]
    fn parse_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let (general_parser, interface) = general_parser();

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 0);

        let message = interface.consume_message();
        assert_contains!(message, "usage: program [-h] [--flag] ITEM");
        assert_contains!(message, "-h, --help");
    }

    #[rstest]
    #[case(vec![], None, "The following parameters are required: item.")]
    #[case(vec!["x", "y"], Some(1), "Too many tokens provided: 'y'.")]
    #[case(vec!["x", "y", "z"], Some(1), "Too many tokens provided: 'y z'.")]
    #[case(vec!["y", "--what", "x"], Some(1), "Unrecognized option '--what'.")]
    #[case(vec!["--flag=1", "x"], Some(0), "Option '--flag' cannot take the explicit value '1'.")]
    fn parse_tokens_error(#[case] tokens: Vec<&str>, #[case] index: Option<usize>, #[case] expected: &str) {
        // Setup
        let (general_parser, interface) = general_parser();

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 1);

        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error.unwrap(), expected);
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(error_context.unwrap(), ErrorContext::new(index, &owned));
    }

    #[test]
    fn try_parse_tokens_silent() {
        // Setup
        let (general_parser, interface) = general_parser();

        // Execute
        let exit = general_parser.try_parse_tokens(&["-h"]).unwrap_err();

        // Verify
        assert_matches!(&exit, Exit::Help(message) if message.starts_with("usage: program"));
        assert_eq!(exit.code(), 0);
        assert_eq!(interface.consume(), (None, None, None));
    }

    #[test]
    fn try_parse_known_tokens() {
        // Setup
        let (general_parser, _) = general_parser();

        // Execute
        let (namespace, extras) = general_parser
            .try_parse_known_tokens(&["--what", "x", "y", "--flag", "-z"])
            .unwrap();

        // Verify
        assert_eq!(namespace.get::<String>("item").unwrap(), "x");
        assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
        assert_eq!(extras, vec!["--what", "y", "-z"]);
    }

    #[test]
    fn try_parse_tokens_into() {
        // Setup
        let (general_parser, _) = general_parser();
        let mut seed = Namespace::new();
        seed.set("flag", true);
        seed.set("item", "seeded");
        seed.set("other", "kept");

        // Execute
        let namespace = general_parser.try_parse_tokens_into(&["x"], seed).unwrap();

        // Verify
        assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
        assert_eq!(namespace.get::<String>("item").unwrap(), "x");
        assert_eq!(namespace.stored("other"), &Stored::from("kept"));
    }

    #[test]
    fn try_parse_intermixed_tokens() {
        // Setup
        let mut registry = Registry::new("program", ParserConfig::default());
        registry
            .insert(
                Spec::new(SpecKind::Option, vec!["--flag".to_string()], "flag", Action::StoreTrue),
                None,
            )
            .unwrap();
        let mut items = Spec::new(SpecKind::Positional, vec!["items".to_string()], "items", Action::Store);
        items.nargs = Some(Nargs::Any);
        registry.insert(items, None).unwrap();
        let general_parser = GeneralParser::new(registry, Box::new(InMemoryInterface::default()));

        // Execute & verify
        assert_matches!(
            general_parser.try_parse_tokens(&["a", "--flag", "b"]),
            Err(Exit::Error { error: ParseError::Overcomplete(_), .. })
        );

        let namespace = general_parser
            .try_parse_intermixed_tokens(&["a", "--flag", "b"])
            .unwrap();
        assert_eq!(namespace.get_all::<String>("items").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn exit_display() {
        // Setup
        let exit = Exit::Error {
            error: ParseError::UnknownOption("--what".to_string()),
            context: ErrorContext::new(Some(0), &["--what".to_string()]),
        };

        // Execute & verify
        assert_eq!(exit.code(), 1);
        assert_eq!(
            exit.to_string(),
            "Parse error: Unrecognized option '--what'.\n--what\n^"
        );
        assert_eq!(Exit::Version("1.0".to_string()).to_string(), "1.0");
    }

    #[test]
    fn format() {
        // Setup
        let (general_parser, _) = general_parser();

        // Execute & verify
        assert_eq!(general_parser.format_usage(), "usage: program [-h] [--flag] ITEM");
        assert_contains!(general_parser.format_help(), "positional arguments:");
        assert_eq!(general_parser.get_default("flag"), Some(DefaultValue::from(false)));
        assert_eq!(general_parser.get_default("missing"), None);
    }
}

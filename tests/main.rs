use argot::{
    Action, ArgumentGroup, CommandLineParser, ConfigError, DefaultValue, Exit, GeneralParser,
    MutuallyExclusiveGroup, Namespace, Nargs, Parameter, ParseError, ParserConfig, Stored,
    SubCommands,
};
use assert_matches::assert_matches;
use rand::{thread_rng, Rng};
use rstest::rstest;

fn error(exit: Exit) -> ParseError {
    match exit {
        Exit::Error { error, .. } => error,
        other => panic!("expected an error, found {other:?}"),
    }
}

/// `program [-h] [--flag] store`
fn flag_and_store() -> GeneralParser {
    CommandLineParser::new("program")
        .add(Parameter::argument("store"))
        .unwrap()
        .add(Parameter::option(["--flag"]).action(Action::StoreTrue))
        .unwrap()
        .build()
}

#[test]
fn builder_compiles() {
    CommandLineParser::new("program").build();
}

#[rstest]
#[case(vec![], false)]
#[case(vec!["x"], true)]
#[case(vec!["x", "y"], false)]
fn single_positional(#[case] tokens: Vec<&str>, #[case] ok: bool) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("store"))
        .unwrap()
        .build();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    match result {
        Ok(namespace) => {
            assert!(ok);
            assert_eq!(namespace.get::<String>("store").unwrap(), tokens[0]);
        }
        Err(exit) => {
            assert!(!ok);
            assert_eq!(exit.code(), 1);
        }
    }
}

#[rstest]
#[case(vec!["a"], vec![], vec!["a"])]
#[case(vec!["a", "b"], vec!["a"], vec!["b"])]
#[case(vec!["a", "b", "c"], vec!["a", "b"], vec!["c"])]
fn any_then_at_least_one(#[case] tokens: Vec<&str>, #[case] first: Vec<&str>, #[case] second: Vec<&str>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("first").nargs(Nargs::Any))
        .unwrap()
        .add(Parameter::argument("second").nargs(Nargs::AtLeastOne))
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.get_all::<String>("first").unwrap(), first);
    assert_eq!(namespace.get_all::<String>("second").unwrap(), second);
}

#[rstest]
#[case(None, 0)]
#[case(Some("5"), 5)]
fn count_round_trip(#[case] default: Option<&str>, #[case] baseline: u32) {
    // Setup
    let mut parameter = Parameter::option(["-c", "--count"]).action(Action::Count);

    if let Some(default) = default {
        parameter = parameter.default(default);
    }

    let parser = CommandLineParser::new("program")
        .add(parameter)
        .unwrap()
        .build();

    for _ in 0..10 {
        let n: usize = thread_rng().gen_range(1..8);
        let bundled = format!("-{}", "c".repeat(n));
        let tokens: Vec<&str> = if thread_rng().gen() {
            vec![bundled.as_str()]
        } else {
            vec!["-c"; n]
        };

        // Execute
        let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(namespace.get::<u32>("count").unwrap(), baseline + n as u32);
    }
}

#[test]
fn get_default_idempotent() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--level"]).default("3"))
        .unwrap()
        .add(Parameter::option(["--names"]).action(Action::Append))
        .unwrap()
        .build();
    let before = (parser.get_default("level"), parser.get_default("names"));

    // Execute
    parser
        .try_parse_tokens(&["--level", "4", "--names", "a"])
        .unwrap();

    // Verify
    assert_eq!((parser.get_default("level"), parser.get_default("names")), before);
    assert_eq!(before.0, Some(DefaultValue::from("3")));
    assert_eq!(before.1, Some(DefaultValue::Value(Stored::Sequence(vec![]))));
}

#[rstest]
#[case(vec!["--foo"], Some((true, false)))]
#[case(vec!["--foob"], Some((false, true)))]
#[case(vec!["--fo"], None)]
fn abbreviation(#[case] tokens: Vec<&str>, #[case] expected: Option<(bool, bool)>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--foo"]).action(Action::StoreTrue))
        .unwrap()
        .add(Parameter::option(["--foobar"]).action(Action::StoreTrue))
        .unwrap()
        .build();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    match expected {
        Some((foo, foobar)) => {
            let namespace = result.unwrap();
            assert_eq!(namespace.get::<bool>("foo").unwrap(), foo);
            assert_eq!(namespace.get::<bool>("foobar").unwrap(), foobar);
        }
        None => {
            assert_eq!(
                error(result.unwrap_err()),
                ParseError::AmbiguousOption {
                    option: "--fo".to_string(),
                    candidates: vec!["--foo".to_string(), "--foobar".to_string()],
                }
            );
        }
    }
}

#[test]
fn abbreviation_disallowed() {
    // Setup
    let parser = CommandLineParser::with_config("program", ParserConfig::default().allow_abbrev(false))
        .unwrap()
        .add(Parameter::option(["--foobar"]).action(Action::StoreTrue))
        .unwrap()
        .build();

    // Execute
    let exit = parser.try_parse_tokens(&["--foo"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::UnknownOption("--foo".to_string()));
}

#[rstest]
#[case(vec!["-fo"], "o", None)]
#[case(vec!["-foo", "x"], "unset", Some("x"))]
#[case(vec!["-fooo"], "ooo", None)]
fn single_dash_shared_prefix(#[case] tokens: Vec<&str>, #[case] f: &str, #[case] foo: Option<&str>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-f"]).default("unset"))
        .unwrap()
        .add(Parameter::option(["-foo"]))
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("f").unwrap(), f);
    assert_eq!(namespace.try_get::<String>("foo").unwrap(), foo.map(String::from));
}

#[test]
fn single_dash_not_abbreviated() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-foo"]))
        .unwrap()
        .build();

    // Execute
    let exit = parser.try_parse_tokens(&["-fo", "x"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::UnknownOption("-fo".to_string()));
}

#[rstest]
#[case(vec!["--flag", "x"])]
#[case(vec!["x", "--flag"])]
fn order_independence(#[case] tokens: Vec<&str>) {
    // Setup
    let parser = flag_and_store();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("store").unwrap(), "x");
    assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
}

#[test]
fn terminator() {
    // Setup
    let parser = flag_and_store();

    // Execute
    let namespace = parser.try_parse_tokens(&["--", "--flag"]).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("store").unwrap(), "--flag");
    assert_eq!(namespace.get::<bool>("flag").unwrap(), false);
}

#[rstest]
#[case(vec!["--foo", "--bar"], None)]
#[case(vec!["--foo"], Some((true, true)))]
#[case(vec![], Some((false, true)))]
fn mutually_exclusive(#[case] tokens: Vec<&str>, #[case] expected: Option<(bool, bool)>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add_exclusive(
            MutuallyExclusiveGroup::new()
                .add(Parameter::option(["--foo"]).action(Action::StoreTrue))
                .add(Parameter::option(["--bar"]).action(Action::StoreFalse)),
        )
        .unwrap()
        .build();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    match expected {
        Some((foo, bar)) => {
            let namespace = result.unwrap();
            assert_eq!(namespace.get::<bool>("foo").unwrap(), foo);
            assert_eq!(namespace.get::<bool>("bar").unwrap(), bar);
        }
        None => {
            assert_eq!(
                error(result.unwrap_err()),
                ParseError::MutuallyExclusive {
                    name: "--bar".to_string(),
                    other: "--foo".to_string(),
                }
            );
        }
    }
}

/// `program [-h] [--verbose] {a,b} ...`
fn sub_commands() -> GeneralParser {
    CommandLineParser::new("program")
        .add(Parameter::option(["--verbose"]).action(Action::StoreTrue))
        .unwrap()
        .branch(SubCommands::new("cmd").required(true))
        .unwrap()
        .command("a", |sub| sub.add(Parameter::argument("bar").parse_as::<u32>()))
        .unwrap()
        .command("b", |sub| {
            sub.about("The b command.")
                .add(Parameter::option(["--name"]).default("anonymous"))
        })
        .unwrap()
        .build()
}

#[test]
fn sub_command_dispatch() {
    // Setup
    let parser = sub_commands();

    // Execute
    let namespace = parser.try_parse_tokens(&["a", "12"]).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("cmd").unwrap(), "a");
    assert_eq!(namespace.get::<u32>("bar").unwrap(), 12);
    assert_eq!(namespace.get::<bool>("verbose").unwrap(), false);
    assert!(!namespace.contains("name"));
}

#[test]
fn sub_command_defaults() {
    // Setup
    let parser = sub_commands();

    // Execute
    let namespace = parser.try_parse_tokens(&["--verbose", "b"]).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("cmd").unwrap(), "b");
    assert_eq!(namespace.get::<String>("name").unwrap(), "anonymous");
    assert_eq!(namespace.get::<bool>("verbose").unwrap(), true);
}

#[rstest]
#[case(vec![], None, ParseError::MissingRequired(vec!["cmd".to_string()]))]
#[case(vec!["a"], None, ParseError::MissingRequired(vec!["bar".to_string()]))]
#[case(
    vec!["c"],
    Some(0),
    ParseError::UnknownSubCommand {
        name: "cmd".to_string(),
        command: "c".to_string(),
        choices: vec!["a".to_string(), "b".to_string()],
    }
)]
#[case(vec!["--verbose", "b", "--what"], Some(2), ParseError::UnknownOption("--what".to_string()))]
fn sub_command_error(#[case] tokens: Vec<&str>, #[case] index: Option<usize>, #[case] expected: ParseError) {
    // Setup
    let parser = sub_commands();

    // Execute
    let exit = parser.try_parse_tokens(tokens.as_slice()).unwrap_err();

    // Verify
    match exit {
        Exit::Error { error, context } => {
            assert_eq!(error, expected);
            assert_eq!(context.index(), index);
            assert_eq!(context.tokens(), tokens.as_slice());
        }
        other => panic!("expected an error, found {other:?}"),
    }
}

#[test]
fn sub_command_error_shifted() {
    // Setup
    let parser = sub_commands();

    // Execute
    let exit = parser.try_parse_tokens(&["--verbose", "a", "x"]).unwrap_err();

    // Verify
    match exit {
        Exit::Error { error, context } => {
            assert_matches!(error, ParseError::InvalidValue { name, value, .. } if name == "bar" && value == "x");
            assert_eq!(context.index(), Some(2));
            assert_eq!(context.to_string(), "--verbose a x\n            ^");
        }
        other => panic!("expected an error, found {other:?}"),
    }
}

#[rstest]
#[case(vec!["-h"], "usage: program [-h] [--verbose] {a,b} ...")]
#[case(vec!["b", "-h"], "usage: program b [-h] [--name NAME]")]
fn sub_command_help(#[case] tokens: Vec<&str>, #[case] usage: &str) {
    // Setup
    let parser = sub_commands();

    // Execute
    let exit = parser.try_parse_tokens(tokens.as_slice()).unwrap_err();

    // Verify
    assert_matches!(exit, Exit::Help(message) if message.starts_with(usage));
}

#[test]
fn sub_command_help_lists_commands() {
    // Setup
    let parser = sub_commands();

    // Execute
    let help = parser.format_help();

    // Verify
    assert!(help.contains("The b command."));
}

#[test]
fn parse_known() {
    // Setup
    let parser = flag_and_store();

    // Execute
    let (namespace, extras) = parser
        .try_parse_known_tokens(&["--unknown", "x", "y", "--flag", "-z"])
        .unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("store").unwrap(), "x");
    assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
    assert_eq!(extras, vec!["--unknown", "y", "-z"]);
}

#[test]
fn parse_known_sub_command() {
    // Setup
    let parser = sub_commands();

    // Execute
    let (namespace, extras) = parser
        .try_parse_known_tokens(&["b", "--name", "n", "extra"])
        .unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("name").unwrap(), "n");
    assert_eq!(extras, vec!["extra"]);
}

#[test]
fn deferred_positional() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("a"))
        .unwrap()
        .add(Parameter::argument("b").nargs(Nargs::Any))
        .unwrap()
        .add(Parameter::option(["--flag"]).action(Action::StoreTrue))
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(&["x", "--flag", "y"]).unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("a").unwrap(), "x");
    assert_eq!(namespace.get_all::<String>("b").unwrap(), vec!["y"]);
    assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
}

/// `program [-h] [--flag] ITEMS [ITEMS ...]`
fn items_and_flag() -> GeneralParser {
    CommandLineParser::new("program")
        .add(Parameter::argument("items").nargs(Nargs::AtLeastOne))
        .unwrap()
        .add(Parameter::option(["--flag"]).action(Action::StoreTrue))
        .unwrap()
        .build()
}

#[test]
fn intermixed() {
    // Setup
    let parser = items_and_flag();

    // Execute
    let namespace = parser
        .try_parse_intermixed_tokens(&["x", "--flag", "y"])
        .unwrap();

    // Verify
    assert_eq!(namespace.get_all::<String>("items").unwrap(), vec!["x", "y"]);
    assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
}

#[test]
fn intermixed_ordered() {
    // Setup
    let parser = items_and_flag();

    // Execute
    let exit = parser.try_parse_tokens(&["x", "--flag", "y"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::Overcomplete(vec!["y".to_string()]));
}

#[test]
fn intermixed_missing() {
    // Setup
    let parser = items_and_flag();

    // Execute
    let exit = parser.try_parse_intermixed_tokens(&["--flag"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::MissingRequired(vec!["items".to_string()]));
}

#[test]
fn intermixed_unsupported() {
    // Setup
    let parser = sub_commands();

    // Execute
    let exit = parser.try_parse_intermixed_tokens(&["a", "1"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::IntermixedUnsupported("cmd".to_string()));
}

#[test]
fn seeded() {
    // Setup
    let mut seed = Namespace::new();
    seed.set("flag", true);
    seed.set("store", "seeded");
    seed.set("unrelated", vec!["kept"]);

    // Execute
    let namespace = flag_and_store()
        .try_parse_tokens_into(&["x"], seed)
        .unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("store").unwrap(), "x");
    assert_eq!(namespace.get::<bool>("flag").unwrap(), true);
    assert_eq!(namespace.get_all::<String>("unrelated").unwrap(), vec!["kept"]);
}

#[rstest]
#[case(vec!["b"], "seeded")]
#[case(vec!["b", "--name", "given"], "given")]
fn seeded_sub_command(#[case] tokens: Vec<&str>, #[case] expected: &str) {
    // Setup
    let mut seed = Namespace::new();
    seed.set("name", "seeded");
    seed.set("other", "kept");

    // Execute
    let namespace = sub_commands()
        .try_parse_tokens_into(tokens.as_slice(), seed)
        .unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("cmd").unwrap(), "b");
    assert_eq!(namespace.get::<String>("name").unwrap(), expected);
    assert_eq!(namespace.get::<String>("other").unwrap(), "kept");
}

#[rstest]
#[case(vec![], Some("low"))]
#[case(vec!["--level"], Some("high"))]
#[case(vec!["--level", "mid"], Some("mid"))]
#[case(vec!["--level=mid"], Some("mid"))]
fn optional_constant(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(
            Parameter::option(["--level"])
                .nargs(Nargs::Optional)
                .constant("high")
                .default("low"),
        )
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(
        namespace.try_get::<String>("level").unwrap(),
        expected.map(String::from)
    );
}

#[rstest]
#[case(vec!["-n5"], 5)]
#[case(vec!["-n", "5"], 5)]
#[case(vec!["-n=5"], 5)]
#[case(vec!["--number=5"], 5)]
#[case(vec!["--num", "5"], 5)]
#[case(vec!["-vn5"], 5)]
#[case(vec!["-n", "-5"], -5)]
fn attached_values(#[case] tokens: Vec<&str>, #[case] expected: i32) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-n", "--number"]).parse_as::<i32>())
        .unwrap()
        .add(Parameter::option(["-v"]).action(Action::StoreTrue))
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.get::<i32>("number").unwrap(), expected);
}

/// `program [-h] [-1] [item]`
fn negative_number_option() -> GeneralParser {
    CommandLineParser::new("program")
        .add(Parameter::option(["-1"]).action(Action::StoreTrue).dest("one"))
        .unwrap()
        .add(Parameter::argument("item").nargs(Nargs::Optional))
        .unwrap()
        .build()
}

#[test]
fn negative_number_is_option() {
    // Setup
    let parser = negative_number_option();

    // Execute
    let namespace = parser.try_parse_tokens(&["-1"]).unwrap();

    // Verify
    assert_eq!(namespace.get::<bool>("one").unwrap(), true);
    assert!(!namespace.contains("item"));
}

#[test]
fn negative_number_unknown() {
    // Setup
    let parser = negative_number_option();

    // Execute
    let exit = parser.try_parse_tokens(&["-2"]).unwrap_err();

    // Verify
    assert_eq!(error(exit), ParseError::UnknownOption("-2".to_string()));
}

#[test]
fn append_nested() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(
            Parameter::option(["--pair"])
                .action(Action::Append)
                .nargs(Nargs::Precisely(2)),
        )
        .unwrap()
        .add(
            Parameter::option(["--item"])
                .action(Action::Extend)
                .nargs(Nargs::AtLeastOne),
        )
        .unwrap()
        .build();

    // Execute
    let namespace = parser
        .try_parse_tokens(&["--pair", "1", "2", "--item", "a", "b", "--pair", "3", "4", "--item", "c"])
        .unwrap();

    // Verify
    assert_eq!(
        namespace.get_nested::<u32>("pair").unwrap(),
        vec![vec![1, 2], vec![3, 4]]
    );
    assert_eq!(namespace.get_all::<String>("item").unwrap(), vec!["a", "b", "c"]);
}

#[rstest]
#[case(vec!["--int", "--str", "--int"], vec!["int", "str", "int"])]
#[case(vec![], vec![])]
fn append_const_shared_dest(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(
            Parameter::option(["--str"])
                .action(Action::AppendConst)
                .constant("str")
                .dest("types"),
        )
        .unwrap()
        .add(
            Parameter::option(["--int"])
                .action(Action::AppendConst)
                .constant("int")
                .dest("types"),
        )
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.get_all::<String>("types").unwrap(), expected);
}

#[rstest]
#[case(vec!["--color"], Some(true))]
#[case(vec!["--no-color"], Some(false))]
#[case(vec!["--color", "--no-color"], Some(false))]
#[case(vec![], None)]
fn boolean_optional(#[case] tokens: Vec<&str>, #[case] expected: Option<bool>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--color"]).action(Action::BooleanOptional))
        .unwrap()
        .build();

    // Execute
    let namespace = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(namespace.try_get::<bool>("color").unwrap(), expected);
}

#[test]
fn boolean_optional_conflict() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--no-color"]))
        .unwrap();

    // Execute
    let result = parser.add(Parameter::option(["--color"]).action(Action::BooleanOptional));

    // Verify
    assert_eq!(
        result.unwrap_err(),
        ConfigError::ConflictingOption(vec!["--no-color".to_string()])
    );
}

#[test]
fn remainder() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--verbose"]).action(Action::StoreTrue))
        .unwrap()
        .add(Parameter::argument("command"))
        .unwrap()
        .add(Parameter::argument("args").nargs(Nargs::Remainder))
        .unwrap()
        .build();

    // Execute
    let namespace = parser
        .try_parse_tokens(&["--verbose", "ls", "-l", "--verbose", "--", "x"])
        .unwrap();

    // Verify
    assert_eq!(namespace.get::<String>("command").unwrap(), "ls");
    assert_eq!(
        namespace.get_all::<String>("args").unwrap(),
        vec!["-l", "--verbose", "x"]
    );
}

#[rstest]
#[case("fast", None)]
#[case("medium", Some(ParseError::InvalidChoice {
    name: "mode".to_string(),
    value: "medium".to_string(),
    choices: vec!["fast".to_string(), "slow".to_string()],
}))]
fn choices(#[case] token: &str, #[case] expected: Option<ParseError>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("mode").choices(["fast", "slow"]))
        .unwrap()
        .build();

    // Execute
    let result = parser.try_parse_tokens(&[token]);

    // Verify
    match expected {
        None => assert_eq!(result.unwrap().get::<String>("mode").unwrap(), token),
        Some(expected) => assert_eq!(error(result.unwrap_err()), expected),
    }
}

#[test]
fn required_option() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-o", "--output"]).required(true))
        .unwrap()
        .build();

    // Execute
    let exit = parser.try_parse_tokens(&[]).unwrap_err();

    // Verify
    assert_eq!(
        error(exit),
        ParseError::MissingRequired(vec!["-o/--output".to_string()])
    );
    assert_eq!(parser.format_usage(), "usage: program [-h] -o OUTPUT");
}

#[test]
fn suppressed_default() {
    // Setup
    let parser = CommandLineParser::with_config(
        "program",
        ParserConfig::default().argument_default(DefaultValue::Suppress),
    )
    .unwrap()
    .add(Parameter::option(["--a"]))
    .unwrap()
    .add(Parameter::option(["--b"]).default("b"))
    .unwrap()
    .build();

    // Execute
    let namespace = parser.try_parse_tokens(&[]).unwrap();

    // Verify
    assert!(!namespace.contains("a"));
    assert_eq!(namespace.get::<String>("b").unwrap(), "b");
    assert_eq!(namespace.to_string(), "Namespace(b='b')");
}

#[test]
fn groups_in_help() {
    // Setup
    let parser = CommandLineParser::new("program")
        .about("Do things.")
        .add_group(
            ArgumentGroup::new("network")
                .description("Where to connect.")
                .add(Parameter::option(["--port"]).help("The port.")),
        )
        .unwrap()
        .build();

    // Execute
    let help = parser.format_help();

    // Verify
    assert!(help.starts_with("usage: program [-h] [--port PORT]\n\nDo things.\n"));
    assert!(help.contains("\nnetwork:\n Where to connect.\n"));
    assert!(help.contains("The port."));
}

#[test]
fn namespace_rendering() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("item"))
        .unwrap()
        .add(Parameter::option(["--flag"]).action(Action::StoreTrue))
        .unwrap()
        .add(Parameter::option(["--names"]).action(Action::Append))
        .unwrap()
        .add(Parameter::option(["--other"]))
        .unwrap()
        .build();

    // Execute
    let namespace = parser
        .try_parse_tokens(&["x", "--names", "a", "--names", "b"])
        .unwrap();

    // Verify
    assert_eq!(
        namespace.to_string(),
        "Namespace(flag=false, item='x', names=['a', 'b'], other=None)"
    );
}

#[test]
fn version() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-V", "--version"]).version("program 1.2.3"))
        .unwrap()
        .add(Parameter::argument("required"))
        .unwrap()
        .build();

    // Execute
    let exit = parser.try_parse_tokens(&["-V"]).unwrap_err();

    // Verify
    assert_eq!(exit, Exit::Version("program 1.2.3".to_string()));
    assert_eq!(exit.code(), 0);
}

#[test]
fn exit_on_error_config() {
    // Setup
    let parser = CommandLineParser::with_config("program", ParserConfig::default().exit_on_error(false))
        .unwrap()
        .add(Parameter::argument("item"))
        .unwrap()
        .build();

    // Execute
    let exit = parser.try_parse_tokens(&["a", "b"]).unwrap_err();

    // Verify
    assert_eq!(exit.code(), 1);
    assert_eq!(
        exit.to_string(),
        "Parse error: Too many tokens provided: 'b'.\na b\n  ^"
    );
}

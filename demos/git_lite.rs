use argot::{
    Action, ArgumentGroup, CommandLineParser, ConfigError, MutuallyExclusiveGroup, Nargs,
    Parameter, SubCommands,
};

fn main() -> Result<(), ConfigError> {
    let parser = CommandLineParser::new("git-lite")
        .about("A small slice of a version control command line.")
        .add(Parameter::option(["--version"]).version("git-lite 0.4.0"))?
        .add(
            Parameter::option(["-C"])
                .dest("directory")
                .metavar("PATH")
                .help("Run as if started in PATH."),
        )?
        .add(
            Parameter::option(["-v", "--verbose"])
                .action(Action::Count)
                .help("Be louder; repeat for more."),
        )?
        .branch(
            SubCommands::new("command")
                .required(true)
                .help("The command to run."),
        )?
        .command("add", |sub| {
            sub.about("Add file contents to the index.")
                .add(
                    Parameter::argument("paths")
                        .nargs(Nargs::AtLeastOne)
                        .help("The files to add."),
                )?
                .add(
                    Parameter::option(["-n", "--dry-run"])
                        .action(Action::StoreTrue)
                        .help("Only show what would be added."),
                )
        })?
        .command("commit", |sub| {
            sub.about("Record changes to the repository.")
                .add_exclusive(
                    MutuallyExclusiveGroup::new()
                        .required(true)
                        .add(Parameter::option(["-m", "--message"]).help("The commit message."))
                        .add(
                            Parameter::option(["-F", "--file"])
                                .metavar("FILE")
                                .help("Read the commit message from FILE."),
                        ),
                )?
                .add(
                    Parameter::option(["--sign"])
                        .action(Action::BooleanOptional)
                        .help("Sign the commit."),
                )
        })?
        .command("log", |sub| {
            sub.about("Show commit logs.").add_group(
                ArgumentGroup::new("filtering")
                    .description("Limit the commits shown.")
                    .add(
                        Parameter::option(["-n", "--max-count"])
                            .parse_as::<usize>()
                            .help("Show at most this many commits."),
                    )
                    .add(
                        Parameter::option(["--author"])
                            .action(Action::Append)
                            .help("Only show commits by this author; repeatable."),
                    ),
            )
        })?
        .build();

    match parser.parse() {
        Ok(namespace) => println!("{namespace}"),
        Err(exit) => {
            eprintln!("{exit}");
            std::process::exit(exit.code());
        }
    }

    Ok(())
}

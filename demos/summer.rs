use argot::{Action, CommandLineParser, ConfigError, Nargs, Parameter};

fn main() -> Result<(), ConfigError> {
    let parser = CommandLineParser::new("summer")
        .about("Sum (or take the maximum of) some integers.")
        .add(
            Parameter::argument("items")
                .nargs(Nargs::AtLeastOne)
                .parse_as::<i64>()
                .metavar("N")
                .help("The items to sum."),
        )?
        .add(
            Parameter::option(["--max"])
                .action(Action::StoreConst)
                .constant("max")
                .dest("accumulate")
                .default("sum")
                .help("Take the maximum instead of the sum."),
        )?
        .build();

    let namespace = match parser.parse() {
        Ok(namespace) => namespace,
        Err(exit) => {
            eprintln!("{exit}");
            std::process::exit(exit.code());
        }
    };
    let items: Vec<i64> = namespace
        .get_all("items")
        .expect("items are validated as i64");
    let accumulate: String = namespace
        .get("accumulate")
        .expect("accumulate always has a default");

    match accumulate.as_str() {
        "max" => println!("Max: {}", items.iter().max().copied().unwrap_or_default()),
        _ => println!("Sum: {}", items.iter().sum::<i64>()),
    }

    Ok(())
}

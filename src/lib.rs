//! `argot` is an argparse-style command line grammar engine for Rust.
//!
//! Declare a grammar of positional arguments, options, groups and sub-commands,
//! then match a command line against it.
//! The result is a [`Namespace`]: every destination mapped to its stored raw value(s), with typed accessors on the way out.
//!
//! The grammar follows the conventions of Python's `argparse`:
//! * *Arity*: every parameter consumes a number of values given by its [`Nargs`] (`N`, `?`, `*`, `+`, `...`, and chunks of `N`).
//! Runs of positional tokens are distributed over the positional arguments greedily, in declaration order.
//! * *Actions*: a matched parameter stores, appends, extends, counts, or stores a constant (see [`Action`]).
//! * *Defaults*: a destination which nothing sets takes its default: the parameter's own, then its group's, then the parser's, then the action's intrinsic one.
//! * *Options*: long options may be abbreviated to any unique prefix, short flags may be bundled (`-xvf`), and values may be attached (`--name=value`, `-nvalue`).
//! * *Groups*: [`ArgumentGroup`]s organize the help, while [`MutuallyExclusiveGroup`]s forbid their members from appearing together.
//! * *Sub-commands*: a parser may [`branch`](CommandLineParser::branch) into named sub-command parsers, each with their own grammar.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! usage: summer [-h] [--max] N [N ...]
//!
//! Sum (or take the maximum of) some integers.
//!
//! positional arguments:
//!  N            The items to sum.
//!
//! options:
//!  -h, --help   Show this help message and exit.
//!  --max        Take the maximum instead of the sum.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer --max 1 5 3
//! Max: 5
//!
//! $ summer 1 blah
//! Parse error: Invalid value 'blah' for parameter 'N': invalid digit found in string.
//! 1 blah
//!   ^
//! ```
//!
//! # Parsing
//! A built [`GeneralParser`] offers pure entry points, which never print nor exit:
//! * [`GeneralParser::try_parse_tokens`]: every token must be matched.
//! * [`GeneralParser::try_parse_tokens_into`]: the same, on top of a caller's namespace.
//! * [`GeneralParser::try_parse_known_tokens`]: unmatched tokens are returned rather than rejected.
//! * [`GeneralParser::try_parse_intermixed_tokens`]: options are matched first, then every operand is matched against the positionals.
//!
//! Each returns an [`Exit`] when no namespace is produced: help, version, or an error with its [`ErrorContext`].
//! [`GeneralParser::parse`] runs against the process' arguments, printing and exiting the way a Cli program does.
//!
//! # Sub-commands
//! ```no_run
#![doc = include_str!("../demos/git_lite.rs")]
//! ```
//!
//! ```console
//! $ git-lite -v commit -m "First."
//! Namespace(command='commit', directory=None, file=None, message='First.', sign=None, verbose='1')
//!
//! $ git-lite commit -m "First." -F notes.txt
//! Parse error: Parameter '-F/--file' is not allowed with parameter '-m/--message'.
//! commit -m First. -F notes.txt
//!                  ^
//! ```
#![deny(missing_docs)]

pub use argot_builder::*;

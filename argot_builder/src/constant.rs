pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const DEFAULT_PREFIX_CHARS: &str = "-";
pub(crate) const TERMINATOR: &str = "--";
pub(crate) const NEGATION_PREFIX: &str = "no-";
pub(crate) const TRUE: &str = "true";
pub(crate) const FALSE: &str = "false";
pub(crate) const VERSION_MESSAGE: &str = "Show the program's version number and exit.";

use std::cmp;

use crate::error::ParseError;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Renders rows of `left` and `middle` columns, wrapping the middle column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    middle: usize,
}

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(padding: usize, left: usize, middle: usize, total: usize) -> Self {
        let non_middle = left + padding;
        let target_total = (total as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = cmp::max(middle, MINIMUM_MIDDLE_WIDTH);

        let middle = if guided_middle + non_middle <= target_total {
            guided_middle
        } else if non_middle < target_total {
            cmp::max(target_total - non_middle, MINIMUM_MIDDLE_WIDTH)
        } else {
            MINIMUM_MIDDLE_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} within the total {total}.  Selecting middle: {middle}.");
        }

        Self::new(padding, left, middle)
    }

    pub(crate) fn new(padding: usize, left: usize, middle: usize) -> Self {
        Self {
            padding,
            left,
            // The middle must be at least 2 wide, so we can hyphenate.
            middle: cmp::max(middle, 2),
        }
    }

    /// Render one row.
    /// A `left` too wide for its column goes on a line of its own.
    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding;
        let left_width = self.left.saturating_sub(indent);
        let mut parts = chunk(middle, self.middle).into_iter();
        let mut out = Vec::default();

        if left.chars().count() > left_width {
            out.push(format!("{:indent$}{left}", ""));
        } else {
            match parts.next() {
                Some(part) => {
                    out.push(format!("{:indent$}{left:left_width$}{:padding$}{part}", "", ""));
                }
                None => out.push(format!("{:indent$}{left}", "")),
            }
        }

        for part in parts {
            out.push(format!("{:width$}{part}", "", width = self.left + padding));
        }

        out
    }
}

pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let width = cmp::max(width, 2);
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = String::default();
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// Where the parser's output goes.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::error::ParseError;
    use crate::parser::{ErrorContext, UserInterface};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Captured {
        message: Option<Vec<String>>,
        error: Option<String>,
        error_context: Option<ErrorContext>,
    }

    /// Captures everything printed; clones share the same capture.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryInterface {
        captured: Rc<RefCell<Captured>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.captured
                .borrow_mut()
                .message
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: ParseError) {
            // Assumes print_error() is only ever called once.
            self.captured.borrow_mut().error.replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once.
            self.captured.borrow_mut().error_context.replace(error_context);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(&self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let captured = self.captured.take();

            (
                captured.message.map(|messages| messages.join("\n")),
                captured.error,
                captured.error_context,
            )
        }

        pub(crate) fn consume_message(&self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }
}

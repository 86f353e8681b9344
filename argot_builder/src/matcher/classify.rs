#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::TERMINATOR;
use crate::matcher::{FlagResolver, Resolution};
use crate::registry::Registry;

/// One raw token, tagged.
/// Tokens keep the position of the raw token they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Operand(String),
    Option { raw: String, resolution: Resolution },
    /// The first bare `--`.
    Terminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Operand,
    Option,
    Terminator,
}

impl Token {
    pub(crate) fn kind(&self) -> TokenKind {
        match self {
            Token::Operand(_) => TokenKind::Operand,
            Token::Option { .. } => TokenKind::Option,
            Token::Terminator => TokenKind::Terminator,
        }
    }

    pub(crate) fn raw(&self) -> &str {
        match self {
            Token::Operand(value) => value,
            Token::Option { raw, .. } => raw,
            Token::Terminator => TERMINATOR,
        }
    }
}

/// Whether `token` looks like `-1`, `-2.5` or `-.5`.
pub(crate) fn is_negative_number(token: &str) -> bool {
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match token.strip_prefix('-') {
        None => false,
        Some(rest) => match rest.split_once('.') {
            None => !rest.is_empty() && digits(rest),
            Some((whole, fraction)) => digits(whole) && !fraction.is_empty() && digits(fraction),
        },
    }
}

pub(crate) fn classify(registry: &Registry, tokens: &[String]) -> Vec<Token> {
    let resolver = FlagResolver::new(registry);
    let mut terminated = false;
    let classified: Vec<Token> = tokens
        .iter()
        .map(|raw| {
            if terminated {
                Token::Operand(raw.clone())
            } else if raw == TERMINATOR {
                terminated = true;
                Token::Terminator
            } else if !is_option_like(registry, raw) {
                Token::Operand(raw.clone())
            } else {
                match resolver.resolve(raw) {
                    Some(resolution) => Token::Option {
                        raw: raw.clone(),
                        resolution,
                    },
                    None => Token::Operand(raw.clone()),
                }
            }
        })
        .collect();

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Classified {tokens:?} as {classified:?}.");
    }

    classified
}

fn is_option_like(registry: &Registry, token: &str) -> bool {
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) if registry.config.is_prefix(first) => {
            !is_negative_number(token) || registry.has_negative_number_options()
        }
        _ => false,
    }
}

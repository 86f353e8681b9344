//! Builder module for `argot`.
//! See the `argot` crate for the full documentation.
#![deny(missing_docs)]
mod api;
mod constant;
mod error;
mod matcher;
mod model;
mod namespace;
mod parser;
mod registry;

pub use api::*;
pub use error::*;
pub use model::*;
pub use namespace::*;
pub use parser::{ErrorContext, Exit, GeneralParser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

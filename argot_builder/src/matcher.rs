mod api;
mod arity;
mod classify;
mod core;
mod model;
mod resolver;

pub(crate) use self::core::*;
pub(crate) use api::*;
pub(crate) use classify::*;
pub(crate) use model::*;
pub(crate) use resolver::*;

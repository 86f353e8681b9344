mod base;
mod capture;
mod defaults;
mod enforcer;
mod interface;
mod middleware;
mod printer;

pub(crate) use interface::*;
pub use middleware::*;
pub use printer::ErrorContext;

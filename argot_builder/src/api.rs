mod core;
mod group;
mod parameter;

pub use self::core::*;
use group::Member;
pub use group::{ArgumentGroup, MutuallyExclusiveGroup, SubCommands};
pub use parameter::*;

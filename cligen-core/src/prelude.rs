//! Everything a command module needs.

pub use crate::command::Command;
pub use crate::error::Error;
pub use crate::flags::{FlagSet, Flags, General};
pub use crate::registry::Registry;

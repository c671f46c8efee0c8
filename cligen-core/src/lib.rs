//! # cligen-core
//!
//! Runtime for `cligen`-style command-line programs.
//!
//! A program is a [`Registry`] of named [`Command`]s handed to a
//! [`Dispatcher`]. The dispatcher looks up `argv[0]`, lets the command
//! declare its flags, parses the rest of the arguments and then runs the
//! command's `process` and `run` stages, mapping the outcome to an exit code.
//!
//! Commands can be registered explicitly:
//!
//! ```ignore
//! let registry = Registry::new().with("command.add", AddCommand::default());
//! std::process::exit(cligen_core::run(registry, &args));
//! ```
//!
//! or from any linked module with [`submit!`], collected by
//! [`Registry::linked`].

pub mod command;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod logging;
pub mod prelude;
pub mod registry;

pub use command::Command;
pub use dispatch::{run, Dispatcher};
pub use error::{Error, ErrorKind};
pub use flags::{FlagInfo, FlagKind, FlagSet, Flags, General, ParseError};
pub use registry::{Registration, Registry, COMMANDS};

#[doc(hidden)]
pub use linkme;

use crate::error::Error;
use crate::flags::{FlagSet, Flags};

/// A unit of CLI functionality.
///
/// The dispatcher drives every command through the same lifecycle:
///
/// 1. [`register`](Command::register) declares the accepted flags,
/// 2. the arguments are parsed against the returned [`FlagSet`],
/// 3. [`process`](Command::process) validates the parsed values and derives
///    whatever state `run` needs,
/// 4. [`run`](Command::run) performs the side effects and returns the bytes
///    to print.
///
/// Each stage only runs when the previous one succeeded.
///
/// # Example
///
/// ```ignore
/// use cligen_core::prelude::*;
///
/// #[derive(Default)]
/// pub struct Hello {
///     general: General,
/// }
///
/// impl Command for Hello {
///     fn register(&self, flags: FlagSet) -> FlagSet {
///         self.general.register(flags)
///     }
///
///     fn process(&mut self, flags: &Flags) -> Result<(), Error> {
///         self.general.load(flags);
///         Ok(())
///     }
///
///     fn run(&mut self, _flags: &Flags) -> Result<Vec<u8>, Error> {
///         Ok(b"hello\n".to_vec())
///     }
/// }
/// ```
pub trait Command {
    fn register(&self, flags: FlagSet) -> FlagSet;

    /// Synopsis appended to the `Usage:` line of the command help.
    fn usage(&self) -> Option<&str> {
        None
    }

    /// Free-form text shown below the `Usage:` line.
    fn description(&self) -> Option<&str> {
        None
    }

    fn process(&mut self, flags: &Flags) -> Result<(), Error>;

    fn run(&mut self, flags: &Flags) -> Result<Vec<u8>, Error>;
}

//! Command implementations for the `cligen` CLI.

use cligen_core::Registry;

/// Module scaffolding: `cligen command.add`.
///
/// Renders a command module from a template and declares it in the
/// package's entry point.
pub mod add;

/// Code templates for generated modules and entry points.
pub mod templates;

/// The registry the `cligen` binary dispatches against.
pub fn registry() -> Registry {
    Registry::new().with(add::NAME, add::AddCommand::new())
}

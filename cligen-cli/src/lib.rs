//! # cligen-cli
//!
//! Command-line tool that scaffolds `cligen-core` command modules.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cligen command.add -name=<group>/<sub> -package=<pkg>` | Generate a command module and declare it in the package entry point |
//!
//! ## Architecture
//!
//! - [`commands::add`]: the generator (`command.add`)
//! - [`commands::templates`]: module, group and entry-point templates
//! - [`source`]: structured editing of the entry point's module list
//! - [`settings`]: resolution of the workspace root and derived paths
//! - [`error`]: generator failures

pub mod commands;
pub mod error;
pub mod settings;
pub mod source;

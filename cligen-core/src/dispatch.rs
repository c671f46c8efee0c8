use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::command::Command;
use crate::error::Error;
use crate::flags::{FlagSet, ParseError};
use crate::registry::Registry;

/// Resolves `argv` into a registered [`Command`] and drives its lifecycle.
pub struct Dispatcher {
    registry: Registry,
    program: String,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Dispatcher {
            registry,
            program: default_program(),
        }
    }

    /// Program name shown in usage lines. Defaults to the basename of
    /// `argv[0]`.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run the command named by `args[0]` with the remaining arguments.
    ///
    /// Returns the process exit code: `0` on success, `1` on any failure or
    /// when the command listing is printed because no (known) command was
    /// given. `-h` / `--help` alone prints the listing and returns `0`.
    pub fn dispatch<W: Write>(&mut self, args: &[String], out: &mut W) -> i32 {
        match self.try_dispatch(args, out) {
            Ok(code) => code,
            Err(err) => {
                tracing::error!(error = %err, "failed to write command output");
                1
            }
        }
    }

    fn try_dispatch<W: Write>(&mut self, args: &[String], out: &mut W) -> io::Result<i32> {
        let Some(name) = args.first() else {
            general_help(&self.program, &self.registry, out)?;
            return Ok(1);
        };

        if name == "-h" || name == "--help" {
            general_help(&self.program, &self.registry, out)?;
            return Ok(0);
        }

        if !self.registry.contains(name) {
            general_help(&self.program, &self.registry, out)?;
            return Ok(1);
        }

        let program = self.program.as_str();
        let Some(cmd) = self.registry.get_mut(name) else {
            return Ok(1);
        };

        tracing::debug!(command = %name, "dispatching");

        let flagset = cmd.register(FlagSet::new(name.clone()));
        let flags = match flagset.parse(&args[1..]) {
            Ok(flags) => flags,
            Err(ParseError::Help) => {
                command_help(program, &*cmd, &flagset, None, out)?;
                return Ok(1);
            }
            Err(ParseError::Invalid(msg)) => {
                writeln!(out, "{msg}")?;
                return Ok(1);
            }
        };

        let silent = flags.lookup("silent").is_some_and(|v| v == "true");

        if let Err(err) = cmd.process(&flags) {
            if err.is_help() {
                command_help(program, &*cmd, &flagset, Some(&err), out)?;
            } else {
                writeln!(out, "{err}")?;
            }
            return Ok(1);
        }

        match cmd.run(&flags) {
            Ok(output) => {
                if !silent {
                    out.write_all(&output)?;
                }
                Ok(0)
            }
            Err(err) => {
                writeln!(out, "{} {err}", "!".red())?;
                Ok(1)
            }
        }
    }
}

/// Dispatch `args` against `registry`, writing to stdout.
pub fn run(registry: Registry, args: &[String]) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Dispatcher::new(registry).dispatch(args, &mut out)
}

fn default_program() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cligen".to_string())
}

fn general_help<W: Write>(program: &str, registry: &Registry, out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage: {program} <COMMAND>")?;
    writeln!(out, "Available commands:")?;
    for name in registry.names() {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

fn command_help<W: Write>(
    program: &str,
    cmd: &dyn Command,
    flags: &FlagSet,
    err: Option<&Error>,
    out: &mut W,
) -> io::Result<()> {
    if let Some(err) = err {
        writeln!(out, "\n{err}\n")?;
    }

    write!(out, "Usage: {program} {} [OPTIONS]", flags.name())?;
    match cmd.usage() {
        Some(usage) => writeln!(out, " {usage}")?,
        None => writeln!(out)?,
    }

    if let Some(description) = cmd.description() {
        writeln!(out, "\n{}", description.trim_matches('\n').trim_end())?;
    }

    let table = flags.flags();
    if !table.is_empty() {
        writeln!(out, "\nOptions:")?;
        let cells: Vec<(String, &str)> = table
            .iter()
            .map(|f| (format!("-{}={}", f.name, f.default), f.usage.as_str()))
            .collect();
        let width = cells.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, usage) in cells {
            writeln!(out, "  {left:<width$}  {usage}")?;
        }
    }

    Ok(())
}

//! Flag declaration and parsing.
//!
//! A [`FlagSet`] is built fresh for every dispatch: the dispatcher creates an
//! empty set, hands it to [`Command::register`](crate::Command::register) and
//! parses the command's arguments against the result. Parsing is delegated to
//! `clap`'s builder API; this module only adapts the single-dash flag syntax
//! (`-name=value`, `-force`, `-n=false`) and keeps the metadata needed to
//! render the help table.

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice};

const HELP_ID: &str = "__help";
const ARGS_ID: &str = "__args";

/// Value type of a declared flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
}

/// Metadata of a declared flag, as shown in the help table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    pub name: String,
    pub default: String,
    pub usage: String,
    pub kind: FlagKind,
}

/// Why [`FlagSet::parse`] failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `-h` / `--help` was given: the caller should render usage.
    Help,
    /// Anything else: unknown flag, missing value, malformed boolean...
    Invalid(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Help => write!(f, "help requested"),
            ParseError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Builder for the set of flags a command accepts.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    command: clap::Command,
    flags: Vec<FlagInfo>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let command = clap::Command::new(name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .arg(
                Arg::new(HELP_ID)
                    .short('h')
                    .long("help")
                    .action(ArgAction::Help),
            )
            .arg(
                Arg::new(ARGS_ID)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .action(ArgAction::Append),
            );

        FlagSet {
            name,
            command,
            flags: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a boolean flag. `-flag` sets it, `-flag=false` clears it.
    pub fn bool(mut self, name: &str, default: bool, usage: &str) -> Self {
        let default = if default { "true" } else { "false" };
        let arg = flag_arg(name)
            .help(usage.to_string())
            .action(ArgAction::Set)
            .value_parser(BoolishValueParser::new())
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .default_value(default);

        self.command = self.command.arg(arg);
        self.record(name, default, usage, FlagKind::Bool);
        self
    }

    /// Declare a string flag, given as `-flag value` or `-flag=value`.
    pub fn string(mut self, name: &str, default: &str, usage: &str) -> Self {
        let mut arg = flag_arg(name)
            .help(usage.to_string())
            .action(ArgAction::Set)
            .num_args(1);
        if !default.is_empty() {
            arg = arg.default_value(default.to_string());
        }

        self.command = self.command.arg(arg);
        self.record(name, default, usage, FlagKind::String);
        self
    }

    /// Every declared flag, sorted by name.
    pub fn flags(&self) -> Vec<&FlagInfo> {
        let mut flags: Vec<&FlagInfo> = self.flags.iter().collect();
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        flags
    }

    pub fn lookup(&self, name: &str) -> Option<&FlagInfo> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Parse command arguments (without the command name itself).
    pub fn parse(&self, args: &[String]) -> Result<Flags, ParseError> {
        let args = normalize_args(args);
        match self.command.clone().try_get_matches_from(args) {
            Ok(matches) => Ok(Flags {
                matches,
                flags: self.flags.clone(),
            }),
            Err(err) if err.kind() == ClapErrorKind::DisplayHelp => Err(ParseError::Help),
            Err(err) => Err(ParseError::Invalid(first_line(&err.to_string()))),
        }
    }

    fn record(&mut self, name: &str, default: &str, usage: &str, kind: FlagKind) {
        self.flags.retain(|f| f.name != name);
        self.flags.push(FlagInfo {
            name: name.to_string(),
            default: default.to_string(),
            usage: usage.to_string(),
            kind,
        });
    }
}

/// Parsed flag values.
#[derive(Debug, Clone)]
pub struct Flags {
    matches: ArgMatches,
    flags: Vec<FlagInfo>,
}

impl Flags {
    /// Value of a boolean flag; `false` when the flag was never declared.
    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.kind_of(name), Some(FlagKind::Bool))
            && self
                .matches
                .try_get_one::<bool>(name)
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false)
    }

    /// Value of a string flag; empty when unset or never declared.
    pub fn get_string(&self, name: &str) -> String {
        if !matches!(self.kind_of(name), Some(FlagKind::String)) {
            return String::new();
        }
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_default()
    }

    /// Resolved value of any declared flag rendered as text, `None` when the
    /// flag does not exist.
    pub fn lookup(&self, name: &str) -> Option<String> {
        match self.kind_of(name)? {
            FlagKind::Bool => Some(self.get_bool(name).to_string()),
            FlagKind::String => Some(self.get_string(name)),
        }
    }

    /// Remaining non-flag arguments.
    pub fn args(&self) -> Vec<String> {
        self.matches
            .get_many::<String>(ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    fn kind_of(&self, name: &str) -> Option<FlagKind> {
        self.flags.iter().find(|f| f.name == name).map(|f| f.kind)
    }
}

/// Shared option set every command embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct General {
    pub dry_run: bool,
    pub silent: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            dry_run: true,
            silent: false,
        }
    }
}

impl General {
    pub fn register(&self, flags: FlagSet) -> FlagSet {
        flags
            .bool("n", true, "dry run, see specific command description")
            .bool("silent", false, "suppress output")
    }

    pub fn load(&mut self, flags: &Flags) {
        self.dry_run = flags.get_bool("n");
        self.silent = flags.get_bool("silent");
    }
}

fn flag_arg(name: &str) -> Arg {
    let arg = Arg::new(name.to_string());
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => arg.short(c),
        _ => arg.long(name.to_string()),
    }
}

/// Rewrite `-name` style flags into what clap expects: one-character names
/// become short flags, longer names long flags. Everything after `--` is left
/// untouched.
fn normalize_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut passthrough = false;

    for arg in args {
        if passthrough || !arg.starts_with('-') || arg == "-" {
            out.push(arg.clone());
            continue;
        }
        let body = arg.trim_start_matches('-');
        if body.is_empty() {
            passthrough = arg == "--";
            out.push(arg.clone());
            continue;
        }
        let name_len = body.split('=').next().map(|n| n.chars().count()).unwrap_or(0);
        if name_len == 1 {
            out.push(format!("-{body}"));
        } else {
            out.push(format!("--{body}"));
        }
    }

    out
}

fn first_line(msg: &str) -> String {
    msg.lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

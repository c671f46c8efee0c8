use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the workspace root.
pub const ROOT_ENV: &str = "CLIGEN_PATH";

/// Directory under `$HOME` used when `CLIGEN_PATH` is not set.
pub const DEFAULT_ROOT_DIR: &str = "cligen";

pub const SOURCE_EXT: &str = "rs";
pub const ENTRY_FILE: &str = "main.rs";
pub const GROUP_INDEX_FILE: &str = "mod.rs";

/// Where generated code goes.
///
/// Resolution order for the root:
/// 1. `CLIGEN_PATH` (a `.env` file in the working directory may provide it,
///    without overriding the environment),
/// 2. `$HOME/cligen`,
/// 3. the current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
}

impl Settings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Settings { root: root.into() }
    }

    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::resolve(std::env::var_os(ROOT_ENV), std::env::var_os("HOME"))
    }

    fn resolve(root: Option<OsString>, home: Option<OsString>) -> Self {
        let root = match (root, home) {
            (Some(root), _) if !root.is_empty() => PathBuf::from(root),
            (_, Some(home)) if !home.is_empty() => Path::new(&home).join(DEFAULT_ROOT_DIR),
            _ => PathBuf::from("."),
        };
        Settings { root }
    }

    /// Paths touched when adding `group/subcommand` to `package`.
    pub fn layout(&self, package: &str, group: &str, subcommand: &str) -> Layout {
        let package_dir = self.root.join("src").join(package);
        let module_dir = package_dir.join(group);
        Layout {
            module_file: module_dir.join(format!("{subcommand}.{SOURCE_EXT}")),
            group_index: module_dir.join(GROUP_INDEX_FILE),
            entry_point: package_dir.join(ENTRY_FILE),
            module_dir,
        }
    }
}

/// Derived file locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub module_dir: PathBuf,
    pub module_file: PathBuf,
    pub group_index: PathBuf,
    pub entry_point: PathBuf,
}

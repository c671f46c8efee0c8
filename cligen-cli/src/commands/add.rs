use std::fs;
use std::path::{Component, Path, PathBuf};

use cligen_core::prelude::*;

use super::templates;
use crate::error::GenerateError;
use crate::settings::{Layout, Settings};
use crate::source::{is_identifier, SourceDocument, SourceError};

/// Registry name of the generator.
pub const NAME: &str = "command.add";

const DESCRIPTION: &str = r#"
Add a command module to a package.

The module is written to <root>/src/<package>/<group>/<subcommand>.rs and the
group module is declared in <root>/src/<package>/main.rs, which is created from
a default template when missing. <root> is $CLIGEN_PATH, or $HOME/cligen.

Examples:
	; create the "push" subcommand of the "origin" command group
	; the "origin" group is created if it does not exist yet
	cligen command.add -name=origin/push -package=github.com/acme/tool

	; regenerate it, overwriting the existing module
	cligen command.add -name=origin/push -package=github.com/acme/tool -force
"#;

/// Everything `run` needs, derived by `process`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub group: String,
    pub subcommand: String,
    pub package: String,
    pub force: bool,
    pub layout: Layout,
}

impl Plan {
    /// Import path of the group module: `package/group`.
    pub fn import_path(&self) -> String {
        format!("{}/{}", self.package.trim_end_matches('/'), self.group)
    }
}

/// `command.add`: scaffold `group/subcommand` into a package and declare the
/// group in the package's entry point.
#[derive(Debug, Default)]
pub struct AddCommand {
    general: General,
    settings: Option<Settings>,
    plan: Option<Plan>,
}

impl AddCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed settings instead of resolving them from the environment.
    pub fn with_settings(settings: Settings) -> Self {
        AddCommand {
            settings: Some(settings),
            ..Self::default()
        }
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    /// The plan derived by the last successful `process`, until `run`
    /// consumes it.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    fn settings(&self) -> Settings {
        self.settings.clone().unwrap_or_else(Settings::from_env)
    }
}

impl Command for AddCommand {
    fn register(&self, flags: FlagSet) -> FlagSet {
        self.general
            .register(flags)
            .string("name", "", "command/subcommand")
            .string("package", "", "package name")
            .bool("force", false, "override existing subcommand")
    }

    fn description(&self) -> Option<&str> {
        Some(DESCRIPTION)
    }

    fn process(&mut self, flags: &Flags) -> Result<(), Error> {
        self.plan = None;
        self.general.load(flags);

        let name = flags.get_string("name");
        let package = flags.get_string("package");
        let force = flags.get_bool("force");

        if name.is_empty() {
            return Err(Error::flag_required("name"));
        }
        if package.is_empty() {
            return Err(Error::flag_required("package"));
        }

        let (group, subcommand) = split_name(&name).ok_or_else(|| Error::wrong_format("name"))?;
        if !is_relative_package(&package) {
            return Err(Error::wrong_format("package"));
        }

        let layout = self.settings().layout(&package, group, subcommand);

        let exists = layout
            .module_file
            .try_exists()
            .map_err(|e| GenerateError::io("error checking", &layout.module_file, e))?;
        if exists && !force {
            return Err(GenerateError::AlreadyExists {
                subcommand: subcommand.to_string(),
                path: layout.module_file.clone(),
            }
            .into());
        }

        ensure_entry_point(&layout.entry_point)?;

        self.plan = Some(Plan {
            group: group.to_string(),
            subcommand: subcommand.to_string(),
            package,
            force,
            layout,
        });
        Ok(())
    }

    fn run(&mut self, _flags: &Flags) -> Result<Vec<u8>, Error> {
        let plan = self.plan.take().ok_or(GenerateError::Uninitialized)?;
        generate(&plan)?;
        Ok(Vec::new())
    }
}

/// Write the module, then declare it in the group index and the entry point.
///
/// Steps fail fast. A module file written before a later step fails stays on
/// disk.
pub fn generate(plan: &Plan) -> Result<(), GenerateError> {
    let layout = &plan.layout;

    tracing::info!(dir = %layout.module_dir.display(), "creating");
    fs::create_dir_all(&layout.module_dir).map_err(|e| {
        GenerateError::io("error creating destination directory", &layout.module_dir, e)
    })?;

    if plan.force && layout.module_file.exists() {
        tracing::info!(file = %layout.module_file.display(), "overwriting");
    }
    fs::write(
        &layout.module_file,
        templates::module::command(&plan.group, &plan.subcommand),
    )
    .map_err(|e| GenerateError::io("error creating output file", &layout.module_file, e))?;

    if !layout.group_index.exists() {
        fs::write(&layout.group_index, templates::module::group_index()).map_err(|e| {
            GenerateError::io("error creating output file", &layout.group_index, e)
        })?;
    }
    patch(&layout.group_index, &plan.subcommand, |doc| {
        doc.add_module(&plan.subcommand, true)
    })?;

    let import = plan.import_path();
    tracing::info!(import = %import, entry = %layout.entry_point.display(), "adding import");
    patch(&layout.entry_point, &import, |doc| doc.add_import(&import))?;

    Ok(())
}

/// Parse `path`, apply `edit`, and rewrite the file when it reports a change.
fn patch<F>(path: &Path, import: &str, edit: F) -> Result<(), GenerateError>
where
    F: FnOnce(&mut SourceDocument) -> Result<bool, SourceError>,
{
    tracing::debug!(file = %path.display(), "parsing");
    let source = fs::read_to_string(path).map_err(|e| GenerateError::io("error reading", path, e))?;
    let mut doc = SourceDocument::parse(source).map_err(|source| GenerateError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let changed = edit(&mut doc).map_err(|source| GenerateError::Import {
        import: import.to_string(),
        target: path.to_path_buf(),
        source,
    })?;
    if !changed {
        tracing::debug!(file = %path.display(), import, "already declared");
        return Ok(());
    }

    fs::write(path, doc.into_string()).map_err(|e| GenerateError::io("error saving file", path, e))
}

/// Create the entry point from the default template when it does not exist.
fn ensure_entry_point(path: &Path) -> Result<(), GenerateError> {
    let exists = path
        .try_exists()
        .map_err(|e| GenerateError::io("error checking", path, e))?;
    if exists {
        return Ok(());
    }

    tracing::info!(file = %path.display(), "creating entry point");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| GenerateError::io("error creating destination directory", parent, e))?;
    }
    fs::write(path, templates::entry::main_rs())
        .map_err(|e| GenerateError::io("error creating output file", path, e))
}

/// Split `group/subcommand`. Both parts must be Rust identifiers.
pub fn split_name(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.split('/');
    let (group, subcommand) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || !is_identifier(group) || !is_identifier(subcommand) {
        return None;
    }
    Some((group, subcommand))
}

fn is_relative_package(package: &str) -> bool {
    let path = PathBuf::from(package);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_accepts_two_segments() {
        assert_eq!(split_name("origin/push"), Some(("origin", "push")));
        assert_eq!(split_name("remote/list_all"), Some(("remote", "list_all")));
    }

    #[test]
    fn split_name_rejects_other_shapes() {
        for name in ["", "origin", "origin/push/x", "origin/", "/push", "origin/push-all", "fn/push"] {
            assert_eq!(split_name(name), None, "{name}");
        }
    }

    #[test]
    fn package_must_stay_under_src() {
        assert!(is_relative_package("github.com/acme/tool"));
        assert!(is_relative_package("tool"));
        assert!(!is_relative_package("/etc/tool"));
        assert!(!is_relative_package("../tool"));
        assert!(!is_relative_package("acme/../../tool"));
    }

    #[test]
    fn import_path_joins_package_and_group() {
        let plan = Plan {
            group: "origin".into(),
            subcommand: "push".into(),
            package: "github.com/acme/tool/".into(),
            force: false,
            layout: Settings::new("/tmp").layout("github.com/acme/tool", "origin", "push"),
        };
        assert_eq!(plan.import_path(), "github.com/acme/tool/origin");
    }
}

use std::path::PathBuf;

use crate::source::SourceError;

/// Failures of the `command.add` generator.
#[derive(Debug)]
pub enum GenerateError {
    /// The module file exists and `-force` was not given.
    AlreadyExists { subcommand: String, path: PathBuf },
    /// `run` was called without a successful `process`.
    Uninitialized,
    Io {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// An existing source file could not be parsed.
    Parse { path: PathBuf, source: SourceError },
    /// The module declaration could not be added.
    Import {
        import: String,
        target: PathBuf,
        source: SourceError,
    },
}

impl GenerateError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::AlreadyExists { subcommand, path } => {
                write!(f, "subcommand '{subcommand}' already exists at '{}'", path.display())
            }
            GenerateError::Uninitialized => write!(f, "uninitialized"),
            GenerateError::Io {
                context,
                path,
                source,
            } => write!(f, "{context} '{}' - {source}", path.display()),
            GenerateError::Parse { path, source } => {
                write!(f, "error parsing '{}' - {source}", path.display())
            }
            GenerateError::Import {
                import,
                target,
                source,
            } => write!(
                f,
                "error adding import '{import}' to '{}' - {source}",
                target.display()
            ),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io { source, .. } => Some(source),
            GenerateError::Parse { source, .. } | GenerateError::Import { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<GenerateError> for cligen_core::Error {
    fn from(err: GenerateError) -> Self {
        cligen_core::Error::Command(Box::new(err))
    }
}

/// How the dispatcher surfaces an [`Error`].
///
/// `Help` errors are validation failures: the dispatcher prints the message
/// followed by the full usage of the command. `Generic` errors print only
/// their message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Help,
    Generic,
}

/// Error type returned by [`Command::process`](crate::Command::process) and
/// [`Command::run`](crate::Command::run).
pub enum Error {
    /// A mandatory flag was not supplied (or was empty).
    FlagRequired { flag: String },
    /// A flag value could not be interpreted.
    WrongFormat { flag: String },
    /// An I/O operation failed.
    Io {
        context: String,
        source: std::io::Error,
    },
    /// A plain message.
    Message(String),
    /// A command-specific error.
    Command(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn flag_required(flag: impl Into<String>) -> Self {
        Error::FlagRequired { flag: flag.into() }
    }

    pub fn wrong_format(flag: impl Into<String>) -> Self {
        Error::WrongFormat { flag: flag.into() }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FlagRequired { .. } | Error::WrongFormat { .. } => ErrorKind::Help,
            _ => ErrorKind::Generic,
        }
    }

    pub fn is_help(&self) -> bool {
        self.kind() == ErrorKind::Help
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::FlagRequired { flag } => write!(f, "-{flag} is required"),
            Error::WrongFormat { flag } => write!(f, "-{flag} has wrong format"),
            Error::Io { context, source } => write!(f, "{context} - {source}"),
            Error::Message(msg) => write!(f, "{msg}"),
            Error::Command(err) => write!(f, "{err}"),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Command(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Message(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Message(msg.to_string())
    }
}

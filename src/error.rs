use std::path::PathBuf;
use thiserror::Error;

/// Coarse category of a failure, used by the front end to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Io,
    EmptyAggregate,
    Config,
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("The specified input directory does not exist: {}", .0.display())]
    InvalidInputDir(PathBuf),

    #[error("The specified output directory does not exist: {}", .0.display())]
    InvalidOutputDir(PathBuf),

    #[error("The specified file name is empty.")]
    EmptyBaseName,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("directory '{name}' contains no files, last modified time is undefined")]
    EmptyAggregate { name: String },

    #[error("Invalid configuration in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl SummaryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SummaryError::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SummaryError::InvalidInputDir(_)
            | SummaryError::InvalidOutputDir(_)
            | SummaryError::EmptyBaseName => ErrorKind::Validation,
            SummaryError::Io { .. } | SummaryError::Walk { .. } => ErrorKind::Io,
            SummaryError::EmptyAggregate { .. } => ErrorKind::EmptyAggregate,
            SummaryError::Config { .. } => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;

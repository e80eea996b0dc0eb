use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of a single instruction. All of them abort the run.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TranslateError {
    #[error("invalid segment '{0}'")]
    InvalidSegment(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("unsupported instruction '{0}'")]
    UnsupportedInstruction(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{file}:{line}: {source}")]
    Parse {
        file: String,
        line: usize,
        source: TranslateError,
    },
    #[error("{file}: {source}")]
    Compile {
        file: String,
        source: TranslateError,
    },
    #[error("{}: not a .vm source file name", path.display())]
    BadPath { path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    /// The instruction-level failure behind this error, if any.
    pub fn kind(&self) -> Option<&TranslateError> {
        match self {
            Error::Parse { source, .. } | Error::Compile { source, .. } => Some(source),
            Error::BadPath { .. } | Error::Io { .. } => None,
        }
    }
}

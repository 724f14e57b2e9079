// File: ./src/error.rs
//! Error types for list operations that touch the backing file.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ListError.
pub type Result<T> = std::result::Result<T, ListError>;

/// Which side of the file contract failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
}

impl fmt::Display for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAccess::Read => write!(f, "read"),
            FileAccess::Write => write!(f, "write"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ListError {
    /// The backing file could not be opened, read or written.
    #[error("failed to {access} todo file '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        access: FileAccess,
        #[source]
        source: io::Error,
    },

    /// Reload or write-back was requested on a list built from raw text.
    #[error("todo list has no backing file")]
    NoSourcePath,
}

impl ListError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            access: FileAccess::Read,
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            access: FileAccess::Write,
            source,
        }
    }

    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }
}

//! Error taxonomy for manifest and scaffold operations.
//!
//! Library code returns [`ScaffoldError`]; the CLI wraps it in `anyhow` with
//! extra context before it reaches the user.

use std::path::{Path, PathBuf};

/// What kind of manifest entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Library,
    App,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Library => f.write_str("library"),
            EntryKind::App => f.write_str("application"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("{kind} '{name}' is not in the project")]
    NotFound { kind: EntryKind, name: String },

    #[error("{kind} '{name}' already exists in the project")]
    Duplicate { kind: EntryKind, name: String },

    #[error("library '{name}' not found in the project, create the library first")]
    UnknownLibrary { name: String },

    #[error("library '{name}' is used by {}", apps.join(", "))]
    LibraryInUse { name: String, apps: Vec<String> },

    #[error("'{name}' is not a valid C++ identifier")]
    InvalidName { name: String },

    #[error("failed to access {}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn fs(path: &Path, source: std::io::Error) -> Self {
        ScaffoldError::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        ScaffoldError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

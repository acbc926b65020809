//! Error types shared across the scaffolding core

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the scaffolding core.
///
/// Validation errors surface before any filesystem mutation; everything else
/// is fatal to the run and propagates through the pipeline unchanged. The
/// two best-effort post-processing stages (dependency install, git init)
/// never produce these - their failures are downgraded to warnings.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested app name is not a valid npm package name
    #[error("invalid app name '{name}': {reason}")]
    InvalidAppName { name: String, reason: String },

    /// A merge operation was called against a package directory that has
    /// no package.json yet
    #[error("package.json not found at {0}")]
    MissingManifest(PathBuf),

    /// A dependency was requested that the injected catalog does not pin.
    /// The catalog is a closed set, so hitting this means a programming
    /// error (or a test fixture missing an entry) - fail loudly.
    #[error("dependency '{0}' is not in the version catalog")]
    UnknownDependency(&'static str),

    /// The target directory exists, is non-empty, and the caller did not
    /// confirm the overwrite
    #[error("directory {0} already exists and is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

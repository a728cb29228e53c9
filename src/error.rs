use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;
use tracing::warn;

use crate::interval::IntervalError;
use crate::window::WindowId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window {id}: {source}")]
    InvalidWindow {
        id: WindowId,
        #[source]
        source: IntervalError,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error opening {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid id pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub fn invalid_window(id: WindowId, source: IntervalError) -> Self {
        warn!(%id, error = %source, "rejected window");
        Error::InvalidWindow { id, source }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        warn!(path = %path.display(), error = %source, "unreadable snapshot");
        Error::Io { path, source }
    }
}

/// Rejection returned by the pre-submit guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("window {id} conflicts with {}", .with.iter().join(", "))]
    Conflicts { id: WindowId, with: Vec<WindowId> },
}

impl ConflictError {
    pub fn conflicts(id: WindowId, with: Vec<WindowId>) -> Self {
        warn!(%id, count = with.len(), "candidate window conflicts");
        ConflictError::Conflicts { id, with }
    }

    pub fn conflicting_ids(&self) -> &[WindowId] {
        match self {
            ConflictError::Conflicts { with, .. } => with,
        }
    }
}

use std::path::PathBuf;

use super::grid::GridError;

#[derive(Debug, thiserror::Error)]
pub enum ArcError {
    #[error("task data not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed task data in {origin}: {reason}")]
    MalformedData { origin: String, reason: String },

    #[error("no solver registered for task {0}")]
    UnknownTask(String),

    #[error("solver failed: {0}")]
    Solver(String),

    #[error("invalid task id {0:?}: expected 8 lowercase hex characters")]
    InvalidTaskId(String),

    #[error("a solver is already registered for task {0}")]
    DuplicateSolver(String),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

impl ArcError {
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedData { origin: origin.into(), reason: reason.into() }
    }

    /// Load failures abort a single task; everything else is either a
    /// configuration error or already folded into an example result.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MalformedData { .. } | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, ArcError>;

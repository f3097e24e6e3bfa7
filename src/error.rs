use thiserror::Error;

/// Unified error type for mono-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Version parsing error in '{workspace}': {message}")]
    Parse { workspace: String, message: String },

    #[error("Manifest rewrite failed for '{workspace}': {message}")]
    Rewrite { workspace: String, message: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}", join_messages(.0))]
    Aggregate(Vec<ReleaseError>),
}

/// Convenience type alias for Results in mono-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

fn join_messages(errors: &[ReleaseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ReleaseError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        ReleaseError::Configuration(msg.into())
    }

    /// Create a version parsing error for a workspace
    pub fn parse(workspace: impl Into<String>, msg: impl Into<String>) -> Self {
        ReleaseError::Parse {
            workspace: workspace.into(),
            message: msg.into(),
        }
    }

    /// Create a manifest rewrite error for a workspace
    pub fn rewrite(workspace: impl Into<String>, msg: impl Into<String>) -> Self {
        ReleaseError::Rewrite {
            workspace: workspace.into(),
            message: msg.into(),
        }
    }

    /// Create a manifest loading error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Collapse a list of errors into one.
    ///
    /// Returns `Ok(())` for an empty list and the error itself when there is
    /// exactly one, so callers can aggregate unconditionally.
    pub fn aggregate(mut errors: Vec<ReleaseError>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ReleaseError::Aggregate(errors)),
        }
    }
}

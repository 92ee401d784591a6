//! Error taxonomy and the status values public operations hand back

use std::path::PathBuf;

/// Everything that can go wrong inside the config model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No file selected or file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Error parsing JSON: expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("Please load a base configuration first")]
    NoBaseLoaded,

    #[error("Both configurations are needed for a comparison ({0} is missing)")]
    MissingDocument(&'static str),

    #[error("No configuration to save")]
    EmptyConfig,

    #[error("Filename cannot be empty")]
    EmptyFilename,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ModelError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Outcome of a public model operation, ready to show to a user
#[derive(Debug)]
pub enum Status {
    Success(String),
    Info(String),
    Failure(ModelError),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure(_))
    }

    /// The underlying error, for callers that want to match on it
    pub fn error(&self) -> Option<&ModelError> {
        match self {
            Status::Failure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for Status {
    fn from(e: ModelError) -> Self {
        Status::Failure(e)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success(msg) => write!(f, "✅ {}", msg),
            Status::Info(msg) => write!(f, "ℹ️ {}", msg),
            Status::Failure(e) => write!(f, "❌ {}", e),
        }
    }
}

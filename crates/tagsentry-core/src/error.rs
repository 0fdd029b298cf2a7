use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagsentryError {
    #[error("unknown resource kind: {0}")]
    InvalidResourceKind(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("invalid check options: {0}")]
    InvalidOptions(String),

    #[error("resource directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TagsentryError {
    /// True for errors caused by the run's configuration rather than the
    /// resource directory. Configuration errors are resolved before any
    /// directory call is made.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TagsentryError::InvalidResourceKind(_)
                | TagsentryError::UnknownCheck(_)
                | TagsentryError::UnknownRegion(_)
                | TagsentryError::InvalidOptions(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TagsentryError>;

use thiserror::Error;

/// Failures surfaced by the card pipeline and its data source.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("User \"{username}\" not found")]
    UserNotFound { username: String },

    #[error("Invalid pull request record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("{message}")]
    UpstreamFailure {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CardError {
    pub fn upstream(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        CardError::UpstreamFailure {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CardError::UserNotFound { .. } => 1,
            CardError::UpstreamFailure { .. } => 2,
            CardError::InvalidRecord { .. } => 3,
            CardError::InvalidParameter(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;

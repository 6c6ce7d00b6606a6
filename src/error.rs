/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Unrecognized language token: {0}")]
    LanguageResolution(String),

    #[error("Unrecognized voice token: {0}")]
    VoiceResolution(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable label for this error, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::LanguageResolution(_) => "language_resolution",
            Self::VoiceResolution(_) => "voice_resolution",
            Self::Io(_) => "io",
            Self::Synthesis(_) => "synthesis",
            Self::Storage(_) => "storage",
            Self::Persistence(_) => "persistence",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Errors raised while turning a file name into a task
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::LanguageResolution(_) | Self::VoiceResolution(_)
        )
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => AppError::Io(io_err),
                other => AppError::Format(format!("{:?}", other)),
            }
        } else {
            AppError::Format(err.to_string())
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

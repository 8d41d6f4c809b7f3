//! Error types for the Sloka playback core.


/// Result type alias for Sloka operations
pub type SlokaResult<T> = Result<T, SlokaError>;

/// Main error type for Sloka operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlokaError {
    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Error message describing the configuration issue
        message: String,
    },

    /// File I/O error
    #[error("File I/O error: {message}")]
    FileError {
        /// Error message describing the file operation failure
        message: String,
    },

    /// The speech engine refused or failed a request
    #[error("Speech engine error: {message}")]
    SpeechEngineError {
        /// Error message describing the engine failure
        message: String,
    },

    /// The playback task is no longer running
    #[error("Player closed: {message}")]
    PlayerClosed {
        /// Error message describing which call hit the closed player
        message: String,
    },
}

impl SlokaError {
    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Create a new file error
    #[must_use]
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::FileError {
            message: message.into(),
        }
    }

    /// Create a new speech engine error
    #[must_use]
    pub fn speech_engine<S: Into<String>>(message: S) -> Self {
        Self::SpeechEngineError {
            message: message.into(),
        }
    }

    /// Create a new player closed error
    #[must_use]
    pub fn player_closed<S: Into<String>>(message: S) -> Self {
        Self::PlayerClosed {
            message: message.into(),
        }
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::ConfigurationError { .. }
        )
    }

    /// Get the error category for logging
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "input",
            Self::ConfigurationError { .. } => "configuration",
            Self::FileError { .. } => "file",
            Self::SpeechEngineError { .. } => "speech_engine",
            Self::PlayerClosed { .. } => "player",
        }
    }
}

// Convert from common error types
impl From<std::io::Error> for SlokaError {
    fn from(err: std::io::Error) -> Self {
        Self::file(err.to_string())
    }
}

impl From<toml::de::Error> for SlokaError {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(format!("Invalid TOML: {err}"))
    }
}

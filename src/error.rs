use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(soittobotti::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(soittobotti::config))]
    Config(String),

    #[error("Credential error: {0}")]
    #[diagnostic(code(soittobotti::credential))]
    Credential(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(soittobotti::google_calendar))]
    GoogleCalendar(String),

    #[error("Twilio API error: {0}")]
    #[diagnostic(code(soittobotti::twilio))]
    Twilio(String),

    #[error(transparent)]
    #[diagnostic(code(soittobotti::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(soittobotti::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(soittobotti::other))]
    Other(String),
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create credential errors
pub fn credential_error(message: &str) -> Error {
    Error::Credential(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create Twilio errors
pub fn twilio_error(message: &str) -> Error {
    Error::Twilio(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}

//! Error types for the trip wizard.

use crate::wizard::state::WizardStep;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Print error: {0}")]
    Print(#[from] PrintError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A form step failed its required-field rules.
///
/// The message is user-facing and shown verbatim in a notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub step: WizardStep,
    pub message: String,
}

impl ValidationError {
    pub fn new(step: WizardStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

/// Failures while creating the profile or generating the itinerary.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Profile creation response did not contain a user_id")]
    MissingUserId,

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("An itinerary is already being generated for this session")]
    AlreadyInProgress,

    #[error("No submitted profile is available to generate from")]
    NoProfile,

    #[error("Nothing to retry: the last generation did not fail")]
    NothingToRetry,
}

/// Printing errors.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("Nothing to print: no itinerary has been generated")]
    NothingToPrint,

    #[error("Printer {name} failed: {reason}")]
    Failed { name: String, reason: String },

    #[error("Could not build the printable document: {0}")]
    Render(#[from] askama::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for pneumodetect.
//!
//! This module defines all error types used throughout the pneumodetect crate.
//! The simulators themselves have no failure path; errors come from
//! configuration, rejected user actions and navigation.

use thiserror::Error;

use crate::cough::Phase;
use crate::route::Route;

/// The main error type for pneumodetect operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Session Errors ===
    /// A recording was requested while a cycle is already in progress.
    #[error("cannot start recording: session is {phase}")]
    SessionBusy {
        /// Phase the session was in when the start was rejected.
        phase: Phase,
    },

    // === Form Errors ===
    /// A required form field was left empty.
    #[error("{form} form: {field} is required")]
    MissingField {
        /// Name of the form.
        form: &'static str,
        /// Name of the empty field.
        field: &'static str,
    },

    // === Navigation Errors ===
    /// The path does not name a known route.
    #[error("unknown route: {path}")]
    UnknownRoute {
        /// The path that failed to resolve.
        path: String,
    },

    /// The current page has no link to the requested route.
    #[error("no link from {from} to {to}")]
    NoLink {
        /// The page being navigated away from.
        from: Route,
        /// The requested destination.
        to: Route,
    },

    /// The action belongs to a page other than the current one.
    #[error("{action} is only available on {expected}, current page is {current}")]
    WrongPage {
        /// What was attempted.
        action: &'static str,
        /// The page that offers the action.
        expected: Route,
        /// The page the user is on.
        current: Route,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for pneumodetect operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a config validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(form: &'static str, field: &'static str) -> Self {
        Self::MissingField { form, field }
    }

    /// Check if this error is a rejected start on a busy session.
    #[must_use]
    pub fn is_session_busy(&self) -> bool {
        matches!(self, Self::SessionBusy { .. })
    }

    /// Check if this error came from navigation.
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownRoute { .. } | Self::NoLink { .. } | Self::WrongPage { .. }
        )
    }
}

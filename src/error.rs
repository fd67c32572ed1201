//! Error types for the `Voyager` library
//!
//! Absence of data is never an error here: an unresolvable place or a day
//! without a forecast comes back as `None` or a missing map entry. These
//! variants cover the three things that can actually go wrong —
//! misconfiguration, upstream API failures, and rejected caller input.

use thiserror::Error;

/// Main error type for the `Voyager` library
#[derive(Error, Debug)]
pub enum VoyagerError {
    /// Bad or missing configuration: API key, timezone, URLs
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or place API request failures
    #[error("API error: {message}")]
    Api { message: String },

    /// Rejected caller input, e.g. an empty location name
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl VoyagerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message suitable for showing to an end user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            VoyagerError::Config { .. } => {
                "Voyager is misconfigured. Check your config file and your OpenWeatherMap API key."
                    .to_string()
            }
            VoyagerError::Api { .. } => {
                "Weather and place services are unreachable right now. Check your internet \
                 connection and try again."
                    .to_string()
            }
            VoyagerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = VoyagerError::config("missing API key");
        assert!(matches!(config_err, VoyagerError::Config { .. }));

        let api_err = VoyagerError::api("forecast request failed with status: 503");
        assert!(matches!(api_err, VoyagerError::Api { .. }));

        let validation_err = VoyagerError::validation("Location cannot be empty");
        assert!(matches!(validation_err, VoyagerError::Validation { .. }));
    }

    #[test]
    fn test_display_includes_message() {
        let err = VoyagerError::api("geocoding request failed");
        assert_eq!(err.to_string(), "API error: geocoding request failed");
    }

    #[test]
    fn test_user_messages() {
        let config_err = VoyagerError::config("bad timezone");
        assert!(config_err.user_message().contains("misconfigured"));
        assert!(config_err.user_message().contains("OpenWeatherMap"));

        let api_err = VoyagerError::api("timeout");
        assert!(api_err.user_message().contains("unreachable"));

        let validation_err = VoyagerError::validation("Location cannot be empty");
        assert!(
            validation_err
                .user_message()
                .contains("Location cannot be empty")
        );
    }
}

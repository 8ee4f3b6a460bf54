//! Error types for the outer surface of a button module.
//!
//! Resolution and classification never fail; these errors only come from
//! loading configuration files, parsing user input and running click commands.

use std::path::Path;

/// Result type for fallible button-module operations.
pub type Result<T> = std::result::Result<T, ButtonError>;

/// Common error type for button-module operations.
#[derive(Debug, thiserror::Error)]
pub enum ButtonError {
    /// I/O error while reading configuration or talking to the bar.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a configuration document.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse
        message: String,
        /// Optional source error for chaining
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error (wrong shape, unsupported file, etc.).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration issue
        message: String,
        /// The invalid configuration value if applicable
        value: Option<String>,
    },

    /// An input event line could not be understood.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what makes the input invalid
        message: String,
        /// The offending input if it can be safely displayed
        input: Option<String>,
    },

    /// A click command could not be started.
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        /// The shell command that was configured for the click
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl ButtonError {
    /// Create a new parse error with a source error.
    pub fn parse_with_source<S: Into<String>, E>(message: S, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error with the invalid value.
    pub fn config_with_value<S: Into<String>, V: Into<String>>(message: S, value: V) -> Self {
        Self::Config {
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// Create an error for a configuration file with an unknown extension.
    pub fn unsupported_file(path: &Path) -> Self {
        Self::config_with_value(
            "Unsupported config file extension (expected .json or .ron)",
            path.display().to_string(),
        )
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>, I: Into<String>>(message: S, input: I) -> Self {
        Self::InvalidInput {
            message: message.into(),
            input: Some(input.into()),
        }
    }

    /// Create a new spawn error for a click command.
    pub fn spawn<S: Into<String>>(command: S, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let err = ButtonError::parse_with_source(
            "Failed to parse JSON config",
            std::io::Error::from(std::io::ErrorKind::InvalidData),
        );
        assert!(matches!(err, ButtonError::Parse { source: Some(_), .. }));

        let err = ButtonError::config_with_value("Top-level config must be an object", "[]");
        assert!(matches!(err, ButtonError::Config { value: Some(_), .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error: Top-level config must be an object"
        );

        let err = ButtonError::invalid_input("Unknown event", "jump 3");
        assert!(matches!(err, ButtonError::InvalidInput { .. }));
    }

    #[test]
    fn test_spawn_error_names_command() {
        let err = ButtonError::spawn(
            "notify-send hi",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("notify-send hi"));
    }
}

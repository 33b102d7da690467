//! Error types for the Playground XYZ adapter.
//!
//! Errors are carried inside [`error_stack::Report`] so callers can attach
//! context while propagating them with `change_context`.

use derive_more::{Display, Error};

/// Errors raised by the adapter outside of the bid hot path.
///
/// Validation and response interpretation never fail; only configuration
/// loading and payload serialization can produce these.
#[derive(Debug, Display, Error)]
pub enum PlaygroundXyzError {
    /// Settings could not be loaded, merged, or validated.
    #[display("Configuration error: {message}")]
    Configuration {
        #[error(not(source))]
        message: String,
    },

    /// The host handed the adapter input it cannot work with.
    #[display("Invalid request: {message}")]
    InvalidRequest {
        #[error(not(source))]
        message: String,
    },

    /// The outgoing payload could not be encoded.
    #[display("Serialization error: {message}")]
    Serialization {
        #[error(not(source))]
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlaygroundXyzError::Configuration {
            message: "missing endpoint".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing endpoint");

        let err = PlaygroundXyzError::Serialization {
            message: "bad payload".to_string(),
        };
        assert_eq!(err.to_string(), "Serialization error: bad payload");
    }
}

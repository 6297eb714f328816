//! Error types shared across the pipeline
//!
//! - [`ConfigError`]: resolution and validation failures, fatal for a run
//! - [`BridgeError`]: failures of the text-generation collaborator

use crate::key::{Framework, ModelId};

/// Configuration and resolution errors
///
/// Raised eagerly when an engine is built; never deferred to generation time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No analyzer is registered for the framework
    #[error("no analyzer found for framework: {0}")]
    UnsupportedFramework(Framework),

    /// No bridge is registered for the model id
    #[error("unsupported model: {0}")]
    UnsupportedModel(ModelId),

    /// A field holds a value outside its domain
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field (camelCase, as in the config file)
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Config text could not be decoded
    #[error("config parse error: {0}")]
    Parse(String),

    /// Config file could not be read
    #[error("config io error: {0}")]
    Io(String),
}

impl ConfigError {
    /// Create an invalid-value error
    #[inline]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Model bridge errors
///
/// "No answer" is not an error: bridges return empty-but-parsable text for
/// that case. These variants cover the bridge being unable to answer at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The call exceeded its deadline
    #[error("model call timed out after {seconds}s")]
    Timeout {
        /// Deadline that was exceeded
        seconds: u64,
    },

    /// Backend temporarily unavailable
    #[error("model backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with something that is not text
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// All retry attempts failed
    #[error("model call failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: Box<BridgeError>,
    },
}

impl BridgeError {
    /// Check if the error is worth retrying
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::UnsupportedFramework(Framework::Custom("cobol".into()));
        assert_eq!(err.to_string(), "no analyzer found for framework: cobol");

        let err = ConfigError::invalid("maxScenariosPerCategory", "must be at least 1");
        assert!(err.to_string().contains("maxScenariosPerCategory"));
    }

    #[test]
    fn bridge_error_retryable() {
        assert!(BridgeError::Timeout { seconds: 5 }.is_retryable());
        assert!(BridgeError::Unavailable("503".into()).is_retryable());
        assert!(!BridgeError::InvalidResponse("binary".into()).is_retryable());

        let exhausted = BridgeError::RetriesExhausted {
            attempts: 3,
            last: Box::new(BridgeError::Timeout { seconds: 5 }),
        };
        assert!(!exhausted.is_retryable());
        assert!(exhausted.to_string().contains("3 attempts"));
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the pacer call-rate-control wrappers
//!
//! The wrappers themselves perform no I/O, so the taxonomy is small: malformed
//! configuration rejected at construction, and failures of a wrapped function
//! that ran on the scheduler's context where no caller is listening.
//!
//! # Examples
//!
//! ```
//! use pacer_error::{PacerError, Result};
//!
//! fn wait_from_user(millis: i64) -> Result<u64> {
//!     u64::try_from(millis).map_err(|_| PacerError::InvalidWait { millis })
//! }
//!
//! assert!(wait_from_user(-5).is_err());
//! ```

/// Root error type for all pacer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacerError {
    /// A negative wait was supplied
    ///
    /// Debounce and throttle windows are durations; a negative window has no
    /// meaningful timing and is rejected when the wrapper is configured.
    #[error("Invalid wait: {millis}ms (wait must be non-negative)")]
    InvalidWait {
        /// The rejected wait, in milliseconds
        millis: i64,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what is wrong
        message: String,
    },

    /// A wrapped function panicked while running on the scheduler
    ///
    /// Trailing-edge invocations have no synchronous caller. Their panics are
    /// caught and surfaced as this variant instead of tearing down the
    /// scheduler's execution context.
    #[error("Wrapped function panicked: {context}")]
    CallbackPanic {
        /// The panic payload, when it was a string
        context: String,
    },
}

impl PacerError {
    /// Create an invalid wait error
    #[must_use]
    pub const fn invalid_wait(millis: i64) -> Self {
        Self::InvalidWait { millis }
    }

    /// Create an invalid configuration error with the given message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Build a `CallbackPanic` from a payload returned by `catch_unwind`
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let context = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::CallbackPanic { context }
    }

    /// Check if this error was raised while building a wrapper
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidWait { .. } | Self::InvalidConfig { .. })
    }
}

/// Specialized Result type for pacer operations
///
/// ```
/// use pacer_error::Result;
///
/// fn configure() -> Result<u64> {
///     Ok(100)
/// }
/// ```
pub type Result<T> = std::result::Result<T, PacerError>;

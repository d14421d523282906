// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-wrapper configuration, fixed at construction.
//!
//! Options deserialize with defaults for missing fields, and durations use
//! human-readable strings:
//!
//! ```
//! use pacer::{DebounceConfig, DebounceOptions};
//! use std::time::Duration;
//!
//! let config: DebounceConfig = serde_json::from_str(r#"{ "wait": "250ms", "leading": true }"#).unwrap();
//!
//! assert_eq!(config.wait, Duration::from_millis(250));
//! assert_eq!(config.options, DebounceOptions::default().with_leading(true));
//! ```

use core::fmt::Debug;
use core::time::Duration;
use pacer_error::{PacerError, Result};
use serde::{Deserialize, Serialize};

/// Options accepted by a wrapper, checked against its wait.
pub trait WrapperOptions: Copy + Debug + Default + Send + Sync + 'static {
    /// # Errors
    /// Returns [`PacerError::InvalidConfig`] when the options cannot work with `wait`.
    fn validate(&self, wait: Duration) -> Result<()>;
}

/// Edge policy of a debounced function.
///
/// Defaults to trailing-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceOptions {
    /// Invoke on the first call of a burst.
    pub leading: bool,
    /// Invoke once the burst has been quiet for `wait`.
    pub trailing: bool,
    /// Also treat the call as invoking once this long has passed since the
    /// last actual invocation. Unset means bursts are only ever split by a
    /// quiet period.
    #[serde(with = "humantime_serde")]
    pub max_wait: Option<Duration>,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }
}

impl DebounceOptions {
    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

impl WrapperOptions for DebounceOptions {
    fn validate(&self, wait: Duration) -> Result<()> {
        match self.max_wait {
            Some(max_wait) if max_wait < wait => Err(PacerError::invalid_config(format!(
                "max_wait ({max_wait:?}) is shorter than wait ({wait:?})"
            ))),
            _ => Ok(()),
        }
    }
}

/// Edge policy of a throttled function.
///
/// Defaults to both edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleOptions {
    /// Invoke immediately when the interval is open.
    pub leading: bool,
    /// Flush the last suppressed call when the interval closes.
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

impl ThrottleOptions {
    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

impl WrapperOptions for ThrottleOptions {
    fn validate(&self, _wait: Duration) -> Result<()> {
        Ok(())
    }
}

/// Wait plus edge options for one wrapper instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperConfig<O> {
    #[serde(with = "humantime_serde")]
    pub wait: Duration,
    #[serde(flatten)]
    pub options: O,
}

pub type DebounceConfig = WrapperConfig<DebounceOptions>;
pub type ThrottleConfig = WrapperConfig<ThrottleOptions>;

impl<O: WrapperOptions> WrapperConfig<O> {
    pub fn new(wait: Duration, options: O) -> Self {
        Self { wait, options }
    }

    /// Builds a config from a signed millisecond wait, as hosts usually supply it.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidWait`] for a negative wait, or the options'
    /// own validation error.
    pub fn from_millis(millis: i64, options: O) -> Result<Self> {
        let wait = u64::try_from(millis)
            .map(Duration::from_millis)
            .map_err(|_| PacerError::invalid_wait(millis))?;
        let config = Self::new(wait, options);
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns the options' validation error.
    pub fn validate(&self) -> Result<()> {
        self.options.validate(self.wait)
    }
}

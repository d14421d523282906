// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the factories, handles and options.
//!
//! ```
//! use pacer::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> pacer::Result<()> {
//! let runtime = ManualRuntime::new();
//! let scroll = throttle(|offset: u32| offset, Duration::from_millis(16), ThrottleOptions::default(), runtime)?;
//! assert_eq!(scroll.call(120), Some(120));
//! # Ok(())
//! # }
//! ```

pub use crate::debounce::{debounce, debounce_with_receiver, Debounced};
pub use crate::memoize::{memoize, memoize_with_resolver, Memoized};
pub use crate::options::{DebounceOptions, ThrottleOptions, WrapperConfig};
pub use crate::throttle::{throttle, throttle_with_receiver, Throttled};

pub use pacer_runtime::{Clock, ManualRuntime, Runtime, Scheduler};
#[cfg(feature = "runtime-tokio")]
pub use pacer_runtime::TokioRuntime;

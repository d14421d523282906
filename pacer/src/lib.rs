// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Call-rate-control wrappers for plain functions.
//!
//! Each wrapper takes a function and returns a handle with the same calling
//! convention but altered timing or caching:
//!
//! - **`debounce`** - invoke only after calls have been quiet for `wait`
//! - **`throttle`** - invoke at most once per `wait`
//! - **`memoize`** - cache results by a key derived from the arguments
//!
//! Debounce and throttle run on any [`Runtime`](pacer_runtime::Runtime): a
//! clock plus a deferred-callback scheduler. Enable `runtime-tokio` (default)
//! for [`TokioRuntime`](pacer_runtime::TokioRuntime), or drive a
//! [`ManualRuntime`](pacer_runtime::ManualRuntime) by hand.
//!
//! Calls that do not invoke the wrapped function return the result of the
//! last invocation that did.
//!
//! # Example
//!
//! ```rust,no_run
//! use pacer::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let search = debounce(
//!     |query: String| format!("results for {query}"),
//!     Duration::from_millis(300),
//!     DebounceOptions::default(),
//!     TokioRuntime::current()?,
//! )?;
//!
//! search.call("r".to_string());
//! search.call("ru".to_string());
//! search.call("rust".to_string());
//!
//! tokio::time::sleep(Duration::from_millis(400)).await;
//! assert_eq!(search.last_result().as_deref(), Some("results for rust"));
//! # Ok(())
//! # }
//! ```

mod debounce;
mod invocation;
mod logging;
mod memoize;
pub mod options;
mod throttle;

pub mod prelude;

pub use debounce::{debounce, debounce_with_receiver, Debounced};
pub use memoize::{memoize, memoize_with_resolver, Memoized};
pub use options::{
    DebounceConfig, DebounceOptions, ThrottleConfig, ThrottleOptions, WrapperConfig,
    WrapperOptions,
};
pub use pacer_error::{PacerError, Result};
pub use throttle::{throttle, throttle_with_receiver, Throttled};

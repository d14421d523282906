// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for the pacer wrappers.
//!
//! A wrapper needs exactly two services from its host: a clock to read the
//! current instant, and a scheduler that runs a callback after a delay and
//! can cancel it before it fires. Both are traits so that the same
//! debounce/throttle state machine runs on tokio or on a virtual clock.
//!
//! - **`Clock`** - reads the current instant
//! - **`Scheduler`** - schedules and cancels deferred callbacks by token
//! - **`Runtime`** - anything that is both
//!
//! Implementations:
//! - `runtime-tokio` (default) - [`impls::tokio::TokioRuntime`]
//! - always available - [`impls::manual::ManualRuntime`], a deterministic
//!   virtual clock driven by `advance`

pub mod clock;
pub mod impls;
pub mod runtime;
pub mod scheduler;

pub use clock::{elapsed_since, Clock};
pub use impls::manual::{ManualInstant, ManualRuntime, ManualToken};
#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioRuntime, TokioToken};
pub use runtime::Runtime;
pub use scheduler::{Callback, Scheduler};

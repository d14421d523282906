// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the pacer wrappers.
//!
//! Designed for use in development and testing only, not for production code.
//!
//! - `Recorder<A>` - thread-safe log of the arguments a wrapped function saw
//! - `test_data` - `Person` fixtures
//! - `helpers` - shortcuts for driving a `ManualRuntime` in milliseconds
//!
//! ```rust
//! use pacer_test_utils::{test_data::person_alice, Recorder};
//!
//! let recorder = Recorder::new();
//! let echo = recorder.echo();
//!
//! assert_eq!(echo(person_alice()), person_alice());
//! assert_eq!(recorder.calls(), vec![person_alice()]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod person;
pub mod recorder;
pub mod test_data;

pub use helpers::{advance_ms, at_ms, now_ms};
pub use person::Person;
pub use recorder::Recorder;

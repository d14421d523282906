// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
use crate::{clock::Clock, scheduler::Callback, scheduler::Scheduler};

#[cfg(feature = "runtime-tokio")]
use pacer_error::{PacerError, Result};

/// Runtime backed by a tokio runtime handle.
///
/// The clock reads `tokio::time::Instant`, so paused test time
/// (`tokio::time::pause`/`advance`) drives the wrappers as well.
/// Each scheduled callback is a spawned task that sleeps for the delay
/// and then runs the callback on a tokio worker.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug)]
pub struct TokioRuntime {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "runtime-tokio")]
impl TokioRuntime {
    /// Uses the tokio runtime the caller is currently running in.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidConfig`] when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(Self::from_handle)
            .map_err(|err| PacerError::invalid_config(format!("no tokio runtime: {err}")))
    }

    #[must_use]
    pub fn from_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

#[cfg(feature = "runtime-tokio")]
#[derive(Debug)]
pub struct TokioToken(tokio::task::AbortHandle);

#[cfg(feature = "runtime-tokio")]
impl Clock for TokioRuntime {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}

#[cfg(feature = "runtime-tokio")]
impl Scheduler for TokioRuntime {
    type Token = TokioToken;

    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Token {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        TokioToken(task.abort_handle())
    }

    fn cancel(&self, token: Self::Token) {
        token.0.abort();
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::time::Duration;

/// A deferred callback handed to a [`Scheduler`].
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Host facility that runs a callback after a delay.
///
/// Tokens are opaque. Cancelling a token whose callback already ran, or that
/// was already cancelled, must be a no-op.
pub trait Scheduler: Clone + Send + Sync + Debug + 'static {
    type Token: Debug + Send + 'static;

    /// Runs `callback` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Token;

    /// Prevents a scheduled callback from running, if it has not run yet.
    fn cancel(&self, token: Self::Token);
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pieces shared by the debounce and throttle state machines.

use pacer_error::PacerError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// The wrapped function, with its receiver passed explicitly.
pub(crate) type WrappedFn<C, A, T> = dyn Fn(C, A) -> T + Send + Sync;

/// Receiver and arguments of a call that has not been invoked yet.
#[derive(Debug)]
pub(crate) struct Invocation<C, A> {
    pub(crate) receiver: C,
    pub(crate) args: A,
}

impl<C, A> Invocation<C, A> {
    pub(crate) fn run<T>(self, func: &WrappedFn<C, A, T>) -> T {
        func(self.receiver, self.args)
    }
}

/// The single deferred callback a wrapper may have outstanding.
///
/// `generation` is captured by the callback; a callback whose generation no
/// longer matches the slot has been cancelled or superseded and must do
/// nothing.
#[derive(Debug)]
pub(crate) struct PendingTimer<Tok> {
    pub(crate) generation: u64,
    pub(crate) token: Tok,
}

/// Result of the most recent invocation, by start order.
///
/// Invocations run outside the state lock and can finish out of order on a
/// multi-threaded runtime. A result is stored only if no invocation that
/// started later has already stored its own.
#[derive(Debug)]
pub(crate) struct LatestResult<T> {
    value: Option<T>,
    started: u64,
    stored: u64,
}

impl<T> LatestResult<T> {
    pub(crate) const fn new() -> Self {
        Self {
            value: None,
            started: 0,
            stored: 0,
        }
    }

    /// Registers an invocation about to start; pass the ticket to `store`.
    pub(crate) fn begin(&mut self) -> u64 {
        self.started += 1;
        self.started
    }

    pub(crate) fn store(&mut self, ticket: u64, value: T) {
        if ticket > self.stored {
            self.stored = ticket;
            self.value = Some(value);
        }
    }
}

impl<T: Clone> LatestResult<T> {
    pub(crate) fn get(&self) -> Option<T> {
        self.value.clone()
    }
}

/// Runs an invocation that has no synchronous caller.
///
/// A panic is caught and logged; `None` is returned so the caller keeps the
/// previous result.
pub(crate) fn invoke_detached<T>(operator: &str, invoke: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(invoke)) {
        Ok(result) => Some(result),
        Err(payload) => {
            let err = PacerError::from_panic(payload.as_ref());
            crate::error!("{}: trailing invocation failed: {}", operator, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LatestResult;

    #[test]
    fn later_started_invocation_wins_when_finishing_first() {
        let mut latest = LatestResult::new();
        let slow = latest.begin();
        let fast = latest.begin();

        latest.store(fast, "fast");
        latest.store(slow, "slow");

        assert_eq!(latest.get(), Some("fast"));
    }

    #[test]
    fn failed_invocation_keeps_previous_result() {
        let mut latest = LatestResult::new();
        let first = latest.begin();
        latest.store(first, 1);

        let _failed = latest.begin();

        assert_eq!(latest.get(), Some(1));
    }
}

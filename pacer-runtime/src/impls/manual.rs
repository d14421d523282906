// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic runtime with a virtual clock.
//!
//! Nothing happens until the owner calls [`ManualRuntime::advance`]: time
//! then moves forward and every callback whose deadline falls inside the
//! window runs on the calling thread, in deadline order, with the clock set
//! to that deadline. Callbacks scheduled from inside a callback are honoured
//! within the same `advance` if they fall due before its end.

use crate::{clock::Clock, scheduler::Callback, scheduler::Scheduler};
use core::fmt;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Millisecond instant on a [`ManualRuntime`]'s virtual clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualInstant(u64);

impl ManualInstant {
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

fn to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl core::ops::Add<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn add(self, duration: Duration) -> ManualInstant {
        ManualInstant(self.0.saturating_add(to_millis(duration)))
    }
}

impl core::ops::Sub<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn sub(self, duration: Duration) -> ManualInstant {
        ManualInstant(self.0.saturating_sub(to_millis(duration)))
    }
}

impl core::ops::Sub for ManualInstant {
    type Output = Duration;

    fn sub(self, other: ManualInstant) -> Duration {
        Duration::from_millis(self.0.saturating_sub(other.0))
    }
}

/// Token for a callback queued on a [`ManualRuntime`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ManualToken {
    deadline: ManualInstant,
    id: u64,
}

#[derive(Default)]
struct ManualState {
    now: ManualInstant,
    next_id: u64,
    queue: BTreeMap<(ManualInstant, u64), Callback>,
}

impl fmt::Debug for ManualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualState")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ManualRuntime {
    state: Arc<Mutex<ManualState>>,
}

impl ManualRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `duration`, firing every callback that
    /// falls due on the way.
    pub fn advance(&self, duration: Duration) {
        let target = self.state.lock().now + duration;
        self.advance_to(target);
    }

    /// Moves the clock forward to `target`, firing due callbacks.
    ///
    /// Does nothing to the clock if `target` is in the past, but still fires
    /// callbacks that are already due.
    pub fn advance_to(&self, target: ManualInstant) {
        loop {
            // The lock is released before the callback runs: callbacks
            // schedule and cancel on this same runtime.
            let due = {
                let mut state = self.state.lock();
                let key = match state.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                if key.0 > state.now {
                    state.now = key.0;
                }
                state.queue.remove(&key)
            };
            if let Some(callback) = due {
                callback();
            }
        }

        let mut state = self.state.lock();
        if target > state.now {
            state.now = target;
        }
    }

    /// Sets the clock to `instant` without firing anything.
    ///
    /// Moving backward simulates a wall clock adjustment.
    pub fn set_now(&self, instant: ManualInstant) {
        self.state.lock().now = instant;
    }

    /// Number of callbacks still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }
}

impl Clock for ManualRuntime {
    type Instant = ManualInstant;

    fn now(&self) -> Self::Instant {
        self.state.lock().now
    }
}

impl Scheduler for ManualRuntime {
    type Token = ManualToken;

    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Token {
        let mut state = self.state.lock();
        let deadline = state.now + delay;
        let id = state.next_id;
        state.next_id += 1;
        state.queue.insert((deadline, id), callback);
        ManualToken { deadline, id }
    }

    fn cancel(&self, token: Self::Token) {
        self.state.lock().queue.remove(&(token.deadline, token.id));
    }
}

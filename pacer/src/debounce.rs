// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce: delay invocation until calls have been quiet for `wait`.
//!
//! Every call records its receiver and arguments as the pending invocation.
//! A burst of calls closer together than `wait` collapses into at most two
//! invocations of the wrapped function:
//! - **leading** (off by default): the first call of a burst invokes
//!   immediately
//! - **trailing** (on by default): once no call has arrived for `wait`, the
//!   most recent pending call is invoked
//!
//! The invoke condition is evaluated both when a call arrives and when the
//! deferred callback fires; if a newer call arrived in the meantime the
//! callback reschedules itself for the remaining quiet time, so a wrapper
//! never has more than one callback outstanding.
//!
//! Calls return the result of the most recent actual invocation, which is
//! stale when the call itself did not invoke, and `None` before the first
//! invocation.
//!
//! # Example
//!
//! ```
//! use pacer::{debounce, DebounceOptions};
//! use pacer_runtime::ManualRuntime;
//! use std::time::Duration;
//!
//! # fn main() -> pacer::Result<()> {
//! let runtime = ManualRuntime::new();
//! let save = debounce(|text: &str| text.len(), Duration::from_millis(100), DebounceOptions::default(), runtime.clone())?;
//!
//! assert_eq!(save.call("d"), None);
//! assert_eq!(save.call("draft"), None);
//!
//! runtime.advance(Duration::from_millis(100));
//! assert_eq!(save.last_result(), Some(5));
//! # Ok(())
//! # }
//! ```

use crate::invocation::{invoke_detached, Invocation, LatestResult, PendingTimer, WrappedFn};
use crate::options::{DebounceConfig, DebounceOptions, WrapperConfig};
use crate::{debug, trace};
use core::fmt;
use core::time::Duration;
use pacer_error::Result;
use pacer_runtime::{elapsed_since, Runtime};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Debounces `func`, which takes its arguments as a single value.
///
/// # Errors
/// Returns an error if `options` is inconsistent with `wait`.
pub fn debounce<A, T, R, F>(
    func: F,
    wait: Duration,
    options: DebounceOptions,
    runtime: R,
) -> Result<Debounced<(), A, T, R>>
where
    F: Fn(A) -> T + Send + Sync + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    debounce_with_receiver(move |(), args| func(args), wait, options, runtime)
}

/// Debounces `func`, which also receives an explicit receiver per call.
///
/// # Errors
/// Returns an error if `options` is inconsistent with `wait`.
pub fn debounce_with_receiver<C, A, T, R, F>(
    func: F,
    wait: Duration,
    options: DebounceOptions,
    runtime: R,
) -> Result<Debounced<C, A, T, R>>
where
    F: Fn(C, A) -> T + Send + Sync + 'static,
    C: Send + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    Debounced::new(func, WrapperConfig::new(wait, options), runtime)
}

/// Handle to a debounced function.
///
/// Clones share the same state. Once every handle is dropped, any callback
/// still queued on the runtime is cancelled.
pub struct Debounced<C, A, T, R: Runtime> {
    inner: Arc<Inner<C, A, T, R>>,
}

struct Inner<C, A, T, R: Runtime> {
    func: Box<WrappedFn<C, A, T>>,
    config: DebounceConfig,
    runtime: R,
    state: Mutex<DebounceState<C, A, T, R>>,
}

struct DebounceState<C, A, T, R: Runtime> {
    pending: Option<Invocation<C, A>>,
    last_call_time: Option<R::Instant>,
    last_invoke_time: Option<R::Instant>,
    /// First call of the current burst; with `last_invoke_time`, the start
    /// of the `max_wait` window.
    burst_start: Option<R::Instant>,
    timer: Option<PendingTimer<R::Token>>,
    generation: u64,
    last_result: LatestResult<T>,
}

impl<C, A, T, R: Runtime> DebounceState<C, A, T, R> {
    fn new() -> Self {
        Self {
            pending: None,
            last_call_time: None,
            last_invoke_time: None,
            burst_start: None,
            timer: None,
            generation: 0,
            last_result: LatestResult::new(),
        }
    }
}

impl<C, A, T, R> Debounced<C, A, T, R>
where
    C: Send + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// # Errors
    /// Returns an error if the config does not validate.
    pub fn new<F>(func: F, config: DebounceConfig, runtime: R) -> Result<Self>
    where
        F: Fn(C, A) -> T + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                func: Box::new(func),
                config,
                runtime,
                state: Mutex::new(DebounceState::new()),
            }),
        })
    }

    /// Calls the debounced function with an explicit receiver.
    ///
    /// Invokes immediately only on a leading edge; otherwise the call becomes
    /// the pending invocation and the last result is returned.
    pub fn call_with(&self, receiver: C, args: A) -> Option<T> {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        let now = inner.runtime.now();
        let is_invoking = inner.should_invoke(&state, now);
        let invocation = Invocation { receiver, args };
        state.last_call_time = Some(now);

        if is_invoking && state.timer.is_none() {
            state.burst_start = Some(now);
            if inner.config.options.leading {
                state.pending = None;
                state.last_invoke_time = Some(now);
                let ticket = state.last_result.begin();
                drop(state);

                trace!("debounce: invoking on leading edge");
                let result = invocation.run(&*inner.func);
                inner.state.lock().last_result.store(ticket, result.clone());
                return Some(result);
            }
        }

        state.pending = Some(invocation);
        if state.timer.is_none() {
            let delay = inner.remaining_wait(&state, now);
            Inner::start_timer(inner, &mut state, delay);
        }
        state.last_result.get()
    }

    /// Drops the pending invocation and any outstanding callback.
    ///
    /// The last result is kept. Calling `cancel` again is a no-op.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        if let Some(timer) = state.timer.take() {
            self.inner.runtime.cancel(timer.token);
            debug!("debounce: cancelled pending trailing edge");
        }
        state.pending = None;
        state.last_call_time = None;
        state.last_invoke_time = None;
        state.burst_start = None;
    }

    /// Whether a deferred callback is outstanding.
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    /// Result of the most recent actual invocation.
    ///
    /// When invocations overlap on a multi-threaded runtime, the one that
    /// started last wins, whichever finished first.
    pub fn last_result(&self) -> Option<T> {
        self.inner.state.lock().last_result.get()
    }

    /// The wait and edge options this wrapper was built with.
    pub fn config(&self) -> &DebounceConfig {
        &self.inner.config
    }
}

impl<A, T, R> Debounced<(), A, T, R>
where
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// Calls the debounced function.
    pub fn call(&self, args: A) -> Option<T> {
        self.call_with((), args)
    }
}

impl<C, A, T, R> Inner<C, A, T, R>
where
    C: Send + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    fn should_invoke(&self, state: &DebounceState<C, A, T, R>, now: R::Instant) -> bool {
        let Some(last_call) = state.last_call_time else {
            return true;
        };
        let since_last_call = match elapsed_since(now, last_call) {
            Some(elapsed) => elapsed,
            // clock went backward
            None => return true,
        };
        if since_last_call >= self.config.wait {
            return true;
        }
        match (self.config.options.max_wait, Self::max_wait_start(state)) {
            (Some(max_wait), Some(start)) => {
                elapsed_since(now, start).map_or(true, |elapsed| elapsed >= max_wait)
            }
            _ => false,
        }
    }

    /// The later of the last invocation and the start of the current burst.
    fn max_wait_start(state: &DebounceState<C, A, T, R>) -> Option<R::Instant> {
        state.last_invoke_time.max(state.burst_start)
    }

    fn remaining_wait(&self, state: &DebounceState<C, A, T, R>, now: R::Instant) -> Duration {
        let since_last_call = state
            .last_call_time
            .and_then(|last_call| elapsed_since(now, last_call))
            .unwrap_or_default();
        let remaining = self.config.wait.saturating_sub(since_last_call);

        match (self.config.options.max_wait, Self::max_wait_start(state)) {
            (Some(max_wait), Some(start)) => {
                let since_start = elapsed_since(now, start).unwrap_or_default();
                remaining.min(max_wait.saturating_sub(since_start))
            }
            _ => remaining,
        }
    }

    fn start_timer(this: &Arc<Self>, state: &mut DebounceState<C, A, T, R>, delay: Duration) {
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let weak: Weak<Self> = Arc::downgrade(this);

        let token = this.runtime.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::timer_expired(&inner, generation);
                }
            }),
        );
        trace!("debounce: timer set for {:?}", delay);
        state.timer = Some(PendingTimer { generation, token });
    }

    fn timer_expired(this: &Arc<Self>, generation: u64) {
        let mut state = this.state.lock();
        if state.timer.as_ref().map(|timer| timer.generation) != Some(generation) {
            trace!("debounce: ignoring superseded timer");
            return;
        }

        let now = this.runtime.now();
        if !this.should_invoke(&state, now) {
            let remaining = this.remaining_wait(&state, now);
            Self::start_timer(this, &mut state, remaining);
            return;
        }

        state.timer = None;
        let invocation = match state.pending.take() {
            Some(invocation) if this.config.options.trailing => invocation,
            _ => {
                trace!("debounce: trailing edge with nothing to invoke");
                return;
            }
        };
        state.last_invoke_time = Some(now);
        let ticket = state.last_result.begin();
        drop(state);

        debug!("debounce: invoking on trailing edge");
        if let Some(result) = invoke_detached("debounce", || invocation.run(&*this.func)) {
            this.state.lock().last_result.store(ticket, result);
        }
    }
}

impl<C, A, T, R: Runtime> Drop for Inner<C, A, T, R> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            self.runtime.cancel(timer.token);
        }
    }
}

impl<C, A, T, R: Runtime> Clone for Debounced<C, A, T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, A, T, R: Runtime> fmt::Debug for Debounced<C, A, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Debounced")
            .field("config", &self.inner.config)
            .field("pending", &state.timer.is_some())
            .field("last_call_time", &state.last_call_time)
            .field("last_invoke_time", &state.last_invoke_time)
            .finish_non_exhaustive()
    }
}

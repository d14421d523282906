// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Throttle: invoke at most once per `wait`.
//!
//! With the default options the first call of an interval invokes
//! immediately (leading) and the last call suppressed inside the interval is
//! flushed when the interval closes (trailing), so the final call of a burst
//! is never lost.
//!
//! Disabling `leading` delays the first invocation of each burst to the end
//! of its interval. Disabling `trailing` drops suppressed calls.

use crate::invocation::{invoke_detached, Invocation, LatestResult, PendingTimer, WrappedFn};
use crate::options::{ThrottleConfig, ThrottleOptions, WrapperConfig};
use crate::{debug, trace};
use core::fmt;
use core::time::Duration;
use pacer_error::Result;
use pacer_runtime::{elapsed_since, Runtime};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Throttles `func`, which takes its arguments as a single value.
///
/// # Errors
/// Returns an error if `options` is inconsistent with `wait`.
pub fn throttle<A, T, R, F>(
    func: F,
    wait: Duration,
    options: ThrottleOptions,
    runtime: R,
) -> Result<Throttled<(), A, T, R>>
where
    F: Fn(A) -> T + Send + Sync + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    throttle_with_receiver(move |(), args| func(args), wait, options, runtime)
}

/// Throttles `func`, which also receives an explicit receiver per call.
///
/// # Errors
/// Returns an error if `options` is inconsistent with `wait`.
pub fn throttle_with_receiver<C, A, T, R, F>(
    func: F,
    wait: Duration,
    options: ThrottleOptions,
    runtime: R,
) -> Result<Throttled<C, A, T, R>>
where
    F: Fn(C, A) -> T + Send + Sync + 'static,
    C: Send + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    Throttled::new(func, WrapperConfig::new(wait, options), runtime)
}

/// Handle to a throttled function.
///
/// Clones share the same state. There is no `cancel`: a pending trailing
/// flush is only abandoned when every handle has been dropped.
pub struct Throttled<C, A, T, R: Runtime> {
    inner: Arc<Inner<C, A, T, R>>,
}

struct Inner<C, A, T, R: Runtime> {
    func: Box<WrappedFn<C, A, T>>,
    config: ThrottleConfig,
    runtime: R,
    state: Mutex<ThrottleState<C, A, T, R>>,
}

struct ThrottleState<C, A, T, R: Runtime> {
    /// Start of the current interval; `None` means the next call may invoke.
    previous: Option<R::Instant>,
    pending: Option<Invocation<C, A>>,
    timer: Option<PendingTimer<R::Token>>,
    generation: u64,
    last_result: LatestResult<T>,
}

impl<C, A, T, R> Throttled<C, A, T, R>
where
    C: Send + 'static,
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// # Errors
    /// Returns an error if the config does not validate.
    pub fn new<F>(func: F, config: ThrottleConfig, runtime: R) -> Result<Self>
    where
        F: Fn(C, A) -> T + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                func: Box::new(func),
                config,
                runtime,
                state: Mutex::new(ThrottleState {
                    previous: None,
                    pending: None,
                    timer: None,
                    generation: 0,
                    last_result: LatestResult::new(),
                }),
            }),
        })
    }

    /// Calls the throttled function with an explicit receiver.
    ///
    /// Invokes immediately when the interval has elapsed; otherwise the call
    /// is kept for the trailing flush and the last result is returned.
    pub fn call_with(&self, receiver: C, args: A) -> Option<T> {
        let inner = &self.inner;
        let wait = inner.config.wait;
        let mut state = inner.state.lock();
        let now = inner.runtime.now();

        if state.previous.is_none() && !inner.config.options.leading {
            state.previous = Some(now);
        }

        // `None` covers both "no interval yet" and a clock that went backward.
        let since_previous = state
            .previous
            .and_then(|previous| elapsed_since(now, previous));
        let invocation = Invocation { receiver, args };

        match since_previous {
            Some(elapsed) if elapsed < wait => {
                state.pending = Some(invocation);
                if state.timer.is_none() && inner.config.options.trailing {
                    Inner::start_timer(inner, &mut state, wait - elapsed);
                }
                state.last_result.get()
            }
            _ => {
                if let Some(timer) = state.timer.take() {
                    inner.runtime.cancel(timer.token);
                }
                state.previous = Some(now);
                state.pending = None;
                let ticket = state.last_result.begin();
                drop(state);

                trace!("throttle: invoking immediately");
                let result = invocation.run(&*inner.func);
                inner.state.lock().last_result.store(ticket, result.clone());
                Some(result)
            }
        }
    }

    /// Whether a trailing flush is scheduled.
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
    pub fn config(&self) -> &ThrottleConfig {
        &self.inner.config
    }
}

impl<A, T, R> Throttled<(), A, T, R>
where
    A: Send + 'static,
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// Calls the throttled function.
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
    fn start_timer(this: &Arc<Self>, state: &mut ThrottleState<C, A, T, R>, delay: Duration) {
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let weak: Weak<Self> = Arc::downgrade(this);

        let token = this.runtime.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::flush(&inner, generation);
                }
            }),
        );
        trace!("throttle: trailing flush set for {:?}", delay);
        state.timer = Some(PendingTimer { generation, token });
    }

    fn flush(this: &Arc<Self>, generation: u64) {
        let mut state = this.state.lock();
        if state.timer.as_ref().map(|timer| timer.generation) != Some(generation) {
            trace!("throttle: ignoring superseded flush");
            return;
        }

        state.timer = None;
        state.previous = if this.config.options.leading {
            Some(this.runtime.now())
        } else {
            None
        };
        let Some(invocation) = state.pending.take() else {
            return;
        };
        let ticket = state.last_result.begin();
        drop(state);

        debug!("throttle: invoking on trailing edge");
        if let Some(result) = invoke_detached("throttle", || invocation.run(&*this.func)) {
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

impl<C, A, T, R: Runtime> Clone for Throttled<C, A, T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, A, T, R: Runtime> fmt::Debug for Throttled<C, A, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Throttled")
            .field("config", &self.inner.config)
            .field("pending", &state.timer.is_some())
            .field("previous", &state.previous)
            .finish_non_exhaustive()
    }
}

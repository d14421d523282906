// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared log of invocations, in the order they happened.
///
/// Clones share the same log, so one clone can move into the wrapped
/// function while the test keeps another for assertions.
#[derive(Debug)]
pub struct Recorder<A> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A> Clone for Recorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A> Default for Recorder<A> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A: Clone + Send + 'static> Recorder<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, args: A) {
        self.calls.lock().push(args);
    }

    /// A function that records its argument and returns it unchanged.
    pub fn echo(&self) -> impl Fn(A) -> A + Send + Sync + 'static {
        let recorder = self.clone();
        move |args: A| {
            recorder.record(args.clone());
            args
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    #[must_use]
    pub fn last(&self) -> Option<A> {
        self.calls.lock().last().cloned()
    }
}

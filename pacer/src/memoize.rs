// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Memoize: cache results by a key derived from the call's arguments.
//!
//! The cache is an unbounded map with no eviction; it is exposed through
//! [`Memoized::cache`] so callers can inspect, seed or clear it.

use core::fmt;
use core::hash::Hash;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::sync::Arc;

type KeyResolver<A, K> = dyn Fn(&A) -> K + Send + Sync;

/// Memoizes `func`, keyed by the arguments themselves.
pub fn memoize<A, T, F>(func: F) -> Memoized<A, A, T>
where
    F: Fn(A) -> T + Send + Sync + 'static,
    A: Clone + Eq + Hash + 'static,
    T: Clone,
{
    Memoized::new(func, A::clone)
}

/// Memoizes `func`, keyed by whatever `resolver` derives from the arguments.
pub fn memoize_with_resolver<A, K, T, F, KF>(func: F, resolver: KF) -> Memoized<A, K, T>
where
    F: Fn(A) -> T + Send + Sync + 'static,
    KF: Fn(&A) -> K + Send + Sync + 'static,
    K: Eq + Hash,
    T: Clone,
{
    Memoized::new(func, resolver)
}

/// Handle to a memoized function. Clones share the cache.
pub struct Memoized<A, K, T> {
    func: Arc<dyn Fn(A) -> T + Send + Sync>,
    resolver: Arc<KeyResolver<A, K>>,
    cache: Arc<Mutex<HashMap<K, T>>>,
}

impl<A, K, T> Memoized<A, K, T>
where
    K: Eq + Hash,
    T: Clone,
{
    pub fn new<F, KF>(func: F, resolver: KF) -> Self
    where
        F: Fn(A) -> T + Send + Sync + 'static,
        KF: Fn(&A) -> K + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            resolver: Arc::new(resolver),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached result for the call's key, computing it on a miss.
    ///
    /// The lock is not held while `func` runs, so two concurrent misses on
    /// the same key may both compute; the later result is kept.
    pub fn call(&self, args: A) -> T {
        let key = (self.resolver)(&args);
        if let Some(hit) = self.cache.lock().get(&key) {
            return hit.clone();
        }

        let result = (self.func)(args);
        self.cache.lock().insert(key, result.clone());
        result
    }

    /// The backing key to result map.
    pub fn cache(&self) -> MutexGuard<'_, HashMap<K, T>> {
        self.cache.lock()
    }
}

impl<A, K, T> Clone for Memoized<A, K, T> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            resolver: Arc::clone(&self.resolver),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<A, K, T> fmt::Debug for Memoized<A, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

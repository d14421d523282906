// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

pub trait Clock: Clone + Send + Sync + Debug + 'static {
    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}

/// Time elapsed from `then` to `now`, or `None` if the clock went backward.
pub fn elapsed_since<I>(now: I, then: I) -> Option<Duration>
where
    I: Ord + Sub<I, Output = Duration>,
{
    if now >= then {
        Some(now - then)
    } else {
        None
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pacer_runtime::{Clock, ManualInstant, ManualRuntime};
use std::time::Duration;

/// Advances the virtual clock by `millis`, firing due callbacks.
pub fn advance_ms(runtime: &ManualRuntime, millis: u64) {
    runtime.advance(Duration::from_millis(millis));
}

/// Advances the virtual clock to the absolute time `millis`.
pub fn at_ms(runtime: &ManualRuntime, millis: u64) {
    runtime.advance_to(ManualInstant::from_millis(millis));
}

#[must_use]
pub fn now_ms(runtime: &ManualRuntime) -> u64 {
    runtime.now().as_millis()
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pacer_runtime::{Callback, Clock, ManualInstant, ManualRuntime, Scheduler};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

type Log = Arc<Mutex<Vec<(&'static str, u64)>>>;

fn log_into(log: &Log, runtime: &ManualRuntime, label: &'static str) -> Callback {
    let log = log.clone();
    let runtime = runtime.clone();
    Box::new(move || log.lock().push((label, runtime.now().as_millis())))
}

#[test]
fn test_clock_starts_at_origin_and_advances() {
    // Arrange
    let runtime = ManualRuntime::new();

    // Act
    runtime.advance(Duration::from_millis(250));

    // Assert
    assert_eq!(runtime.now(), ManualInstant::from_millis(250));
}

#[test]
fn test_callbacks_fire_in_deadline_order_at_their_deadline() {
    // Arrange
    let runtime = ManualRuntime::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    runtime.schedule(Duration::from_millis(300), log_into(&log, &runtime, "late"));
    runtime.schedule(Duration::from_millis(100), log_into(&log, &runtime, "early"));
    runtime.schedule(Duration::from_millis(100), log_into(&log, &runtime, "early-second"));

    // Act
    runtime.advance(Duration::from_millis(1000));

    // Assert
    assert_eq!(
        *log.lock(),
        vec![("early", 100), ("early-second", 100), ("late", 300)]
    );
    assert_eq!(runtime.now(), ManualInstant::from_millis(1000));
    assert_eq!(runtime.pending(), 0);
}

#[test]
fn test_callbacks_beyond_the_window_stay_queued() {
    // Arrange
    let runtime = ManualRuntime::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    runtime.schedule(Duration::from_millis(100), log_into(&log, &runtime, "a"));

    // Act
    runtime.advance(Duration::from_millis(99));

    // Assert
    assert!(log.lock().is_empty());
    assert_eq!(runtime.pending(), 1);

    // Act
    runtime.advance(Duration::from_millis(1));

    // Assert
    assert_eq!(*log.lock(), vec![("a", 100)]);
}

#[test]
fn test_cancelled_callback_never_fires() {
    // Arrange
    let runtime = ManualRuntime::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let token = runtime.schedule(Duration::from_millis(50), log_into(&log, &runtime, "a"));

    // Act
    runtime.cancel(token);
    runtime.cancel(token);
    runtime.advance(Duration::from_millis(100));

    // Assert
    assert!(log.lock().is_empty());
    assert_eq!(runtime.pending(), 0);
}

#[test]
fn test_callback_scheduled_from_callback_fires_within_same_advance() {
    // Arrange
    let runtime = ManualRuntime::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let chained = log_into(&log, &runtime, "chained");
    let first = log_into(&log, &runtime, "first");
    let scheduler = runtime.clone();
    runtime.schedule(
        Duration::from_millis(40),
        Box::new(move || {
            first();
            scheduler.schedule(Duration::from_millis(40), chained);
        }),
    );

    // Act
    runtime.advance(Duration::from_millis(100));

    // Assert
    assert_eq!(*log.lock(), vec![("first", 40), ("chained", 80)]);
}

#[test]
fn test_set_now_moves_clock_backward_without_firing() {
    // Arrange
    let runtime = ManualRuntime::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    runtime.advance(Duration::from_millis(500));
    runtime.schedule(Duration::from_millis(10), log_into(&log, &runtime, "a"));

    // Act
    runtime.set_now(ManualInstant::from_millis(100));

    // Assert
    assert_eq!(runtime.now(), ManualInstant::from_millis(100));
    assert!(log.lock().is_empty());
    assert_eq!(runtime.pending(), 1);
}

#[test]
fn test_instant_arithmetic_saturates() {
    let early = ManualInstant::from_millis(10);
    let late = ManualInstant::from_millis(40);

    assert_eq!(late - early, Duration::from_millis(30));
    assert_eq!(early - late, Duration::ZERO);
    assert_eq!(early - Duration::from_millis(50), ManualInstant::from_millis(0));
    assert_eq!(early + Duration::from_millis(5), ManualInstant::from_millis(15));
}

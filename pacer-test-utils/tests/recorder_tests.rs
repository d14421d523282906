// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pacer_runtime::ManualRuntime;
use pacer_test_utils::test_data::{person_alice, person_bob};
use pacer_test_utils::{advance_ms, at_ms, now_ms, Recorder};
use std::thread;

#[test]
fn test_recorder_keeps_call_order() {
    // Arrange
    let recorder = Recorder::new();

    // Act
    recorder.record(person_alice());
    recorder.record(person_bob());

    // Assert
    assert_eq!(recorder.calls(), vec![person_alice(), person_bob()]);
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.last(), Some(person_bob()));
}

#[test]
fn test_recorder_clones_share_the_log() {
    // Arrange
    let recorder = Recorder::new();
    let echo = recorder.echo();

    // Act
    let handle = thread::spawn(move || echo(7));

    // Assert
    assert_eq!(handle.join().unwrap(), 7);
    assert_eq!(recorder.calls(), vec![7]);
}

#[test]
fn test_clock_helpers() {
    let runtime = ManualRuntime::new();

    advance_ms(&runtime, 30);
    assert_eq!(now_ms(&runtime), 30);

    at_ms(&runtime, 120);
    assert_eq!(now_ms(&runtime), 120);
}

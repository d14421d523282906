// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use pacer::prelude::*;
use pacer_test_utils::test_data::{person_alice, person_bob, person_charlie};
use pacer_test_utils::Recorder;
use std::time::Duration;
use tokio::time::{pause, sleep};

#[tokio::test]
async fn test_debounce_collapses_burst_on_tokio() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let debounced = debounce(
        recorder.echo(),
        Duration::from_millis(100),
        DebounceOptions::default(),
        TokioRuntime::current()?,
    )?;

    // Act
    debounced.call(person_alice());
    sleep(Duration::from_millis(30)).await;
    debounced.call(person_bob());
    sleep(Duration::from_millis(30)).await;
    debounced.call(person_charlie());

    // Assert
    sleep(Duration::from_millis(99)).await;
    assert_eq!(recorder.count(), 0);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(recorder.calls(), vec![person_charlie()]);
    assert_eq!(debounced.last_result(), Some(person_charlie()));
    assert!(!debounced.is_pending());

    Ok(())
}

#[tokio::test]
async fn test_debounce_cancel_aborts_scheduled_task() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let debounced = debounce(
        recorder.echo(),
        Duration::from_millis(100),
        DebounceOptions::default(),
        TokioRuntime::current()?,
    )?;
    debounced.call(person_alice());

    // Act
    sleep(Duration::from_millis(50)).await;
    debounced.cancel();
    sleep(Duration::from_millis(500)).await;

    // Assert
    assert_eq!(recorder.count(), 0);
    assert!(!debounced.is_pending());

    Ok(())
}

#[tokio::test]
async fn test_throttle_flushes_trailing_call_on_tokio() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let throttled = throttle(
        recorder.echo(),
        Duration::from_millis(100),
        ThrottleOptions::default(),
        TokioRuntime::current()?,
    )?;

    // Act
    let first = throttled.call(person_alice());
    sleep(Duration::from_millis(10)).await;
    let second = throttled.call(person_bob());

    // Assert
    assert_eq!(first, Some(person_alice()));
    assert_eq!(second, Some(person_alice()));

    sleep(Duration::from_millis(100)).await;
    assert_eq!(recorder.calls(), vec![person_alice(), person_bob()]);
    assert_eq!(throttled.last_result(), Some(person_bob()));

    Ok(())
}

#[tokio::test]
async fn test_dropping_throttle_abandons_flush() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let throttled = throttle(
        recorder.echo(),
        Duration::from_millis(100),
        ThrottleOptions::default(),
        TokioRuntime::current()?,
    )?;
    throttled.call(person_alice());
    throttled.call(person_bob());

    // Act
    drop(throttled);
    sleep(Duration::from_millis(500)).await;

    // Assert
    assert_eq!(recorder.calls(), vec![person_alice()]);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_debounce_across_threads() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let debounced = debounce(
        recorder.echo(),
        Duration::from_millis(200),
        DebounceOptions::default(),
        TokioRuntime::current()?,
    )?;

    // Act
    let handles: Vec<_> = (0..4_u32)
        .map(|n| {
            let debounced = debounced.clone();
            tokio::spawn(async move {
                debounced.call(n);
            })
        })
        .collect();
    for handle in handles {
        handle.await?;
    }
    debounced.call(99);
    sleep(Duration::from_millis(800)).await;

    // Assert
    assert_eq!(recorder.calls(), vec![99]);
    assert_eq!(debounced.last_result(), Some(99));

    Ok(())
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use pacer::{throttle, ThrottleOptions};
use pacer_runtime::ManualRuntime;
use std::hint::black_box;
use std::time::Duration;

pub fn bench_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("throttle_call");
    let waits = [Duration::from_millis(10), Duration::from_secs(1)];
    let calls = 1_000_u64;

    for &wait in &waits {
        group.throughput(Throughput::Elements(calls));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{wait:?}")),
            &wait,
            |bencher, &wait| {
                bencher.iter(|| {
                    let runtime = ManualRuntime::new();
                    let throttled = throttle(
                        |n: u64| n.wrapping_mul(31),
                        wait,
                        ThrottleOptions::default(),
                        runtime.clone(),
                    )
                    .unwrap();

                    for n in 0..calls {
                        black_box(throttled.call(n));
                        runtime.advance(Duration::from_millis(1));
                    }
                    runtime.advance(wait);
                    black_box(throttled.last_result());
                });
            },
        );
    }

    group.finish();
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main};

mod throttle_bench;

use debounce_bench::bench_debounce;
use memoize_bench::bench_memoize;
use throttle_bench::bench_throttle;

criterion_group!(benches, bench_debounce, bench_memoize, bench_throttle);
criterion_main!(benches);

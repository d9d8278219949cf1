// vld-perf - Video Lightning Detector performance harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Benchmark summary extraction.
//!
//! Measures the extractor on realistic `go test` output and on long logs
//! where the summary line sits after many lines of detector chatter.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vld_perf_core::config::DEFAULT_BENCH_NAME;
use vld_perf_core::metrics::{self, BenchParser};
use vld_perf_test::fixtures::{bench_output_samples, go_bench_output};

// ============================================================================
// Sample Outputs
// ============================================================================

fn bench_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_samples");
    let parser = BenchParser::for_benchmark(DEFAULT_BENCH_NAME);

    for (name, output) in bench_output_samples() {
        group.throughput(Throughput::Bytes(output.len() as u64));
        group.bench_with_input(BenchmarkId::new("named", name), &output, |b, out| {
            b.iter(|| parser.parse(black_box(out)))
        });
        group.bench_with_input(BenchmarkId::new("any", name), &output, |b, out| {
            b.iter(|| metrics::parse(black_box(out)))
        });
    }

    group.finish();
}

// ============================================================================
// Long Logs
// ============================================================================

fn bench_long_logs(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_long_log");
    let parser = BenchParser::for_benchmark(DEFAULT_BENCH_NAME);

    for lines in [100usize, 1_000, 10_000] {
        let mut log = String::new();
        for i in 0..lines {
            log.push_str(&format!("frame {i}: brightness 0.{i:04} below threshold\n"));
        }
        log.push_str(&go_bench_output(2.0e9, 9120.0, 87.0));

        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &log, |b, log| {
            b.iter(|| parser.parse(black_box(log)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_samples, bench_long_logs);
criterion_main!(benches);

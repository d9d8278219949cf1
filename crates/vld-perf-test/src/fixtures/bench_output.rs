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

//! Benchmark facility output samples.

use vld_perf_core::config::DEFAULT_BENCH_NAME;

/// Output of a passing `go test -bench` run with the given figures.
///
/// Mirrors the real layout: environment header, the bare benchmark name line
/// printed by `-v`, the tab-separated summary line and the package footer.
pub fn go_bench_output(ns_per_op: f64, bytes_per_op: f64, allocs_per_op: f64) -> String {
    format!(
        "goos: linux\n\
         goarch: amd64\n\
         pkg: github.com/Krzysztofz01/video-lightning-detector\n\
         cpu: AMD Ryzen 7 5800X 8-Core Processor\n\
         {name}\n\
         {name}-16    \t       1\t{ns} ns/op\t{b} B/op\t{a} allocs/op\n\
         PASS\n\
         ok  \tgithub.com/Krzysztofz01/video-lightning-detector\t2.412s\n",
        name = DEFAULT_BENCH_NAME,
        ns = ns_per_op,
        b = bytes_per_op,
        a = allocs_per_op,
    )
}

/// Output of a run without `-benchmem`: only the `ns/op` column.
pub fn go_bench_output_without_mem(ns_per_op: f64) -> String {
    format!(
        "{name}-8   \t       1\t{ns} ns/op\nPASS\n",
        name = DEFAULT_BENCH_NAME,
        ns = ns_per_op,
    )
}

/// Output that holds no summary line at all.
pub fn go_bench_output_without_summary() -> &'static str {
    "goos: linux\ngoarch: amd64\ntesting: warning: no tests to run\nPASS\nok  \tgithub.com/Krzysztofz01/video-lightning-detector\t0.004s\n"
}

/// Named output samples covering the shapes the extractor must handle.
pub fn bench_output_samples() -> Vec<(&'static str, String)> {
    vec![
        ("full", go_bench_output(2034234156.0, 9120456.0, 87123.0)),
        ("without_mem", go_bench_output_without_mem(1500.0)),
        ("without_summary", go_bench_output_without_summary().to_string()),
        (
            "crlf",
            go_bench_output(10.0, 20.0, 30.0).replace('\n', "\r\n"),
        ),
        (
            "repeated",
            format!(
                "{}{}",
                go_bench_output(1.0, 1.0, 1.0),
                go_bench_output(2.0, 2.0, 2.0)
            ),
        ),
    ]
}

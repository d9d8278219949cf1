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

//! Benchmark output metric extraction.
//!
//! Turns the text printed by `go test -bench ... -benchmem` into
//! [`BenchStats`]. A summary line looks like:
//!
//! ```text
//! BenchmarkVideoLightningDetectorFromEnvArgs-8   1   2034234156 ns/op   9120 B/op   87 allocs/op
//! ```
//!
//! The `B/op` and `allocs/op` columns are optional. When the output holds
//! several summary lines the last one wins.

use crate::model::BenchStats;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

const NUMBER: &str = r"([0-9][0-9.eE+\-]*)";

static ANY_BENCHMARK: Lazy<BenchParser> = Lazy::new(|| BenchParser::with_name_pattern(r"Benchmark"));

/// Parses benchmark output using a pattern that accepts any benchmark name.
///
/// Never fails: when nothing matches, all-zero stats are returned.
///
/// # Examples
///
/// ```
/// use vld_perf_core::metrics::parse;
///
/// let stats = parse("BenchmarkX 100 123.0 ns/op 45 B/op 2 allocs/op\n");
/// assert_eq!(stats.ns_per_op, 123.0);
/// assert_eq!(stats.bytes_per_op, 45.0);
/// assert_eq!(stats.allocs_per_op, 2.0);
/// ```
pub fn parse(raw: &str) -> BenchStats {
    ANY_BENCHMARK.parse(raw)
}

/// Benchmark summary line parser bound to a benchmark name prefix.
#[derive(Debug, Clone)]
pub struct BenchParser {
    line: Regex,
}

impl BenchParser {
    /// Creates a parser for one benchmark function.
    ///
    /// Sub-benchmark and GOMAXPROCS suffixes (`/case`, `-8`) are accepted.
    pub fn for_benchmark(name: &str) -> Self {
        Self::with_name_pattern(&regex::escape(name))
    }

    fn with_name_pattern(name_pattern: &str) -> Self {
        let pattern = format!(
            r"(?m)^{name}\S*[ \t]+\d+[ \t]+{num}[ \t]+ns/op(?:[ \t]+{num}[ \t]+B/op)?(?:[ \t]+{num}[ \t]+allocs/op)?[ \t]*\r?$",
            name = name_pattern,
            num = NUMBER,
        );
        // Escaped name plus fixed fragments: always compiles.
        let line = Regex::new(&pattern).expect("valid benchmark line pattern");
        Self { line }
    }

    /// Extracts stats from the last matching summary line.
    pub fn parse(&self, raw: &str) -> BenchStats {
        let Some(caps) = self.line.captures_iter(raw).last() else {
            warn!("no benchmark summary line found; bench stats default to zero");
            return BenchStats::default();
        };

        let field = |idx: usize| {
            caps.get(idx)
                .map(|m| parse_number(m.as_str()))
                .unwrap_or(0.0)
        };

        let stats = BenchStats {
            ns_per_op: field(1),
            bytes_per_op: field(2),
            allocs_per_op: field(3),
        };
        debug!(?stats, "parsed benchmark summary");
        stats
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or(0.0)
}

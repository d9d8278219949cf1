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

//! Harness configuration.
//!
//! Defaults match the detector repository layout: results under
//! `perf-results/`, the detector binary at `./bin/video-lightning-detector`
//! and the end-to-end Go benchmark driven through `go test`. Each default can
//! be overridden from the environment.
//!
//! # Environment variables
//!
//! | Variable | Field |
//! |---|---|
//! | `VLD_PERF_RESULTS_DIR` | `results_root` |
//! | `VLD_PERF_DETECTOR` | `detector_bin` |
//! | `VLD_PERF_BENCH_PROGRAM` | `bench_program` |
//! | `VLD_PERF_BENCH_ARGS` | `bench_args` (split like suite arguments) |
//! | `VLD_PERF_BENCH_NAME` | `bench_name` |

use crate::args::split_args;
use crate::suites::SUITES_FILE;
use std::path::{Path, PathBuf};

/// Default directory holding suite configuration and run records.
pub const DEFAULT_RESULTS_ROOT: &str = "perf-results";

/// Default detector binary path.
pub const DEFAULT_DETECTOR_BIN: &str = "./bin/video-lightning-detector";

/// Default benchmark facility program.
pub const DEFAULT_BENCH_PROGRAM: &str = "go";

/// End-to-end benchmark function driven by the benchmark facility.
pub const DEFAULT_BENCH_NAME: &str = "BenchmarkVideoLightningDetectorFromEnvArgs";

/// Environment variable carrying suite arguments into the benchmark.
pub const ARGS_ENV_VAR: &str = "VLD_CLI_ARGS";

/// Env override for [`HarnessConfig::results_root`].
pub const ENV_RESULTS_DIR: &str = "VLD_PERF_RESULTS_DIR";
/// Env override for [`HarnessConfig::detector_bin`].
pub const ENV_DETECTOR: &str = "VLD_PERF_DETECTOR";
/// Env override for [`HarnessConfig::bench_program`].
pub const ENV_BENCH_PROGRAM: &str = "VLD_PERF_BENCH_PROGRAM";
/// Env override for [`HarnessConfig::bench_args`].
pub const ENV_BENCH_ARGS: &str = "VLD_PERF_BENCH_ARGS";
/// Env override for [`HarnessConfig::bench_name`].
pub const ENV_BENCH_NAME: &str = "VLD_PERF_BENCH_NAME";

/// Where results live and how the two subprocesses are launched.
///
/// # Example
///
/// ```no_run
/// use vld_perf_core::config::HarnessConfig;
///
/// let config = HarnessConfig::default()
///     .with_results_root("/tmp/perf")
///     .with_detector_bin("./target/detector");
/// assert!(config.suites_path().ends_with("suites.json"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Directory holding `suites.json` and one directory per suite.
    pub results_root: PathBuf,
    /// Detector binary invoked directly for timings and detections.
    pub detector_bin: PathBuf,
    /// Benchmark facility program.
    pub bench_program: String,
    /// Arguments of the benchmark facility: one repetition, full stats.
    pub bench_args: Vec<String>,
    /// Benchmark function whose summary line is extracted.
    pub bench_name: String,
    /// Environment variable that carries suite arguments to the benchmark.
    pub args_env_var: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from(DEFAULT_RESULTS_ROOT),
            detector_bin: PathBuf::from(DEFAULT_DETECTOR_BIN),
            bench_program: DEFAULT_BENCH_PROGRAM.to_string(),
            bench_args: default_bench_args(DEFAULT_BENCH_NAME),
            bench_name: DEFAULT_BENCH_NAME.to_string(),
            args_env_var: ARGS_ENV_VAR.to_string(),
        }
    }
}

/// `go test` arguments running one benchmark once with allocation stats.
pub fn default_bench_args(bench_name: &str) -> Vec<String> {
    [
        "test", "-v", "-run", "^$", "-bench", bench_name, "-benchmem", "-count", "1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl HarnessConfig {
    /// Builds a configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(root) = get(ENV_RESULTS_DIR) {
            config.results_root = PathBuf::from(root);
        }
        if let Some(bin) = get(ENV_DETECTOR) {
            config.detector_bin = PathBuf::from(bin);
        }
        if let Some(program) = get(ENV_BENCH_PROGRAM) {
            config.bench_program = program;
        }
        if let Some(name) = get(ENV_BENCH_NAME) {
            config.bench_args = default_bench_args(&name);
            config.bench_name = name;
        }
        if let Some(raw) = get(ENV_BENCH_ARGS) {
            config.bench_args = split_args(&raw);
        }
        config
    }

    /// Sets the results root.
    pub fn with_results_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.results_root = root.into();
        self
    }

    /// Sets the detector binary.
    pub fn with_detector_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.detector_bin = bin.into();
        self
    }

    /// Sets the benchmark facility program and its arguments.
    pub fn with_bench_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.bench_program = program.into();
        self.bench_args = args;
        self
    }

    /// Sets the benchmark function name used for extraction.
    pub fn with_bench_name(mut self, name: impl Into<String>) -> Self {
        self.bench_name = name.into();
        self
    }

    /// Path of the suite configuration file.
    pub fn suites_path(&self) -> PathBuf {
        self.results_root.join(SUITES_FILE)
    }

    /// Directory holding a suite's run records.
    pub fn suite_dir(&self, suite: &str) -> PathBuf {
        self.results_root.join(suite)
    }

    /// Results root as a path.
    pub fn results_root(&self) -> &Path {
        &self.results_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.results_root, PathBuf::from("perf-results"));
        assert_eq!(config.suites_path(), PathBuf::from("perf-results/suites.json"));
        assert_eq!(config.bench_program, "go");
        assert_eq!(
            config.bench_args,
            vec![
                "test",
                "-v",
                "-run",
                "^$",
                "-bench",
                "BenchmarkVideoLightningDetectorFromEnvArgs",
                "-benchmem",
                "-count",
                "1"
            ]
        );
        assert_eq!(config.args_env_var, "VLD_CLI_ARGS");
    }

    #[test]
    fn test_env_overrides() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_RESULTS_DIR, "/tmp/results"),
            (ENV_DETECTOR, "/opt/vld"),
            (ENV_BENCH_PROGRAM, "sh"),
            (ENV_BENCH_ARGS, "fake-bench.sh --count 1"),
        ]));
        assert_eq!(config.results_root, PathBuf::from("/tmp/results"));
        assert_eq!(config.detector_bin, PathBuf::from("/opt/vld"));
        assert_eq!(config.bench_program, "sh");
        assert_eq!(config.bench_args, vec!["fake-bench.sh", "--count", "1"]);
    }

    #[test]
    fn test_bench_name_override_rebuilds_args() {
        let config = HarnessConfig::from_lookup(lookup(&[(ENV_BENCH_NAME, "BenchmarkOther")]));
        assert_eq!(config.bench_name, "BenchmarkOther");
        assert!(config.bench_args.contains(&"BenchmarkOther".to_string()));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_RESULTS_DIR, "  "),
            (ENV_BENCH_ARGS, "\t\n"),
        ]));
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_bench_args_keep_backslashes() {
        let config = HarnessConfig::from_lookup(lookup(&[(
            ENV_BENCH_ARGS,
            r"test -bench 'Benchmark Foo' -o C:\tmp\bench",
        )]));
        assert_eq!(
            config.bench_args,
            vec!["test", "-bench", "Benchmark Foo", "-o", r"C:\tmp\bench"]
        );
    }

    #[test]
    fn test_suite_dir() {
        let config = HarnessConfig::default().with_results_root("/data");
        assert_eq!(config.suite_dir("full"), PathBuf::from("/data/full"));
    }
}

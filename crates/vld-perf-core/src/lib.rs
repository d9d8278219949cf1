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

//! Core of the video lightning detector performance harness.
//!
//! A run executes a named suite of detector arguments twice: once through the
//! end-to-end Go benchmark for per-operation figures, and once directly for
//! stage timings and a detection count. The resulting [`RunResult`] is
//! persisted per suite and compared against a baseline run.
//!
//! # Example
//!
//! ```no_run
//! use vld_perf_core::{compare, HarnessConfig, RunExecutor, RunOptions, RunStore, SuiteRegistry};
//!
//! # fn main() -> vld_perf_core::Result<()> {
//! let config = HarnessConfig::from_env();
//! let suites = SuiteRegistry::load(config.suites_path())?;
//! let store = RunStore::new(config.results_root());
//!
//! let executor = RunExecutor::from_config(&config);
//! let result = executor.execute(
//!     "full",
//!     "20250101-120000_main",
//!     "main",
//!     suites.resolve("full")?,
//!     &RunOptions::default(),
//! )?;
//! store.write("full", &result.metadata.run_id, &result)?;
//!
//! if let Some(base) = store.get_baseline("full") {
//!     let baseline = store.read("full", &base)?;
//!     let report = compare::compare(
//!         "baseline",
//!         &baseline,
//!         &result.metadata.run_id,
//!         &result,
//!         compare::DEFAULT_THRESHOLD_PCT,
//!     );
//!     print!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod compare;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod model;
pub mod run_id;
pub mod store;
pub mod suites;

pub use compare::{Comparison, Metric, MetricDelta, DEFAULT_THRESHOLD_PCT};
pub use config::HarnessConfig;
pub use error::{PerfError, Result};
pub use executor::{BenchmarkFacility, DetectorRunner, RunExecutor, RunOptions};
pub use model::{BaselinePointer, BenchStats, RunMetadata, RunResult, TimingsReport};
pub use store::RunStore;
pub use suites::SuiteRegistry;

/// Harness version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

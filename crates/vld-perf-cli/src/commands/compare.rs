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

//! Compare - delta report between two stored runs

use super::report::print_comparison;
use crate::error::CliError;
use vld_perf_core::compare::compare as compare_runs;
use vld_perf_core::{HarnessConfig, PerfError, RunStore};

/// Run id alias resolving to the suite's baseline.
pub const BASELINE_ALIAS: &str = "baseline";

/// Resolves [`BASELINE_ALIAS`] through the suite's baseline pointer.
///
/// # Errors
///
/// Returns [`PerfError::NoBaseline`] when the alias is used and no baseline
/// is set.
pub fn resolve_run_id(store: &RunStore, suite: &str, run_id: &str) -> Result<String, PerfError> {
    if run_id != BASELINE_ALIAS {
        return Ok(run_id.to_string());
    }
    store.get_baseline(suite).ok_or_else(|| PerfError::NoBaseline {
        suite: suite.to_string(),
    })
}

/// Compare two stored runs and print the report.
///
/// # Errors
///
/// Returns `Err` if the baseline is requested but unset, or either run
/// cannot be read.
pub fn compare(
    config: &HarnessConfig,
    suite: &str,
    lhs: &str,
    rhs: &str,
    threshold: f64,
    json: bool,
) -> Result<(), CliError> {
    let store = RunStore::new(config.results_root());
    let lhs_id = resolve_run_id(&store, suite, lhs)?;
    let lhs_run = store.read(suite, &lhs_id)?;
    let rhs_run = store.read(suite, rhs)?;

    let report = compare_runs(&lhs_id, &lhs_run, rhs, &rhs_run, threshold);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_comparison(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_plain_id() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        assert_eq!(resolve_run_id(&store, "full", "r1").unwrap(), "r1");
    }

    #[test]
    fn test_resolve_baseline() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        assert!(matches!(
            resolve_run_id(&store, "full", "baseline"),
            Err(PerfError::NoBaseline { .. })
        ));

        store.set_baseline("full", "r1").unwrap();
        assert_eq!(resolve_run_id(&store, "full", "baseline").unwrap(), "r1");
    }
}

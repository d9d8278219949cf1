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

//! List - summary line per stored run

use crate::error::CliError;
use colored::Colorize;
use vld_perf_core::{HarnessConfig, RunResult, RunStore};

/// Summary line of one run: `<id>[ *baseline]  total=<ms>ms  ns/op=<n>  allocs/op=<n>`.
///
/// # Examples
///
/// ```
/// use vld_perf_cli::commands::format_run_line;
/// use vld_perf_core::RunResult;
///
/// let mut run = RunResult::default();
/// run.timings.total_ms = 1499.6;
/// assert_eq!(
///     format_run_line("r1", &run, true),
///     "r1 *baseline  total=1500ms  ns/op=0  allocs/op=0"
/// );
/// ```
pub fn format_run_line(run_id: &str, run: &RunResult, is_baseline: bool) -> String {
    format!(
        "{}{}  total={:.0}ms  ns/op={:.0}  allocs/op={:.0}",
        run_id,
        if is_baseline { " *baseline" } else { "" },
        run.timings.total_ms,
        run.bench.ns_per_op,
        run.bench.allocs_per_op
    )
}

/// List the runs of one suite, or of every suite under the results root.
///
/// An unreadable suite directory is reported on stderr and skipped.
///
/// # Errors
///
/// Returns `Err` if the results root cannot be read or a run record is
/// malformed.
pub fn list(config: &HarnessConfig, suite: Option<&str>) -> Result<(), CliError> {
    let store = RunStore::new(config.results_root());
    match suite {
        Some(suite) => list_suite(&store, suite),
        None => {
            for suite in store.suites()? {
                println!("{}", suite.bold());
                list_suite(&store, &suite)?;
            }
            Ok(())
        }
    }
}

fn list_suite(store: &RunStore, suite: &str) -> Result<(), CliError> {
    let ids = match store.list_ids(suite) {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };
    let baseline = store.get_baseline(suite);
    for id in ids {
        let run = store.read(suite, &id)?;
        let is_baseline = baseline.as_deref() == Some(id.as_str());
        println!("{}", format_run_line(&id, &run, is_baseline));
    }
    Ok(())
}

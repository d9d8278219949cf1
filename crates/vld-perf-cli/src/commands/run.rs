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

//! Run - execute a suite and record the result

use super::report::print_comparison;
use crate::error::CliError;
use colored::Colorize;
use tracing::debug;
use vld_perf_core::compare::compare;
use vld_perf_core::run_id::{disambiguate, new_run_id};
use vld_perf_core::{HarnessConfig, RunExecutor, RunOptions, RunStore, SuiteRegistry};

/// Parameters of one `run` invocation.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Suite name.
    pub suite: String,
    /// Human label; sanitized into the run id, stored verbatim.
    pub label: String,
    /// Designate the new run as the suite's baseline.
    pub as_baseline: bool,
    /// Regression threshold in percent.
    pub threshold: f64,
    /// Echo subprocess commands and benchmark output.
    pub echo: bool,
    /// Also echo the injected environment variable.
    pub verbose: bool,
    /// Tee detector output while it runs.
    pub stream: bool,
}

/// Execute a suite, save the run and compare it against the baseline.
///
/// # Errors
///
/// Returns `Err` if the suite configuration cannot be loaded, the suite is
/// unknown, the run fails, the record cannot be saved, or the baseline
/// pointer names a run that is not stored. A failure after saving leaves
/// the saved record in place.
pub fn run(config: &HarnessConfig, request: &RunRequest) -> Result<(), CliError> {
    let suites = SuiteRegistry::load(config.suites_path())?;
    let invocation = suites.resolve(&request.suite)?;
    let store = RunStore::new(config.results_root());

    let run_id = disambiguate(&new_run_id(&request.label), |id| {
        store.exists(&request.suite, id)
    });
    debug!(suite = %request.suite, %run_id, "starting run");

    let options = RunOptions {
        echo: request.echo,
        verbose: request.verbose,
        stream: request.stream,
    };
    let result = RunExecutor::from_config(config).execute(
        &request.suite,
        &run_id,
        &request.label,
        invocation,
        &options,
    )?;

    let path = store.write(&request.suite, &run_id, &result)?;
    println!("{} {}", "Saved:".green().bold(), path.display());

    let baseline = store.get_baseline(&request.suite);
    if let Some(base_id) = &baseline {
        let lhs = store.read(&request.suite, base_id)?;
        print_comparison(&compare("baseline", &lhs, &run_id, &result, request.threshold));
    }

    if request.as_baseline {
        store.set_baseline(&request.suite, &run_id)?;
        if baseline.is_some() {
            println!("Baseline set to {}", run_id);
        } else {
            println!("Baseline initialized: {}", run_id);
        }
    } else if baseline.is_none() {
        println!("No baseline set; use set-baseline or --as-baseline to define one.");
    }
    Ok(())
}

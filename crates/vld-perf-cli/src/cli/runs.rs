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

//! Commands that execute or compare runs.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use vld_perf_core::{HarnessConfig, DEFAULT_THRESHOLD_PCT};

/// Run commands.
#[derive(Subcommand)]
pub enum RunCommands {
    /// Execute a suite, save the run and compare it against the baseline
    ///
    /// Runs the end-to-end benchmark once and the detector once with the
    /// suite's arguments. The run is saved as
    /// `<results>/<suite>/<timestamp>_<label>.json`.
    Run {
        /// Suite name from suites.json
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Label appended to the run id
        #[arg(long, default_value = "run")]
        label: String,

        /// Make this run the suite's baseline
        #[arg(long)]
        as_baseline: bool,

        /// Regression threshold in percent
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_PCT, value_name = "PCT")]
        threshold: f64,

        /// Echo the injected environment and enable debug logging
        #[arg(long)]
        verbose: bool,

        /// Do not echo commands or benchmark output
        #[arg(long)]
        quiet: bool,

        /// Do not stream detector output
        #[arg(long)]
        no_stream: bool,
    },

    /// Compare two stored runs
    ///
    /// Use `baseline` as the first run id to compare against the suite's
    /// baseline.
    Compare {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Prior run id, or `baseline`
        #[arg(value_name = "LHS")]
        lhs: String,

        /// New run id
        #[arg(value_name = "RHS")]
        rhs: String,

        /// Regression threshold in percent
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_PCT, value_name = "PCT")]
        threshold: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl RunCommands {
    /// Execute the run command.
    pub fn execute(self, config: &HarnessConfig) -> Result<(), CliError> {
        match self {
            RunCommands::Run {
                suite,
                label,
                as_baseline,
                threshold,
                verbose,
                quiet,
                no_stream,
            } => commands::run(
                config,
                &commands::RunRequest {
                    suite,
                    label,
                    as_baseline,
                    threshold,
                    echo: !quiet,
                    verbose,
                    stream: !no_stream,
                },
            ),
            RunCommands::Compare {
                suite,
                lhs,
                rhs,
                threshold,
                json,
            } => commands::compare(config, &suite, &lhs, &rhs, threshold, json),
        }
    }
}

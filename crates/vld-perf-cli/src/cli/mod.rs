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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into the following modules:
//!
//! - [`runs`]: executing and comparing runs (run, compare)
//! - [`store`]: inspecting and editing stored runs (list, set-baseline, rm)
//! - [`utility`]: utility commands (completion)

mod runs;
mod store;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vld_perf_core::HarnessConfig;

pub use runs::RunCommands;
pub use store::StoreCommands;
pub use utility::UtilityCommands;

/// vld-perf - performance regression harness for the video lightning detector
///
/// Runs named suites of detector arguments through the end-to-end benchmark
/// and the detector itself, stores every run under `perf-results/` and flags
/// regressions against a per-suite baseline.
///
/// # Examples
///
/// ```bash
/// # Run a suite and make it the baseline
/// vld-perf run full --label main --as-baseline
///
/// # Compare a later run against the baseline
/// vld-perf compare full baseline 20250102-090000_simd
///
/// # List stored runs of every suite
/// vld-perf list
/// ```
#[derive(Parser)]
#[command(name = "vld-perf")]
#[command(author, version, about = "Performance regression harness for the video lightning detector", long_about = None)]
pub struct Cli {
    /// Results directory (defaults to $VLD_PERF_RESULTS_DIR or perf-results)
    #[arg(long, global = true, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Harness configuration from the environment with CLI overrides applied.
    pub fn config(&self) -> HarnessConfig {
        let config = HarnessConfig::from_env();
        match &self.results_dir {
            Some(dir) => config.with_results_root(dir),
            None => config,
        }
    }
}

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Runs (run, compare)
/// ├── Store (list, set-baseline, rm)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Run commands - flattened to appear at top level
    #[command(flatten)]
    Runs(RunCommands),

    // Store commands - flattened to appear at top level
    #[command(flatten)]
    Store(StoreCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command against the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` on any fatal harness condition: missing configuration,
    /// unknown suite, failed subprocess, missing artifact or record, or a
    /// baseline that was requested but is not set.
    pub fn execute(self, config: &HarnessConfig) -> Result<(), CliError> {
        match self {
            Commands::Runs(cmd) => cmd.execute(config),
            Commands::Store(cmd) => cmd.execute(config),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }

    /// Whether the command asked for verbose output.
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Runs(RunCommands::Run { verbose: true, .. }))
    }
}

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

//! Commands that inspect or edit stored runs.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use vld_perf_core::HarnessConfig;

/// Store commands.
#[derive(Subcommand)]
pub enum StoreCommands {
    /// List stored runs
    ///
    /// Without a suite, lists every suite directory under the results root.
    List {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: Option<String>,
    },

    /// Designate a run as the suite's baseline
    ///
    /// The run id is not checked against the store.
    SetBaseline {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Run id
        #[arg(value_name = "RUN_ID")]
        run_id: String,
    },

    /// Delete a stored run
    Rm {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Run id
        #[arg(value_name = "RUN_ID")]
        run_id: String,
    },
}

impl StoreCommands {
    /// Execute the store command.
    pub fn execute(self, config: &HarnessConfig) -> Result<(), CliError> {
        match self {
            StoreCommands::List { suite } => commands::list(config, suite.as_deref()),
            StoreCommands::SetBaseline { suite, run_id } => {
                commands::set_baseline(config, &suite, &run_id)
            }
            StoreCommands::Rm { suite, run_id } => commands::remove(config, &suite, &run_id),
        }
    }
}

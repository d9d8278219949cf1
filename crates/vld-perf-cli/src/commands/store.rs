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

//! Baseline designation and run removal

use crate::error::CliError;
use vld_perf_core::{HarnessConfig, RunStore};

/// Designate `run_id` as the suite's baseline.
///
/// The run id is not checked against the store; a dangling pointer only
/// fails when it is read.
pub fn set_baseline(config: &HarnessConfig, suite: &str, run_id: &str) -> Result<(), CliError> {
    RunStore::new(config.results_root()).set_baseline(suite, run_id)?;
    println!("Baseline set to {}", run_id);
    Ok(())
}

/// Delete a stored run.
///
/// The baseline pointer is left alone even when it names the removed run.
pub fn remove(config: &HarnessConfig, suite: &str, run_id: &str) -> Result<(), CliError> {
    let path = RunStore::new(config.results_root()).remove(suite, run_id)?;
    println!("Removed {}", path.display());
    Ok(())
}

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

//! vld-perf CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **run**: execute a suite, save the run, compare it against the baseline
//! - **compare**: delta report between two stored runs (`baseline` alias)
//! - **list**: one summary line per stored run
//! - **set-baseline**: designate a suite's baseline run
//! - **rm**: delete a stored run
//! - **completion**: shell completion scripts (bash, zsh, fish, powershell, elvish)
//!
//! # Configuration
//!
//! Paths and subprocess commands come from the environment (see
//! [`vld_perf_core::config`]); `--results-dir` overrides the results root.
//! `RUST_LOG` controls diagnostic logging on stderr.

pub mod cli;
pub mod commands;
pub mod error;

/// Default log directive when `RUST_LOG` does not say otherwise.
pub fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "vld_perf=debug"
    } else {
        "vld_perf=warn"
    }
}

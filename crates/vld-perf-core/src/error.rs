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

//! Structured error types for the performance harness.
//!
//! Every fatal condition of the run lifecycle maps to one [`PerfError`]
//! variant. Variants carry the path, command or captured output needed to
//! diagnose the failure without re-running it.
//!
//! Soft failures (no benchmark line matched, a metadata query failed) are not
//! errors: they degrade to zero or empty values at the call site.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, PerfError>;

/// The main error type for harness operations.
///
/// Implements `Clone` so a failed stage can be reported and also kept
/// for a summary without re-formatting.
///
/// # Examples
///
/// ```rust,no_run
/// use vld_perf_core::error::PerfError;
///
/// fn read_suites(path: &str) -> Result<String, PerfError> {
///     std::fs::read_to_string(path).map_err(|e| PerfError::io(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum PerfError {
    /// The suite configuration artifact could not be read.
    #[error("failed to read suite configuration '{path}': {message}")]
    ConfigUnreadable {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// The suite configuration artifact is not a JSON object of strings.
    #[error("failed to parse suite configuration '{path}': {message}")]
    ConfigMalformed {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// The requested suite is not present in the configuration.
    #[error("suite not found: {suite} (known suites: {})", format_known(.known))]
    SuiteNotFound {
        /// Requested suite name
        suite: String,
        /// Suite names that are configured
        known: Vec<String>,
    },

    /// Invocation arguments could not be split or are otherwise unusable.
    #[error("invalid invocation arguments: {0}")]
    InvalidArgs(String),

    /// A subprocess could not be launched.
    #[error("failed to start '{program}': {message}")]
    Spawn {
        /// Program that failed to launch
        program: String,
        /// Underlying error message
        message: String,
    },

    /// The benchmark facility exited unsuccessfully.
    ///
    /// The captured combined output is attached for diagnostics.
    #[error("benchmark run failed ({status})\n{output}")]
    BenchmarkFailed {
        /// Exit status description
        status: String,
        /// Combined stdout and stderr of the benchmark facility
        output: String,
    },

    /// The detector exited unsuccessfully.
    #[error("detector failed ({status})")]
    DetectorFailed {
        /// Exit status description
        status: String,
    },

    /// The detector's output directory could not be found in its arguments.
    #[error("could not determine output directory from CLI args (expected -o or --output-directory-path)")]
    OutputDirUnknown,

    /// The detector did not write its timing artifact.
    #[error("timing report not found at '{path}'")]
    ArtifactMissing {
        /// Expected artifact path
        path: PathBuf,
    },

    /// The detector's timing artifact could not be decoded.
    #[error("failed to decode timing report '{path}': {message}")]
    ArtifactMalformed {
        /// Artifact path
        path: PathBuf,
        /// Decoder error message
        message: String,
    },

    /// No run record exists for the given suite and run id.
    #[error("run '{run_id}' not found in suite '{suite}'")]
    RunNotFound {
        /// Suite name
        suite: String,
        /// Run identifier
        run_id: String,
    },

    /// A suite's storage directory is missing or unreadable.
    #[error("cannot read suite {suite}: {message}")]
    SuiteDirUnreadable {
        /// Suite name
        suite: String,
        /// Underlying error message
        message: String,
    },

    /// A baseline was requested but none is set for the suite.
    #[error("no baseline set for suite {suite}")]
    NoBaseline {
        /// Suite name
        suite: String,
    },

    /// I/O operation failed on a store or artifact path.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON encoding or decoding of a run record failed.
    #[error("JSON error for '{path}': {message}")]
    Json {
        /// The path being read or written
        path: PathBuf,
        /// The error message
        message: String,
    },
}

fn format_known(known: &[String]) -> String {
    if known.is_empty() {
        "none".to_string()
    } else {
        known.join(", ")
    }
}

impl PerfError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a JSON error with path context.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a spawn error for a program that could not be started.
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            message: source.to_string(),
        }
    }

    /// Create a run-not-found error.
    pub fn run_not_found(suite: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self::RunNotFound {
            suite: suite.into(),
            run_id: run_id.into(),
        }
    }

    /// Create an invalid-arguments error.
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

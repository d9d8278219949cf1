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

//! Run record and baseline persistence.
//!
//! Layout under the results root:
//!
//! ```text
//! perf-results/
//! ├── suites.json
//! └── full/
//!     ├── baseline.json              {"run_id": "20250101-120000_main"}
//!     ├── 20250101-120000_main.json
//!     └── 20250102-093011_simd.json
//! ```
//!
//! Records are encoded with 4-space indentation, fixed field order and
//! sorted stage keys. Writes are plain, non-atomic file writes: a crash while
//! writing can leave a truncated record behind.

use crate::error::{PerfError, Result};
use crate::model::{BaselinePointer, RunResult};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the per-suite baseline pointer.
pub const BASELINE_FILE: &str = "baseline.json";

const RECORD_EXT: &str = "json";

/// Owner of all persisted run records and baseline pointers.
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Results root of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a suite's records.
    pub fn suite_dir(&self, suite: &str) -> PathBuf {
        self.root.join(suite)
    }

    /// Path of the record for `(suite, run_id)`.
    pub fn record_path(&self, suite: &str, run_id: &str) -> PathBuf {
        self.suite_dir(suite).join(format!("{}.{}", run_id, RECORD_EXT))
    }

    fn baseline_path(&self, suite: &str) -> PathBuf {
        self.suite_dir(suite).join(BASELINE_FILE)
    }

    /// Returns true when a record exists for `(suite, run_id)`.
    pub fn exists(&self, suite: &str, run_id: &str) -> bool {
        self.record_path(suite, run_id).is_file()
    }

    /// Persists a run record, silently replacing an existing one.
    ///
    /// # Errors
    ///
    /// Returns an error when a name is not a plain path component, the suite
    /// directory cannot be created, or the record cannot be encoded or
    /// written.
    pub fn write(&self, suite: &str, run_id: &str, result: &RunResult) -> Result<PathBuf> {
        check_component("suite", suite)?;
        check_component("run id", run_id)?;
        if format!("{}.{}", run_id, RECORD_EXT) == BASELINE_FILE {
            return Err(PerfError::invalid_args(
                "run id 'baseline' is reserved for the baseline pointer",
            ));
        }

        let dir = self.suite_dir(suite);
        fs::create_dir_all(&dir).map_err(|e| PerfError::io(&dir, e))?;

        let path = self.record_path(suite, run_id);
        let bytes = encode(result).map_err(|e| PerfError::json(&path, e))?;
        fs::write(&path, bytes).map_err(|e| PerfError::io(&path, e))?;

        info!(suite, run_id, path = %path.display(), "saved run record");
        Ok(path)
    }

    /// Loads a run record.
    ///
    /// # Errors
    ///
    /// - [`PerfError::RunNotFound`] when no record exists
    /// - [`PerfError::Io`] / [`PerfError::Json`] when it cannot be read or decoded
    pub fn read(&self, suite: &str, run_id: &str) -> Result<RunResult> {
        check_component("suite", suite)?;
        check_component("run id", run_id)?;
        let path = self.record_path(suite, run_id);
        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PerfError::run_not_found(suite, run_id),
            _ => PerfError::io(&path, e),
        })?;
        serde_json::from_str(&raw).map_err(|e| PerfError::json(&path, e))
    }

    /// Run identifiers of a suite, in directory order.
    ///
    /// # Errors
    ///
    /// Returns [`PerfError::SuiteDirUnreadable`] when the suite directory is
    /// missing or cannot be read.
    pub fn list_ids(&self, suite: &str) -> Result<Vec<String>> {
        check_component("suite", suite)?;
        let dir = self.suite_dir(suite);
        let entries = fs::read_dir(&dir).map_err(|e| PerfError::SuiteDirUnreadable {
            suite: suite.to_string(),
            message: e.to_string(),
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PerfError::io(&dir, e))?;
            let path = entry.path();
            if path.is_dir() || entry.file_name() == BASELINE_FILE {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }

    /// All run records of a suite, in directory order.
    ///
    /// The order is whatever the filesystem yields and is not guaranteed to
    /// be chronological.
    pub fn list(&self, suite: &str) -> Result<Vec<RunResult>> {
        self.list_ids(suite)?
            .iter()
            .map(|id| self.read(suite, id))
            .collect()
    }

    /// Suite directories under the root, sorted by name.
    ///
    /// A missing root yields an empty list.
    pub fn suites(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PerfError::io(&self.root, e)),
        };

        let mut suites = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PerfError::io(&self.root, e))?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    suites.push(name.to_string());
                }
            }
        }
        suites.sort();
        Ok(suites)
    }

    /// Deletes a run record.
    ///
    /// # Errors
    ///
    /// Returns [`PerfError::RunNotFound`] when no record exists; the store is
    /// left unchanged.
    pub fn remove(&self, suite: &str, run_id: &str) -> Result<PathBuf> {
        check_component("suite", suite)?;
        check_component("run id", run_id)?;
        let path = self.record_path(suite, run_id);
        if !path.is_file() {
            return Err(PerfError::run_not_found(suite, run_id));
        }
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PerfError::run_not_found(suite, run_id),
            _ => PerfError::io(&path, e),
        })?;
        info!(suite, run_id, "removed run record");
        Ok(path)
    }

    /// Designated baseline of a suite.
    ///
    /// A missing, unreadable, unparsable or empty pointer yields `None`.
    pub fn get_baseline(&self, suite: &str) -> Option<String> {
        check_component("suite", suite).ok()?;
        let path = self.baseline_path(suite);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<BaselinePointer>(&raw) {
            Ok(pointer) if !pointer.run_id.is_empty() => Some(pointer.run_id),
            Ok(_) => None,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unparsable baseline pointer");
                None
            }
        }
    }

    /// Points the suite's baseline at `run_id`.
    ///
    /// The run is not required to exist.
    pub fn set_baseline(&self, suite: &str, run_id: &str) -> Result<()> {
        check_component("suite", suite)?;
        let dir = self.suite_dir(suite);
        fs::create_dir_all(&dir).map_err(|e| PerfError::io(&dir, e))?;

        let path = self.baseline_path(suite);
        let pointer = BaselinePointer {
            run_id: run_id.to_string(),
        };
        let bytes = encode(&pointer).map_err(|e| PerfError::json(&path, e))?;
        fs::write(&path, bytes).map_err(|e| PerfError::io(&path, e))?;

        info!(suite, run_id, "baseline updated");
        Ok(())
    }
}

/// Encodes a value as 4-space indented JSON with a trailing newline.
fn encode<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Rejects names that would escape the suite directory.
fn check_component(what: &str, name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c| c == '/' || c == '\\')
        || name.contains('\0');
    if invalid {
        Err(PerfError::invalid_args(format!("invalid {}: '{}'", what, name)))
    } else {
        Ok(())
    }
}

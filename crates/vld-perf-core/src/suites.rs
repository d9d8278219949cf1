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

//! Suite registry.
//!
//! Maps suite names to the invocation-argument string the detector is run
//! with. The registry is read from `suites.json` under the results root:
//!
//! ```json
//! {
//!     "full": "-i sample.mp4 -o ./runs/full -a -s 0.4",
//!     "quick": "-i short.mp4 -o ./runs/quick -s 0.6"
//! }
//! ```

use crate::error::{PerfError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the suite configuration file under the results root.
pub const SUITES_FILE: &str = "suites.json";

/// Immutable mapping from suite name to invocation arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteRegistry {
    suites: BTreeMap<String, String>,
}

impl SuiteRegistry {
    /// Loads the registry from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`PerfError::ConfigUnreadable`] if the file is missing or unreadable
    /// - [`PerfError::ConfigMalformed`] if it is not a JSON object of strings
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| PerfError::ConfigUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let registry = Self::from_json(&raw).map_err(|e| PerfError::ConfigMalformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), suites = registry.len(), "loaded suite registry");
        Ok(registry)
    }

    /// Parses the registry from JSON text.
    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        let suites: BTreeMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { suites })
    }

    /// Builds a registry from in-memory entries.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            suites: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Resolves a suite name to its invocation arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PerfError::SuiteNotFound`] if the suite is not configured.
    pub fn resolve(&self, suite: &str) -> Result<&str> {
        self.suites
            .get(suite)
            .map(String::as_str)
            .ok_or_else(|| PerfError::SuiteNotFound {
                suite: suite.to_string(),
                known: self.names().map(str::to_string).collect(),
            })
    }

    /// Suite names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.suites.keys().map(String::as_str)
    }

    /// Number of configured suites.
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Returns true when no suite is configured.
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

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

//! Descriptive run metadata discovery.
//!
//! Every query is best-effort. A provider answers `None` when the value is
//! unavailable and the executor records an empty string instead.

use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

/// A piece of descriptive metadata attached to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Short source-control revision.
    CommitSha,
    /// Current branch name.
    Branch,
    /// Go toolchain version.
    GoVersion,
    /// ffmpeg version banner.
    FfmpegVersion,
}

impl MetadataKey {
    /// All keys, in the order they are queried.
    pub const ALL: [MetadataKey; 4] = [
        MetadataKey::CommitSha,
        MetadataKey::Branch,
        MetadataKey::GoVersion,
        MetadataKey::FfmpegVersion,
    ];

    /// Returns the key as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::CommitSha => "commit_sha",
            MetadataKey::Branch => "branch",
            MetadataKey::GoVersion => "go_version",
            MetadataKey::FfmpegVersion => "ffmpeg_version",
        }
    }
}

/// Source of descriptive strings, each independently optional.
pub trait MetadataProvider {
    /// Returns the value for `key`, or `None` when it cannot be determined.
    fn query(&self, key: MetadataKey) -> Option<String>;

    /// Returns the value for `key`, or an empty string.
    fn query_or_empty(&self, key: MetadataKey) -> String {
        self.query(key).unwrap_or_default()
    }
}

/// Provider that asks git, go and ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct CommandMetadataProvider;

impl CommandMetadataProvider {
    /// Creates a new provider.
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProvider for CommandMetadataProvider {
    fn query(&self, key: MetadataKey) -> Option<String> {
        let value = match key {
            MetadataKey::CommitSha => command_output("git", &["rev-parse", "--short", "HEAD"]),
            MetadataKey::Branch => command_output("git", &["rev-parse", "--abbrev-ref", "HEAD"]),
            MetadataKey::GoVersion => command_output("go", &["version"]),
            MetadataKey::FfmpegVersion => command_output("ffmpeg", &["-version"])
                .and_then(|out| out.lines().next().map(str::to_string)),
        };
        let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if value.is_none() {
            debug!(key = key.as_str(), "metadata query yielded nothing");
        }
        value
    }
}

/// Runs a command and returns its stdout when it exits successfully.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
}

/// Provider answering from a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider {
    values: HashMap<MetadataKey, String>,
}

impl StaticMetadataProvider {
    /// Creates an empty provider; every query yields `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value returned for `key`.
    pub fn with(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl MetadataProvider for StaticMetadataProvider {
    fn query(&self, key: MetadataKey) -> Option<String> {
        self.values.get(&key).cloned()
    }
}

/// Operating system of the running harness.
pub fn current_os() -> &'static str {
    std::env::consts::OS
}

/// CPU architecture of the running harness.
pub fn current_arch() -> &'static str {
    std::env::consts::ARCH
}

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

//! Fluent builder for run records.

use vld_perf_core::model::{BenchStats, RunMetadata, RunResult, TimingsReport};

/// Builder for [`RunResult`] fixtures.
///
/// Metadata fields not set explicitly get fixed, plausible values so records
/// built in different tests compare equal.
///
/// # Examples
///
/// ```
/// use vld_perf_test::fixtures::builders::RunResultBuilder;
///
/// let run = RunResultBuilder::new("quick", "r1").detections(3).build();
/// assert_eq!(run.metadata.run_id, "r1");
/// assert_eq!(run.detections, 3);
/// ```
#[derive(Debug, Clone)]
pub struct RunResultBuilder {
    metadata: RunMetadata,
    timings: TimingsReport,
    bench: BenchStats,
    detections: u64,
    notes: String,
}

impl RunResultBuilder {
    /// Creates a builder for a run of `suite` identified by `run_id`.
    pub fn new(suite: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            metadata: RunMetadata {
                run_id: run_id.into(),
                suite: suite.into(),
                label: "run".to_string(),
                commit_sha: "0a1b2c3".to_string(),
                branch: "main".to_string(),
                go_version: "go version go1.22.1 linux/amd64".to_string(),
                ffmpeg_version: String::new(),
                os: "linux".to_string(),
                arch: "amd64".to_string(),
                cli_args: "-i sample.mp4 -o out".to_string(),
                timestamp_iso: "2025-01-01T12:00:00Z".to_string(),
            },
            timings: TimingsReport::default(),
            bench: BenchStats::default(),
            detections: 0,
            notes: String::new(),
        }
    }

    /// Sets the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.metadata.label = label.into();
        self
    }

    /// Sets the invocation arguments recorded in metadata.
    pub fn cli_args(mut self, args: impl Into<String>) -> Self {
        self.metadata.cli_args = args.into();
        self
    }

    /// Sets the ffmpeg version banner.
    pub fn ffmpeg_version(mut self, version: impl Into<String>) -> Self {
        self.metadata.ffmpeg_version = version.into();
        self
    }

    /// Sets the total elapsed milliseconds.
    pub fn total_ms(mut self, total: f64) -> Self {
        self.timings.total_ms = total;
        self
    }

    /// Sets one stage timing.
    pub fn stage(mut self, name: impl Into<String>, ms: f64) -> Self {
        self.timings.stages.insert(name.into(), ms);
        self
    }

    /// Sets the benchmark figures.
    pub fn bench(mut self, ns_per_op: f64, bytes_per_op: f64, allocs_per_op: f64) -> Self {
        self.bench = BenchStats {
            ns_per_op,
            bytes_per_op,
            allocs_per_op,
        };
        self
    }

    /// Sets the detection count.
    pub fn detections(mut self, count: u64) -> Self {
        self.detections = count;
        self
    }

    /// Sets the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builds the record.
    pub fn build(self) -> RunResult {
        RunResult {
            metadata: self.metadata,
            timings: self.timings,
            bench: self.bench,
            detections: self.detections,
            notes: self.notes,
        }
    }
}

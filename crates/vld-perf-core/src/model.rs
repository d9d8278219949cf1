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

//! Run record data model.
//!
//! Field order in these structs is the on-disk field order, so records stay
//! diffable across commits. Stage timings live in a [`BTreeMap`] for the same
//! reason.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stage key for the analysis pass of the detector.
pub const STAGE_VIDEO_ANALYSIS: &str = "video_analysis";

/// Stage key for the detection pass of the detector.
pub const STAGE_VIDEO_DETECTION: &str = "video_detection";

/// Descriptive metadata identifying one executed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Run identifier, unique within a suite.
    pub run_id: String,
    /// Suite name.
    pub suite: String,
    /// Human label the run was started with.
    pub label: String,
    /// Short source-control revision.
    pub commit_sha: String,
    /// Branch name.
    pub branch: String,
    /// Go toolchain version string.
    pub go_version: String,
    /// First line of `ffmpeg -version`, when available.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ffmpeg_version: String,
    /// Operating system.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
    /// Raw invocation-argument string of the suite.
    pub cli_args: String,
    /// RFC 3339 timestamp of the run.
    pub timestamp_iso: String,
}

/// Timing artifact written by the detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingsReport {
    /// Total elapsed milliseconds.
    pub total_ms: f64,
    /// Elapsed milliseconds per named stage.
    #[serde(rename = "stages_ms", default)]
    pub stages: BTreeMap<String, f64>,
}

impl TimingsReport {
    /// Returns the elapsed milliseconds of a stage, or 0 when absent.
    pub fn stage(&self, name: &str) -> f64 {
        self.stages.get(name).copied().unwrap_or(0.0)
    }
}

/// Per-operation figures extracted from benchmark output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchStats {
    /// Nanoseconds per operation.
    pub ns_per_op: f64,
    /// Bytes allocated per operation.
    pub bytes_per_op: f64,
    /// Allocations per operation.
    pub allocs_per_op: f64,
}

impl BenchStats {
    /// Returns true when no figure was extracted.
    pub fn is_zero(&self) -> bool {
        self.ns_per_op == 0.0 && self.bytes_per_op == 0.0 && self.allocs_per_op == 0.0
    }
}

/// The unit of persistence: one executed run of a suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Run metadata.
    pub metadata: RunMetadata,
    /// Detector timing report.
    #[serde(rename = "timings_ms")]
    pub timings: TimingsReport,
    /// Benchmark statistics.
    pub bench: BenchStats,
    /// Number of positive detection events.
    pub detections: u64,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Per-suite baseline pointer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselinePointer {
    /// Designated run identifier.
    #[serde(default)]
    pub run_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_lookup_defaults_to_zero() {
        let mut timings = TimingsReport {
            total_ms: 12.5,
            ..Default::default()
        };
        timings.stages.insert(STAGE_VIDEO_ANALYSIS.to_string(), 7.0);

        assert_eq!(timings.stage(STAGE_VIDEO_ANALYSIS), 7.0);
        assert_eq!(timings.stage(STAGE_VIDEO_DETECTION), 0.0);
    }

    #[test]
    fn test_timings_decode_without_stages() {
        let timings: TimingsReport = serde_json::from_str(r#"{"total_ms": 42.5}"#).unwrap();
        assert_eq!(timings.total_ms, 42.5);
        assert!(timings.stages.is_empty());
    }

    #[test]
    fn test_timings_decode_detector_artifact() {
        let raw = r#"{
    "total_ms": 1520.25,
    "stages_ms": {
        "video_analysis": 900.5,
        "video_detection": 600.75
    }
}"#;
        let timings: TimingsReport = serde_json::from_str(raw).unwrap();
        assert_eq!(timings.total_ms, 1520.25);
        assert_eq!(timings.stage(STAGE_VIDEO_DETECTION), 600.75);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let result = RunResult::default();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("ffmpeg_version"));
        assert!(!json.contains("notes"));
    }

    #[test]
    fn test_bench_stats_is_zero() {
        assert!(BenchStats::default().is_zero());
        let stats = BenchStats {
            allocs_per_op: 1.0,
            ..Default::default()
        };
        assert!(!stats.is_zero());
    }
}

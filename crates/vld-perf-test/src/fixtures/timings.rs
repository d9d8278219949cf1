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

//! Timing report samples.

use serde_json::{json, Map, Value};
use vld_perf_core::model::{STAGE_VIDEO_ANALYSIS, STAGE_VIDEO_DETECTION};

/// A timing report as the detector writes it.
pub fn timings_json(total_ms: f64, stages: &[(&str, f64)]) -> String {
    let stages: Map<String, Value> = stages
        .iter()
        .map(|(name, ms)| (name.to_string(), json!(ms)))
        .collect();
    json!({ "total_ms": total_ms, "stages_ms": stages }).to_string()
}

/// A timing report with both detector stages.
pub fn typical_timings_json() -> String {
    timings_json(
        1523.4,
        &[(STAGE_VIDEO_ANALYSIS, 901.2), (STAGE_VIDEO_DETECTION, 588.7)],
    )
}

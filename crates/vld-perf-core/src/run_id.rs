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

//! Run identifiers.
//!
//! A run id is `YYYYMMDD-HHMMSS_<label>` in local time, with the label reduced
//! to `[A-Za-z0-9_-]`. Ids sort chronologically by name and stay readable in
//! a directory listing.

use chrono::{DateTime, Local, TimeZone};

/// Label used when none is given or nothing survives sanitizing.
pub const DEFAULT_LABEL: &str = "run";

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Reduces a label to characters that are safe in a file name.
///
/// Other characters become `-`; leading and trailing dashes are trimmed.
///
/// # Examples
///
/// ```
/// use vld_perf_core::run_id::sanitize_label;
///
/// assert_eq!(sanitize_label("simd blur v2"), "simd-blur-v2");
/// assert_eq!(sanitize_label("  "), "run");
/// ```
pub fn sanitize_label(label: &str) -> String {
    let mapped: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = mapped.trim_matches('-');
    if trimmed.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds the run id for a run started at `at`.
pub fn run_id_at<Tz: TimeZone>(at: &DateTime<Tz>, label: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}", at.format(TIMESTAMP_FORMAT), sanitize_label(label))
}

/// Builds the run id for a run starting now.
pub fn new_run_id(label: &str) -> String {
    run_id_at(&Local::now(), label)
}

/// Makes `candidate` unique with respect to `taken`.
///
/// Ids only have second granularity, so two runs with the same label in the
/// same second collide. The first free id among `candidate`, `candidate-2`,
/// `candidate-3`, ... is returned.
pub fn disambiguate<F>(candidate: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(candidate) {
        return candidate.to_string();
    }
    (2u32..)
        .map(|n| format!("{}-{}", candidate, n))
        .find(|id| !taken(id))
        .unwrap_or_else(|| candidate.to_string())
}

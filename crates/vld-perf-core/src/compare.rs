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

//! Run comparison and regression flagging.
//!
//! Compares six fixed metrics of two runs. A metric regresses when its
//! percentage change exceeds the threshold; higher is worse for all of them.

use crate::model::{RunResult, STAGE_VIDEO_ANALYSIS, STAGE_VIDEO_DETECTION};
use serde::Serialize;
use std::fmt;

/// Threshold used when the caller does not pass one.
pub const DEFAULT_THRESHOLD_PCT: f64 = 5.0;

/// A compared metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total elapsed milliseconds.
    TotalMs,
    /// `video_analysis` stage milliseconds.
    AnalysisMs,
    /// `video_detection` stage milliseconds.
    DetectionMs,
    /// Nanoseconds per benchmark operation.
    NsPerOp,
    /// Bytes allocated per benchmark operation.
    BytesPerOp,
    /// Allocations per benchmark operation.
    AllocsPerOp,
}

impl Metric {
    /// All metrics in report order.
    pub const ALL: [Metric; 6] = [
        Metric::TotalMs,
        Metric::AnalysisMs,
        Metric::DetectionMs,
        Metric::NsPerOp,
        Metric::BytesPerOp,
        Metric::AllocsPerOp,
    ];

    /// Report label of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TotalMs => "total_ms",
            Metric::AnalysisMs => "analysis_ms",
            Metric::DetectionMs => "detection_ms",
            Metric::NsPerOp => "ns/op",
            Metric::BytesPerOp => "B/op",
            Metric::AllocsPerOp => "allocs/op",
        }
    }

    /// Reads the metric from a run.
    pub fn value(&self, run: &RunResult) -> f64 {
        match self {
            Metric::TotalMs => run.timings.total_ms,
            Metric::AnalysisMs => run.timings.stage(STAGE_VIDEO_ANALYSIS),
            Metric::DetectionMs => run.timings.stage(STAGE_VIDEO_DETECTION),
            Metric::NsPerOp => run.bench.ns_per_op,
            Metric::BytesPerOp => run.bench.bytes_per_op,
            Metric::AllocsPerOp => run.bench.allocs_per_op,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change of one metric between two runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDelta {
    /// Compared metric.
    pub metric: Metric,
    /// Prior value.
    pub lhs: f64,
    /// New value.
    pub rhs: f64,
    /// `rhs - lhs`.
    pub delta: f64,
    /// Signed percentage change relative to `lhs`; `None` when both sides are zero.
    pub percent: Option<f64>,
    /// Whether the change exceeds the threshold.
    pub regression: bool,
}

impl MetricDelta {
    /// Computes the change of a metric.
    ///
    /// A zero `lhs` with a non-zero `rhs` yields a 0% change, since there is
    /// nothing to scale against.
    pub fn new(metric: Metric, lhs: f64, rhs: f64, threshold_pct: f64) -> Self {
        let delta = rhs - lhs;
        if lhs == 0.0 && rhs == 0.0 {
            return Self {
                metric,
                lhs,
                rhs,
                delta,
                percent: None,
                regression: false,
            };
        }
        let percent = if lhs != 0.0 { (delta / lhs) * 100.0 } else { 0.0 };
        Self {
            metric,
            lhs,
            rhs,
            delta,
            percent: Some(percent),
            regression: percent > threshold_pct,
        }
    }

    /// Returns false when neither run measured the metric.
    pub fn is_applicable(&self) -> bool {
        self.percent.is_some()
    }
}

/// Structured comparison report between two runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Label of the prior run.
    pub lhs_label: String,
    /// Label of the new run.
    pub rhs_label: String,
    /// Threshold in percent.
    pub threshold_pct: f64,
    /// Per-metric changes in report order.
    pub metrics: Vec<MetricDelta>,
}

impl Comparison {
    /// Flagged metrics.
    pub fn regressions(&self) -> impl Iterator<Item = &MetricDelta> {
        self.metrics.iter().filter(|m| m.regression)
    }

    /// Returns true when any metric is flagged.
    pub fn has_regressions(&self) -> bool {
        self.metrics.iter().any(|m| m.regression)
    }

    /// Header line of the report.
    pub fn header(&self) -> String {
        format!(
            "Compare {} -> {} (threshold {:.1}%)",
            self.lhs_label, self.rhs_label, self.threshold_pct
        )
    }

    /// Looks up the change of one metric.
    pub fn get(&self, metric: Metric) -> Option<&MetricDelta> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

impl fmt::Display for MetricDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent {
            None => write!(f, "- {:<20}: n/a", self.metric.as_str()),
            Some(pct) => write!(
                f,
                "- {:<20}: {:.0} -> {:.0}  ({:+.1}%){}",
                self.metric.as_str(),
                self.lhs,
                self.rhs,
                pct,
                if self.regression { "  REGRESSION" } else { "" }
            ),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for m in &self.metrics {
            writeln!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// Compares two runs metric by metric.
///
/// # Examples
///
/// ```
/// use vld_perf_core::compare::{compare, Metric, DEFAULT_THRESHOLD_PCT};
/// use vld_perf_core::model::RunResult;
///
/// let mut old = RunResult::default();
/// old.timings.total_ms = 1000.0;
/// let mut new = old.clone();
/// new.timings.total_ms = 1100.0;
///
/// let report = compare("baseline", &old, "candidate", &new, DEFAULT_THRESHOLD_PCT);
/// let total = report.get(Metric::TotalMs).unwrap();
/// assert_eq!(total.percent, Some(10.0));
/// assert!(total.regression);
/// ```
pub fn compare(
    lhs_label: &str,
    lhs: &RunResult,
    rhs_label: &str,
    rhs: &RunResult,
    threshold_pct: f64,
) -> Comparison {
    let metrics = Metric::ALL
        .iter()
        .map(|&metric| MetricDelta::new(metric, metric.value(lhs), metric.value(rhs), threshold_pct))
        .collect();

    Comparison {
        lhs_label: lhs_label.to_string(),
        rhs_label: rhs_label.to_string(),
        threshold_pct,
        metrics,
    }
}

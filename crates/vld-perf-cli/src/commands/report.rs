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

//! Console rendering of comparison reports.

use colored::Colorize;
use vld_perf_core::Comparison;

/// Print a comparison report, regressed metrics highlighted.
pub fn print_comparison(report: &Comparison) {
    println!();
    println!("{}", report.header().bold());
    for metric in &report.metrics {
        let line = metric.to_string();
        if metric.regression {
            println!("{}", line.red().bold());
        } else if metric.percent.map_or(false, |p| p < 0.0) {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

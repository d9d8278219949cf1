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

//! Shared test fixtures for the vld-perf harness.
//!
//! # Quick Start
//!
//! ```rust
//! use vld_perf_test::fixtures::{self, builders::RunResultBuilder};
//!
//! let run = RunResultBuilder::new("full", "20250101-120000_main")
//!     .total_ms(1500.0)
//!     .stage("video_analysis", 900.0)
//!     .bench(2.0e9, 9000.0, 80.0)
//!     .build();
//! assert_eq!(run.metadata.suite, "full");
//!
//! let output = fixtures::go_bench_output(2.0e9, 9000.0, 80.0);
//! assert!(output.contains("ns/op"));
//! ```
//!
//! On unix, [`workspace::Workspace`] lays out a temporary results root and
//! writes fake detector and benchmark programs into it, so the real process
//! plumbing can be exercised without Go or a video.

pub mod fixtures;
#[cfg(unix)]
pub mod workspace;

pub use fixtures::builders::RunResultBuilder;

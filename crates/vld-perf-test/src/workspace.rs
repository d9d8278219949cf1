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

//! Temporary harness workspaces with fake subprocesses.
//!
//! The fake programs are POSIX shell scripts. They record the arguments they
//! were given so tests can assert on the exact command line.

use crate::fixtures::{go_bench_output, typical_timings_json};
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vld_perf_core::config::{HarnessConfig, ENV_BENCH_ARGS, ENV_BENCH_PROGRAM, ENV_DETECTOR, ENV_RESULTS_DIR};
use vld_perf_core::executor::DETECTION_SENTINEL;
use vld_perf_core::suites::SUITES_FILE;

/// A temporary directory holding a results root and fake programs.
///
/// Everything is removed when the workspace is dropped.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Results root inside the workspace (not created until written to).
    pub fn results_root(&self) -> PathBuf {
        self.path().join("perf-results")
    }

    /// Detector output directory with the given name.
    pub fn out_dir(&self, name: &str) -> PathBuf {
        self.path().join("out").join(name)
    }

    /// Writes `suites.json` with the given entries.
    pub fn write_suites(&self, suites: &[(&str, &str)]) -> io::Result<PathBuf> {
        let map: serde_json::Map<String, serde_json::Value> = suites
            .iter()
            .map(|(name, args)| (name.to_string(), serde_json::Value::from(*args)))
            .collect();
        let root = self.results_root();
        fs::create_dir_all(&root)?;
        let path = root.join(SUITES_FILE);
        fs::write(&path, serde_json::Value::Object(map).to_string())?;
        Ok(path)
    }

    /// Configuration pointing at this workspace and the given fake programs.
    pub fn config(&self, detector: &Path, bench: &Path) -> HarnessConfig {
        HarnessConfig::default()
            .with_results_root(self.results_root())
            .with_detector_bin(detector)
            .with_bench_command(bench.display().to_string(), Vec::new())
    }

    /// Environment variables that point the CLI at this workspace.
    pub fn env(&self, detector: &Path, bench: &Path) -> Vec<(&'static str, String)> {
        vec![
            (ENV_RESULTS_DIR, self.results_root().display().to_string()),
            (ENV_DETECTOR, detector.display().to_string()),
            (ENV_BENCH_PROGRAM, bench.display().to_string()),
            (ENV_BENCH_ARGS, "-count 1".to_string()),
        ]
    }
}

/// Fake detector program.
///
/// Writes a timing report into the directory given with `-o` or
/// `--output-directory-path`, prints the detection sentinel the configured
/// number of times and exits with the configured code.
#[derive(Debug, Clone)]
pub struct FakeDetector {
    detections: u32,
    timings: Option<String>,
    exit_code: i32,
}

impl Default for FakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDetector {
    /// A detector that succeeds with typical timings and no detections.
    pub fn new() -> Self {
        Self {
            detections: 0,
            timings: Some(typical_timings_json()),
            exit_code: 0,
        }
    }

    /// Number of detection lines to print.
    pub fn detections(mut self, count: u32) -> Self {
        self.detections = count;
        self
    }

    /// Timing report to write; `None` writes nothing.
    pub fn timings(mut self, json: Option<String>) -> Self {
        self.timings = json;
        self
    }

    /// Exit code of the program.
    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Writes the program into `dir` and returns its path.
    ///
    /// Arguments of every invocation are appended to `detector.args`, one per
    /// line, next to the program.
    pub fn write(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join("fake-detector");
        let log = dir.join("detector.args");
        let timings = match &self.timings {
            Some(json) => format!(
                "if [ -n \"$out\" ]; then\n  mkdir -p \"$out\"\n  cat > \"$out/timings.json\" <<'VLD_EOF'\n{}\nVLD_EOF\nfi\n",
                json
            ),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" >> '{log}'\n\
             out=\"\"\n\
             while [ $# -gt 0 ]; do\n\
             case \"$1\" in\n\
             -o|--output-directory-path) out=\"$2\" ;;\n\
             esac\n\
             shift\n\
             done\n\
             {timings}\
             echo \"Analyzing video frames\"\n\
             i=0\n\
             while [ $i -lt {detections} ]; do\n\
             echo \"{sentinel}\"\n\
             i=$((i + 1))\n\
             done\n\
             echo \"Detection finished\"\n\
             exit {code}\n",
            log = log.display(),
            timings = timings,
            detections = self.detections,
            sentinel = DETECTION_SENTINEL,
            code = self.exit_code,
        );
        write_program(&path, &script)?;
        Ok(path)
    }
}

/// Fake benchmark facility program.
///
/// Prints the configured output followed by the value of `VLD_CLI_ARGS` and
/// exits with the configured code.
#[derive(Debug, Clone)]
pub struct FakeBench {
    output: String,
    exit_code: i32,
}

impl Default for FakeBench {
    fn default() -> Self {
        Self::new(go_bench_output(2.0e9, 9000.0, 80.0))
    }
}

impl FakeBench {
    /// A benchmark printing `output`.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: 0,
        }
    }

    /// Exit code of the program.
    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Writes the program into `dir` and returns its path.
    pub fn write(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join("fake-bench");
        let script = format!(
            "#!/bin/sh\n\
             cat <<'VLD_EOF'\n\
             {output}\n\
             VLD_EOF\n\
             echo \"args=$VLD_CLI_ARGS\"\n\
             exit {code}\n",
            output = self.output.trim_end_matches('\n'),
            code = self.exit_code,
        );
        write_program(&path, &script)?;
        Ok(path)
    }
}

/// Reads the arguments recorded by a [`FakeDetector`] in `dir`.
pub fn recorded_detector_args(dir: &Path) -> io::Result<Vec<String>> {
    let raw = fs::read_to_string(dir.join("detector.args"))?;
    Ok(raw.lines().map(str::to_string).collect())
}

fn write_program(path: &Path, script: &str) -> io::Result<()> {
    fs::write(path, script)?;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

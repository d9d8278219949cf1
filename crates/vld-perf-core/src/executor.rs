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

//! Run execution.
//!
//! One run of a suite goes through these stages, in order:
//!
//! 1. collect descriptive metadata (best-effort)
//! 2. run the end-to-end benchmark once and extract its summary line
//! 3. run the detector directly, streaming and counting detection lines
//! 4. locate the detector's output directory in its arguments
//! 5. read the timing report the detector wrote there
//! 6. assemble the [`RunResult`]
//!
//! The benchmark facility, the detector and the metadata source are traits so
//! tests can substitute stubs for the real subprocesses.

use crate::args::{augment_detector_args, find_output_dir, join_args, split_args};
use crate::config::HarnessConfig;
use crate::environment::{current_arch, current_os, CommandMetadataProvider, MetadataKey, MetadataProvider};
use crate::error::{PerfError, Result};
use crate::metrics::BenchParser;
use crate::model::{RunMetadata, RunResult, TimingsReport};
use chrono::{Local, SecondsFormat};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

/// Line fragment the detector prints in verbose mode for every positive frame.
pub const DETECTION_SENTINEL: &str = "Frame meets the threshold requirements.";

/// Timing report file name inside the detector's output directory.
pub const TIMINGS_FILE: &str = "timings.json";

/// Console behaviour of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Print subprocess commands and the benchmark output.
    pub echo: bool,
    /// Also print the injected environment variable.
    pub verbose: bool,
    /// Tee detector stdout to the console while it runs.
    pub stream: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            echo: true,
            verbose: false,
            stream: true,
        }
    }
}

impl RunOptions {
    /// Options that print nothing.
    pub fn silent() -> Self {
        Self {
            echo: false,
            verbose: false,
            stream: false,
        }
    }
}

/// Runs the end-to-end benchmark for a suite.
pub trait BenchmarkFacility {
    /// Runs the benchmark once with `invocation_args` injected and returns
    /// its captured output.
    fn run(&self, invocation_args: &str) -> Result<String>;

    /// Command line printed when echoing, if any.
    fn command_line(&self) -> Option<String> {
        None
    }

    /// Name of the environment variable carrying the invocation arguments.
    fn args_env_var(&self) -> Option<&str> {
        None
    }
}

/// Runs the detector binary once.
pub trait DetectorRunner {
    /// Runs the detector with `args`, handing each stdout line to `on_line`
    /// while it runs. Returns after the process has exited.
    fn run(&self, args: &[String], on_line: &mut dyn FnMut(&str)) -> Result<()>;

    /// Program printed when echoing, if any.
    fn program(&self) -> Option<String> {
        None
    }
}

/// Benchmark facility backed by a subprocess (`go test -bench ...` by default).
#[derive(Debug, Clone)]
pub struct CommandBenchmark {
    program: String,
    args: Vec<String>,
    env_var: String,
}

impl CommandBenchmark {
    /// Creates a facility running `program args...`.
    pub fn new(program: impl Into<String>, args: Vec<String>, env_var: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env_var: env_var.into(),
        }
    }

    /// Creates the facility described by a harness configuration.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(
            config.bench_program.clone(),
            config.bench_args.clone(),
            config.args_env_var.clone(),
        )
    }
}

impl BenchmarkFacility for CommandBenchmark {
    fn run(&self, invocation_args: &str) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "running benchmark");
        let output = Command::new(&self.program)
            .args(&self.args)
            .env(&self.env_var, invocation_args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PerfError::spawn(&self.program, e))?;

        // stdout first, then stderr
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(PerfError::BenchmarkFailed {
                status: output.status.to_string(),
                output: combined,
            });
        }
        Ok(combined)
    }

    fn command_line(&self) -> Option<String> {
        Some(format!("{} {}", self.program, join_args(&self.args)))
    }

    fn args_env_var(&self) -> Option<&str> {
        Some(&self.env_var)
    }
}

/// Detector runner backed by the detector binary.
///
/// Stdout is piped and read line by line; stderr goes straight to the
/// harness's stderr. The child stays in the harness's process group, so a
/// terminal interrupt reaches both.
#[derive(Debug, Clone)]
pub struct ProcessDetector {
    bin: PathBuf,
}

impl ProcessDetector {
    /// Creates a runner for the given binary.
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl DetectorRunner for ProcessDetector {
    fn run(&self, args: &[String], on_line: &mut dyn FnMut(&str)) -> Result<()> {
        let program = self.bin.display().to_string();
        debug!(%program, ?args, "running detector");

        let mut child = Command::new(&self.bin)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| PerfError::spawn(&program, e))?;
        let stdout = child.stdout.take();
        let mut guard = ChildGuard::new(child);

        if let Some(stdout) = stdout {
            for_each_line(BufReader::new(stdout), on_line)
                .map_err(|e| PerfError::io(&self.bin, e))?;
        }

        let status = guard.wait().map_err(|e| PerfError::io(&self.bin, e))?;
        if !status.success() {
            return Err(PerfError::DetectorFailed {
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn program(&self) -> Option<String> {
        Some(self.bin.display().to_string())
    }
}

/// Kills and reaps the child unless it was waited for.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Reads `reader` to the end, handing each line without its terminator to
/// `on_line`. Invalid UTF-8 is replaced rather than rejected.
pub fn for_each_line<R: BufRead>(mut reader: R, on_line: &mut dyn FnMut(&str)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        on_line(line.trim_end_matches(|c| c == '\n' || c == '\r'));
    }
}

/// Returns true when a detector output line reports a positive frame.
pub fn is_detection(line: &str) -> bool {
    line.contains(DETECTION_SENTINEL)
}

/// Reads and decodes `<dir>/timings.json`.
pub fn read_timings(dir: impl AsRef<Path>) -> Result<TimingsReport> {
    let path = dir.as_ref().join(TIMINGS_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PerfError::ArtifactMissing { path });
        }
        Err(e) => return Err(PerfError::io(path, e)),
    };
    serde_json::from_str(&raw).map_err(|e| PerfError::ArtifactMalformed {
        path,
        message: e.to_string(),
    })
}

/// Executes suite runs.
pub struct RunExecutor<M, B, D> {
    metadata: M,
    bench: B,
    detector: D,
    parser: BenchParser,
}

impl RunExecutor<CommandMetadataProvider, CommandBenchmark, ProcessDetector> {
    /// Creates an executor running the real subprocesses of `config`.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(
            CommandMetadataProvider::new(),
            CommandBenchmark::from_config(config),
            ProcessDetector::new(&config.detector_bin),
        )
        .with_parser(BenchParser::for_benchmark(&config.bench_name))
    }
}

impl<M, B, D> RunExecutor<M, B, D>
where
    M: MetadataProvider,
    B: BenchmarkFacility,
    D: DetectorRunner,
{
    /// Creates an executor from its three collaborators.
    ///
    /// Benchmark output is matched against the default benchmark name.
    pub fn new(metadata: M, bench: B, detector: D) -> Self {
        Self {
            metadata,
            bench,
            detector,
            parser: BenchParser::for_benchmark(crate::config::DEFAULT_BENCH_NAME),
        }
    }

    /// Replaces the benchmark summary parser.
    pub fn with_parser(mut self, parser: BenchParser) -> Self {
        self.parser = parser;
        self
    }

    /// Runs a suite once and returns the unsaved result.
    ///
    /// # Errors
    ///
    /// Fails on any subprocess that cannot start or exits unsuccessfully, when
    /// the arguments name no output directory, and when the timing report
    /// cannot be found or decoded. Metadata gaps and unmatched benchmark output are not errors.
    pub fn execute(
        &self,
        suite: &str,
        run_id: &str,
        label: &str,
        invocation_args: &str,
        options: &RunOptions,
    ) -> Result<RunResult> {
        let args = split_args(invocation_args);
        let metadata = self.collect_metadata(suite, run_id, label, invocation_args);

        if options.echo {
            if let Some(cmd) = self.bench.command_line() {
                println!("bench> {}", cmd);
            }
            if options.verbose {
                if let Some(var) = self.bench.args_env_var() {
                    println!("env> {}={}", var, invocation_args);
                }
            }
        }
        let output = self.bench.run(invocation_args)?;
        if options.echo {
            print!("{}", output);
        }
        let bench = self.parser.parse(&output);

        let detector_args = augment_detector_args(args);
        if options.echo {
            if let Some(program) = self.detector.program() {
                println!("detector> {} {}", program, join_args(&detector_args));
            }
        }
        let mut detections = 0u64;
        self.detector.run(&detector_args, &mut |line| {
            if options.stream {
                println!("{}", line);
            }
            if is_detection(line) {
                detections += 1;
            }
        })?;
        debug!(detections, "detector finished");

        let out_dir = find_output_dir(&detector_args).ok_or(PerfError::OutputDirUnknown)?;
        let timings = read_timings(out_dir)?;

        Ok(RunResult {
            metadata,
            timings,
            bench,
            detections,
            notes: String::new(),
        })
    }

    fn collect_metadata(
        &self,
        suite: &str,
        run_id: &str,
        label: &str,
        invocation_args: &str,
    ) -> RunMetadata {
        let q = |key: MetadataKey| self.metadata.query_or_empty(key);
        RunMetadata {
            run_id: run_id.to_string(),
            suite: suite.to_string(),
            label: label.to_string(),
            commit_sha: q(MetadataKey::CommitSha),
            branch: q(MetadataKey::Branch),
            go_version: q(MetadataKey::GoVersion),
            ffmpeg_version: q(MetadataKey::FfmpegVersion),
            os: current_os().to_string(),
            arch: current_arch().to_string(),
            cli_args: invocation_args.to_string(),
            timestamp_iso: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

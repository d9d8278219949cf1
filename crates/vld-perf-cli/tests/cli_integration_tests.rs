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

//! CLI integration tests.
//!
//! Store-level commands run against records written with the core store.
//! `run` tests drive fake detector and benchmark programs and need unix.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use vld_perf_core::model::STAGE_VIDEO_ANALYSIS;
use vld_perf_core::RunStore;
use vld_perf_test::RunResultBuilder;

fn vld_perf_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vld-perf").expect("Failed to find vld-perf binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn vld_perf_in(root: &Path) -> Command {
    let mut cmd = vld_perf_cmd();
    cmd.arg("--results-dir").arg(root);
    cmd
}

/// Store with two runs of `full`: `r1` (baseline) and a slower `r2`.
fn seeded_store() -> TempDir {
    let dir = TempDir::new().unwrap();
    let store = RunStore::new(dir.path());
    let r1 = RunResultBuilder::new("full", "r1")
        .total_ms(1000.0)
        .stage(STAGE_VIDEO_ANALYSIS, 600.0)
        .bench(2.0e9, 9000.0, 80.0)
        .build();
    let r2 = RunResultBuilder::new("full", "r2")
        .total_ms(1100.0)
        .stage(STAGE_VIDEO_ANALYSIS, 590.0)
        .bench(2.05e9, 9000.0, 80.0)
        .build();
    store.write("full", "r1", &r1).unwrap();
    store.write("full", "r2", &r2).unwrap();
    store.set_baseline("full", "r1").unwrap();
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    vld_perf_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance regression harness"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    vld_perf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vld-perf"));
}

#[test]
fn test_no_subcommand_fails() {
    vld_perf_cmd().assert().failure();
}

// ===== Compare Command Tests =====

#[test]
fn test_compare_against_baseline() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["compare", "full", "baseline", "r2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare r1 -> r2 (threshold 5.0%)"))
        .stdout(predicate::str::contains(
            "- total_ms            : 1000 -> 1100  (+10.0%)  REGRESSION",
        ))
        .stdout(predicate::str::contains(
            "- analysis_ms         : 600 -> 590  (-1.7%)\n",
        ))
        .stdout(predicate::str::contains("- detection_ms        : n/a"))
        .stdout(predicate::str::contains(
            "- ns/op               : 2000000000 -> 2050000000  (+2.5%)\n",
        ));
}

#[test]
fn test_compare_threshold_option() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["compare", "full", "r1", "r2", "--threshold", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold 20.0%"))
        .stdout(predicate::str::contains("REGRESSION").not());
}

#[test]
fn test_compare_json() {
    let dir = seeded_store();
    let output = vld_perf_in(dir.path())
        .args(["compare", "full", "r1", "r2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["lhs_label"], "r1");
    assert_eq!(report["rhs_label"], "r2");
    let metrics = report["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 6);
    assert_eq!(metrics[0]["metric"], "total_ms");
    assert_eq!(metrics[0]["regression"], true);
    assert!(metrics[2]["percent"].is_null());
}

#[test]
fn test_compare_without_baseline_fails() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["compare", "other", "baseline", "r2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: no baseline set for suite other"));
}

#[test]
fn test_compare_missing_run_fails() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["compare", "full", "r1", "r9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run 'r9' not found in suite 'full'"));
}

// ===== List Command Tests =====

#[test]
fn test_list_suite() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["list", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "r1 *baseline  total=1000ms  ns/op=2000000000  allocs/op=80",
        ))
        .stdout(predicate::str::contains(
            "r2  total=1100ms  ns/op=2050000000  allocs/op=80",
        ))
        .stdout(predicate::str::contains("baseline.json").not());
}

#[test]
fn test_list_all_suites() {
    let dir = seeded_store();
    let store = RunStore::new(dir.path());
    store
        .write("quick", "q1", &RunResultBuilder::new("quick", "q1").total_ms(10.0).build())
        .unwrap();

    vld_perf_in(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("full\n"))
        .stdout(predicate::str::contains("quick\n"))
        .stdout(predicate::str::contains("q1  total=10ms"));
}

#[test]
fn test_list_missing_suite_is_diagnostic() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["list", "ghost"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot read suite ghost"));
}

#[test]
fn test_list_empty_root() {
    let dir = TempDir::new().unwrap();
    vld_perf_in(&dir.path().join("nothing-here"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_results_dir_from_environment() {
    let dir = seeded_store();
    vld_perf_cmd()
        .env("VLD_PERF_RESULTS_DIR", dir.path())
        .args(["list", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r1 *baseline"));
}

// ===== Baseline and Removal Tests =====

#[test]
fn test_set_baseline() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["set-baseline", "full", "r2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline set to r2"));
    assert_eq!(
        RunStore::new(dir.path()).get_baseline("full").as_deref(),
        Some("r2")
    );
}

#[test]
fn test_set_baseline_does_not_check_existence() {
    let dir = TempDir::new().unwrap();
    vld_perf_in(dir.path())
        .args(["set-baseline", "new-suite", "future-run"])
        .assert()
        .success();
    assert_eq!(
        RunStore::new(dir.path()).get_baseline("new-suite").as_deref(),
        Some("future-run")
    );
}

#[test]
fn test_rm() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["rm", "full", "r2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"))
        .stdout(predicate::str::contains("r2.json"));
    assert!(!RunStore::new(dir.path()).exists("full", "r2"));
}

#[test]
fn test_rm_missing_run_fails() {
    let dir = seeded_store();
    vld_perf_in(dir.path())
        .args(["rm", "full", "r9"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
    assert_eq!(RunStore::new(dir.path()).list_ids("full").unwrap().len(), 2);
}

// ===== Completion Tests =====

#[test]
fn test_completion_bash() {
    vld_perf_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vld-perf"));
}

#[test]
fn test_completion_install_instructions() {
    vld_perf_cmd()
        .args(["completion", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("~/.zshrc"));
}

#[test]
fn test_completion_unsupported_shell() {
    vld_perf_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell: 'tcsh'"));
}

#[test]
fn test_completion_install_unsupported_shell() {
    vld_perf_cmd()
        .args(["completion", "tcsh", "--install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell: 'tcsh'"));
}

// ===== Run Command Tests =====

#[cfg(unix)]
mod run {
    use super::*;
    use vld_perf_test::workspace::{FakeBench, FakeDetector, Workspace};

    struct Setup {
        ws: Workspace,
        env: Vec<(&'static str, String)>,
    }

    fn setup(detector: FakeDetector, bench: FakeBench) -> Setup {
        let ws = Workspace::new().unwrap();
        let detector = detector.write(ws.path()).unwrap();
        let bench = bench.write(ws.path()).unwrap();
        let full = format!("-i sample.mp4 -a -s 0.4 -o {}", ws.out_dir("full").display());
        ws.write_suites(&[("full", &full), ("quick", "-i sample.mp4")])
            .unwrap();
        let env = ws.env(&detector, &bench);
        Setup { ws, env }
    }

    fn run_cmd(setup: &Setup) -> Command {
        let mut cmd = vld_perf_cmd();
        cmd.current_dir(setup.ws.path()).envs(setup.env.clone());
        cmd
    }

    fn store(setup: &Setup) -> RunStore {
        RunStore::new(setup.ws.results_root())
    }

    #[test]
    fn test_first_run_initializes_baseline() {
        let s = setup(FakeDetector::new().detections(2), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--label", "main", "--as-baseline", "--quiet", "--no-stream"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved:"))
            .stdout(predicate::str::contains("_main.json"))
            .stdout(predicate::str::contains("Baseline initialized: "))
            .stdout(predicate::str::contains("Compare").not());

        let ids = store(&s).list_ids("full").unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(store(&s).get_baseline("full"), Some(ids[0].clone()));

        let run = store(&s).read("full", &ids[0]).unwrap();
        assert_eq!(run.detections, 2);
        assert_eq!(run.metadata.label, "main");
        assert_eq!(run.bench.ns_per_op, 2.0e9);
        assert!(run.timings.total_ms > 0.0);
    }

    #[test]
    fn test_run_then_list_shows_new_run() {
        let s = setup(FakeDetector::new().detections(3), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--label", "e2e", "--quiet", "--no-stream"])
            .assert()
            .success();

        let ids = store(&s).list_ids("full").unwrap();
        assert_eq!(ids.len(), 1);
        let run = store(&s).read("full", &ids[0]).unwrap();
        assert_eq!(run.detections, 3);
        assert!(run.timings.total_ms > 0.0);

        let expected = format!("{}  total={:.0}ms", ids[0], run.timings.total_ms);
        run_cmd(&s)
            .args(["list", "full"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected))
            .stdout(predicate::str::contains("ns/op=2000000000  allocs/op=80"));
    }

    #[test]
    fn test_second_run_compares_against_baseline() {
        let s = setup(FakeDetector::new(), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--as-baseline", "--quiet", "--no-stream"])
            .assert()
            .success();

        run_cmd(&s)
            .args(["run", "full", "--label", "next", "--quiet", "--no-stream"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Compare baseline -> "))
            .stdout(predicate::str::contains("- total_ms            : "))
            .stdout(predicate::str::contains("No baseline set").not())
            .stdout(predicate::str::contains("Baseline set to").not());

        assert_eq!(store(&s).list_ids("full").unwrap().len(), 2);
    }

    #[test]
    fn test_same_label_twice_keeps_both_runs() {
        let s = setup(FakeDetector::new(), FakeBench::default());
        for _ in 0..2 {
            run_cmd(&s)
                .args(["run", "full", "--quiet", "--no-stream"])
                .assert()
                .success();
        }
        assert_eq!(store(&s).list_ids("full").unwrap().len(), 2);
    }

    #[test]
    fn test_run_without_baseline_prints_hint() {
        let s = setup(FakeDetector::new(), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--quiet", "--no-stream"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "No baseline set; use set-baseline or --as-baseline to define one.",
            ));
        assert_eq!(store(&s).get_baseline("full"), None);
    }

    #[test]
    fn test_run_echoes_and_streams() {
        let s = setup(FakeDetector::new().detections(1), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--verbose"])
            .assert()
            .success()
            .stdout(predicate::str::contains("bench> "))
            .stdout(predicate::str::contains("env> VLD_CLI_ARGS=-i sample.mp4 -a -s 0.4 -o "))
            .stdout(predicate::str::contains("args=-i sample.mp4"))
            .stdout(predicate::str::contains("detector> "))
            .stdout(predicate::str::contains("--export-timings -v -f"))
            .stdout(predicate::str::contains("Frame meets the threshold requirements."));
    }

    #[test]
    fn test_quiet_run_prints_no_subprocess_output() {
        let s = setup(FakeDetector::new().detections(1), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--quiet", "--no-stream"])
            .assert()
            .success()
            .stdout(predicate::str::contains("bench> ").not())
            .stdout(predicate::str::contains("Frame meets").not());
    }

    #[test]
    fn test_unknown_suite_fails() {
        let s = setup(FakeDetector::new(), FakeBench::default());
        run_cmd(&s)
            .args(["run", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("suite not found: nope (known suites: full, quick)"));
    }

    #[test]
    fn test_missing_suites_file_fails() {
        let ws = Workspace::new().unwrap();
        vld_perf_cmd()
            .current_dir(ws.path())
            .env("VLD_PERF_RESULTS_DIR", ws.results_root())
            .args(["run", "full"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error: failed to read suite configuration"));
    }

    #[test]
    fn test_suite_without_output_dir_fails() {
        let s = setup(FakeDetector::new(), FakeBench::default());
        run_cmd(&s)
            .args(["run", "quick", "--quiet", "--no-stream"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not determine output directory"));
        assert!(store(&s).list_ids("quick").is_err());
    }

    #[test]
    fn test_detector_failure_saves_nothing() {
        let s = setup(FakeDetector::new().exit_code(2), FakeBench::default());
        run_cmd(&s)
            .args(["run", "full", "--quiet", "--no-stream"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error: detector failed"));
        assert!(store(&s).list_ids("full").is_err());
    }

    #[test]
    fn test_benchmark_failure_shows_output() {
        let s = setup(
            FakeDetector::new(),
            FakeBench::new("--- FAIL: video not found").exit_code(1),
        );
        run_cmd(&s)
            .args(["run", "full", "--quiet", "--no-stream"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("benchmark run failed"))
            .stderr(predicate::str::contains("video not found"));
    }
}

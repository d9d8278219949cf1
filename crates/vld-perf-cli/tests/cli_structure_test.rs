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

//! Command surface structure tests.

use clap::{CommandFactory, Parser};
use vld_perf_cli::cli::{Cli, Commands, RunCommands, StoreCommands};
use vld_perf_core::DEFAULT_THRESHOLD_PCT;

fn subcommand_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect()
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_all_commands_available() {
    let names = subcommand_names();
    for expected in ["run", "compare", "list", "set-baseline", "rm", "completion"] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn test_run_defaults() {
    let cli = Cli::try_parse_from(["vld-perf", "run", "full"]).unwrap();
    match cli.command {
        Commands::Runs(RunCommands::Run {
            suite,
            label,
            as_baseline,
            threshold,
            verbose,
            quiet,
            no_stream,
        }) => {
            assert_eq!(suite, "full");
            assert_eq!(label, "run");
            assert!(!as_baseline && !verbose && !quiet && !no_stream);
            assert_eq!(threshold, DEFAULT_THRESHOLD_PCT);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn test_run_flags() {
    let cli = Cli::try_parse_from([
        "vld-perf",
        "run",
        "full",
        "--label",
        "simd blur",
        "--as-baseline",
        "--threshold",
        "2.5",
        "--verbose",
        "--quiet",
        "--no-stream",
    ])
    .unwrap();
    assert!(cli.command.verbose());
    match cli.command {
        Commands::Runs(RunCommands::Run {
            label,
            as_baseline,
            threshold,
            quiet,
            no_stream,
            ..
        }) => {
            assert_eq!(label, "simd blur");
            assert!(as_baseline && quiet && no_stream);
            assert_eq!(threshold, 2.5);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn test_compare_args() {
    let cli = Cli::try_parse_from(["vld-perf", "compare", "full", "baseline", "r2", "--json"]).unwrap();
    assert!(!cli.command.verbose());
    match cli.command {
        Commands::Runs(RunCommands::Compare {
            lhs, rhs, threshold, json, ..
        }) => {
            assert_eq!(lhs, "baseline");
            assert_eq!(rhs, "r2");
            assert_eq!(threshold, DEFAULT_THRESHOLD_PCT);
            assert!(json);
        }
        _ => panic!("expected compare command"),
    }
}

#[test]
fn test_compare_requires_three_args() {
    assert!(Cli::try_parse_from(["vld-perf", "compare", "full", "r1"]).is_err());
}

#[test]
fn test_list_suite_is_optional() {
    let cli = Cli::try_parse_from(["vld-perf", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Store(StoreCommands::List { suite: None })
    ));
}

#[test]
fn test_results_dir_is_global() {
    let cli = Cli::try_parse_from(["vld-perf", "list", "--results-dir", "/data/perf"]).unwrap();
    assert_eq!(
        cli.config().results_root,
        std::path::PathBuf::from("/data/perf")
    );
}

#[test]
fn test_invalid_threshold_rejected() {
    assert!(Cli::try_parse_from(["vld-perf", "run", "full", "--threshold", "lots"]).is_err());
}

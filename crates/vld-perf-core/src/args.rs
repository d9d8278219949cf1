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

//! Detector argument handling.
//!
//! Suites store the detector's arguments as one shell-like string. These
//! helpers split it, force the flags the harness depends on, and find the
//! output directory the detector will write its timing report into.

/// Flag enabling the detector's `timings.json` export.
pub const EXPORT_TIMINGS_FLAG: &str = "--export-timings";

/// Short and long forms of the detector's verbose flag.
pub const VERBOSE_FLAGS: [&str; 2] = ["-v", "--verbose"];

/// Short and long forms of the detector's skip-frames-export flag.
pub const SKIP_FRAMES_FLAGS: [&str; 2] = ["-f", "--skip-frames-export"];

/// Short and long forms of the detector's output directory flag.
pub const OUTPUT_DIR_FLAGS: [&str; 2] = ["-o", "--output-directory-path"];

/// Splits an invocation-argument string into arguments.
///
/// Words are separated by spaces, tabs and newlines. Single and double
/// quotes toggle grouping and are dropped; a quote inside the other kind is
/// kept literally. Backslashes and `#` have no special meaning, and an
/// unclosed quote runs to the end of the string. The benchmark splits
/// `VLD_CLI_ARGS` by the same rules, so both subprocesses see the same
/// arguments.
///
/// # Examples
///
/// ```
/// use vld_perf_core::args::split_args;
///
/// let args = split_args("-i 'my video.mp4' -s 0.4");
/// assert_eq!(args, vec!["-i", "my video.mp4", "-s", "0.4"]);
/// ```
pub fn split_args(raw: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut word = String::new();
    let mut in_single = false;
    let mut in_double = false;

    for c in raw.chars() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ' ' | '\t' | '\n' if !in_single && !in_double => {
                if !word.is_empty() {
                    args.push(std::mem::take(&mut word));
                }
            }
            _ => word.push(c),
        }
    }
    if !word.is_empty() {
        args.push(word);
    }
    args
}

/// Joins arguments back into a string suitable for echoing a command.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| {
            let a = a.as_ref();
            shlex::try_quote(a)
                .map(|q| q.into_owned())
                .unwrap_or_else(|_| a.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true when any of `keys` appears as an argument.
pub fn has_any(args: &[String], keys: &[&str]) -> bool {
    args.iter().any(|a| keys.contains(&a.as_str()))
}

/// Appends `key` unless any of `aliases` (which should include `key`) is present.
pub fn ensure_flag(mut args: Vec<String>, key: &str, aliases: &[&str]) -> Vec<String> {
    if !has_any(&args, aliases) && !args.iter().any(|a| a == key) {
        args.push(key.to_string());
    }
    args
}

/// Forces the flags the harness relies on when running the detector directly.
///
/// - `--export-timings` so the detector writes `timings.json`
/// - `-v` so detection events are printed and can be counted
/// - `-f` so frames are not exported while being measured
pub fn augment_detector_args(args: Vec<String>) -> Vec<String> {
    let args = ensure_flag(args, EXPORT_TIMINGS_FLAG, &[EXPORT_TIMINGS_FLAG]);
    let args = ensure_flag(args, VERBOSE_FLAGS[0], &VERBOSE_FLAGS);
    ensure_flag(args, SKIP_FRAMES_FLAGS[0], &SKIP_FRAMES_FLAGS)
}

/// Finds the detector's output directory (`-o` / `--output-directory-path`).
///
/// The first occurrence that is followed by a value wins.
pub fn find_output_dir(args: &[String]) -> Option<&str> {
    args.windows(2)
        .find(|pair| OUTPUT_DIR_FLAGS.contains(&pair[0].as_str()))
        .map(|pair| pair[1].as_str())
}

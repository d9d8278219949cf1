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

//! Completion - shell completion scripts and install hints

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

const BIN: &str = "vld-perf";

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

/// Startup file a completion hook goes into, per shell.
fn startup_file(shell: &str) -> Option<&'static str> {
    match shell {
        "bash" => Some("~/.bashrc"),
        "zsh" => Some("~/.zshrc"),
        "fish" => Some("~/.config/fish/config.fish"),
        "powershell" | "pwsh" => Some("$PROFILE"),
        "elvish" => Some("~/.config/elvish/rc.elv"),
        _ => None,
    }
}

/// One-line hook loading the completion script, and the file it belongs in.
///
/// Shell names are case-insensitive; `None` for shells without completion
/// support.
///
/// # Examples
///
/// ```
/// use vld_perf_cli::commands::install_hint;
///
/// let hint = install_hint("Zsh").unwrap();
/// assert!(hint.contains("~/.zshrc"));
/// assert!(install_hint("tcsh").is_none());
/// ```
pub fn install_hint(shell: &str) -> Option<String> {
    let shell = shell.to_lowercase();
    let file = startup_file(&shell)?;
    let hook = match shell.as_str() {
        "fish" => format!("{BIN} completion fish | source"),
        "powershell" | "pwsh" => {
            format!("{BIN} completion powershell | Out-String | Invoke-Expression")
        }
        "elvish" => format!("eval ({BIN} completion elvish | slurp)"),
        _ => format!("eval \"$({BIN} completion {shell})\""),
    };
    Some(format!("# add to {file}\n{hook}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_the_binary() {
        for shell in ["bash", "zsh", "fish", "powershell", "pwsh", "elvish"] {
            let text = install_hint(shell).unwrap();
            assert!(text.contains("vld-perf completion"), "{shell}: {text}");
        }
    }

    #[test]
    fn test_bash_hook() {
        assert_eq!(
            install_hint("bash").unwrap(),
            "# add to ~/.bashrc\neval \"$(vld-perf completion bash)\""
        );
    }

    #[test]
    fn test_instructions_case_insensitive() {
        assert_eq!(
            install_hint("BASH"),
            install_hint("bash")
        );
    }

    #[test]
    fn test_instructions_unsupported() {
        assert!(install_hint("tcsh").is_none());
    }
}

//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;
use tracing::info;
use wpkg_core::cli::ExitCode;

/// Writes the completion script for `shell` to `out`.
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    info!("Generating {} completions", shell);
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Never fails; returns `Result` for consistency with other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let mut cmd = Command::new("wpkg").subcommand(Command::new("list"));
        let mut out = Vec::new();
        generate_completions(Shell::Bash, &mut cmd, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("wpkg"));
        assert!(script.contains("list"));
    }
}

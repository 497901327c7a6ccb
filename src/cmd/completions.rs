//! Completions command implementation
//!
//! Handles the `cookie-size completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use std::io::Write;

use clap_complete::{generate, Shell};

/// Generate a shell completion script for `cmd` into `out`
///
/// # Examples
///
/// ```bash
/// cookie-size completions bash > /etc/bash_completion.d/cookie-size
/// cookie-size completions zsh > ~/.zfunc/_cookie-size
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut clap::Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn sample_command() -> Command {
        Command::new("cookie-size")
            .subcommand(Command::new("report").arg(Arg::new("binary-path").long("binary-path")))
            .subcommand(Command::new("run"))
    }

    #[test]
    fn test_completions_mention_subcommands() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            cmd_completions(shell, &mut sample_command(), &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("report"), "{:?} completions", shell);
            assert!(script.contains("binary-path"), "{:?} completions", shell);
        }
    }
}

//! Shell command execution.

use crate::error::{PeerfillError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

/// Execute a shell command with inherited stdio and wait for it.
///
/// Only a failure to spawn is an error; a non-zero exit is reported through
/// [`CommandResult::success`].
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = detect_shell();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!("Running `{}` via {}", command, shell);

    let status = cmd.status().map_err(|e| {
        tracing::error!("Failed to spawn {}: {}", shell, e);
        PeerfillError::InstallSpawn {
            command: command.to_string(),
            source: e,
        }
    })?;

    Ok(CommandResult {
        exit_code: status.code(),
        duration: start.elapsed(),
        success: status.success(),
    })
}

/// Quote an argument for the platform shell if it contains anything unusual.
pub fn quote_arg(arg: &str) -> String {
    if cfg!(target_os = "windows") {
        quote_for_cmd(arg)
    } else {
        quote_for_sh(arg)
    }
}

fn quote_for_sh(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@/._-+=:^,".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

// cmd.exe strips `^` outside double quotes.
fn quote_for_cmd(arg: &str) -> String {
    let plain = !arg.is_empty()
        && !arg
            .chars()
            .any(|c| c.is_whitespace() || "^&|<>()%!\"".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('"', "\"\""))
    }
}

fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn execute_successful_command() {
        let result = execute("exit 0", &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3", &CommandOptions::default()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn execute_runs_in_cwd() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
        };

        let result = execute("test -f yarn.lock", &options).unwrap();

        assert!(result.success);
    }

    #[test]
    fn spawn_failure_keeps_io_error() {
        let temp = TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().join("does-not-exist")),
        };

        let err = execute("yarn add react@^18.0.0", &options).unwrap_err();

        match &err {
            PeerfillError::InstallSpawn { command, source } => {
                assert_eq!(command, "yarn add react@^18.0.0");
                assert!(err.to_string().contains(&source.to_string()));
            }
            other => panic!("expected InstallSpawn, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn plain_args_are_not_quoted() {
        assert_eq!(quote_arg("react@^18.0.0"), "react@^18.0.0");
        assert_eq!(quote_arg("@types/node@^20.1.0"), "@types/node@^20.1.0");
        assert_eq!(quote_arg("--frozen-lockfile"), "--frozen-lockfile");
    }

    #[cfg(unix)]
    #[test]
    fn special_args_are_quoted() {
        assert_eq!(quote_arg("lib@^*"), "'lib@^*'");
        assert_eq!(quote_arg("it's"), r"'it'\''s'");
        assert_eq!(quote_arg(""), "''");
    }

    #[cfg(unix)]
    #[test]
    fn quoted_args_survive_the_shell() {
        let temp = TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
        };
        let cmd = format!("touch {}", quote_arg("lib@^*"));

        assert!(execute(&cmd, &options).unwrap().success);
        assert!(temp.path().join("lib@^*").exists());
    }

    #[test]
    fn cmd_quoting_protects_caret() {
        assert_eq!(quote_for_cmd("react@^18.0.0"), "\"react@^18.0.0\"");
        assert_eq!(quote_for_cmd("a b"), "\"a b\"");
        assert_eq!(quote_for_cmd("say\"hi"), "\"say\"\"hi\"");
        assert_eq!(quote_for_cmd(""), "\"\"");
    }

    #[test]
    fn cmd_quoting_leaves_plain_args() {
        assert_eq!(quote_for_cmd("left-pad@latest"), "left-pad@latest");
        assert_eq!(quote_for_cmd("--frozen-lockfile"), "--frozen-lockfile");
    }

    #[cfg(windows)]
    #[test]
    fn windows_quotes_caret_ranges() {
        assert_eq!(quote_arg("react@^18.0.0"), "\"react@^18.0.0\"");
    }
}

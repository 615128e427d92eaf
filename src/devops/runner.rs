//! Subprocess execution and `go` binary lookup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::types::CommandOutput;

/// Runs a program to completion and captures its output.
///
/// The installer only talks to this trait, so tests can record invocations
/// instead of spawning `go`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Spawns real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await?;

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// The `go` binary to invoke: plain `go` from `PATH` without a `GOROOT`,
/// otherwise `<GOROOT>/bin/go` (`go.exe` on Windows).
pub fn go_binary(go_root: Option<&str>) -> PathBuf {
    match go_root.filter(|r| !r.is_empty()) {
        None => PathBuf::from("go"),
        Some(root) => {
            let name = if cfg!(windows) { "go.exe" } else { "go" };
            Path::new(root).join("bin").join(name)
        }
    }
}

/// Whether `bin` can be spawned: bare names are looked up in `PATH`,
/// anything with a directory component must exist on disk.
pub fn go_binary_available(bin: &Path) -> bool {
    if bin.components().count() > 1 {
        bin.is_file()
    } else {
        which::which(bin).is_ok()
    }
}

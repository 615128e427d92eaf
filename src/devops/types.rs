//! Core types for Go tool installation.

use std::fmt;

use serde::Serialize;

use crate::catalog::PackageRef;

/// The two `go` subcommands a tool goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoStep {
    /// `go get -u -v <pkg>`: download and update
    Get,
    /// `go install <pkg>`: build and place the binary
    Install,
}

impl GoStep {
    pub fn args(&self, package: &PackageRef) -> Vec<String> {
        match self {
            GoStep::Get => vec![
                "get".to_string(),
                "-u".to_string(),
                "-v".to_string(),
                package.to_string(),
            ],
            GoStep::Install => vec!["install".to_string(), package.to_string()],
        }
    }
}

impl fmt::Display for GoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoStep::Get => write!(f, "get"),
            GoStep::Install => write!(f, "install"),
        }
    }
}

/// Captured result of one finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// One `go` step as it ran for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: GoStep,
    #[serde(flatten)]
    pub output: CommandOutput,
}

/// Final state of a single package in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Fetched and installed
    Installed,
    /// Fetched, install step not run (wildcard, or fetch reported errors)
    Fetched,
    /// A step could not be spawned or exited non-zero
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub package: PackageRef,
    pub status: ItemStatus,
    pub steps: Vec<StepRecord>,
}

impl ItemOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ItemStatus::Failed(_))
    }

    /// Output of the last step that ran, if any.
    #[cfg(test)]
    pub fn last_output(&self) -> Option<&CommandOutput> {
        self.steps.last().map(|s| &s.output)
    }
}

/// Every outcome of a batch, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.is_failed())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.items.len() - self.failed_count()
    }
}

/// Decides whether a fetch should be followed by `go install`.
///
/// Newer toolchains refuse `go get` for binaries and point at `go install`
/// on stderr; the markers are the substrings that count as such a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPolicy {
    markers: Vec<String>,
}

impl Default for InstallPolicy {
    fn default() -> Self {
        Self::new(default_install_markers())
    }
}

pub fn default_install_markers() -> Vec<String> {
    vec!["go install".to_string()]
}

impl InstallPolicy {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    /// A clean fetch (nothing at all on stderr) or one whose stderr carries
    /// a marker calls for an install step. Whitespace counts as output.
    pub fn wants_install(&self, fetch: &CommandOutput) -> bool {
        fetch.stderr.is_empty()
            || self
                .markers
                .iter()
                .any(|m| !m.is_empty() && fetch.stderr.contains(m.as_str()))
    }
}

//! Devops - resolves a tool selection and installs it with the `go` command.

use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, PackageRef};
use crate::options::Options;

use super::runner::{go_binary, CommandRunner, SystemRunner};
use super::selection::resolve_selection;
use super::types::{BatchReport, GoStep, InstallPolicy, ItemOutcome, ItemStatus, StepRecord};

/// Installs the selected catalog tools one after another.
pub struct Devops {
    catalog: Catalog,
    options: Options,
    policy: InstallPolicy,
    runner: Box<dyn CommandRunner>,
}

impl Devops {
    pub fn new(catalog: Catalog, options: Options) -> Self {
        Self::with_runner(catalog, options, Box::new(SystemRunner))
    }

    pub fn with_runner(catalog: Catalog, options: Options, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            catalog,
            options,
            policy: InstallPolicy::default(),
            runner,
        }
    }

    pub fn with_policy(mut self, policy: InstallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The `go` binary used for every step of the batch.
    pub fn go_command(&self) -> PathBuf {
        go_binary(self.options.go_root())
    }

    /// Packages the next [`exec`](Self::exec) will install, in order.
    pub fn packages(&self) -> Vec<PackageRef> {
        resolve_selection(&self.catalog, &self.options)
    }

    /// Install every selected package.
    ///
    /// A failing package is logged and recorded but never stops the batch;
    /// the returned report holds one outcome per package.
    pub async fn exec(&self) -> BatchReport {
        let bin = self.go_command();
        let packages = self.packages();
        tracing::info!(
            "Installing {} package(s) with {}",
            packages.len(),
            bin.display()
        );

        let mut report = BatchReport::default();
        for package in packages {
            let outcome = self.install_package(&bin, package).await;
            report.items.push(outcome);
        }

        tracing::info!(
            "Finished: {} succeeded, {} failed",
            report.succeeded_count(),
            report.failed_count()
        );
        report
    }

    async fn install_package(&self, bin: &Path, package: PackageRef) -> ItemOutcome {
        let mut steps = Vec::new();

        let fetch = match self.run_step(bin, GoStep::Get, &package).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("{}", e);
                return ItemOutcome {
                    package,
                    status: ItemStatus::Failed(e),
                    steps,
                };
            }
        };
        let fetch_ok = fetch.output.success;
        let install = fetch_ok && self.policy.wants_install(&fetch.output);
        if fetch_ok && !install {
            tracing::error!("{}", fetch.output.stderr.trim_end());
        }
        steps.push(fetch);

        if !fetch_ok {
            let message = step_failure(GoStep::Get, &steps[0]);
            tracing::error!("{}: {}", package, message);
            return ItemOutcome {
                package,
                status: ItemStatus::Failed(message),
                steps,
            };
        }

        let mut status = ItemStatus::Fetched;
        if install && !package.is_wildcard() {
            match self.run_step(bin, GoStep::Install, &package).await {
                Ok(record) => {
                    if !record.output.stderr.trim().is_empty() {
                        tracing::error!("{}", record.output.stderr.trim_end());
                    }
                    status = if record.output.success {
                        ItemStatus::Installed
                    } else {
                        let message = step_failure(GoStep::Install, &record);
                        tracing::error!("{}: {}", package, message);
                        ItemStatus::Failed(message)
                    };
                    steps.push(record);
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    status = ItemStatus::Failed(e);
                }
            }
        }

        if let Some(output) = steps.last().map(|s| &s.output) {
            if output.success && !output.stdout.trim().is_empty() {
                tracing::info!("{}", output.stdout.trim_end());
            }
        }

        ItemOutcome {
            package,
            status,
            steps,
        }
    }

    async fn run_step(
        &self,
        bin: &Path,
        step: GoStep,
        package: &PackageRef,
    ) -> std::result::Result<StepRecord, String> {
        let args = step.args(package);
        let name = bin
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| bin.display().to_string());
        tracing::info!("{} {}", name, args.join(" "));

        self.runner
            .run(bin, &args)
            .await
            .map(|output| StepRecord { step, output })
            .map_err(|e| format!("Failed to run {} {}: {}", bin.display(), step, e))
    }
}

fn step_failure(step: GoStep, record: &StepRecord) -> String {
    let code = record
        .output
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string());
    let stderr = record.output.stderr.trim();
    if stderr.is_empty() {
        format!("go {} exited with {}", step, code)
    } else {
        format!("go {} exited with {}: {}", step, code, stderr)
    }
}

use console::style;

use crate::config::AppConfig;
use crate::devops::{go_binary_available, BatchReport, Devops, ItemStatus};
use crate::environment::{self, EnvironmentView};
use crate::error::Result;
use crate::options::{Options, GOPATH, GOROOT, TOOLS};
use crate::utils::{first_line, truncate};

pub async fn execute(
    config: &AppConfig,
    go_root: Option<String>,
    go_path: Option<String>,
    json: bool,
    args: Vec<String>,
) -> Result<()> {
    tracing::info!("args - {:?}", args);
    let options = build_options(config, go_root, go_path, &args);
    let catalog = config.catalog();

    if options.wants_listing() {
        return super::list::execute(&catalog, json);
    }

    let env = EnvironmentView::capture().with_fallback(
        config.expanded_go_root().as_deref(),
        config.expanded_go_path().as_deref(),
    );
    let resolution = environment::resolve(&options, &env);
    resolution.apply()?;

    let devops = Devops::new(catalog, resolution.options).with_policy(config.install_policy());

    let bin = devops.go_command();
    if !go_binary_available(&bin) {
        tracing::warn!(
            "{} not found, every install step will fail. Set GOROOT or add go to PATH.",
            bin.display()
        );
    }

    let report = devops.exec().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Merge positional `KEY=VALUE` arguments, the `--go_root`/`--go_path` flags
/// and the configured default selection. Non-empty flags override
/// positional values; the config only supplies `tools` when none was given.
pub fn build_options(
    config: &AppConfig,
    go_root: Option<String>,
    go_path: Option<String>,
    args: &[String],
) -> Options {
    let mut options = Options::from_args(args);

    for (key, flag) in [(GOROOT, go_root), (GOPATH, go_path)] {
        if let Some(value) = flag.filter(|v| !v.is_empty()) {
            options = options.with(key, shellexpand::tilde(&value).into_owned());
        }
    }

    if !options.contains(TOOLS) {
        if let Some(ref tools) = config.tools {
            options = options.with(TOOLS, tools.clone());
        }
    }

    options
}

fn print_summary(report: &BatchReport) {
    if report.is_empty() {
        println!(
            "{}",
            style("Nothing to install. Run `dragon list` to see available tools.").dim()
        );
        return;
    }

    println!();
    for item in &report.items {
        match &item.status {
            ItemStatus::Installed => println!(
                "  {} {}",
                style("✓").green().bold(),
                style(&item.package).cyan()
            ),
            ItemStatus::Fetched => println!(
                "  {} {} {}",
                style("•").yellow().bold(),
                style(&item.package).cyan(),
                style("(fetched, not installed)").dim()
            ),
            ItemStatus::Failed(message) => println!(
                "  {} {} {}",
                style("✗").red().bold(),
                style(&item.package).cyan(),
                style(truncate(first_line(message), 100)).red()
            ),
        }
    }

    println!();
    let failed = report.failed_count();
    let summary = format!(
        "{} succeeded, {} failed",
        report.succeeded_count(),
        failed
    );
    if failed == 0 {
        println!("{}", style(summary).green());
    } else {
        println!("{}", style(summary).yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_options_from_positional() {
        let options = build_options(
            &AppConfig::default(),
            None,
            None,
            &args(&["tools=dlv", "GOROOT=/opt/go"]),
        );
        assert_eq!(options.tools(), Some("dlv"));
        assert_eq!(options.go_root(), Some("/opt/go"));
    }

    #[test]
    fn test_non_empty_flag_overrides_positional() {
        let options = build_options(
            &AppConfig::default(),
            Some("/usr/local/go".to_string()),
            Some(String::new()),
            &args(&["GOROOT=/opt/go", "GOPATH=/home/dev/go"]),
        );
        assert_eq!(options.go_root(), Some("/usr/local/go"));
        assert_eq!(options.go_path(), Some("/home/dev/go"));
    }

    #[test]
    fn test_config_tools_apply_only_without_selection() {
        let config = AppConfig {
            tools: Some("guru".to_string()),
            ..Default::default()
        };

        let options = build_options(&config, None, None, &[]);
        assert_eq!(options.tools(), Some("guru"));

        let options = build_options(&config, None, None, &args(&["tools=dlv"]));
        assert_eq!(options.tools(), Some("dlv"));
    }

    #[test]
    fn test_lists_flag_survives() {
        let options = build_options(&AppConfig::default(), None, None, &args(&["lists"]));
        assert!(options.wants_listing());
    }
}

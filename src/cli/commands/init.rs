use console::style;
use dialoguer::{Input, MultiSelect};

use crate::config::AppConfig;
use crate::error::Result;

pub async fn execute() -> Result<()> {
    println!("{}", style("🐉 Welcome to dragon!").bold().cyan());
    println!("Let's set up defaults for installing Go tools.\n");

    let current = AppConfig::load()?;

    let go_root: String = Input::new()
        .with_prompt("GOROOT (empty to use the environment)")
        .default(prefill(current.go_root.as_deref(), "GOROOT"))
        .allow_empty(true)
        .interact_text()?;

    let go_path: String = Input::new()
        .with_prompt("GOPATH (empty to use the environment)")
        .default(prefill(current.go_path.as_deref(), "GOPATH"))
        .allow_empty(true)
        .interact_text()?;

    let catalog = current.catalog();
    let names: Vec<&str> = catalog.iter().map(|(name, _)| name.as_str()).collect();
    let selected = MultiSelect::new()
        .with_prompt("Tools installed by default (space to toggle, none selects all)")
        .items(&names)
        .interact()?;

    let tools = if selected.is_empty() {
        None
    } else {
        Some(
            selected
                .iter()
                .map(|&i| names[i])
                .collect::<Vec<_>>()
                .join(","),
        )
    };

    let config = AppConfig {
        go_root: non_empty(go_root),
        go_path: non_empty(go_path),
        tools,
        ..current
    };

    config.save()?;

    println!("\n{}", style("✓ Configuration saved!").green().bold());
    println!(
        "Config file: {}",
        style(AppConfig::config_path()?.display()).dim()
    );
    println!(
        "\nRun {} to install your tools.",
        style("dragon tools").cyan()
    );

    Ok(())
}

fn prefill(configured: Option<&str>, env_key: &str) -> String {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var(env_key).ok())
        .unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(shellexpand::tilde(value).into_owned())
    }
}

use console::style;

use crate::config::AppConfig;
use crate::error::Result;

pub async fn show() -> Result<()> {
    let config_path = AppConfig::config_path()?;

    if !config_path.exists() {
        println!("{}", style("No configuration found, using defaults.").dim());
        println!("Run {} to create one.", style("dragon init").cyan());
        println!();
    }

    let config = AppConfig::load()?;

    println!("{}", style("Current Configuration").bold().cyan());
    println!();
    print_optional("GOROOT:         ", config.go_root.as_deref(), "(environment)");
    print_optional("GOPATH:         ", config.go_path.as_deref(), "(environment)");
    print_optional("Tools:          ", config.tools.as_deref(), "(all)");
    println!(
        "  Install hints:  {}",
        style(config.install_markers.join(", ")).yellow()
    );
    if config.extra_tools.is_empty() {
        println!("  Extra tools:    {}", style("(none)").dim());
    } else {
        println!("  Extra tools:");
        for (name, package) in &config.extra_tools {
            println!("    {} {}", style(name).cyan(), style(package).white());
        }
    }
    println!();
    println!("Config file: {}", style(config_path.display()).dim());

    Ok(())
}

fn print_optional(label: &str, value: Option<&str>, unset: &str) {
    match value {
        Some(v) => println!("  {}{}", label, style(v).white()),
        None => println!("  {}{}", label, style(unset).dim()),
    }
}

pub async fn set(key: String, value: String) -> Result<()> {
    let mut config = AppConfig::load()?;
    config.set(&key, &value)?;
    config.save()?;

    println!(
        "{} Set {} = {}",
        style("✓").green().bold(),
        style(&key).cyan(),
        style(&value).white()
    );

    Ok(())
}

pub async fn path() -> Result<()> {
    println!("{}", AppConfig::config_path()?.display());
    Ok(())
}

pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "dragon")]
#[command(version)]
#[command(about = "Install Go developer tools")]
#[command(long_about = "Fetch and install the usual Go editor, lint and debugging tools with the go command.\n\nExample: dragon tools tools=dlv,golint@latest")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install Go tools (all of them, or a `tools=a,b@version` selection)
    Tools {
        /// GOROOT to use (defaults to the environment)
        #[arg(long = "go_root", visible_alias = "go-root")]
        go_root: Option<String>,

        /// GOPATH to use (defaults to the environment)
        #[arg(long = "go_path", visible_alias = "go-path")]
        go_path: Option<String>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,

        /// KEY=VALUE options: tools=<names>, GOROOT=<dir>, GOPATH=<dir>, or `lists`
        args: Vec<String>,
    },

    /// List the tools that can be installed
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a configuration file interactively
    Init,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value (use `tool.<name>` to add a tool)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value (empty to clear)
        value: String,
    },

    /// Print the configuration file path
    Path,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Tools {
                go_root,
                go_path,
                json,
                args,
            } => {
                let config = AppConfig::load()?;
                commands::tools::execute(&config, go_root, go_path, json, args).await
            }
            Commands::List { json } => {
                let config = AppConfig::load()?;
                commands::list::execute(&config.catalog(), json)
            }
            Commands::Init => commands::init::execute().await,
            Commands::Config { command } => match command {
                ConfigCommands::Show => commands::config::show().await,
                ConfigCommands::Set { key, value } => commands::config::set(key, value).await,
                ConfigCommands::Path => commands::config::path().await,
            },
        }
    }
}

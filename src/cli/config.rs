//! Configuration display CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::ConfigBundle;
use crate::services::ConfigResolver;

/// Configuration commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display the resolved effective configuration
    Show(ConfigShowArgs),
    /// Print the config directory path
    Path,
}

/// Display the resolved effective configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable resolution summary.
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    active_profile: &'a str,
    locked: &'a str,
    theme: &'a str,
    config: &'a Config,
    broken: Vec<BrokenOutput<'a>>,
}

#[derive(Serialize, Debug)]
struct BrokenOutput<'a> {
    name: &'a str,
    reason: &'a str,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, profile_override: Option<&str>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(profile_override),
            ConfigCommand::Path => {
                let dir = Config::config_dir()
                    .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;
                println!("{}", dir.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    fn execute(&self, profile_override: Option<&str>) -> CliResult<()> {
        let bundle = resolve_bundle(profile_override)?;

        if self.json {
            output_json(&bundle)?;
        } else {
            output_human_readable(&bundle);
        }

        Ok(())
    }
}

/// Resolves the bundle against the default config directory.
pub fn resolve_bundle(profile_override: Option<&str>) -> CliResult<ConfigBundle> {
    let dir = Config::config_dir()
        .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;
    ConfigResolver::resolve(&dir, profile_override)
        .map_err(|e| CliError::io(format!("Failed to resolve configuration: {e}")))
}

fn output_json(bundle: &ConfigBundle) -> CliResult<()> {
    let output = ConfigOutput {
        active_profile: &bundle.active_profile().name,
        locked: &bundle.locked_name,
        theme: &bundle.theme.name,
        config: &bundle.config,
        broken: bundle
            .broken
            .iter()
            .map(|b| BrokenOutput {
                name: &b.name,
                reason: &b.reason,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

fn output_human_readable(bundle: &ConfigBundle) {
    println!("Launchdeck Configuration");
    println!("========================");
    println!();

    println!("Active profile: {}", bundle.active_profile().name);
    if bundle.is_locked() {
        println!("Pivot lock:     {}", bundle.locked_name);
    }
    println!("Theme:          {}", bundle.theme.name);
    println!("Grid:           {}x{}", bundle.config.x, bundle.config.y);
    println!("Shell:          {}", bundle.config.shell);
    println!();

    println!("Commands ({}):", bundle.config.commands.len());
    for command in &bundle.config.commands {
        let marker = if command.has_items() { " [dropdown]" } else { "" };
        println!(
            "  [{}{}] {}{} -> {}",
            command.row, command.col, command.name, marker, command.exec
        );
    }

    if !bundle.broken.is_empty() {
        println!();
        println!("Broken profiles ({}):", bundle.broken.len());
        for broken in &bundle.broken {
            println!("  {}: {}", broken.name, broken.reason);
        }
    }
}

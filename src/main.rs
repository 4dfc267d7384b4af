//! Launchdeck - Terminal command launcher with swappable profiles
//!
//! Executes user-defined shell commands from a grid, with named profiles
//! that can be swapped, locked, and shuffled between an active set and an
//! inventory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use launchdeck::cli;
use launchdeck::constants::{APP_NAME, ENV_LOG};

/// Launchdeck - Terminal command launcher with swappable profiles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Select a profile for this invocation, overriding any pivot lock
    #[arg(short, long, global = true, value_name = "NAME")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration commands
    Config(cli::ConfigArgs),
    /// Profile commands
    Profiles(cli::ProfilesArgs),
    /// Pivot-lock commands
    Pivot(cli::PivotArgs),
    /// Inventory commands
    Inventory(cli::InventoryArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let profile_override = args.profile.as_deref();

    let result = match &args.command {
        Some(Command::Config(cmd)) => cmd.execute(profile_override),
        Some(Command::Profiles(cmd)) => cmd.execute(profile_override),
        Some(Command::Pivot(cmd)) => cmd.execute(),
        Some(Command::Inventory(cmd)) => cmd.execute(),
        None => show_summary(profile_override),
    };

    if let Err(err) = result {
        eprintln!("{APP_NAME}: {err}");
        std::process::exit(err.exit_code());
    }

    Ok(())
}

/// Default action without a subcommand: resolve and summarize.
fn show_summary(profile_override: Option<&str>) -> cli::CliResult<()> {
    let bundle = cli::config::resolve_bundle(profile_override)?;

    if let Some(header) = &bundle.config.header {
        println!("{header}");
    } else {
        println!("{APP_NAME}");
    }
    println!();

    let lock = if bundle.is_locked() {
        format!(" (locked: {})", bundle.locked_name)
    } else {
        String::new()
    };
    println!(
        "Profile {} of {}: {}{}",
        bundle.active_index + 1,
        bundle.profiles.len(),
        bundle.active_profile().name,
        lock
    );
    println!(
        "Grid {}x{}, theme '{}', {} command(s).",
        bundle.config.x,
        bundle.config.y,
        bundle.theme.name,
        bundle.config.commands.len()
    );

    if !bundle.broken.is_empty() {
        println!();
        println!("{} broken profile(s) need attention:", bundle.broken.len());
        for broken in &bundle.broken {
            println!("  {}: {}", broken.name, broken.reason);
        }
    }

    Ok(())
}

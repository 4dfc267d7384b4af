//! Pivot-lock CLI commands.

use clap::{Args, Subcommand};

use crate::cli::common::{CliError, CliResult};
use crate::cli::config::resolve_bundle;
use crate::config::Config;
use crate::services::profiles::normalize_name;
use crate::services::PivotLedger;

/// Pivot-lock commands
#[derive(Args, Debug)]
pub struct PivotArgs {
    #[command(subcommand)]
    command: PivotCommand,
}

#[derive(Subcommand, Debug)]
enum PivotCommand {
    /// Lock a profile so it is auto-selected on every load
    Set(PivotSetArgs),
    /// Remove the lock
    Clear,
    /// Show the current lock
    Show,
}

/// Lock a profile so it is auto-selected on every load
#[derive(Args, Debug)]
pub struct PivotSetArgs {
    /// Profile name to lock
    #[arg(value_name = "NAME")]
    name: String,
}

impl PivotArgs {
    /// Execute pivot subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            PivotCommand::Set(args) => args.execute(),
            PivotCommand::Clear => execute_clear(),
            PivotCommand::Show => execute_show(),
        }
    }
}

impl PivotSetArgs {
    fn execute(&self) -> CliResult<()> {
        // Resolve first so a typo is caught before it is persisted as a
        // stale lock.
        let bundle = resolve_bundle(None)?;
        let wanted = normalize_name(&self.name);
        let Some(profile) = bundle
            .profiles
            .iter()
            .find(|p| normalize_name(&p.name) == wanted)
        else {
            return Err(CliError::validation(format!(
                "no profile named '{}' found",
                self.name
            )));
        };

        let canonical = profile.name.clone();
        PivotLedger::write_locked(&bundle.config_dir, &canonical)
            .map_err(|e| CliError::io(format!("Failed to write pivot ledger: {e}")))?;

        println!("Locked profile '{canonical}'.");
        Ok(())
    }
}

fn execute_clear() -> CliResult<()> {
    let dir = Config::config_dir()
        .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;
    PivotLedger::clear_lock(&dir)
        .map_err(|e| CliError::io(format!("Failed to update pivot ledger: {e}")))?;
    println!("Pivot lock cleared.");
    Ok(())
}

fn execute_show() -> CliResult<()> {
    let dir = Config::config_dir()
        .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;
    let record = PivotLedger::read(&dir);
    if record.locked.is_empty() {
        println!("No pivot lock set.");
    } else {
        println!("{}", record.locked);
    }
    Ok(())
}

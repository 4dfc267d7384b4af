//! Profile listing and health-check CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::cli::config::resolve_bundle;

/// Profile commands
#[derive(Args, Debug)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    command: ProfilesCommand,
}

#[derive(Subcommand, Debug)]
enum ProfilesCommand {
    /// List equipped profiles in display order
    List(ProfilesListArgs),
    /// Fail when any profile file is broken
    Check,
}

/// List equipped profiles in display order
#[derive(Args, Debug)]
pub struct ProfilesListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ProfileRow<'a> {
    name: &'a str,
    active: bool,
    locked: bool,
}

#[derive(Serialize, Debug)]
struct ProfilesOutput<'a> {
    profiles: Vec<ProfileRow<'a>>,
    broken: Vec<BrokenRow<'a>>,
}

#[derive(Serialize, Debug)]
struct BrokenRow<'a> {
    name: &'a str,
    path: String,
    reason: &'a str,
}

impl ProfilesArgs {
    /// Execute profiles subcommand
    pub fn execute(&self, profile_override: Option<&str>) -> CliResult<()> {
        match &self.command {
            ProfilesCommand::List(args) => args.execute(profile_override),
            ProfilesCommand::Check => execute_check(),
        }
    }
}

impl ProfilesListArgs {
    fn execute(&self, profile_override: Option<&str>) -> CliResult<()> {
        let bundle = resolve_bundle(profile_override)?;

        if self.json {
            let output = ProfilesOutput {
                profiles: bundle
                    .profiles
                    .iter()
                    .enumerate()
                    .map(|(index, profile)| ProfileRow {
                        name: &profile.name,
                        active: index == bundle.active_index,
                        locked: profile.name == bundle.locked_name,
                    })
                    .collect(),
                broken: bundle
                    .broken
                    .iter()
                    .map(|b| BrokenRow {
                        name: &b.name,
                        path: b.path.display().to_string(),
                        reason: &b.reason,
                    })
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize profiles to JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        for (index, profile) in bundle.profiles.iter().enumerate() {
            let active = if index == bundle.active_index { "*" } else { " " };
            let locked = if profile.name == bundle.locked_name {
                " [locked]"
            } else {
                ""
            };
            println!("{active} {}{locked}", profile.name);
        }

        if !bundle.broken.is_empty() {
            println!();
            for broken in &bundle.broken {
                println!("! {} ({}): {}", broken.name, broken.path.display(), broken.reason);
            }
        }

        Ok(())
    }
}

fn execute_check() -> CliResult<()> {
    let bundle = resolve_bundle(None)?;

    if bundle.broken.is_empty() {
        println!(
            "{} profile(s) healthy.",
            bundle.profiles.len().saturating_sub(1)
        );
        return Ok(());
    }

    for broken in &bundle.broken {
        eprintln!("{}: {}", broken.path.display(), broken.reason);
    }
    Err(CliError::check_failed(format!(
        "{} broken profile(s) found",
        bundle.broken.len()
    )))
}

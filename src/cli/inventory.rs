//! Inventory CLI commands: listing, stowing, and equipping profiles.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::services::profiles::normalize_name;
use crate::services::{InventoryReconciler, InventoryState, SlotList};

/// Inventory commands
#[derive(Args, Debug)]
pub struct InventoryArgs {
    #[command(subcommand)]
    command: InventoryCommand,
}

#[derive(Subcommand, Debug)]
enum InventoryCommand {
    /// List equipped and stored profiles
    List(InventoryListArgs),
    /// Move an equipped profile into the inventory
    Stow(InventoryMoveArgs),
    /// Move a stored profile back into the equipped set
    Equip(InventoryMoveArgs),
}

/// List equipped and stored profiles
#[derive(Args, Debug)]
pub struct InventoryListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Move a profile between the equipped set and the inventory
#[derive(Args, Debug)]
pub struct InventoryMoveArgs {
    /// Profile name
    #[arg(value_name = "NAME")]
    name: String,
}

#[derive(Serialize, Debug)]
struct InventoryOutput<'a> {
    visible: &'a [String],
    inventory: &'a [String],
}

impl InventoryArgs {
    /// Execute inventory subcommand
    pub fn execute(&self) -> CliResult<()> {
        let dir = Config::config_dir()
            .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;

        match &self.command {
            InventoryCommand::List(args) => args.execute(&dir),
            InventoryCommand::Stow(args) => {
                args.execute(&dir, SlotList::Visible, SlotList::Inventory)
            }
            InventoryCommand::Equip(args) => {
                args.execute(&dir, SlotList::Inventory, SlotList::Visible)
            }
        }
    }
}

impl InventoryListArgs {
    fn execute(&self, dir: &std::path::Path) -> CliResult<()> {
        let state = InventoryState::snapshot(dir)
            .map_err(|e| CliError::io(format!("Failed to scan profiles: {e}")))?;

        if self.json {
            let output = InventoryOutput {
                visible: &state.visible,
                inventory: &state.inventory,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize inventory to JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("Equipped:");
        for file in &state.visible {
            println!("  {file}");
        }
        println!("Inventory:");
        for file in &state.inventory {
            println!("  {file}");
        }
        Ok(())
    }
}

impl InventoryMoveArgs {
    fn execute(&self, dir: &std::path::Path, from: SlotList, to: SlotList) -> CliResult<()> {
        let mut state = InventoryState::snapshot(dir)
            .map_err(|e| CliError::io(format!("Failed to scan profiles: {e}")))?;
        let initial_visible = state.visible.clone();
        let initial_inventory = state.inventory.clone();

        let wanted = normalize_name(&self.name);
        let Some(index) = state
            .list(from)
            .iter()
            .position(|f| normalize_name(f) == wanted)
        else {
            return Err(CliError::validation(format!(
                "no profile named '{}' in the {} list",
                self.name,
                match from {
                    SlotList::Visible => "equipped",
                    SlotList::Inventory => "inventory",
                }
            )));
        };

        state
            .pick_up(from, index)
            .and_then(|()| {
                let end = state.list(to).len();
                state.place(to, end)
            })
            .map_err(|e| CliError::validation(e.to_string()))?;

        let report = InventoryReconciler::apply(dir, &state, &initial_visible, &initial_inventory)
            .map_err(|e| CliError::io(format!("Failed to apply inventory change: {e}")))?;

        println!(
            "Moved {} file(s); equipped order is now [{}].",
            report.moved,
            report.order.join(", ")
        );
        Ok(())
    }
}

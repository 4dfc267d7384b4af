//! Inventory reconciliation: equipping and stowing profiles.
//!
//! An inventory session starts from a filesystem snapshot of which profile
//! files are visible (config root) and which are stored (the `inventory/`
//! subdirectory). The user rearranges the two lists by picking items up and
//! placing them; on apply, the before/after difference is reconciled into a
//! minimal batch of cross-directory moves, validated for destination
//! collisions as a whole before any file is touched.
//!
//! Execution of the batch is sequential and not transactional; the
//! pre-flight check prevents known collisions, but a process kill mid-batch
//! leaves a half-applied rearrangement. Re-running a fresh session re-derives
//! moves from the current on-disk state, so recovery is re-snapshot + apply.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::INVENTORY_DIR;
use crate::services::ledger::PivotLedger;
use crate::services::profiles::{canonical_name, is_profile_file, normalize_name};

/// Which of the two inventory-session lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotList {
    /// Equipped profiles, directly in the config root
    Visible,
    /// Stored profiles, in the inventory subdirectory
    Inventory,
}

/// One inventory session's working state.
///
/// Both lists hold profile filenames. A filename lives in at most one list
/// at any time; `held` is non-empty only strictly between a pick-up and the
/// matching place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryState {
    /// Equipped profile filenames, in display order
    pub visible: Vec<String>,
    /// Stored profile filenames, in display order
    pub inventory: Vec<String>,
    /// The filename currently picked up, if any
    pub held: Option<String>,
}

impl InventoryState {
    /// Builds a session state from the files on disk.
    ///
    /// The visible list follows the ledger's equipped order (stale entries
    /// dropped, unlisted files appended alphabetically); the stored list is
    /// alphabetical. A missing inventory subdirectory simply yields an empty
    /// stored list.
    pub fn snapshot(dir: &Path) -> Result<Self> {
        let mut visible = list_profile_files(dir)
            .with_context(|| format!("Failed to scan profile directory: {}", dir.display()))?;
        let mut inventory = match list_profile_files(&dir.join(INVENTORY_DIR)) {
            Ok(files) => files,
            Err(_) => Vec::new(),
        };

        visible.sort_by_key(|f| f.to_lowercase());
        inventory.sort_by_key(|f| f.to_lowercase());

        let order = PivotLedger::read(dir).equipped_order;
        if !order.is_empty() {
            visible = order_files(visible, &order);
        }

        Ok(Self {
            visible,
            inventory,
            held: None,
        })
    }

    /// Removes the item at `index` from the named list and holds it.
    pub fn pick_up(&mut self, list: SlotList, index: usize) -> Result<()> {
        if let Some(held) = &self.held {
            bail!("already holding '{held}', place it first");
        }
        let items = self.list_mut(list);
        if index >= items.len() {
            bail!("no item at index {index}");
        }
        self.held = Some(items.remove(index));
        Ok(())
    }

    /// Inserts the held item into the named list.
    ///
    /// `index` is clamped to the list's bounds, so placing "past the end"
    /// appends.
    pub fn place(&mut self, list: SlotList, index: usize) -> Result<()> {
        let Some(held) = self.held.take() else {
            bail!("nothing is held");
        };
        let items = self.list_mut(list);
        let index = index.min(items.len());
        items.insert(index, held);
        Ok(())
    }

    /// The named list, read-only.
    #[must_use]
    pub fn list(&self, list: SlotList) -> &[String] {
        match list {
            SlotList::Visible => &self.visible,
            SlotList::Inventory => &self.inventory,
        }
    }

    fn list_mut(&mut self, list: SlotList) -> &mut Vec<String> {
        match list {
            SlotList::Visible => &mut self.visible,
            SlotList::Inventory => &mut self.inventory,
        }
    }
}

/// Outcome of a successful apply; the caller should reload the full bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Number of files moved between the root and the inventory
    pub moved: usize,
    /// Canonical equipped order persisted to the ledger
    pub order: Vec<String>,
}

/// Reconciles an edited inventory session back onto the file system.
pub struct InventoryReconciler;

impl InventoryReconciler {
    /// Computes the minimal cross-directory moves turning the initial
    /// snapshot into `state`.
    ///
    /// Pure diff: only files whose list membership changed produce a move.
    /// Reordering within one list needs no file move, just a new persisted
    /// order.
    #[must_use]
    pub fn calculate_moves(
        dir: &Path,
        state: &InventoryState,
        initial_visible: &[String],
        initial_inventory: &[String],
    ) -> BTreeMap<PathBuf, PathBuf> {
        let inventory_dir = dir.join(INVENTORY_DIR);
        let mut moves = BTreeMap::new();

        for file in initial_visible {
            if !state.visible.contains(file) && state.inventory.contains(file) {
                moves.insert(dir.join(file), inventory_dir.join(file));
            }
        }
        for file in initial_inventory {
            if !state.inventory.contains(file) && state.visible.contains(file) {
                moves.insert(inventory_dir.join(file), dir.join(file));
            }
        }

        moves
    }

    /// Executes an inventory session against the file system.
    ///
    /// Pre-flights every computed destination before touching anything: one
    /// collision aborts the entire batch. On success the new equipped order
    /// is persisted; the caller is expected to re-resolve the bundle since
    /// membership and/or order changed.
    pub fn apply(
        dir: &Path,
        state: &InventoryState,
        initial_visible: &[String],
        initial_inventory: &[String],
    ) -> Result<ApplyReport> {
        if let Some(held) = &state.held {
            bail!("cannot apply while holding '{held}'");
        }

        let moves = Self::calculate_moves(dir, state, initial_visible, initial_inventory);

        let conflicts: Vec<&PathBuf> = moves
            .values()
            .filter(|destination| destination.exists())
            .collect();
        if !conflicts.is_empty() {
            let listing = conflicts
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("move destination already exists: {listing}");
        }

        if moves
            .values()
            .any(|destination| destination.starts_with(dir.join(INVENTORY_DIR)))
        {
            fs::create_dir_all(dir.join(INVENTORY_DIR)).with_context(|| {
                format!("Failed to create inventory directory under: {}", dir.display())
            })?;
        }

        for (source, destination) in &moves {
            fs::rename(source, destination).with_context(|| {
                format!(
                    "Failed to move profile {} to {}",
                    source.display(),
                    destination.display()
                )
            })?;
        }

        let order: Vec<String> = state
            .visible
            .iter()
            .filter_map(|file| canonical_name(file))
            .map(str::to_string)
            .collect();
        PivotLedger::write_equipped_order(dir, &order)?;

        Ok(ApplyReport {
            moved: moves.len(),
            order,
        })
    }
}

/// Profile filenames directly inside `dir` (non-recursive).
fn list_profile_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_profile_file(name) {
                files.push(name.to_string());
            }
        }
    }
    Ok(files)
}

/// Applies the ledger's equipped order to a filename list: listed files
/// first in ledger order, leftovers appended in the order given.
fn order_files(files: Vec<String>, order: &[String]) -> Vec<String> {
    let mut rest = files;
    let mut ordered = Vec::with_capacity(rest.len());

    for wanted in order {
        let wanted = normalize_name(wanted);
        if let Some(pos) = rest.iter().position(|f| normalize_name(f) == wanted) {
            ordered.push(rest.remove(pos));
        }
    }

    ordered.append(&mut rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_profile(dir: &Path, file_name: &str) {
        fs::write(dir.join(file_name), "theme = \"night\"\n").unwrap();
    }

    fn seeded_session(root: &Path) -> (InventoryState, Vec<String>, Vec<String>) {
        let state = InventoryState::snapshot(root).unwrap();
        let initial_visible = state.visible.clone();
        let initial_inventory = state.inventory.clone();
        (state, initial_visible, initial_inventory)
    }

    #[test]
    fn test_snapshot_orders_lists() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(INVENTORY_DIR)).unwrap();
        write_profile(root, "beta.profile.toml");
        write_profile(root, "Alpha.profile.toml");
        write_profile(&root.join(INVENTORY_DIR), "zulu.profile.toml");
        write_profile(&root.join(INVENTORY_DIR), "Echo.profile.toml");
        PivotLedger::write_equipped_order(root, &["beta".to_string()]).unwrap();

        let state = InventoryState::snapshot(root).unwrap();

        // Ledger order first, leftover appended
        assert_eq!(
            state.visible,
            vec!["beta.profile.toml", "Alpha.profile.toml"]
        );
        // Stored list stays alphabetical
        assert_eq!(
            state.inventory,
            vec!["Echo.profile.toml", "zulu.profile.toml"]
        );
        assert_eq!(state.held, None);
    }

    #[test]
    fn test_snapshot_without_inventory_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_profile(temp_dir.path(), "a.profile.toml");

        let state = InventoryState::snapshot(temp_dir.path()).unwrap();
        assert_eq!(state.visible.len(), 1);
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn test_pick_up_and_place_across_lists() {
        let mut state = InventoryState {
            visible: vec!["a.profile.toml".to_string(), "b.profile.toml".to_string()],
            inventory: vec!["c.profile.toml".to_string()],
            held: None,
        };

        state.pick_up(SlotList::Visible, 0).unwrap();
        assert_eq!(state.held.as_deref(), Some("a.profile.toml"));
        assert_eq!(state.visible, vec!["b.profile.toml"]);

        // Second pick-up while holding fails
        assert!(state.pick_up(SlotList::Inventory, 0).is_err());

        state.place(SlotList::Inventory, 0).unwrap();
        assert_eq!(state.held, None);
        assert_eq!(
            state.inventory,
            vec!["a.profile.toml", "c.profile.toml"]
        );
    }

    #[test]
    fn test_pick_up_out_of_bounds() {
        let mut state = InventoryState::default();
        assert!(state.pick_up(SlotList::Visible, 0).is_err());
    }

    #[test]
    fn test_place_requires_held_and_clamps_index() {
        let mut state = InventoryState {
            visible: vec!["a.profile.toml".to_string()],
            inventory: Vec::new(),
            held: None,
        };
        assert!(state.place(SlotList::Visible, 0).is_err());

        state.pick_up(SlotList::Visible, 0).unwrap();
        // Index far past the end appends
        state.place(SlotList::Inventory, 99).unwrap();
        assert_eq!(state.inventory, vec!["a.profile.toml"]);
    }

    #[test]
    fn test_reorder_only_needs_no_moves() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_profile(root, "a.profile.toml");
        write_profile(root, "b.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Visible, 0).unwrap();
        state.place(SlotList::Visible, 1).unwrap();

        let moves =
            InventoryReconciler::calculate_moves(root, &state, &initial_visible, &initial_inventory);
        assert!(moves.is_empty());

        let report =
            InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory).unwrap();
        assert_eq!(report.moved, 0);
        assert_eq!(report.order, vec!["b", "a"]);
        assert_eq!(PivotLedger::read(root).equipped_order, vec!["b", "a"]);
    }

    #[test]
    fn test_apply_stows_profile() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(INVENTORY_DIR)).unwrap();
        write_profile(root, "a.profile.toml");
        write_profile(&root.join(INVENTORY_DIR), "b.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Visible, 0).unwrap();
        state.place(SlotList::Inventory, 0).unwrap();

        let moves =
            InventoryReconciler::calculate_moves(root, &state, &initial_visible, &initial_inventory);
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves.get(&root.join("a.profile.toml")),
            Some(&root.join(INVENTORY_DIR).join("a.profile.toml"))
        );

        let report =
            InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory).unwrap();
        assert_eq!(report.moved, 1);
        assert!(report.order.is_empty());

        assert!(!root.join("a.profile.toml").exists());
        assert!(root.join(INVENTORY_DIR).join("a.profile.toml").exists());

        // Re-snapshot matches the session's target state
        let after = InventoryState::snapshot(root).unwrap();
        assert_eq!(after.visible, state.visible);
        assert_eq!(after.inventory, state.inventory);
    }

    #[test]
    fn test_apply_equips_profile_creating_nothing_extra() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(INVENTORY_DIR)).unwrap();
        write_profile(&root.join(INVENTORY_DIR), "b.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Inventory, 0).unwrap();
        state.place(SlotList::Visible, 0).unwrap();

        let report =
            InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory).unwrap();
        assert_eq!(report.moved, 1);
        assert_eq!(report.order, vec!["b"]);
        assert!(root.join("b.profile.toml").exists());
        assert!(!root.join(INVENTORY_DIR).join("b.profile.toml").exists());
    }

    #[test]
    fn test_apply_aborts_whole_batch_on_any_collision() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_profile(root, "a.profile.toml");
        write_profile(root, "b.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Visible, 0).unwrap();
        state.place(SlotList::Inventory, 0).unwrap();
        state.pick_up(SlotList::Visible, 0).unwrap();
        state.place(SlotList::Inventory, 1).unwrap();

        // A colliding destination appears after the snapshot was taken
        fs::create_dir(root.join(INVENTORY_DIR)).unwrap();
        write_profile(&root.join(INVENTORY_DIR), "a.profile.toml");

        let err = InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory)
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // Neither file moved, even though b had no collision of its own
        assert!(root.join("a.profile.toml").exists());
        assert!(root.join("b.profile.toml").exists());
        assert!(!root.join(INVENTORY_DIR).join("b.profile.toml").exists());
        // Ledger untouched
        assert!(PivotLedger::read(root).equipped_order.is_empty());
    }

    #[test]
    fn test_apply_refuses_while_holding() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_profile(root, "a.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Visible, 0).unwrap();

        assert!(
            InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory)
                .is_err()
        );
        assert!(root.join("a.profile.toml").exists());
    }

    #[test]
    fn test_apply_creates_missing_inventory_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_profile(root, "a.profile.toml");

        let (mut state, initial_visible, initial_inventory) = seeded_session(root);
        state.pick_up(SlotList::Visible, 0).unwrap();
        state.place(SlotList::Inventory, 0).unwrap();

        InventoryReconciler::apply(root, &state, &initial_visible, &initial_inventory).unwrap();
        assert!(root.join(INVENTORY_DIR).join("a.profile.toml").exists());
    }
}

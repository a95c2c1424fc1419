//! The aggregate game state and its collections.
//!
//! RULE: `GameState` is a value. The transition function takes one by value
//! and hands back a new one; nothing mutates a state in place from outside
//! this crate.

use crate::{
    calendar::{Season, FIRST_DAY},
    catalog::STARTER_CROP_ID,
    config::NewGameConfig,
    plot::{build_grid, Plot},
    types::{Coins, CropId, PlotId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_GRID_ROWS: u32 = 4;
pub const DEFAULT_GRID_COLS: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { rows: DEFAULT_GRID_ROWS, cols: DEFAULT_GRID_COLS }
    }
}

// ── Inventory ──────────────────────────────────────────────

/// Seed counts keyed by crop id. An absent entry reads as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<CropId, u32>);

impl Inventory {
    pub fn quantity(&self, crop_id: &str) -> u32 {
        self.0.get(crop_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, crop_id: &str) -> bool {
        self.0.contains_key(crop_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, crop_id: &str, qty: u32) {
        let entry = self.0.entry(crop_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(qty);
    }

    /// Make the crop visible in the inventory without granting seeds.
    pub(crate) fn ensure_entry(&mut self, crop_id: &str) {
        self.0.entry(crop_id.to_string()).or_insert(0);
    }

    /// Take `qty` seeds, keeping a zero entry behind.
    /// Returns false (and changes nothing) if there are not enough.
    pub(crate) fn take(&mut self, crop_id: &str, qty: u32) -> bool {
        match self.0.get_mut(crop_id) {
            Some(have) if *have >= qty => {
                *have -= qty;
                true
            }
            _ => false,
        }
    }

    /// Take `qty` seeds, dropping the entry once it reaches zero.
    pub(crate) fn take_and_prune(&mut self, crop_id: &str, qty: u32) -> bool {
        if !self.take(crop_id, qty) {
            return false;
        }
        if self.quantity(crop_id) == 0 {
            self.0.remove(crop_id);
        }
        true
    }
}

// ── Unlocked crops ─────────────────────────────────────────

/// Grow-only set of unlocked crop ids. Always contains the starter crop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BTreeSet<CropId>", into = "BTreeSet<CropId>")]
pub struct UnlockedCrops(BTreeSet<CropId>);

impl UnlockedCrops {
    pub fn contains(&self, crop_id: &str) -> bool {
        self.0.contains(crop_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns false if the crop was already unlocked.
    pub(crate) fn insert(&mut self, crop_id: &str) -> bool {
        self.0.insert(crop_id.to_string())
    }
}

impl Default for UnlockedCrops {
    fn default() -> Self {
        Self(BTreeSet::from([STARTER_CROP_ID.to_string()]))
    }
}

impl From<BTreeSet<CropId>> for UnlockedCrops {
    fn from(mut ids: BTreeSet<CropId>) -> Self {
        ids.insert(STARTER_CROP_ID.to_string());
        Self(ids)
    }
}

impl From<UnlockedCrops> for BTreeSet<CropId> {
    fn from(unlocked: UnlockedCrops) -> Self {
        unlocked.0
    }
}

// ── Game state ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub plots:             Vec<Plot>,
    pub inventory:         Inventory,
    pub coins:             Coins,
    pub selected_crop_id:  Option<CropId>,
    pub selected_plot_id:  Option<PlotId>,
    pub current_season:    Season,
    pub day_count:         u32,
    pub player_name:       String,
    pub unlocked_crop_ids: UnlockedCrops,
    pub grid_size:         GridSize,
}

impl GameState {
    pub fn new_game(config: &NewGameConfig) -> Self {
        let grid_size = config.grid;
        let mut inventory = Inventory::default();
        inventory.add(STARTER_CROP_ID, config.starting_seeds);
        Self {
            plots: build_grid(grid_size.rows, grid_size.cols),
            inventory,
            coins: config.starting_coins,
            selected_crop_id: None,
            selected_plot_id: None,
            current_season: Season::default(),
            day_count: FIRST_DAY,
            player_name: config.player_name.clone(),
            unlocked_crop_ids: UnlockedCrops::default(),
            grid_size,
        }
    }

    pub fn plot(&self, plot_id: &str) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == plot_id)
    }

    pub(crate) fn plot_mut(&mut self, plot_id: &str) -> Option<&mut Plot> {
        self.plots.iter_mut().find(|p| p.id == plot_id)
    }

    pub fn is_unlocked(&self, crop_id: &str) -> bool {
        self.unlocked_crop_ids.contains(crop_id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game(&NewGameConfig::default())
    }
}

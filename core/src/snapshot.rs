//! Snapshot serialization: full game state to/from JSON.
//!
//! A snapshot is the flat record written to the save slot: every
//! `GameState` field plus the time it was taken.
//!
//! RULE: Schema evolution happens here, by defaulting. Fields added after
//! the first release are optional on read and backfilled; there is no
//! version number and no migration step.

use crate::{
    calendar::Season,
    plot::Plot,
    state::{GameState, GridSize, Inventory, UnlockedCrops},
    types::{Coins, CropId, PlotId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveSnapshot {
    pub plots:            Vec<Plot>,
    pub inventory:        Inventory,
    pub coins:            Coins,
    #[serde(default)]
    pub selected_crop_id: Option<CropId>,
    #[serde(default)]
    pub selected_plot_id: Option<PlotId>,
    pub current_season:   Season,
    pub day_count:        u32,
    pub player_name:      String,

    // Added after the first save format; absent in older snapshots.
    #[serde(default)]
    pub unlocked_crop_ids: Option<UnlockedCrops>,
    #[serde(default)]
    pub grid_size:         Option<GridSize>,
    #[serde(default)]
    pub saved_at:          Option<DateTime<Utc>>,
}

impl SaveSnapshot {
    pub fn capture(state: &GameState, saved_at: DateTime<Utc>) -> Self {
        let state = state.clone();
        Self {
            plots:             state.plots,
            inventory:         state.inventory,
            coins:             state.coins,
            selected_crop_id:  state.selected_crop_id,
            selected_plot_id:  state.selected_plot_id,
            current_season:    state.current_season,
            day_count:         state.day_count,
            player_name:       state.player_name,
            unlocked_crop_ids: Some(state.unlocked_crop_ids),
            grid_size:         Some(state.grid_size),
            saved_at:          Some(saved_at),
        }
    }

    /// Rebuild the game state, backfilling fields older saves lack.
    /// An unplanted plot always comes back `Empty`, whatever stage was stored.
    pub fn into_state(self) -> GameState {
        let mut plots = self.plots;
        for plot in plots.iter_mut().filter(|p| p.is_empty()) {
            plot.clear();
        }
        GameState {
            plots,
            inventory:         self.inventory,
            coins:             self.coins,
            selected_crop_id:  self.selected_crop_id,
            selected_plot_id:  self.selected_plot_id,
            current_season:    self.current_season,
            day_count:         self.day_count,
            player_name:       self.player_name,
            unlocked_crop_ids: self.unlocked_crop_ids.unwrap_or_default(),
            grid_size:         self.grid_size.unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

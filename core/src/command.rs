use crate::{
    calendar::Season,
    snapshot::SaveSnapshot,
    types::{CropId, PlotId},
};
use serde::{Deserialize, Serialize};

/// The closed set of actions that may change a `GameState`.
/// The timestamp travels alongside the action, not inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // ── Selection ─────────────────────────────────
    SelectCrop { crop_id: Option<CropId> },
    SelectPlot { plot_id: Option<PlotId> },

    // ── Field work ────────────────────────────────
    PlantCrop { plot_id: PlotId, crop_id: CropId },
    HarvestCrop { plot_id: PlotId },
    UpdateGrowth,

    // ── Market ────────────────────────────────────
    BuyCrop { crop_id: CropId, quantity: u32 },
    SellCrop { crop_id: CropId, quantity: u32 },
    UnlockCrop { crop_id: CropId },
    IncreasePlotSize,

    // ── Calendar ──────────────────────────────────
    ChangeSeason { season: Season },
    NextDay,

    // ── Session ───────────────────────────────────
    LoadGame { snapshot: Box<SaveSnapshot> },
    SetPlayerName { name: String },
}

impl Action {
    /// Whether a successful application should be checkpointed to storage.
    pub fn is_durable(&self) -> bool {
        !matches!(
            self,
            Action::SelectCrop { .. } | Action::SelectPlot { .. } | Action::UpdateGrowth
        )
    }

    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectCrop { .. }    => "select_crop",
            Action::SelectPlot { .. }    => "select_plot",
            Action::PlantCrop { .. }     => "plant_crop",
            Action::HarvestCrop { .. }   => "harvest_crop",
            Action::UpdateGrowth         => "update_growth",
            Action::BuyCrop { .. }       => "buy_crop",
            Action::SellCrop { .. }      => "sell_crop",
            Action::UnlockCrop { .. }    => "unlock_crop",
            Action::IncreasePlotSize     => "increase_plot_size",
            Action::ChangeSeason { .. }  => "change_season",
            Action::NextDay              => "next_day",
            Action::LoadGame { .. }      => "load_game",
            Action::SetPlayerName { .. } => "set_player_name",
        }
    }
}

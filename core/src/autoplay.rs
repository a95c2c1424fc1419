//! A simulated player for headless runs and property tests.
//!
//! The autoplayer looks at the state the way a reasonable player would
//! (harvest what is ripe, plant what it holds, shop when it can afford
//! to) and now and then issues an intent the rules will refuse.

use crate::{
    calendar::Season,
    catalog::{self, Crop},
    command::Action,
    plot::GrowthStage,
    rng::PlayerRng,
    state::GameState,
    transition::plot_expansion_cost,
    types::Millis,
};

/// Probability of issuing an arbitrary, probably invalid, intent.
const NOISE_RATE: f64 = 0.1;

pub struct Autoplayer {
    rng: PlayerRng,
}

impl Autoplayer {
    pub fn new(seed: u64) -> Self {
        Self { rng: PlayerRng::new(seed) }
    }

    pub fn next_intent(&mut self, state: &GameState, now: Millis) -> Action {
        if self.rng.chance(NOISE_RATE) {
            return self.noise(state);
        }

        let ready: Vec<&str> = state
            .plots
            .iter()
            .filter(|p| p.stage_at(now) == GrowthStage::Ready)
            .map(|p| p.id.as_str())
            .collect();
        if let Some(plot_id) = self.rng.pick(&ready) {
            return Action::HarvestCrop { plot_id: plot_id.to_string() };
        }

        let empty: Vec<&str> = state
            .plots
            .iter()
            .filter(|p| p.is_empty())
            .map(|p| p.id.as_str())
            .collect();
        let plantable: Vec<&'static Crop> = catalog::crops_for_season(state.current_season)
            .filter(|c| state.is_unlocked(c.id) && state.inventory.quantity(c.id) > 0)
            .collect();
        if let (Some(plot_id), Some(crop)) = (self.rng.pick(&empty), self.rng.pick(&plantable)) {
            return Action::PlantCrop {
                plot_id: plot_id.to_string(),
                crop_id: crop.id.to_string(),
            };
        }

        let affordable = plot_expansion_cost(state)
            .and_then(|cost| cost.checked_mul(2))
            .is_some_and(|twice| state.coins >= twice);
        if affordable && self.rng.chance(0.2) {
            return Action::IncreasePlotSize;
        }

        let lockable: Vec<&'static Crop> = catalog::crops()
            .iter()
            .filter(|c| !state.is_unlocked(c.id) && catalog::unlock_cost(c) <= state.coins)
            .collect();
        if self.rng.chance(0.3) {
            if let Some(crop) = self.rng.pick(&lockable) {
                return Action::UnlockCrop { crop_id: crop.id.to_string() };
            }
        }

        let affordable: Vec<&'static Crop> = catalog::crops_for_season(state.current_season)
            .filter(|c| state.is_unlocked(c.id) && c.unit_price <= state.coins)
            .collect();
        if !empty.is_empty() {
            if let Some(crop) = self.rng.pick(&affordable) {
                let max = (state.coins / crop.unit_price).min(empty.len() as u64).max(1);
                let quantity = 1 + self.rng.next_u64_below(max) as u32;
                return Action::BuyCrop { crop_id: crop.id.to_string(), quantity };
            }
        }

        // Seeds that cannot go in the ground this season are dead weight.
        let off_season: Vec<(&str, u32)> = state
            .inventory
            .iter()
            .filter(|(id, qty)| {
                *qty > 0
                    && catalog::find_crop(id)
                        .is_some_and(|c| !catalog::is_plantable_in_season(c, state.current_season))
            })
            .collect();
        if let Some((crop_id, qty)) = self.rng.pick(&off_season) {
            return Action::SellCrop { crop_id: crop_id.to_string(), quantity: *qty };
        }

        Action::NextDay
    }

    fn noise(&mut self, state: &GameState) -> Action {
        let crop = self
            .rng
            .pick(catalog::crops())
            .map(|c| c.id.to_string())
            .unwrap_or_default();
        let plot = self
            .rng
            .pick(&state.plots)
            .map(|p| p.id.clone())
            .unwrap_or_default();
        match self.rng.next_u64_below(7) {
            0 => Action::PlantCrop { plot_id: plot, crop_id: crop },
            1 => Action::HarvestCrop { plot_id: plot },
            2 => Action::SellCrop { crop_id: crop, quantity: 1 + self.rng.next_u64_below(10) as u32 },
            3 => Action::BuyCrop { crop_id: crop, quantity: self.rng.next_u64_below(20) as u32 },
            4 => Action::UnlockCrop { crop_id: crop },
            5 => Action::SelectPlot { plot_id: Some(plot) },
            _ => {
                let season = *self.rng.pick(&Season::ALL).unwrap_or(&Season::Spring);
                Action::ChangeSeason { season }
            }
        }
    }
}

//! Plot grid model: grid construction, growth-stage derivation and
//! additive grid expansion.
//!
//! RULE: A plot's growth stage is always derivable from its planting and a
//! caller-supplied `now`. The cached `growth_stage` is only ever written by
//! the methods below, which keep `planting == None ⇔ stage == Empty`.

use crate::{
    catalog::{self, Crop},
    types::{CropId, Millis, PlotId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Empty,
    Growing,
    Ready,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// What is in the ground: a crop and when it went in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Planting {
    pub crop_id:    CropId,
    pub planted_at: Millis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plot {
    pub id:       PlotId,
    pub position: Position,
    planting:     Option<Planting>,
    growth_stage: GrowthStage,
}

pub fn plot_id(x: u32, y: u32) -> PlotId {
    format!("plot-{x}-{y}")
}

impl Plot {
    pub fn empty(x: u32, y: u32) -> Self {
        Self {
            id: plot_id(x, y),
            position: Position { x, y },
            planting: None,
            growth_stage: GrowthStage::Empty,
        }
    }

    pub fn planting(&self) -> Option<&Planting> {
        self.planting.as_ref()
    }

    pub fn crop(&self) -> Option<&'static Crop> {
        self.planting.as_ref().and_then(|p| catalog::find_crop(&p.crop_id))
    }

    pub fn is_empty(&self) -> bool {
        self.planting.is_none()
    }

    /// Stage as of the last refresh. Use `stage_at` for an authoritative answer.
    pub fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    /// Stage derived against `now`. A planting whose crop is no longer in
    /// the catalog never ripens.
    pub fn stage_at(&self, now: Millis) -> GrowthStage {
        match &self.planting {
            None => GrowthStage::Empty,
            Some(p) => match catalog::find_crop(&p.crop_id) {
                Some(crop) => growth_stage_of(crop, p.planted_at, now),
                None => GrowthStage::Growing,
            },
        }
    }

    pub fn growth_percent_at(&self, now: Millis) -> u8 {
        match (&self.planting, self.crop()) {
            (Some(p), Some(crop)) => growth_percent(crop, p.planted_at, now),
            _ => 0,
        }
    }

    pub(crate) fn plant(&mut self, crop: &Crop, now: Millis) {
        self.planting = Some(Planting {
            crop_id: crop.id.to_string(),
            planted_at: now,
        });
        self.growth_stage = growth_stage_of(crop, now, now);
    }

    pub(crate) fn clear(&mut self) {
        self.planting = None;
        self.growth_stage = GrowthStage::Empty;
    }

    pub(crate) fn refresh(&mut self, now: Millis) {
        self.growth_stage = self.stage_at(now);
    }
}

/// `rows × cols` empty plots, row-major, `x ∈ [0, cols)`, `y ∈ [0, rows)`.
pub fn build_grid(rows: u32, cols: u32) -> Vec<Plot> {
    let cells = u64::from(rows) * u64::from(cols);
    let mut plots = Vec::with_capacity(usize::try_from(cells).unwrap_or(0));
    for y in 0..rows {
        for x in 0..cols {
            plots.push(Plot::empty(x, y));
        }
    }
    plots
}

/// Existing plots untouched, then new columns for the existing rows,
/// then the entirely new rows.
pub fn expand_grid(
    existing: Vec<Plot>,
    old_rows: u32,
    old_cols: u32,
    new_rows: u32,
    new_cols: u32,
) -> Vec<Plot> {
    let mut plots = existing;
    for y in 0..old_rows {
        for x in old_cols..new_cols {
            plots.push(Plot::empty(x, y));
        }
    }
    for y in old_rows..new_rows {
        for x in 0..new_cols {
            plots.push(Plot::empty(x, y));
        }
    }
    plots
}

fn elapsed_millis(planted_at: Millis, now: Millis) -> u64 {
    now.saturating_sub(planted_at)
}

pub fn growth_stage_of(crop: &Crop, planted_at: Millis, now: Millis) -> GrowthStage {
    // elapsed/1000 >= duration, compared in millis to avoid truncation.
    if elapsed_millis(planted_at, now) >= crop.growth_duration_seconds * 1000 {
        GrowthStage::Ready
    } else {
        GrowthStage::Growing
    }
}

pub fn growth_percent(crop: &Crop, planted_at: Millis, now: Millis) -> u8 {
    let total = crop.growth_duration_seconds * 1000;
    if total == 0 {
        return 100;
    }
    let pct = elapsed_millis(planted_at, now).saturating_mul(100) / total;
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_across_rebuilds() {
        let a = build_grid(3, 5);
        let b = build_grid(3, 5);
        assert_eq!(a, b);
        assert_eq!(a[0].id, "plot-0-0");
        assert_eq!(a[6].id, "plot-1-1");
        assert!(a.iter().all(|p| p.position.x < 5 && p.position.y < 3));
    }

    #[test]
    fn expansion_appends_columns_then_rows() {
        let plots = expand_grid(build_grid(2, 2), 2, 2, 3, 3);
        let ids: Vec<_> = plots.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "plot-0-0", "plot-1-0", "plot-0-1", "plot-1-1",
                "plot-2-0", "plot-2-1",
                "plot-0-2", "plot-1-2", "plot-2-2",
            ]
        );
    }

    #[test]
    fn clock_running_backwards_counts_as_zero_elapsed() {
        let potato = catalog::starter_crop();
        assert_eq!(growth_stage_of(potato, 10_000, 5_000), GrowthStage::Growing);
        assert_eq!(growth_percent(potato, 10_000, 5_000), 0);
    }
}

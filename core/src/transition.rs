//! The state-transition function: every game rule lives here.
//!
//! RULES:
//!   - `apply` is pure: no I/O, no clock reads, no logging.
//!   - It is total. Every input yields either a new state or a `Rejection`,
//!     and a rejection means the caller's state is still the current one.
//!   - Preconditions are all checked before anything is written, so a
//!     rejected action never leaves a half-applied state behind.

use crate::{
    calendar::{self, Season},
    catalog::{self, Crop},
    command::Action,
    plot::{expand_grid, GrowthStage},
    state::{GameState, GridSize},
    types::{Coins, Millis},
};
use thiserror::Error;

/// Coins per existing grid cell to grow the grid by one row and one column.
pub const PLOT_EXPANSION_COST_PER_CELL: Coins = 25;

/// Neither side of the grid grows past this many plots.
pub const MAX_GRID_SIDE: u32 = 512;

/// Seeds sell back at 80% of their price: `floor(price × 4/5 × qty)`.
const RESALE_NUMERATOR: Coins = 4;
const RESALE_DENOMINATOR: Coins = 5;

/// Why an action was not applied. The display text is meant for the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Unknown crop '{0}'")]
    UnknownCrop(String),

    #[error("Unknown plot '{0}'")]
    UnknownPlot(String),

    #[error("{crop} has not been unlocked yet")]
    CropLocked { crop: &'static str },

    #[error("{crop} cannot be planted in {season}")]
    OutOfSeason { crop: &'static str, season: Season },

    #[error("No {crop} seeds left")]
    NoSeeds { crop: &'static str },

    #[error("Plot '{0}' is already planted")]
    PlotOccupied(String),

    #[error("Plot '{0}' has nothing to harvest")]
    PlotEmpty(String),

    #[error("Crop on plot '{0}' is not ready yet")]
    NotReady(String),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: Coins, available: Coins },

    #[error("Not enough {crop} seeds: need {needed}, have {available}")]
    InsufficientStock { crop: &'static str, needed: u32, available: u32 },

    #[error("{crop} is already unlocked")]
    AlreadyUnlocked { crop: &'static str },

    #[error("Cannot hold more than {max} {crop} seeds")]
    StockFull { crop: &'static str, max: u32 },

    #[error("The farm cannot grow past {rows}x{cols}")]
    GridTooLarge { rows: u32, cols: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(GameState),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            Outcome::Applied(_) => None,
        }
    }
}

type Step = Result<GameState, Rejection>;

/// Apply one action at `now`.
pub fn apply(state: &GameState, action: &Action, now: Millis) -> Outcome {
    let step = match action {
        Action::SelectCrop { crop_id } => Ok(GameState {
            selected_crop_id: crop_id.clone(),
            ..state.clone()
        }),
        Action::SelectPlot { plot_id } => Ok(GameState {
            selected_plot_id: plot_id.clone(),
            ..state.clone()
        }),
        Action::PlantCrop { plot_id, crop_id } => plant(state, plot_id, crop_id, now),
        Action::HarvestCrop { plot_id } => harvest(state, plot_id, now),
        Action::UpdateGrowth => Ok(update_growth(state.clone(), now)),
        Action::BuyCrop { crop_id, quantity } => buy(state, crop_id, *quantity),
        Action::SellCrop { crop_id, quantity } => sell(state, crop_id, *quantity),
        Action::UnlockCrop { crop_id } => unlock(state, crop_id),
        Action::IncreasePlotSize => increase_plot_size(state),
        Action::ChangeSeason { season } => Ok(GameState {
            current_season: *season,
            ..state.clone()
        }),
        Action::NextDay => {
            let (day_count, current_season) =
                calendar::advance_day(state.day_count, state.current_season);
            Ok(GameState { day_count, current_season, ..state.clone() })
        }
        Action::LoadGame { snapshot } => {
            Ok(update_growth(snapshot.as_ref().clone().into_state(), now))
        }
        Action::SetPlayerName { name } => Ok(GameState {
            player_name: name.clone(),
            ..state.clone()
        }),
    };
    match step {
        Ok(next) => Outcome::Applied(next),
        Err(reason) => Outcome::Rejected(reason),
    }
}

/// The total form of `apply`: a rejected action returns `state` unchanged.
pub fn transition(state: GameState, action: &Action, now: Millis) -> GameState {
    match apply(&state, action, now) {
        Outcome::Applied(next) => next,
        Outcome::Rejected(_) => state,
    }
}

fn lookup(crop_id: &str) -> Result<&'static Crop, Rejection> {
    catalog::find_crop(crop_id).ok_or_else(|| Rejection::UnknownCrop(crop_id.to_string()))
}

fn require_coins(state: &GameState, needed: Coins) -> Result<(), Rejection> {
    if state.coins < needed {
        return Err(Rejection::InsufficientCoins { needed, available: state.coins });
    }
    Ok(())
}

fn plant(state: &GameState, plot_id: &str, crop_id: &str, now: Millis) -> Step {
    let crop = lookup(crop_id)?;
    if state.inventory.quantity(crop.id) == 0 {
        return Err(Rejection::NoSeeds { crop: crop.name });
    }
    if !state.is_unlocked(crop.id) {
        return Err(Rejection::CropLocked { crop: crop.name });
    }
    if !catalog::is_plantable_in_season(crop, state.current_season) {
        return Err(Rejection::OutOfSeason { crop: crop.name, season: state.current_season });
    }
    let plot = state
        .plot(plot_id)
        .ok_or_else(|| Rejection::UnknownPlot(plot_id.to_string()))?;
    if !plot.is_empty() {
        return Err(Rejection::PlotOccupied(plot_id.to_string()));
    }

    let mut next = state.clone();
    next.inventory.take(crop.id, 1);
    if let Some(plot) = next.plot_mut(plot_id) {
        plot.plant(crop, now);
    }
    next.selected_plot_id = None;
    Ok(next)
}

fn harvest(state: &GameState, plot_id: &str, now: Millis) -> Step {
    let plot = state
        .plot(plot_id)
        .ok_or_else(|| Rejection::UnknownPlot(plot_id.to_string()))?;
    let planting = plot
        .planting()
        .ok_or_else(|| Rejection::PlotEmpty(plot_id.to_string()))?;
    let crop = lookup(&planting.crop_id)?;
    if plot.stage_at(now) != GrowthStage::Ready {
        return Err(Rejection::NotReady(plot_id.to_string()));
    }

    let mut next = state.clone();
    next.coins = next.coins.saturating_add(crop.harvest_yield);
    if let Some(plot) = next.plot_mut(plot_id) {
        plot.clear();
    }
    Ok(next)
}

/// Re-derives every plot's stage, empty plots included, so a loaded grid
/// can't keep a stale stage on an unplanted plot.
fn update_growth(mut state: GameState, now: Millis) -> GameState {
    for plot in state.plots.iter_mut() {
        plot.refresh(now);
    }
    state
}

fn buy(state: &GameState, crop_id: &str, quantity: u32) -> Step {
    if quantity == 0 {
        return Err(Rejection::InvalidQuantity);
    }
    let crop = lookup(crop_id)?;
    if !state.is_unlocked(crop.id) {
        return Err(Rejection::CropLocked { crop: crop.name });
    }
    let cost = crop.unit_price.saturating_mul(Coins::from(quantity));
    require_coins(state, cost)?;
    if state.inventory.quantity(crop.id).checked_add(quantity).is_none() {
        return Err(Rejection::StockFull { crop: crop.name, max: u32::MAX });
    }

    let mut next = state.clone();
    next.coins -= cost;
    next.inventory.add(crop.id, quantity);
    Ok(next)
}

/// Coins returned for selling `quantity` seeds of `crop`.
pub fn resale_value(crop: &Crop, quantity: u32) -> Coins {
    crop.unit_price * Coins::from(quantity) * RESALE_NUMERATOR / RESALE_DENOMINATOR
}

fn sell(state: &GameState, crop_id: &str, quantity: u32) -> Step {
    if quantity == 0 {
        return Err(Rejection::InvalidQuantity);
    }
    let crop = lookup(crop_id)?;
    let available = state.inventory.quantity(crop.id);
    if available < quantity {
        return Err(Rejection::InsufficientStock { crop: crop.name, needed: quantity, available });
    }

    let mut next = state.clone();
    next.inventory.take_and_prune(crop.id, quantity);
    next.coins = next.coins.saturating_add(resale_value(crop, quantity));
    Ok(next)
}

fn unlock(state: &GameState, crop_id: &str) -> Step {
    let crop = lookup(crop_id)?;
    if state.is_unlocked(crop.id) {
        return Err(Rejection::AlreadyUnlocked { crop: crop.name });
    }
    let cost = catalog::unlock_cost(crop);
    require_coins(state, cost)?;

    let mut next = state.clone();
    next.coins -= cost;
    next.unlocked_crop_ids.insert(crop.id);
    next.inventory.ensure_entry(crop.id);
    Ok(next)
}

/// Cost to grow the grid from its current size, or `None` once the grid
/// is at its largest.
pub fn plot_expansion_cost(state: &GameState) -> Option<Coins> {
    grown(state.grid_size)?;
    state.grid_size.cell_count().checked_mul(PLOT_EXPANSION_COST_PER_CELL)
}

fn grown(size: GridSize) -> Option<GridSize> {
    let rows = size.rows.checked_add(1)?;
    let cols = size.cols.checked_add(1)?;
    (rows <= MAX_GRID_SIDE && cols <= MAX_GRID_SIDE).then_some(GridSize { rows, cols })
}

fn increase_plot_size(state: &GameState) -> Step {
    let old = state.grid_size;
    let too_large = Rejection::GridTooLarge { rows: old.rows, cols: old.cols };
    let new = grown(old).ok_or_else(|| too_large.clone())?;
    let cost = plot_expansion_cost(state).ok_or(too_large)?;
    require_coins(state, cost)?;

    let mut next = state.clone();
    next.coins -= cost;
    next.grid_size = new;
    next.plots = expand_grid(std::mem::take(&mut next.plots), old.rows, old.cols, new.rows, new.cols);
    Ok(next)
}

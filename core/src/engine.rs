//! The session driver: owns the single live `GameState`.
//!
//! RULES:
//!   - Every change goes through `transition::apply`; the engine only
//!     swaps in the returned state.
//!   - Durable actions are checkpointed after they apply. Saving is
//!     best-effort and never interrupts play.
//!   - Time comes in from the caller. The engine reads the wall clock only
//!     to stamp saves.
//!
//! TICK ORDER (per `tick(now)`):
//!   1. UpdateGrowth(now)
//!   2. NextDay, once per day boundary the day timer crossed
//!   3. One checkpoint if any day passed

use crate::{
    clock::FarmClock,
    command::Action,
    config::FarmConfig,
    persistence,
    plot::GrowthStage,
    state::GameState,
    store::SaveSlot,
    transition::{self, Outcome},
    types::Millis,
};
use chrono::Utc;

pub struct FarmEngine {
    pub clock: FarmClock,
    state:     GameState,
    config:    FarmConfig,
    slot:      Box<dyn SaveSlot>,
}

impl FarmEngine {
    /// Resume the game saved in the configured slot, or start a new one.
    pub fn start(config: FarmConfig, slot: Box<dyn SaveSlot>, now: Millis) -> Self {
        let mut engine = Self::new_game(config, slot);
        let saved = persistence::load_snapshot(engine.slot.as_ref(), &engine.config.save_key);
        if let Some(snapshot) = saved {
            log::info!(
                "Resuming save from {}",
                snapshot.saved_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "an unknown date".into())
            );
            engine.dispatch(Action::LoadGame { snapshot: Box::new(snapshot) }, now);
        } else {
            log::info!("No saved game in slot '{}', starting fresh", engine.config.save_key);
        }
        engine.clock.sample(now);
        engine
    }

    /// A fresh game that ignores whatever is in the slot.
    pub fn new_game(config: FarmConfig, slot: Box<dyn SaveSlot>) -> Self {
        Self {
            clock: FarmClock::new(config.day_length_secs),
            state: GameState::new_game(&config.new_game),
            config,
            slot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &FarmConfig {
        &self.config
    }

    pub fn slot(&self) -> &dyn SaveSlot {
        self.slot.as_ref()
    }

    /// Apply one action. On success the held state is replaced and, for
    /// durable actions, saved.
    pub fn dispatch(&mut self, action: Action, now: Millis) -> Outcome {
        let outcome = transition::apply(&self.state, &action, now);
        match &outcome {
            Outcome::Applied(next) => {
                log::debug!("now={now} applied {}", action.name());
                self.replace_state(next.clone());
                if action.is_durable() {
                    self.save_now();
                }
            }
            Outcome::Rejected(reason) => {
                log::info!("now={now} rejected {}: {reason}", action.name());
            }
        }
        outcome
    }

    /// One driver step: refresh growth, then roll over any elapsed days.
    /// Returns the number of days that passed.
    pub fn tick(&mut self, now: Millis) -> u32 {
        self.dispatch(Action::UpdateGrowth, now);
        let days = self.clock.sample(now);
        if days == 0 {
            return 0;
        }
        for _ in 0..days {
            let next = transition::transition(self.state.clone(), &Action::NextDay, now);
            self.replace_state(next);
        }
        log::info!("Day {} begins ({})", self.state.day_count, self.state.current_season);
        self.save_now();
        days
    }

    fn replace_state(&mut self, next: GameState) {
        if next.current_season != self.state.current_season {
            log::info!(
                "Season changed: {} -> {} (day {})",
                self.state.current_season,
                next.current_season,
                next.day_count
            );
        }
        self.state = next;
    }

    /// Checkpoint the current state. Returns whether the write went through.
    pub fn save_now(&self) -> bool {
        persistence::save(self.slot.as_ref(), &self.config.save_key, &self.state, Utc::now())
    }

    pub fn growth_percent(&self, plot_id: &str, now: Millis) -> Option<u8> {
        self.state.plot(plot_id).map(|p| p.growth_percent_at(now))
    }

    /// Ids of plots whose crop is ready as of `now`.
    pub fn ready_plots(&self, now: Millis) -> Vec<String> {
        self.state
            .plots
            .iter()
            .filter(|p| p.stage_at(now) == GrowthStage::Ready)
            .map(|p| p.id.clone())
            .collect()
    }
}

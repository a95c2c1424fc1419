//! Persistence adapter: best-effort save and forgiving load.
//!
//! RULE: Neither function fails upward. A save that cannot be written is
//! logged and dropped; a slot that is empty or unreadable loads as
//! "no saved game".

use crate::{
    error::FarmResult,
    snapshot::SaveSnapshot,
    state::GameState,
    store::SaveSlot,
};
use chrono::{DateTime, Utc};

/// Write `state` to the slot named `key`, overwriting any earlier save.
/// Returns whether the write went through.
pub fn save(slot: &dyn SaveSlot, key: &str, state: &GameState, saved_at: DateTime<Utc>) -> bool {
    match try_save(slot, key, state, saved_at) {
        Ok(()) => {
            log::debug!("Game saved to slot '{key}' at {saved_at}");
            true
        }
        Err(e) => {
            log::warn!("Save to slot '{key}' failed, continuing without it: {e}");
            false
        }
    }
}

fn try_save(
    slot: &dyn SaveSlot,
    key: &str,
    state: &GameState,
    saved_at: DateTime<Utc>,
) -> FarmResult<()> {
    let json = SaveSnapshot::capture(state, saved_at).to_json()?;
    slot.set(key, &json)
}

/// Read the snapshot in `key`, backfilled to the current schema.
pub fn load_snapshot(slot: &dyn SaveSlot, key: &str) -> Option<SaveSnapshot> {
    let json = match slot.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Save slot '{key}' unreadable, starting fresh: {e}");
            return None;
        }
    };
    match SaveSnapshot::from_json(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("Save in slot '{key}' is corrupt, starting fresh: {e}");
            None
        }
    }
}

/// Read the game in `key`. `None` means start a new game.
pub fn load(slot: &dyn SaveSlot, key: &str) -> Option<GameState> {
    load_snapshot(slot, key).map(SaveSnapshot::into_state)
}

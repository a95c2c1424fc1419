//! Durable key-value save slots.
//!
//! RULE: Only store.rs talks to the database.
//! Everything above it sees the `SaveSlot` trait: `get`/`set` on a
//! named slot holding one string.

use crate::error::{FarmError, FarmResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::{cell::RefCell, collections::HashMap};

/// A durable named slot holding one string. `set` overwrites.
pub trait SaveSlot {
    fn get(&self, key: &str) -> FarmResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> FarmResult<()>;
}

// ── SQLite ─────────────────────────────────────────────────

pub struct FarmStore {
    conn: Connection,
}

impl FarmStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> FarmResult<Self> {
        let conn = Connection::open(path)?;
        if let Err(e) = conn.execute_batch("PRAGMA journal_mode=WAL;") {
            log::warn!("Could not enable WAL for {path}: {e}");
        }
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> FarmResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> FarmResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Open, then migrate. The usual way to get a ready store.
    pub fn open_migrated(path: &str) -> FarmResult<Self> {
        let store = Self::open(path)?;
        store.migrate()?;
        Ok(store)
    }

    pub fn slot_keys(&self) -> FarmResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM save_slot ORDER BY key ASC")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    pub fn delete_slot(&self, key: &str) -> FarmResult<()> {
        self.conn
            .execute("DELETE FROM save_slot WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SaveSlot for FarmStore {
    fn get(&self, key: &str) -> FarmResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM save_slot WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn set(&self, key: &str, value: &str) -> FarmResult<()> {
        self.conn.execute(
            "INSERT INTO save_slot (key, payload) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload,
                                            written_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

// ── In memory ──────────────────────────────────────────────

/// Non-durable slot for tests and drivers without storage.
/// `unavailable()` builds one that refuses every write.
#[derive(Debug, Default)]
pub struct MemorySlot {
    slots:       RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.slots.borrow_mut().insert(key.to_string(), value.to_string());
        slot
    }
}

impl SaveSlot for MemorySlot {
    fn get(&self, key: &str) -> FarmResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FarmResult<()> {
        if self.unavailable {
            return Err(FarmError::SlotUnavailable { key: key.to_string() });
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}


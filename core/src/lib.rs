//! homestead-core: the farming simulation state machine.
//!
//! The view/driver layer holds a `GameState`, feeds timestamped `Action`s
//! through `transition::apply`, and persists snapshots through a `SaveSlot`.
//! `engine::FarmEngine` is the reference driver.

pub mod autoplay;
pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod plot;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod transition;
pub mod types;

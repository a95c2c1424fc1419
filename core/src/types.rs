//! Shared primitive types used across the entire simulation.

/// Wall-clock milliseconds supplied by the caller. The core never reads the clock.
pub type Millis = u64;

/// Stable catalog key of a crop.
pub type CropId = String;

/// Stable plot identifier, derived from grid coordinates.
pub type PlotId = String;

/// Currency.
pub type Coins = u64;

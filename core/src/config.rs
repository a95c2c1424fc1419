use crate::{state::GridSize, transition::MAX_GRID_SIDE, types::Coins};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewGameConfig {
    pub starting_coins: Coins,
    /// Seeds of the starter crop handed out at the start.
    pub starting_seeds: u32,
    pub player_name:    String,
    pub grid:           GridSize,
}

impl Default for NewGameConfig {
    fn default() -> Self {
        Self {
            starting_coins: 100,
            starting_seeds: 5,
            player_name:    "Farmer".into(),
            grid:           GridSize::default(),
        }
    }
}

/// Driver-side settings. Game rules are constants in their own modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FarmConfig {
    pub new_game:           NewGameConfig,
    /// Name of the durable slot the session saves into.
    pub save_key:           String,
    /// How often the driver dispatches a growth update.
    pub growth_tick_millis: u64,
    /// Real seconds per in-game day.
    pub day_length_secs:    u64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            new_game:           NewGameConfig::default(),
            save_key:           "homestead-save".into(),
            growth_tick_millis: 1000,
            day_length_secs:    120,
        }
    }
}

impl FarmConfig {
    /// Load from a JSON file. Fields absent from the file keep their defaults.
    /// In tests, use FarmConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: FarmConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        if config.day_length_secs == 0 {
            anyhow::bail!("day_length_secs must be positive in {path}");
        }
        let grid = config.new_game.grid;
        if grid.rows == 0 || grid.cols == 0 || grid.rows > MAX_GRID_SIDE || grid.cols > MAX_GRID_SIDE {
            anyhow::bail!("new_game.grid must be between 1x1 and {MAX_GRID_SIDE}x{MAX_GRID_SIDE} in {path}");
        }
        Ok(config)
    }
}

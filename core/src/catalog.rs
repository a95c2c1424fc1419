//! Crop catalog: the static, immutable table of crop definitions.
//!
//! RULE: Crops never change after startup. Everything else refers to a
//! crop by its `id` and looks it up here; an unknown id is "nothing to do",
//! never a fault.

use crate::{calendar::Season, types::Coins};
use serde::Serialize;

/// Unlocking costs this many seeds' worth of coins.
pub const UNLOCK_PRICE_MULTIPLIER: Coins = 10;

/// Id of the single crop every farm starts with.
pub const STARTER_CROP_ID: &str = "potato";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonRestriction {
    Any,
    Only(Season),
}

impl SeasonRestriction {
    pub fn allows(self, season: Season) -> bool {
        match self {
            SeasonRestriction::Any => true,
            SeasonRestriction::Only(s) => s == season,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Crop {
    pub id:                      &'static str,
    pub name:                    &'static str,
    pub growth_duration_seconds: u64,
    /// Cost of one seed.
    pub unit_price:              Coins,
    /// Coins earned per harvest.
    pub harvest_yield:           Coins,
    pub season:                  SeasonRestriction,
    pub starts_unlocked:         bool,
}

const fn crop(
    id: &'static str,
    name: &'static str,
    growth_duration_seconds: u64,
    unit_price: Coins,
    harvest_yield: Coins,
    season: SeasonRestriction,
) -> Crop {
    Crop {
        id,
        name,
        growth_duration_seconds,
        unit_price,
        harvest_yield,
        season,
        starts_unlocked: false,
    }
}

use self::SeasonRestriction::{Any, Only};
use crate::calendar::Season::{Fall, Spring, Summer, Winter};

static CROPS: [Crop; 16] = [
    Crop {
        id: STARTER_CROP_ID,
        name: "Potato",
        growth_duration_seconds: 70,
        unit_price: 7,
        harvest_yield: 16,
        season: Any,
        starts_unlocked: true,
    },
    crop("carrot",     "Carrot",     60,  5,  11,  Only(Spring)),
    crop("tomato",     "Tomato",     80,  10, 22,  Only(Summer)),
    crop("corn",       "Corn",       100, 15, 35,  Only(Summer)),
    crop("strawberry", "Strawberry", 90,  20, 42,  Only(Spring)),
    crop("pumpkin",    "Pumpkin",    120, 25, 60,  Only(Fall)),
    crop("wheat",      "Wheat",      85,  8,  18,  Only(Fall)),
    crop("cabbage",    "Cabbage",    110, 12, 28,  Only(Winter)),
    crop("watermelon", "Watermelon", 140, 30, 75,  Only(Summer)),
    crop("eggplant",   "Eggplant",   95,  16, 36,  Only(Summer)),
    crop("grapes",     "Grapes",     160, 35, 85,  Only(Fall)),
    crop("broccoli",   "Broccoli",   80,  14, 32,  Only(Winter)),
    crop("pepper",     "Pepper",     105, 18, 42,  Only(Summer)),
    crop("avocado",    "Avocado",    180, 45, 110, Only(Spring)),
    crop("onion",      "Onion",      75,  12, 26,  Only(Spring)),
    crop("garlic",     "Garlic",     85,  15, 34,  Only(Fall)),
];

/// The whole catalog, in display order.
pub fn crops() -> &'static [Crop] {
    &CROPS
}

pub fn find_crop(id: &str) -> Option<&'static Crop> {
    CROPS.iter().find(|c| c.id == id)
}

pub fn starter_crop() -> &'static Crop {
    &CROPS[0]
}

pub fn unlock_cost(crop: &Crop) -> Coins {
    crop.unit_price * UNLOCK_PRICE_MULTIPLIER
}

pub fn is_plantable_in_season(crop: &Crop, season: Season) -> bool {
    crop.season.allows(season)
}

/// Crops plantable in `season`, in catalog order.
pub fn crops_for_season(season: Season) -> impl Iterator<Item = &'static Crop> {
    CROPS.iter().filter(move |c| is_plantable_in_season(c, season))
}

//! Day/season calendar.
//!
//! RULE: Seasons only rotate forward, in fixed cyclic order.
//! The season boundary is checked against the day count BEFORE it is
//! incremented, so leaving day 28 (56, 84, …) enters the next season.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DAYS_PER_SEASON: u32 = 28;

/// First day of a new game.
pub const FIRST_DAY: u32 = 1;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall   => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall   => "fall",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advance the calendar by one day. Returns the new `(day_count, season)`.
pub fn advance_day(day_count: u32, season: Season) -> (u32, Season) {
    let season = if day_count % DAYS_PER_SEASON == 0 {
        season.next()
    } else {
        season
    };
    (day_count.saturating_add(1), season)
}

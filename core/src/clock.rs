//! Day timer: turns sampled wall-clock time into in-game day boundaries.
//!
//! The driver samples the clock (usually once per growth tick) and asks
//! how many days rolled over since the previous sample. Time spent paused,
//! and time that runs backwards, is never counted.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmClock {
    pub day_length_millis: Millis,
    pub paused:            bool,
    last_sample:           Option<Millis>,
    /// Millis accumulated toward the next day boundary.
    carried:               Millis,
}

impl FarmClock {
    pub fn new(day_length_secs: u64) -> Self {
        Self {
            day_length_millis: day_length_secs.max(1).saturating_mul(1000),
            paused: false,
            last_sample: None,
            carried: 0,
        }
    }

    /// Record a sample at `now`. Returns the number of day boundaries
    /// crossed since the previous sample. The first sample only sets the origin.
    pub fn sample(&mut self, now: Millis) -> u32 {
        let previous = self.last_sample.replace(now);
        if self.paused {
            return 0;
        }
        let Some(previous) = previous else { return 0 };
        self.carried = self.carried.saturating_add(now.saturating_sub(previous));
        let days = self.carried / self.day_length_millis;
        self.carried %= self.day_length_millis;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// Fraction of the current day already elapsed, in percent.
    pub fn day_progress_percent(&self) -> u8 {
        (self.carried * 100 / self.day_length_millis) as u8
    }
}

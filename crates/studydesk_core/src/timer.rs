//! Study stopwatch and countdown arithmetic.
//!
//! The caller owns the clock: every operation takes `now_ms` (epoch
//! milliseconds), so ticking and display refresh stay outside core.
//! Readings can be saved under `stopwatchTime` / `timerTime` and restored.

use crate::store::{keys, KeyValueStore, StoreResult};
use log::warn;

/// Accumulating stopwatch that can be paused and resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    accumulated_ms: u64,
    running_since_ms: Option<i64>,
}

impl Stopwatch {
    /// Stopped stopwatch showing a previously saved reading.
    pub fn resume_from(accumulated_ms: u64) -> Self {
        Self {
            accumulated_ms,
            running_since_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since_ms.is_some()
    }

    /// Starts counting; no-op while running.
    pub fn start(&mut self, now_ms: i64) {
        if self.running_since_ms.is_none() {
            self.running_since_ms = Some(now_ms);
        }
    }

    /// Pauses and folds the running segment into the total.
    pub fn stop(&mut self, now_ms: i64) {
        if let Some(since) = self.running_since_ms.take() {
            self.accumulated_ms = self
                .accumulated_ms
                .saturating_add(elapsed_between(since, now_ms));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed_ms(&self, now_ms: i64) -> u64 {
        self.accumulated_ms.saturating_add(
            self.running_since_ms
                .map_or(0, |since| elapsed_between(since, now_ms)),
        )
    }
}

/// Countdown toward zero from a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    duration_ms: u64,
    started_at_ms: Option<i64>,
}

impl Countdown {
    /// Countdown of `hours:minutes:seconds`, not yet started.
    ///
    /// Durations past `u64::MAX` milliseconds clamp to it.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        let total_seconds = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        Self::new(total_seconds.saturating_mul(1000))
    }

    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            started_at_ms: None,
        }
    }

    pub fn start(&mut self, now_ms: i64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Time left; the full duration before start, `0` once expired.
    pub fn remaining_ms(&self, now_ms: i64) -> u64 {
        match self.started_at_ms {
            Some(started) => self
                .duration_ms
                .saturating_sub(elapsed_between(started, now_ms)),
            None => self.duration_ms,
        }
    }

    pub fn is_finished(&self, now_ms: i64) -> bool {
        self.started_at_ms.is_some() && self.remaining_ms(now_ms) == 0
    }
}

/// Formats milliseconds as zero-padded `HH:MM:SS`, dropping sub-seconds.
pub fn format_hms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

pub fn save_stopwatch_reading<S: KeyValueStore + ?Sized>(store: &S, ms: u64) -> StoreResult<()> {
    store.set(keys::STOPWATCH_TIME, &ms.to_string())
}

pub fn save_countdown_reading<S: KeyValueStore + ?Sized>(store: &S, ms: u64) -> StoreResult<()> {
    store.set(keys::TIMER_TIME, &ms.to_string())
}

/// Last saved stopwatch reading; `0` when absent or unreadable.
pub fn load_stopwatch_reading<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<u64> {
    load_reading(store, keys::STOPWATCH_TIME)
}

/// Last saved countdown reading; `0` when absent or unreadable.
pub fn load_countdown_reading<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<u64> {
    load_reading(store, keys::TIMER_TIME)
}

fn load_reading<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> StoreResult<u64> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    // Older builds wrote JS numbers, which may carry a fraction.
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value as u64),
        _ => {
            warn!("event=timer_load module=timer status=ignored key={key}");
            Ok(0)
        }
    }
}

fn elapsed_between(start_ms: i64, end_ms: i64) -> u64 {
    u64::try_from(end_ms.saturating_sub(start_ms)).unwrap_or(0)
}

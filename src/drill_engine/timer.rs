//! Adaptive per-round time budget.
//!
//! [`AdaptiveTimer`] lives for the whole session and tunes `base_time` from
//! round outcomes. Each round gets a fresh [`Countdown`] started from the
//! current `base_time`; the host drives it with [`Countdown::tick`] or
//! [`Countdown::advance`] on its own schedule.
//!
//! All times are held as whole tenths of a second so repeated `±0.1`
//! adjustments land exactly on the grid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drill_engine::{config::TimerConfig, models::Outcome};

fn to_tenths(seconds: f64) -> u32 {
    (seconds * 10.0).round().max(0.0) as u32
}

fn to_seconds(tenths: u32) -> f64 {
    f64::from(tenths) / 10.0
}

/// Snapshot of the cross-round difficulty state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub base_time: f64,
    pub consecutive_correct: u32,
}

#[derive(Debug, Clone)]
pub struct AdaptiveTimer {
    base: u32,
    min: u32,
    max: u32,
    step: u32,
    streak_length: u32,
    consecutive_correct: u32,
    warning: u32,
    tick: Duration,
}

impl AdaptiveTimer {
    pub fn new(config: &TimerConfig) -> Self {
        let min = to_tenths(config.min_base_time);
        let max = to_tenths(config.max_base_time);
        AdaptiveTimer {
            base: to_tenths(config.initial_base_time).clamp(min, max),
            min,
            max,
            step: to_tenths(config.step).max(1),
            streak_length: config.streak_length.max(1),
            consecutive_correct: 0,
            warning: to_tenths(config.warning_threshold),
            tick: config.tick(),
        }
    }

    /// Current per-round allowance in seconds.
    pub fn base_time(&self) -> f64 {
        to_seconds(self.base)
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            base_time: self.base_time(),
            consecutive_correct: self.consecutive_correct,
        }
    }

    /// Correct answers tighten the budget once per completed streak.
    pub fn record_correct(&mut self) {
        self.consecutive_correct += 1;
        if self.consecutive_correct >= self.streak_length {
            self.base = self.base.saturating_sub(self.step).max(self.min);
            self.consecutive_correct = 0;
        }
    }

    /// Misses and timeouts relax the budget and break the streak.
    pub fn record_miss(&mut self) {
        self.base = (self.base + self.step).min(self.max);
        self.consecutive_correct = 0;
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct                      => self.record_correct(),
            Outcome::Incorrect | Outcome::Timeout => self.record_miss(),
        }
    }

    /// Fresh countdown from the current `base_time`.
    pub fn start_countdown(&self) -> Countdown {
        Countdown::new(self.base, self.tick, self.warning)
    }
}

/// Result of driving a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting.
    Running,
    /// Reached zero on this call. Reported once; the countdown is stopped.
    Expired,
    /// Already stopped or expired; nothing happened.
    Idle,
}

/// One round's countdown. Stops itself on expiry; [`Countdown::stop`] is
/// idempotent.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    tick: Duration,
    carry: Duration,
    warning: u32,
}

impl Countdown {
    pub fn new(start_tenths: u32, tick: Duration, warning_tenths: u32) -> Self {
        Countdown {
            remaining: start_tenths,
            running: true,
            tick,
            carry: Duration::ZERO,
            warning: warning_tenths,
        }
    }

    /// Remaining time in seconds, never negative.
    pub fn remaining(&self) -> f64 {
        to_seconds(self.remaining)
    }

    pub fn remaining_tenths(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once remaining time is at or below the warning threshold.
    pub fn is_urgent(&self) -> bool {
        self.remaining <= self.warning
    }

    /// Stop the countdown. Returns `true` only for the call that stopped it.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Advance by one 0.1 s step.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Feed wall-clock time; whole ticks are applied, the rest carries over.
    pub fn advance(&mut self, elapsed: Duration) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.tick.is_zero() {
            return TickOutcome::Running;
        }
        self.carry = self.carry.saturating_add(elapsed);
        while self.carry >= self.tick {
            self.carry -= self.tick;
            if self.tick() == TickOutcome::Expired {
                self.carry = Duration::ZERO;
                return TickOutcome::Expired;
            }
        }
        TickOutcome::Running
    }
}

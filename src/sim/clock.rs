//! Round countdown clock
//!
//! A pure function of wall-clock reads: the driver calls `tick` on a fixed
//! cadence (~10 Hz is enough for correctness, the frame loop only adds
//! display smoothness) and the clock derives remaining time from
//! `now_ms - start_ms`.

/// Countdown timer for one round
#[derive(Debug, Clone)]
pub struct RoundClock {
    start_ms: f64,
    duration_secs: f32,
    remaining_secs: f32,
    expired: bool,
}

impl RoundClock {
    pub fn new(now_ms: f64, duration_secs: f32) -> Self {
        Self {
            start_ms: now_ms,
            duration_secs,
            remaining_secs: duration_secs,
            expired: false,
        }
    }

    /// Recompute remaining time from the wall clock.
    ///
    /// Returns `true` exactly once, on the tick that first reaches zero.
    /// Later ticks keep remaining time pinned at zero and return `false`.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.remaining_secs = (self.duration_secs - self.elapsed_secs(now_ms)).max(0.0);
        if self.remaining_secs > 0.0 || self.expired {
            return false;
        }
        self.expired = true;
        true
    }

    /// Seconds since the round started
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        ((now_ms - self.start_ms) / 1000.0) as f32
    }

    /// Remaining time as of the last tick
    pub fn remaining_secs(&self) -> f32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }

    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Restart the countdown from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.remaining_secs = self.duration_secs;
        self.expired = false;
    }
}

/// How loudly the HUD should announce the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerUrgency {
    Calm,
    Warning,
    Critical,
}

impl TimerUrgency {
    /// Thresholds: over 10 s calm, over 5 s warning, otherwise critical
    pub fn for_remaining(remaining_secs: f32) -> Self {
        if remaining_secs > 10.0 {
            TimerUrgency::Calm
        } else if remaining_secs > 5.0 {
            TimerUrgency::Warning
        } else {
            TimerUrgency::Critical
        }
    }

    /// CSS class the HUD attaches to the timer element
    pub fn css_class(&self) -> &'static str {
        match self {
            TimerUrgency::Calm => "calm",
            TimerUrgency::Warning => "warning",
            TimerUrgency::Critical => "critical",
        }
    }
}

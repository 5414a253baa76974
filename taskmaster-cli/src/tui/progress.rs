//! Animated completion bar value.
//!
//! When the target percentage changes, the bar holds its current value for
//! `delay`, then eases out to the target over `duration`. Retargeting mid-way
//! starts the new run from wherever the bar is at that moment.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    started: Instant,
    delay: Duration,
    duration: Duration,
}

impl ProgressAnimation {
    /// Starts at 0 and animates to `target`.
    pub fn new(target: u8, now: Instant, delay: Duration, duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: f64::from(target.min(100)),
            started: now,
            delay,
            duration,
        }
    }

    pub fn set_target(&mut self, target: u8, now: Instant) {
        let target = f64::from(target.min(100));
        if (target - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started = now;
    }

    /// Current bar value in 0.0..=100.0.
    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed <= self.delay {
            return self.from;
        }
        let running = elapsed - self.delay;
        if self.duration.is_zero() || running >= self.duration {
            return self.to;
        }
        let t = running.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.delay + self.duration
            && (self.to - self.from).abs() > f64::EPSILON
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

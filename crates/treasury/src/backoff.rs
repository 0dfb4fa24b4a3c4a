//! Exponential backoff with jitter and a total time budget.
//!
//! All arithmetic is done on whole milliseconds.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::BackoffPolicy;

/// Retry schedule state for one lookup.
#[derive(Debug)]
pub struct ExponentialBackoff {
    policy: BackoffPolicy,
    current_ms: u64,
    started: Instant,
}

impl ExponentialBackoff {
    /// Starts a schedule; the budget is measured from now.
    #[must_use]
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            current_ms: millis(policy.initial_interval),
            policy,
            started: Instant::now(),
        }
    }

    /// Next delay, or `None` once waiting it would exceed the budget.
    pub fn next_delay(&mut self) -> Option<Duration> {
        self.next_delay_after(self.started.elapsed())
    }

    /// Time left in the budget.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.policy.max_elapsed.saturating_sub(self.started.elapsed())
    }

    /// Same as [`Self::next_delay`] with an explicit elapsed time.
    pub fn next_delay_after(&mut self, elapsed: Duration) -> Option<Duration> {
        let delay = Duration::from_millis(self.randomized(self.current_ms));
        if elapsed.saturating_add(delay) > self.policy.max_elapsed {
            return None;
        }

        let max_ms = millis(self.policy.max_interval);
        let grown = self.current_ms.saturating_mul(self.policy.multiplier_pct) / 100;
        self.current_ms = grown.min(max_ms);

        Some(delay)
    }

    fn randomized(&self, interval_ms: u64) -> u64 {
        // Jitter above 100 % would make the lower bound negative.
        let jitter_pct = self.policy.jitter_pct.min(100);
        let delta = interval_ms.saturating_mul(jitter_pct) / 100;
        if delta == 0 {
            return interval_ms;
        }
        let low = interval_ms.saturating_sub(delta);
        let high = interval_ms.saturating_add(delta);
        rand::rng().random_range(low..=high)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

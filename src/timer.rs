use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

use crate::config::STUDY_DURATION_SECS;

/// Wall-clock source; `Fixed` keeps tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Gate between the study phase and the test phase.
///
/// Once the threshold has been observed as elapsed it stays elapsed until
/// `start` is called again, even if the wall clock steps backwards.
#[derive(Debug, Clone)]
pub struct StudyTimer {
    clock: Clock,
    threshold: Duration,
    started_at: Option<DateTime<Utc>>,
    elapsed_latch: Cell<bool>,
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new(Clock::System)
    }
}

impl StudyTimer {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            threshold: Duration::seconds(STUDY_DURATION_SECS),
            started_at: None,
            elapsed_latch: Cell::new(false),
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.elapsed_latch.set(false);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|start| (self.clock.now() - start).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }

    /// Time left before the test may start, floored at zero.
    pub fn remaining(&self) -> Duration {
        if self.started_at.is_none() {
            return self.threshold;
        }
        if self.is_elapsed() {
            return Duration::zero();
        }
        (self.threshold - self.elapsed()).max(Duration::zero())
    }

    pub fn is_elapsed(&self) -> bool {
        if self.elapsed_latch.get() {
            return true;
        }
        let elapsed = self.started_at.is_some() && self.elapsed() >= self.threshold;
        if elapsed {
            self.elapsed_latch.set(true);
        }
        elapsed
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

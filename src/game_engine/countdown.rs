//! Session countdown, as a value the controller owns.
//!
//! The countdown does not keep time itself. Whoever drives it (the runtime)
//! is handed a [`CountdownTicket`] on every start and reports ticks back with
//! the ticket's token. Pausing or stopping retires the token, so ticks from a
//! timer that was already cancelled are recognised as stale and dropped.

use std::time::Duration;

/// Tick resolution.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTicket {
    pub token: u64,
    pub remaining: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick from a retired timer.
    Stale,
    Running(Duration),
    /// Reached zero while running.
    Expired,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Duration,
    running: bool,
    generation: u64,
}

impl Countdown {
    pub fn new(total: Duration) -> Countdown {
        Countdown { remaining: total, running: false, generation: 0 }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start from the current remainder. `None` if already running or spent.
    pub fn start(&mut self) -> Option<CountdownTicket> {
        if self.running || self.remaining.is_zero() {
            return None;
        }
        self.running = true;
        self.generation += 1;
        Some(CountdownTicket { token: self.generation, remaining: self.remaining })
    }

    /// Stop and keep the remainder. Returns whether it was running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.generation += 1;
        true
    }

    pub fn tick(&mut self, token: u64, remaining: Duration) -> TickOutcome {
        if !self.running || token != self.generation {
            return TickOutcome::Stale;
        }
        self.remaining = remaining.min(self.remaining);
        if self.remaining.is_zero() {
            self.running = false;
            self.generation += 1;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }
}

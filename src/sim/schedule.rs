//! Periodic triggers on a logical millisecond clock
//!
//! Three timers drive the game: the tick, the hazard respawn and the hazard
//! promotion check. They share one clock and fire in chronological order, so
//! no two of them ever run at once.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Which periodic trigger fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Tick,
    Respawn,
    Promote,
}

/// A repeating timer that first fires one interval after it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    pub interval_ms: u64,
    pub next_due_ms: u64,
    pub running: bool,
}

impl PeriodicTimer {
    pub fn start(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
            running: true,
        }
    }

    /// Due at or before `now_ms`
    #[inline]
    pub fn due(&self, now_ms: u64) -> bool {
        self.running && self.next_due_ms <= now_ms
    }

    /// Consume the current deadline. Returns the time it was due.
    pub fn fire(&mut self) -> u64 {
        let at = self.next_due_ms;
        self.next_due_ms += self.interval_ms;
        at
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// The game's three timers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    tick: PeriodicTimer,
    respawn: PeriodicTimer,
    promote: PeriodicTimer,
}

impl Schedule {
    pub fn new(settings: &Settings, now_ms: u64) -> Self {
        Self {
            tick: PeriodicTimer::start(settings.tick_interval_ms, now_ms),
            respawn: PeriodicTimer::start(settings.respawn_interval_ms, now_ms),
            promote: PeriodicTimer::start(settings.promotion_interval_ms, now_ms),
        }
    }

    /// Registration order; breaks ties between timers due at the same instant
    fn timers_mut(&mut self) -> [(Trigger, &mut PeriodicTimer); 3] {
        [
            (Trigger::Tick, &mut self.tick),
            (Trigger::Respawn, &mut self.respawn),
            (Trigger::Promote, &mut self.promote),
        ]
    }

    /// Pop the earliest trigger due at or before `until_ms`, with its due time
    pub fn next_event(&mut self, until_ms: u64) -> Option<(Trigger, u64)> {
        let mut earliest: Option<(Trigger, &mut PeriodicTimer)> = None;
        for (trigger, timer) in self.timers_mut() {
            if !timer.due(until_ms) {
                continue;
            }
            let earlier = match &earliest {
                Some((_, best)) => timer.next_due_ms < best.next_due_ms,
                None => true,
            };
            if earlier {
                earliest = Some((trigger, timer));
            }
        }
        earliest.map(|(trigger, timer)| (trigger, timer.fire()))
    }

    pub fn stop_all(&mut self) {
        for (_, timer) in self.timers_mut() {
            timer.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.running || self.respawn.running || self.promote.running
    }
}

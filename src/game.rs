//! Game driver
//!
//! Owns the simulation, the input queue and the three periodic triggers, and
//! replays them in order against a logical clock. The host calls
//! [`Game::advance`] with elapsed time (from a frame callback, a timer, or a
//! test) and gets a render call after every tick.

use anyhow::Result;

use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{GameState, InputEvent, Schedule, TickInput, Trigger, tick};

/// A running game
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    schedule: Schedule,
    /// Input received since the last tick
    pending: Vec<InputEvent>,
    /// Logical time (ms) since the game started
    clock_ms: u64,
    idle_mode: bool,
}

impl Game {
    /// Start a game at logical time 0. Fails if the settings do not validate.
    pub fn new(settings: &Settings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            state: GameState::new(settings, seed),
            schedule: Schedule::new(settings, 0),
            pending: Vec::new(),
            clock_ms: 0,
            idle_mode: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Let the autopilot play when no input is queued
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    /// Queue an input event for the next tick. Ignored after game over.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.is_over() {
            self.pending.push(event);
        }
    }

    /// Run every trigger due in the next `elapsed_ms`. Returns ticks processed.
    pub fn advance(&mut self, elapsed_ms: u64, renderer: &mut impl Renderer) -> u64 {
        let until = self.clock_ms + elapsed_ms;
        let mut ticks = 0;

        while let Some((trigger, at)) = self.schedule.next_event(until) {
            match trigger {
                Trigger::Tick => {
                    let input = TickInput {
                        events: std::mem::take(&mut self.pending),
                        idle_mode: self.idle_mode,
                    };
                    tick(&mut self.state, &input, at);
                    renderer.render(&self.state);
                    self.state.events.clear();
                    ticks += 1;
                }
                Trigger::Respawn => self.state.respawn_hazards(at),
                Trigger::Promote => self.state.promote_hazards(at),
            }

            if self.state.is_over() {
                self.schedule.stop_all();
                self.pending.clear();
                log::info!("Timers stopped at t={}ms", at);
                break;
            }
        }

        self.clock_ms = until;
        ticks
    }
}

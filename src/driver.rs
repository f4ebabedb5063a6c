//! Real-time match driver
//!
//! Bridges a host's frame loop to the simulation: owns the held-key latch,
//! the pause switch and the serve clock, and drains events for sound and
//! score displays. The host supplies wall-clock instants; everything below
//! this layer works in plain dt seconds.

use crate::consts::NUDGE_STEP;
use crate::setup::{MatchError, MatchSetup};
use crate::sim::state::{FieldSize, MatchPhase, MatchState, Score, Side, Snapshot};
use crate::sim::tick::{Controls, Dir, Events, tick};

/// A running Pong match, advanced one frame at a time.
///
/// Frames only simulate while the match is running: between a serve and the
/// end of its rally, and not paused. The serve clock is driven separately
/// through [`Match::advance_countdown`], typically from a one second timer.
#[derive(Debug, Clone)]
pub struct Match {
    state: MatchState,
    controls: Controls,
    events: Events,
    running: bool,
    /// Instant of the previous frame; `None` makes the next frame measure
    /// from itself, so gaps across pauses and serves are never integrated
    last: Option<f64>,
}

impl Match {
    /// Set up a match on the given field, ready for its first countdown
    pub fn new(setup: MatchSetup, field: FieldSize, seed: u64) -> Result<Self, MatchError> {
        let state = MatchState::new(setup, field, seed)?;
        log::info!(
            "match start: {} on {}x{}, seed {}",
            setup.mode.as_str(),
            field.width,
            field.height,
            seed
        );
        Ok(Self {
            state,
            controls: Controls::default(),
            events: Events::default(),
            running: false,
            last: None,
        })
    }

    /// Advance one frame at wall-clock instant `now` (seconds) and drain
    /// everything that happened since the previous drain.
    pub fn run_once(&mut self, now: f64) -> Events {
        let dt = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last = Some(now);

        if self.running {
            tick(&mut self.state, &self.controls, dt, &mut self.events);
            if let Some(side) = self.events.point_to {
                self.running = false;
                log::info!(
                    "point to {}: score {}-{}",
                    side.as_str(),
                    self.state.score.left,
                    self.state.score.right
                );
            }
        }
        std::mem::take(&mut self.events)
    }

    /// One second of serve clock elapsed. Fires the serve once the count
    /// passes zero and starts frames running.
    pub fn advance_countdown(&mut self) {
        if self.state.advance_countdown() {
            self.events.served = true;
            self.running = true;
            self.last = None;
            let rally = self.state.score.left + self.state.score.right + 1;
            log::debug!("serve for rally {rally}");
        }
    }

    /// Freeze the match, keeping the current rally intact
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("paused");
        }
    }

    /// Restart frames after a pause. Ignored outside a rally; countdowns
    /// resume through the serve clock instead.
    pub fn resume(&mut self) {
        if !self.running && self.state.phase.is_rallying() {
            self.running = true;
            self.last = None;
            log::debug!("resumed");
        }
    }

    pub fn press(&mut self, side: Side, dir: Dir) {
        self.controls.set(side, dir, true);
    }

    pub fn release(&mut self, side: Side, dir: Dir) {
        self.controls.set(side, dir, false);
    }

    /// Step a paddle by a fixed offset, for tap-style input. Applied
    /// immediately; the next simulated tick clamps it back into bounds.
    pub fn nudge(&mut self, side: Side, dir: Dir) {
        self.state.paddle_mut(side).y += dir.unit() * NUDGE_STEP;
    }

    /// Adopt new field dimensions mid-match. Invalid dimensions are
    /// ignored so a stray host event cannot corrupt the state.
    pub fn set_field_size(&mut self, field: FieldSize) {
        if !field.is_valid() {
            log::warn!(
                "ignoring resize to invalid dimensions {}x{}",
                field.width,
                field.height
            );
            return;
        }
        self.state.resize_field(field);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

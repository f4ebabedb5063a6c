//! Per-frame simulation tick
//!
//! Advances one variable timestep through a fixed pipeline: player controls,
//! computer opponent, paddle clamping, ball integration, walls, paddles,
//! goal check. Deterministic for a given state, input and dt sequence.

use super::state::{MatchState, Side};
use super::{ai, collision};
use crate::consts::MAX_TICK_DT;

/// Vertical movement direction for paddle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
}

impl Dir {
    /// Sign of the direction on the y axis (up is toward zero)
    pub fn unit(&self) -> f32 {
        match self {
            Dir::Up => -1.0,
            Dir::Down => 1.0,
        }
    }
}

/// Held key state for both paddles, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl Controls {
    pub fn set(&mut self, side: Side, dir: Dir, pressed: bool) {
        match (side, dir) {
            (Side::Left, Dir::Up) => self.left_up = pressed,
            (Side::Left, Dir::Down) => self.left_down = pressed,
            (Side::Right, Dir::Up) => self.right_up = pressed,
            (Side::Right, Dir::Down) => self.right_down = pressed,
        }
    }

    /// Net movement axis for one side: -1 up, +1 down, 0 idle or canceled
    pub fn axis(&self, side: Side) -> f32 {
        let (up, down) = match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        };
        (down as i8 - up as i8) as f32
    }
}

/// What happened during recent ticks, for sounds and driver bookkeeping.
///
/// Flags latch: ticks only ever set them, the driver drains and resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    /// A serve launched the ball
    pub served: bool,
    pub ball_hit_wall: bool,
    pub ball_hit_paddle: bool,
    /// A rally ended; the side that took the point
    pub point_to: Option<Side>,
}

impl Events {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the match by one timestep.
///
/// Only the `Rallying` phase simulates; countdowns hold everything still.
/// Oversized steps are clamped to `MAX_TICK_DT`, zero and negative ones are
/// ignored. Event flags are OR-ed into `events`, never cleared here.
pub fn tick(state: &mut MatchState, controls: &Controls, dt: f32, events: &mut Events) {
    if !(dt > 0.0) || !state.phase.is_rallying() {
        return;
    }
    let dt = dt.min(MAX_TICK_DT);

    for side in [Side::Left, Side::Right] {
        let axis = controls.axis(side);
        if axis != 0.0 {
            let paddle = state.paddle_mut(side);
            paddle.y += axis * paddle.speed * dt;
        }
    }

    if let Some(ai_side) = state.setup.ai_side() {
        let difficulty = state.setup.difficulty;
        let MatchState {
            left,
            right,
            ball,
            rng,
            ..
        } = state;
        let paddle = match ai_side {
            Side::Left => left,
            Side::Right => right,
        };
        ai::drive_paddle(paddle, ball, difficulty, dt, rng);
    }

    // Single clamp pass covers control moves, AI moves, nudges and resizes
    state.left.clamp_to(state.field.height);
    state.right.clamp_to(state.field.height);

    state.ball.pos += state.ball.vel * dt;

    if collision::bounce_on_walls(&mut state.ball, state.field) {
        events.ball_hit_wall = true;
    }
    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        if collision::bounce_on_paddle(&mut state.ball, paddle, side, state.field) {
            events.ball_hit_paddle = true;
        }
    }

    if let Some(winner) = collision::goal_scored(&state.ball, state.field) {
        state.finish_rally(winner);
        events.point_to = Some(winner);
    }
}

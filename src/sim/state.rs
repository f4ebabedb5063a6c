//! Match state and core simulation types
//!
//! Everything that drives a rally lives here: field geometry, both paddles,
//! the ball, the score, the phase machine and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::setup::{MatchError, MatchSetup};

/// Which half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Side::Left),
            "right" | "r" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Play-field dimensions in simulation units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl FieldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Diagonal length, the reference for proportional ball sizing
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// Usable dimensions are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A player's paddle; `y` is the top edge in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
    pub height: f32,
    /// Travel speed under player control (units per second)
    pub speed: f32,
}

impl Paddle {
    /// Proportional height for the given field
    pub fn height_for(field: FieldSize) -> f32 {
        (field.height * PADDLE_HEIGHT_RATIO).round()
    }

    /// A paddle centered vertically on the field
    pub fn centered(field: FieldSize) -> Self {
        let height = Self::height_for(field);
        Self {
            y: (field.height - height) / 2.0,
            height,
            speed: PADDLE_SPEED,
        }
    }

    /// Vertical midpoint of the paddle
    pub fn center(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True if a ball centered at `y` is within the face span
    pub fn covers(&self, y: f32) -> bool {
        y >= self.y && y <= self.y + self.height
    }

    /// Move the center toward `target` without overshooting within one step
    pub fn seek(&mut self, target: f32, step: f32) {
        let diff = target - self.center();
        if diff.abs() > step {
            self.y += step.copysign(diff);
        } else {
            self.y += diff;
        }
    }

    /// Restore the position invariant: top edge within [0, field - height]
    pub fn clamp_to(&mut self, field_height: f32) {
        self.y = self.y.clamp(0.0, (field_height - self.height).max(0.0));
    }
}

/// The ball; `speed` tracks the velocity magnitude between heading changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Ball {
    /// Proportional radius for the given field
    pub fn radius_for(field: FieldSize) -> f32 {
        (field.diagonal() * BALL_RADIUS_RATIO)
            .round()
            .max(MIN_BALL_RADIUS)
    }

    /// A motionless ball resting at field center
    pub fn resting(field: FieldSize, speed: f32) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height / 2.0),
            vel: Vec2::ZERO,
            radius: Self::radius_for(field),
            speed,
        }
    }

    /// Aim the ball `angle` radians off horizontal, `dir` +1 right / -1 left.
    /// The resulting velocity magnitude is exactly `speed`.
    pub fn set_heading(&mut self, angle: f32, dir: f32) {
        self.vel = Vec2::new(angle.cos() * self.speed * dir, angle.sin() * self.speed);
    }
}

/// Rally tally for both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    /// Award one point
    pub fn point_to(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Serve clock running; the ball rests at center
    Countdown { remaining: u8 },
    /// Ball in play
    Rallying,
    /// A point just landed; restages to `Countdown` within the same tick
    Scored { winner: Side },
}

impl MatchPhase {
    /// Seconds still showing on the serve clock, if any
    pub fn countdown(&self) -> Option<u8> {
        match self {
            MatchPhase::Countdown { remaining } => Some(*remaining),
            _ => None,
        }
    }

    pub fn is_rallying(&self) -> bool {
        matches!(self, MatchPhase::Rallying)
    }
}

/// Per-tick view handed to the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: FieldSize,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Seconds on the serve clock, present only during `Countdown`
    pub countdown: Option<u8>,
    pub phase: MatchPhase,
}

/// Complete authoritative state of one match (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Immutable configuration chosen at match start
    pub setup: MatchSetup,
    /// Current field dimensions
    pub field: FieldSize,
    pub phase: MatchPhase,
    pub score: Score,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Ball speed restored at the start of every rally
    pub base_speed: f32,
    /// Seed the match RNG was built from, kept for reproduction
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// State for a validated setup; starts in `Countdown(3)` with the ball
    /// resting at center.
    pub fn new(setup: MatchSetup, field: FieldSize, seed: u64) -> Result<Self, MatchError> {
        Self::with_base_speed(setup, field, seed, BASE_BALL_SPEED)
    }

    /// Like [`MatchState::new`] with a custom serve speed, for hosts that
    /// tune the pace. Rejects non-finite and non-positive speeds.
    pub fn with_base_speed(
        setup: MatchSetup,
        field: FieldSize,
        seed: u64,
        base_speed: f32,
    ) -> Result<Self, MatchError> {
        if !field.is_valid() {
            return Err(MatchError::InvalidConfiguration(format!(
                "field dimensions must be finite and positive, got {}x{}",
                field.width, field.height
            )));
        }
        if !base_speed.is_finite() || base_speed <= 0.0 {
            return Err(MatchError::InvalidConfiguration(format!(
                "ball base speed must be finite and positive, got {base_speed}"
            )));
        }
        Ok(Self {
            setup,
            field,
            phase: MatchPhase::Countdown {
                remaining: COUNTDOWN_START,
            },
            score: Score::default(),
            left: Paddle::centered(field),
            right: Paddle::centered(field),
            ball: Ball::resting(field, base_speed),
            base_speed,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Paddle defending the given side
    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Re-center both paddles and rest the ball at base speed
    pub(crate) fn reset_entities(&mut self) {
        self.left = Paddle::centered(self.field);
        self.right = Paddle::centered(self.field);
        self.ball = Ball::resting(self.field, self.base_speed);
    }

    /// Launch the resting ball and enter `Rallying`.
    ///
    /// Direction is a fair coin and the angle uniform within
    /// `SERVE_MAX_ANGLE`, both drawn from the match RNG.
    pub(crate) fn serve(&mut self) {
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let angle = self.rng.random_range(-SERVE_MAX_ANGLE..SERVE_MAX_ANGLE);
        self.ball.pos = Vec2::new(self.field.width / 2.0, self.field.height / 2.0);
        self.ball.set_heading(angle, dir);
        self.phase = MatchPhase::Rallying;
    }

    /// One second of serve clock elapsed. Counts 3 -> 2 -> 1 -> 0, then the
    /// pulse after zero fires the serve. Returns true when the serve fired.
    pub(crate) fn advance_countdown(&mut self) -> bool {
        match self.phase {
            MatchPhase::Countdown { remaining } if remaining > 0 => {
                self.phase = MatchPhase::Countdown {
                    remaining: remaining - 1,
                };
                false
            }
            MatchPhase::Countdown { .. } => {
                self.serve();
                true
            }
            _ => false,
        }
    }

    /// Award the point and stage the next rally. The `Scored` marker is
    /// transient; the state leaves this call in `Countdown(3)`.
    pub(crate) fn finish_rally(&mut self, winner: Side) {
        self.phase = MatchPhase::Scored { winner };
        self.score.point_to(winner);
        self.reset_entities();
        self.phase = MatchPhase::Countdown {
            remaining: COUNTDOWN_START,
        };
    }

    /// Adopt new field dimensions, rescaling paddle heights and the ball
    /// radius in place. Positions are left to the next tick's clamp pass.
    /// Calling with the current dimensions is a no-op.
    pub(crate) fn resize_field(&mut self, field: FieldSize) {
        if field == self.field {
            return;
        }
        self.field = field;
        let height = Paddle::height_for(field);
        self.left.height = height;
        self.right.height = height;
        self.ball.radius = Ball::radius_for(field);
    }

    /// View of the state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            left: self.left,
            right: self.right,
            ball: self.ball,
            score: self.score,
            countdown: self.phase.countdown(),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldSize {
        FieldSize::new(800.0, 400.0)
    }

    fn new_state() -> MatchState {
        MatchState::new(MatchSetup::default(), field(), 7).unwrap()
    }

    #[test]
    fn test_new_match_enters_countdown() {
        let state = new_state();
        assert_eq!(state.phase, MatchPhase::Countdown { remaining: 3 });
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_entity_sizing_is_proportional() {
        let state = new_state();
        // 20% of a 400-high field, centered
        assert_eq!(state.left.height, 80.0);
        assert_eq!(state.left.y, 160.0);
        assert_eq!(state.right.height, 80.0);
        // 1% of the 800x400 diagonal, rounded
        assert_eq!(state.ball.radius, 9.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_tiny_field_keeps_minimum_ball_radius() {
        let state = MatchState::new(MatchSetup::default(), FieldSize::new(40.0, 20.0), 7).unwrap();
        assert_eq!(state.ball.radius, 3.0);
    }

    #[test]
    fn test_countdown_counts_to_zero_then_serves() {
        let mut state = new_state();
        for expected in [2, 1, 0] {
            assert!(!state.advance_countdown());
            assert_eq!(state.phase.countdown(), Some(expected));
        }
        assert!(state.advance_countdown());
        assert!(state.phase.is_rallying());
        let speed = state.ball.vel.length();
        assert!(
            (speed - BASE_BALL_SPEED).abs() < 1e-3,
            "serve speed was {speed}"
        );
    }

    #[test]
    fn test_serve_angle_stays_shallow() {
        for seed in 0..32 {
            let mut state = MatchState::new(MatchSetup::default(), field(), seed).unwrap();
            for _ in 0..4 {
                state.advance_countdown();
            }
            let vel = state.ball.vel;
            let angle = (vel.y / BASE_BALL_SPEED).asin();
            assert!(
                angle.abs() <= SERVE_MAX_ANGLE + 1e-4,
                "seed {seed} served at {angle} rad"
            );
            assert!(vel.x != 0.0);
        }
    }

    #[test]
    fn test_serve_is_deterministic_per_seed() {
        let serve = |seed: u64| {
            let mut state = MatchState::new(MatchSetup::default(), field(), seed).unwrap();
            for _ in 0..4 {
                state.advance_countdown();
            }
            state.ball.vel
        };
        assert_eq!(serve(42), serve(42));
    }

    #[test]
    fn test_finish_rally_scores_and_restages() {
        let mut state = new_state();
        for _ in 0..4 {
            state.advance_countdown();
        }
        state.ball.speed = 500.0;
        state.left.y = 5.0;
        state.finish_rally(Side::Right);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.phase, MatchPhase::Countdown { remaining: 3 });
        assert_eq!(state.ball.speed, BASE_BALL_SPEED, "ball speed back to base");
        assert_eq!(state.left.y, 160.0, "paddles re-center");
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_custom_base_speed_survives_rally_resets() {
        let mut state =
            MatchState::with_base_speed(MatchSetup::default(), field(), 7, 450.0).unwrap();
        for _ in 0..4 {
            state.advance_countdown();
        }
        assert!((state.ball.vel.length() - 450.0).abs() < 1e-3);
        state.ball.speed = 700.0;
        state.finish_rally(Side::Left);
        assert_eq!(state.ball.speed, 450.0);
    }

    #[test]
    fn test_invalid_base_speed_is_rejected() {
        for speed in [0.0, -300.0, f32::NAN, f32::INFINITY] {
            let result = MatchState::with_base_speed(MatchSetup::default(), field(), 7, speed);
            assert!(result.is_err(), "base speed {speed} must be rejected");
        }
    }

    #[test]
    fn test_resize_rescales_without_moving_paddles() {
        let mut state = new_state();
        state.left.y = 100.0;
        state.resize_field(FieldSize::new(1000.0, 600.0));
        assert_eq!(state.left.height, 120.0);
        assert_eq!(state.right.height, 120.0);
        assert_eq!(state.left.y, 100.0, "positions wait for the clamp pass");
        assert_eq!(state.ball.radius, 12.0);
    }

    #[test]
    fn test_resize_to_same_dimensions_is_noop() {
        let mut state = new_state();
        state.left.y = -30.0; // Out of bounds, must stay untouched
        let before = state.left;
        state.resize_field(field());
        assert_eq!(state.left, before);
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        for (w, h) in [
            (0.0, 400.0),
            (800.0, -1.0),
            (f32::NAN, 400.0),
            (800.0, f32::INFINITY),
        ] {
            let result = MatchState::new(MatchSetup::default(), FieldSize::new(w, h), 7);
            assert!(result.is_err(), "{w}x{h} must be rejected");
        }
    }

    #[test]
    fn test_snapshot_reflects_countdown() {
        let mut state = new_state();
        assert_eq!(state.snapshot().countdown, Some(3));
        for _ in 0..4 {
            state.advance_countdown();
        }
        assert_eq!(state.snapshot().countdown, None);
    }

    #[test]
    fn test_paddle_seek_does_not_overshoot() {
        let mut paddle = Paddle::centered(field());
        let start = paddle.center();
        paddle.seek(start + 100.0, 8.0);
        assert_eq!(paddle.center(), start + 8.0);
        paddle.seek(start + 10.0, 8.0);
        assert_eq!(paddle.center(), start + 10.0, "snaps when within one step");
    }

    #[test]
    fn test_side_string_round_trip() {
        for side in [Side::Left, Side::Right] {
            assert_eq!(Side::from_str(side.as_str()), Some(side));
        }
        assert_eq!(Side::from_str("middle"), None);
    }
}

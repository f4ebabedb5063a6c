//! Retro Pong - a classic two-paddle Pong match engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `setup`: Match configuration (player mode, sides, AI difficulty)
//! - `driver`: Frame and countdown driver exposing the `Match` aggregate

pub mod driver;
pub mod setup;
pub mod sim;

pub use driver::Match;
pub use setup::{Difficulty, MatchError, MatchSetup, Mode};

/// Match tuning constants
pub mod consts {
    /// Ball speed at every serve (units per second)
    pub const BASE_BALL_SPEED: f32 = 300.0;
    /// Paddle travel speed under player control (units per second)
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Speed multiplier applied on every paddle contact
    pub const PADDLE_SPEEDUP: f32 = 1.03;

    /// Paddle height as a fraction of field height
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.2;
    /// Horizontal inset of each paddle face from its field edge
    pub const PADDLE_FACE_INSET: f32 = 8.0;
    /// Ball radius as a fraction of the field diagonal
    pub const BALL_RADIUS_RATIO: f32 = 0.01;
    /// Smallest ball radius on tiny fields
    pub const MIN_BALL_RADIUS: f32 = 3.0;

    /// Largest vertical serve angle (radians off horizontal)
    pub const SERVE_MAX_ANGLE: f32 = 0.3;
    /// Largest deflection off a paddle edge (radians, 45 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Longest interval a single tick will integrate (seconds)
    pub const MAX_TICK_DT: f32 = 0.033;
    /// Seconds on the serve clock at the start of each rally
    pub const COUNTDOWN_START: u8 = 3;
    /// Paddle travel per touch-style nudge (units)
    pub const NUDGE_STEP: f32 = 42.0;
}

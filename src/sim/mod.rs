//! Deterministic simulation module
//!
//! All rally logic lives here. This module must stay pure and deterministic:
//! - Variable timestep clamped to `MAX_TICK_DT`
//! - Seeded RNG only, owned by the match state
//! - No clocks, rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::drive_paddle;
pub use collision::{bounce_on_paddle, bounce_on_walls, face_x, goal_scored};
pub use state::{Ball, FieldSize, MatchPhase, MatchState, Paddle, Score, Side, Snapshot};
pub use tick::{Controls, Dir, Events, tick};

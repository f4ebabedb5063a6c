//! Match configuration
//!
//! Everything chosen before the first serve: player count, which side the
//! human defends, and how sharp the AI opponent is. A setup is immutable for
//! the lifetime of a match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Side;

/// Rejected match setup or field geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Player count for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Human versus the built-in opponent
    #[default]
    OnePlayer,
    /// Two humans on one keyboard
    TwoPlayer,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::OnePlayer => "1p",
            Mode::TwoPlayer => "2p",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1" | "1p" | "one" => Some(Mode::OnePlayer),
            "2" | "2p" | "two" => Some(Mode::TwoPlayer),
            _ => None,
        }
    }

    /// Number of human players
    pub fn players(&self) -> u8 {
        match self {
            Mode::OnePlayer => 1,
            Mode::TwoPlayer => 2,
        }
    }

    /// Mode for a numeric player count
    pub fn from_players(n: u8) -> Option<Self> {
        match n {
            1 => Some(Mode::OnePlayer),
            2 => Some(Mode::TwoPlayer),
            _ => None,
        }
    }
}

/// AI skill levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Top approach speed of the AI paddle (units per second)
    pub fn ai_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 420.0,
            Difficulty::Medium => 520.0,
            Difficulty::Hard => 650.0,
        }
    }

    /// Peak-to-peak tracking noise mixed into the AI target (units)
    pub fn ai_error(&self) -> f32 {
        match self {
            Difficulty::Easy => 24.0,
            Difficulty::Medium => 12.0,
            Difficulty::Hard => 6.0,
        }
    }
}

/// Immutable per-match configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    /// One or two human players
    pub mode: Mode,
    /// Side the human defends in one-player mode
    pub human_side: Side,
    /// AI skill in one-player mode
    pub difficulty: Difficulty,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            mode: Mode::OnePlayer,
            human_side: Side::Left,
            difficulty: Difficulty::Medium,
        }
    }
}

impl MatchSetup {
    /// Human on `human_side`, AI on the other
    pub fn one_player(human_side: Side, difficulty: Difficulty) -> Self {
        Self {
            mode: Mode::OnePlayer,
            human_side,
            difficulty,
        }
    }

    /// Two humans; side and difficulty are irrelevant here
    pub fn two_player() -> Self {
        Self {
            mode: Mode::TwoPlayer,
            ..Self::default()
        }
    }

    /// Side driven by the AI, if any
    pub fn ai_side(&self) -> Option<Side> {
        match self.mode {
            Mode::OnePlayer => Some(self.human_side.opposite()),
            Mode::TwoPlayer => None,
        }
    }
}

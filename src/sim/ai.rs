//! Computer opponent
//!
//! A reactive tracker: every tick it chases the ball's current height with a
//! difficulty-scaled speed and a noisy aim. No prediction, no lookahead.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, Paddle};
use crate::setup::Difficulty;

/// Move the paddle one step toward the ball for this tick.
///
/// The target is the ball's height plus a fresh aim error drawn from the
/// match RNG, so the same seed replays the same pursuit.
pub fn drive_paddle(
    paddle: &mut Paddle,
    ball: &Ball,
    difficulty: Difficulty,
    dt: f32,
    rng: &mut Pcg32,
) {
    let error = difficulty.ai_error();
    let target = ball.pos.y + rng.random_range(-error / 2.0..error / 2.0);
    paddle.seek(target, difficulty.ai_speed() * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldSize;
    use glam::Vec2;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn parked_ball(y: f32) -> Ball {
        Ball {
            pos: Vec2::new(400.0, y),
            vel: Vec2::ZERO,
            radius: 9.0,
            speed: 300.0,
        }
    }

    #[test]
    fn test_hard_ai_converges_on_a_parked_ball() {
        let field = FieldSize::new(800.0, 800.0);
        let mut paddle = Paddle::centered(field);
        let ball = parked_ball(390.0);
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..120 {
            drive_paddle(&mut paddle, &ball, Difficulty::Hard, DT, &mut rng);
            paddle.clamp_to(field.height);
        }
        // Converged; from here the center stays within the aim error band
        for _ in 0..120 {
            drive_paddle(&mut paddle, &ball, Difficulty::Hard, DT, &mut rng);
            paddle.clamp_to(field.height);
            let off = (paddle.center() - ball.pos.y).abs();
            assert!(off <= Difficulty::Hard.ai_error(), "drifted {off} away");
        }
    }

    #[test]
    fn test_ai_step_is_speed_limited() {
        let field = FieldSize::new(800.0, 400.0);
        let mut paddle = Paddle::centered(field);
        let start = paddle.center();
        let ball = parked_ball(0.0);
        let mut rng = Pcg32::seed_from_u64(3);

        drive_paddle(&mut paddle, &ball, Difficulty::Easy, DT, &mut rng);
        let moved = (paddle.center() - start).abs();
        assert!(
            moved <= Difficulty::Easy.ai_speed() * DT + 1e-3,
            "moved {moved} in one tick"
        );
    }
}

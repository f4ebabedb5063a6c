//! Collision handling for the rally
//!
//! Walls reflect, paddle faces redirect by hit position, goals require the
//! ball to leave the field entirely. Each resolver leaves the ball flush
//! against the surface it touched; resolution order is owned by the tick.

use super::state::{Ball, FieldSize, Paddle, Side};
use crate::consts::{MAX_BOUNCE_ANGLE, PADDLE_FACE_INSET, PADDLE_SPEEDUP};

/// Reflect the ball off the top and bottom walls.
///
/// Only a ball moving into a wall bounces. Returns true if a bounce happened.
pub fn bounce_on_walls(ball: &mut Ball, field: FieldSize) -> bool {
    if ball.pos.y - ball.radius <= 0.0 && ball.vel.y < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        return true;
    }
    if ball.pos.y + ball.radius >= field.height && ball.vel.y > 0.0 {
        ball.pos.y = field.height - ball.radius;
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// X coordinate of the hitting face of the given side's paddle
#[inline]
pub fn face_x(side: Side, field: FieldSize) -> f32 {
    match side {
        Side::Left => PADDLE_FACE_INSET,
        Side::Right => field.width - PADDLE_FACE_INSET,
    }
}

/// Bounce the ball off a paddle face if it reached it moving toward it.
///
/// The outgoing angle follows where the ball struck the face: center is
/// flat, the extreme edges send it off at `MAX_BOUNCE_ANGLE`. Every return
/// also speeds the ball up by `PADDLE_SPEEDUP`. Returns true on a hit.
pub fn bounce_on_paddle(ball: &mut Ball, paddle: &Paddle, side: Side, field: FieldSize) -> bool {
    if paddle.height <= 0.0 {
        return false; // Degenerate paddle
    }
    let face = face_x(side, field);
    let (reached, toward) = match side {
        Side::Left => (ball.pos.x - ball.radius <= face, ball.vel.x < 0.0),
        Side::Right => (ball.pos.x + ball.radius >= face, ball.vel.x > 0.0),
    };
    if !reached || !toward || !paddle.covers(ball.pos.y) {
        return false;
    }

    let (flush_x, dir) = match side {
        Side::Left => (face + ball.radius, 1.0),
        Side::Right => (face - ball.radius, -1.0),
    };
    let rel = (ball.pos.y - paddle.y) / paddle.height - 0.5;
    let angle = rel * 2.0 * MAX_BOUNCE_ANGLE;
    ball.pos.x = flush_x;
    ball.speed *= PADDLE_SPEEDUP;
    ball.set_heading(angle, dir);
    true
}

/// Side that won the point, if the ball has fully left the field
pub fn goal_scored(ball: &Ball, field: FieldSize) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x - ball.radius > field.width {
        Some(Side::Left)
    } else {
        None
    }
}

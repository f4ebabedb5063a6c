//! Headless demo match
//!
//! Plays a one player match against the medium computer opponent, driving
//! the paddle with a naive ball chaser and logging rallies as they land.
//! A real host would hang a window, renderer and sounds off the same
//! driver calls.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use retro_pong::sim::{Dir, FieldSize, Side};
use retro_pong::{Difficulty, Match, MatchSetup};

/// Points to play before the demo exits
const DEMO_POINTS: u32 = 5;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let setup = MatchSetup::one_player(Side::Left, Difficulty::Medium);
    let field = FieldSize::new(800.0, 400.0);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = match Match::new(setup, field, seed) {
        Ok(game) => game,
        Err(err) => {
            log::error!("could not start match: {err}");
            return;
        }
    };
    // A real host would also map window blur to game.pause() here.

    let start = Instant::now();
    let mut next_pulse = Duration::from_secs(1);
    let mut points = 0;
    let mut rally_hits = 0;

    while points < DEMO_POINTS {
        let now = start.elapsed();
        // 1 Hz serve clock; pulses during a rally fall through as no-ops
        while now >= next_pulse {
            game.advance_countdown();
            next_pulse += Duration::from_secs(1);
        }

        chase_ball(&mut game);
        let events = game.run_once(now.as_secs_f64());
        if events.ball_hit_paddle {
            rally_hits += 1;
        }
        if events.point_to.is_some() {
            log::info!("rally over after {rally_hits} paddle hits");
            rally_hits = 0;
            points += 1;
        }

        thread::sleep(Duration::from_millis(16));
    }

    let score = game.score();
    log::info!("demo over: final score {}-{}", score.left, score.right);
}

/// Key the human paddle toward the ball, with a small dead zone so it does
/// not jitter around the target
fn chase_ball(game: &mut Match) {
    let snap = game.snapshot();
    let diff = snap.ball.pos.y - snap.left.center();
    game.release(Side::Left, Dir::Up);
    game.release(Side::Left, Dir::Down);
    if diff < -4.0 {
        game.press(Side::Left, Dir::Up);
    } else if diff > 4.0 {
        game.press(Side::Left, Dir::Down);
    }
}

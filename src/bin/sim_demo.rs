//! Headless scripted demo driver.
//!
//! Steps the simulation at a fixed cadence with a small scripted input
//! sequence and logs what happens, demonstrating the tick/intent/snapshot
//! contract without any rendering backend.

use anyhow::Result;
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use muncher::audio::{AudioService, Track};
use muncher::entity::direction::Direction;
use muncher::events::GameCommand;
use muncher::game::Game;

/// An audio collaborator that just logs the commands it receives.
struct LogAudio;

impl AudioService for LogAudio {
    fn play_looping(&mut self, track: Track) {
        debug!(?track, "audio: play looping");
    }

    fn stop_all(&mut self) {
        debug!("audio: stop all");
    }
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let mut game = Game::new(Box::new(LogAudio))?;

    // Start a session from the main menu and skip the level info pause.
    game.handle(GameCommand::Confirm);
    game.handle(GameCommand::Confirm);

    // A fixed steering script; ticks in between let the board play out.
    let script = [
        (0u32, Direction::Left),
        (30, Direction::Up),
        (90, Direction::Right),
        (150, Direction::Down),
        (210, Direction::Left),
        (300, Direction::Up),
    ];

    for tick in 0..600u32 {
        if let Some((_, direction)) = script.iter().find(|(at, _)| *at == tick) {
            game.handle(GameCommand::SetDirection(*direction));
        }

        if game.tick() {
            break;
        }

        if tick % 120 == 0 {
            let frame = game.snapshot();
            info!(
                tick,
                state = %frame.state,
                score = frame.score,
                lives = frame.lives,
                power = frame.power_remaining,
                "frame"
            );
        }
    }

    let frame = game.snapshot();
    info!(
        state = %frame.state,
        score = frame.score,
        high_score = frame.high_score,
        lives = frame.lives,
        tier = frame.tier,
        "demo finished"
    );

    Ok(())
}

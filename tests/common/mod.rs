//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use muncher::audio::{AudioService, NullAudio, Track};
use muncher::events::GameCommand;
use muncher::game::Game;

/// One recorded audio command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play(Track),
    StopAll,
}

/// An [`AudioService`] that records every command for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    events: Arc<Mutex<Vec<AudioEvent>>>,
}

impl RecordingAudio {
    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<AudioEvent> {
        self.events.lock().unwrap().last().copied()
    }
}

impl AudioService for RecordingAudio {
    fn play_looping(&mut self, track: Track) {
        self.events.lock().unwrap().push(AudioEvent::Play(track));
    }

    fn stop_all(&mut self) {
        self.events.lock().unwrap().push(AudioEvent::StopAll);
    }
}

/// A deterministic game sitting at the main menu.
pub fn seeded_game(seed: u64) -> Game {
    Game::with_rng(Box::new(NullAudio), SmallRng::seed_from_u64(seed)).expect("fixed board must parse")
}

/// A deterministic game wired to a recording audio sink.
pub fn recorded_game(seed: u64) -> (Game, RecordingAudio) {
    let recorder = RecordingAudio::default();
    let game =
        Game::with_rng(Box::new(recorder.clone()), SmallRng::seed_from_u64(seed)).expect("fixed board must parse");
    (game, recorder)
}

/// A deterministic game that has started a session and entered play.
pub fn playing_game(seed: u64) -> Game {
    let mut game = seeded_game(seed);
    game.handle(GameCommand::Confirm); // Start Game -> LevelInfo
    game.handle(GameCommand::Confirm); // skip the info pause -> Playing
    game
}

//! The external audio collaborator interface.
//!
//! The simulation core never plays sound itself; it only signals an
//! [`AudioService`] with fire-and-forget commands. The service owns its
//! playback worker and any concurrency involved; a missing audio asset is
//! the service's problem to log and work around, never the simulation's.

/// Looping background tracks the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    MainMenu,
    InGame,
}

/// The sink for audio commands.
///
/// Implementations must not block; the core fires commands and moves on.
pub trait AudioService {
    /// Starts the given track looping, replacing whatever was playing.
    fn play_looping(&mut self, track: Track);

    /// Stops all playback.
    fn stop_all(&mut self);
}

/// An [`AudioService`] that discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play_looping(&mut self, _track: Track) {}

    fn stop_all(&mut self) {}
}

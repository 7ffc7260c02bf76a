//! Decoded input intents consumed by the game master.
//!
//! An external input layer translates raw key events into these commands;
//! the core never sees key codes. A command with no mapping in the current
//! state is ignored.

use crate::entity::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Steer the player agent.
    SetDirection(Direction),
    /// Activate the highlighted menu option, or start play from the
    /// pre-level pause.
    Confirm,
    /// Back out of a menu, or resume from the pause menu.
    Cancel,
    CursorUp,
    CursorDown,
    TogglePause,
    /// Terminal from any menu-bearing state.
    Quit,
}

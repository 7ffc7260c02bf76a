//! State tags and menu definitions for the game master.

use strum_macros::{Display, EnumCount, FromRepr};

/// The authoritative top-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameState {
    /// Initial state.
    MainMenu,
    LevelSelect,
    /// Timed informational pause shown before play starts or resumes.
    LevelInfo,
    Playing,
    Paused,
    GameOver,
    GameWin,
}

impl GameState {
    /// States that present a navigable option list.
    pub fn is_menu(self) -> bool {
        matches!(
            self,
            GameState::MainMenu | GameState::LevelSelect | GameState::Paused | GameState::GameOver | GameState::GameWin
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, FromRepr)]
pub enum MainMenuOption {
    #[strum(serialize = "Start Game")]
    StartGame,
    #[strum(serialize = "Level Select")]
    LevelSelect,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, FromRepr)]
pub enum LevelSelectOption {
    #[strum(serialize = "Level 1 - Easy")]
    Easy,
    #[strum(serialize = "Level 2 - Medium")]
    Medium,
    #[strum(serialize = "Level 3 - Hard")]
    Hard,
    Back,
}

impl LevelSelectOption {
    /// The difficulty tier this option selects, if any.
    pub fn tier(self) -> Option<u32> {
        match self {
            LevelSelectOption::Easy => Some(1),
            LevelSelectOption::Medium => Some(2),
            LevelSelectOption::Hard => Some(3),
            LevelSelectOption::Back => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, FromRepr)]
pub enum PauseOption {
    Resume,
    Restart,
    #[strum(serialize = "Main Menu")]
    MainMenu,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, FromRepr)]
pub enum GameOverOption {
    Restart,
    #[strum(serialize = "Main Menu")]
    MainMenu,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, FromRepr)]
pub enum GameWinOption {
    #[strum(serialize = "Next Level")]
    NextLevel,
    #[strum(serialize = "Main Menu")]
    MainMenu,
    Quit,
}

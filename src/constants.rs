//! This module contains all the constants used in the simulation.

use glam::IVec2;

use crate::entity::ghost::GhostKind;

/// The size of each board cell, in sub-tile units.
pub const TILE_SIZE: i32 = 32;
/// The number of rows on the game board.
pub const BOARD_ROWS: usize = 21;
/// The number of columns on the game board.
pub const BOARD_COLS: usize = 19;
/// The size of the game board, in sub-tile units.
pub const BOARD_PIXEL_SIZE: IVec2 = IVec2::new(BOARD_COLS as i32 * TILE_SIZE, BOARD_ROWS as i32 * TILE_SIZE);

/// Inward padding applied to both boxes in every overlap test.
pub const COLLISION_PADDING: i32 = 2;

/// Ticks between scheduled adversary direction re-evaluations.
pub const DECISION_INTERVAL: u32 = 30;
/// Ticks a power-up stays active once collected.
pub const POWER_UP_DURATION: u32 = 300;
/// Flat speed bonus applied to the player while powered up.
pub const POWER_UP_SPEED_BONUS: i32 = 1;
/// Ticks the pre-level information pause lasts.
pub const LEVEL_INFO_DURATION: u32 = 60;
/// Ticks the player's predicted position is extrapolated for intercepts.
pub const INTERCEPT_PREDICT_TICKS: i32 = 5;
/// Width of the random band above the chase probability.
pub const CHASE_RANDOM_MARGIN: f64 = 0.1;

/// Minimum elapsed ticks before a fruit spawn can be attempted.
pub const FRUIT_SPAWN_THRESHOLD: u32 = 500;
/// Per-tick fruit spawn probability once the threshold has elapsed.
pub const FRUIT_SPAWN_CHANCE: f64 = 0.015;
/// Minimum elapsed ticks before a power item spawn can be attempted.
pub const POWER_ITEM_SPAWN_THRESHOLD: u32 = 800;
/// Per-tick power item spawn probability once the threshold has elapsed.
pub const POWER_ITEM_SPAWN_CHANCE: f64 = 0.01;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_ITEM_SCORE: u32 = 50;
pub const FRUIT_SCORE: u32 = 100;
/// Bonus for eating a scared adversary while powered up.
pub const GHOST_SCORE: u32 = 200;

pub const STARTING_LIVES: u32 = 3;
/// The highest difficulty tier.
pub const MAX_TIER: u32 = 3;

/// Offset of a pellet within its floor cell.
pub const PELLET_INSET: IVec2 = IVec2::new(14, 14);
/// Bounding box size of a pellet.
pub const PELLET_SIZE: IVec2 = IVec2::new(4, 4);
/// Offset of a power item within its floor cell.
pub const POWER_ITEM_INSET: IVec2 = IVec2::new(8, 8);
/// Bounding box size of a power item.
pub const POWER_ITEM_SIZE: IVec2 = IVec2::new(16, 16);

/// An enum representing the different types of tiles on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// An open floor tile; receives one pellet at load.
    Floor,
    /// A wall tile.
    Wall,
    /// The player's spawn tile.
    PlayerSpawn,
    /// An adversary spawn tile.
    GhostSpawn(GhostKind),
}

/// Per-tier difficulty parameters.
///
/// Geometry never changes between tiers; only these values do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub player_speed: i32,
    pub ghost_speed: i32,
    pub chase_probability: f64,
    pub chase_range: f32,
}

impl Difficulty {
    /// Returns the fixed parameters for a difficulty tier (1 = easy).
    ///
    /// Tiers beyond the last one saturate at the hardest parameters.
    pub fn for_tier(tier: u32) -> Self {
        match tier {
            1 => Self {
                player_speed: 4,
                ghost_speed: 2,
                chase_probability: 0.7,
                chase_range: (5 * TILE_SIZE) as f32,
            },
            2 => Self {
                player_speed: 5,
                ghost_speed: 3,
                chase_probability: 0.8,
                chase_range: (7 * TILE_SIZE) as f32,
            },
            _ => Self {
                player_speed: 6,
                ghost_speed: 4,
                chase_probability: 0.9,
                chase_range: (9 * TILE_SIZE) as f32,
            },
        }
    }
}

/// The raw layout of the game board, as rows of characters.
///
/// Symbols: `X` wall, space floor, `P` player spawn, `b`/`o`/`p`/`r`
/// blue/orange/pink/red adversary spawns. Rows shorter than
/// [`BOARD_COLS`] are treated as floor past their end.
pub const RAW_BOARD: [&str; BOARD_ROWS] = [
    "XXXXXXXXXXXXXXXXXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X                 X",
    "X XX X XXXXX X XX X",
    "X    X       X    X",
    "XXXX XXXX XXXX XXXX",
    "X    X       X    X",
    "XXXX X XXrXX X XXXX",
    "X       bpo       X",
    "XXXX X XXXXX X XXXX",
    "X    X       X    X",
    "XXXX X XXXXX X XXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X  X     P     X  X",
    "XX X X XXXXX X X XX",
    "X    X   X   X    X",
    "X XXXXXX X XXXXXX X",
    "X                 X",
    "XXXXXXXXXXXXXXXXXXX",
];

//! Board parsing functionality for converting the raw character layout
//! into typed tiles and spawn seeds.

use glam::IVec2;

use crate::constants::{Tile, BOARD_COLS, BOARD_ROWS};
use crate::entity::ghost::GhostKind;
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone)]
pub struct ParsedBoard {
    /// The parsed tile layout, indexed `[row][col]`.
    pub tiles: [[Tile; BOARD_COLS]; BOARD_ROWS],
    /// The player's spawn cell.
    pub player_spawn: IVec2,
    /// Adversary spawn cells in board scan order (row-major). This order
    /// is the fixed adversary iteration order for the whole session.
    pub ghost_spawns: Vec<(GhostKind, IVec2)>,
}

impl ParsedBoard {
    /// Iterates over every floor cell, in scan order.
    pub fn floor_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, tile)| **tile == Tile::Floor)
                .map(move |(col, _)| IVec2::new(col as i32, row as i32))
        })
    }
}

/// Parser for converting raw board layouts into structured data.
pub struct BoardParser;

impl BoardParser {
    /// Parses a single character into a board tile.
    pub fn parse_character(c: char) -> Result<Tile, ParseError> {
        match c {
            'X' => Ok(Tile::Wall),
            ' ' => Ok(Tile::Floor),
            'P' => Ok(Tile::PlayerSpawn),
            _ => GhostKind::from_marker(c)
                .map(Tile::GhostSpawn)
                .ok_or(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured data.
    ///
    /// Rows shorter than the declared column count are treated as
    /// floor-filled past their end. Cell coordinates in the result are
    /// grid cells, not sub-tile units.
    ///
    /// # Errors
    ///
    /// Returns an error if the board contains an unknown character or has
    /// no player spawn marker.
    pub fn parse_board(raw_board: [&str; BOARD_ROWS]) -> Result<ParsedBoard, ParseError> {
        let mut tiles = [[Tile::Floor; BOARD_COLS]; BOARD_ROWS];
        let mut player_spawn = None;
        let mut ghost_spawns = Vec::with_capacity(4);

        for (row, line) in raw_board.iter().enumerate() {
            for (col, character) in line.chars().enumerate().take(BOARD_COLS) {
                let tile = Self::parse_character(character)?;
                let cell = IVec2::new(col as i32, row as i32);

                match tile {
                    Tile::PlayerSpawn => player_spawn = Some(cell),
                    Tile::GhostSpawn(kind) => ghost_spawns.push((kind, cell)),
                    _ => {}
                }

                tiles[row][col] = tile;
            }
        }

        let player_spawn = player_spawn.ok_or(ParseError::MissingPlayerSpawn)?;

        Ok(ParsedBoard {
            tiles,
            player_spawn,
            ghost_spawns,
        })
    }
}

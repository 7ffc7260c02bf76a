//! Centralized error types for the simulation engine.
//!
//! Per-tick operations are total and never fail; errors can only surface
//! while parsing the board at construction time.

/// Main error type for the simulation engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Board parsing error: {0}")]
    BoardParse(#[from] ParseError),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board has no player spawn marker")]
    MissingPlayerSpawn,
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;

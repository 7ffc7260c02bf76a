//! Adversary decision policy.
//!
//! Each adversary re-evaluates its direction on a fixed tick interval, or
//! immediately whenever it is stuck. The policy is a small fixed set of
//! behaviors: flee while scared, and otherwise mix direct chase, random
//! wander, and intercept moves weighted by the tier's chase probability.
//! Every proposal commits through the collision resolver; a rejected
//! proposal leaves the facing unchanged.

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::{Difficulty, CHASE_RANDOM_MARGIN, INTERCEPT_PREDICT_TICKS};
use crate::entity::collision::try_set_direction;
use crate::entity::direction::{Direction, DIRECTIONS};
use crate::entity::{Entity, EntityFlags};

/// The four adversary colors, in board marker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostKind {
    Blue,
    Orange,
    Pink,
    Red,
}

impl GhostKind {
    /// Maps a board spawn marker to its adversary color.
    pub fn from_marker(c: char) -> Option<GhostKind> {
        match c {
            'b' => Some(GhostKind::Blue),
            'o' => Some(GhostKind::Orange),
            'p' => Some(GhostKind::Pink),
            'r' => Some(GhostKind::Red),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GhostKind::Blue => "blue",
            GhostKind::Orange => "orange",
            GhostKind::Pink => "pink",
            GhostKind::Red => "red",
        }
    }
}

fn random_direction(rng: &mut SmallRng) -> Direction {
    DIRECTIONS[rng.random_range(0..DIRECTIONS.len())]
}

/// The dominant-axis direction from `from` toward `target`.
///
/// Axis ties break toward the vertical axis.
fn toward(from: IVec2, target: IVec2) -> Direction {
    let delta = target - from;
    if delta.x.abs() > delta.y.abs() {
        Direction::toward_x(delta.x)
    } else {
        Direction::toward_y(delta.y)
    }
}

/// The direction straight toward the player's current position.
pub fn chase_direction(ghost: &Entity, player: &Entity) -> Direction {
    toward(ghost.pos, player.pos)
}

/// The direction toward where the player will be a few ticks from now,
/// extrapolated along the player's current facing at its base speed.
pub fn intercept_direction(ghost: &Entity, player: &Entity) -> Direction {
    let predicted = player.pos + player.direction.offset(player.speed * INTERCEPT_PREDICT_TICKS);
    toward(ghost.pos, predicted)
}

/// Re-evaluates one adversary's direction.
///
/// Scared adversaries try to put distance between themselves and the
/// player: first away on each axis, then two random fallbacks, committing
/// the first direction the resolver accepts. Normal adversaries wander
/// randomly outside the chase range; inside it one uniform draw picks
/// between direct chase, a random move, and an intercept move.
pub fn decide(ghost: &mut Entity, player: &Entity, walls: &[Entity], difficulty: &Difficulty, rng: &mut SmallRng) {
    if ghost.flags.contains(EntityFlags::SCARED) {
        let delta = player.pos - ghost.pos;
        let candidates: SmallVec<[Direction; 4]> = SmallVec::from_buf([
            Direction::toward_x(delta.x).opposite(),
            Direction::toward_y(delta.y).opposite(),
            random_direction(rng),
            random_direction(rng),
        ]);

        for direction in candidates {
            if try_set_direction(ghost, direction, walls, false) {
                return;
            }
        }
        // No escape this interval; keep the current facing.
        trace!(ghost = ?ghost.kind, "no escape direction accepted");
        return;
    }

    let distance = ghost.pos.as_vec2().distance(player.pos.as_vec2());
    let proposal = if distance < difficulty.chase_range {
        let roll: f64 = rng.random();
        if roll < difficulty.chase_probability {
            chase_direction(ghost, player)
        } else if roll < difficulty.chase_probability + CHASE_RANDOM_MARGIN {
            random_direction(rng)
        } else {
            intercept_direction(ghost, player)
        }
    } else {
        random_direction(rng)
    };

    try_set_direction(ghost, proposal, walls, false);
}

/// Returns an adversary to its spawn point.
///
/// Clears the scared/frozen flags, restores the default facing, then tries
/// all four directions in random order until the resolver accepts one and
/// performs one unconditional displacement so the adversary is visibly
/// moving again.
pub fn reset_to_spawn(ghost: &mut Entity, walls: &[Entity], rng: &mut SmallRng) {
    ghost.reset();

    let mut directions = DIRECTIONS;
    directions.shuffle(rng);
    for direction in directions {
        if try_set_direction(ghost, direction, walls, false) {
            break;
        }
    }

    ghost.pos += ghost.velocity;
}

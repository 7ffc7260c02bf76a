//! The shared entity model.
//!
//! Every object on the board (the player, adversaries, collectibles, and
//! wall segments) shares one representation: an axis-aligned box with a
//! facing direction, a scalar speed, and a derived velocity. Velocity is
//! never assigned directly; it is recomputed from the direction, speed,
//! and mode flags whenever one of them changes.

use bitflags::bitflags;
use glam::IVec2;

use crate::constants::{FRUIT_SCORE, PELLET_SCORE, POWER_ITEM_SCORE, POWER_UP_SPEED_BONUS};
use crate::entity::direction::Direction;
use crate::entity::ghost::GhostKind;

pub mod collision;
pub mod direction;
pub mod ghost;

bitflags! {
    /// Transient entity mode flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntityFlags: u8 {
        /// The entity advances by its velocity each tick.
        const MOVING = 1 << 0;
        /// Adversary is fleeing and vulnerable while the power-up lasts.
        const SCARED = 1 << 1;
        /// Velocity is forced to zero regardless of direction and speed.
        const FROZEN = 1 << 2;
    }
}

/// The role an entity plays on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Ghost(GhostKind),
    Pellet,
    PowerItem,
    Fruit,
    Wall,
}

impl EntityKind {
    /// The points awarded when the player consumes this entity.
    ///
    /// Non-collectible roles are worth nothing; the adversary bonus is
    /// scored separately by the game master.
    pub fn score_value(self) -> u32 {
        match self {
            EntityKind::Pellet => PELLET_SCORE,
            EntityKind::PowerItem => POWER_ITEM_SCORE,
            EntityKind::Fruit => FRUIT_SCORE,
            _ => 0,
        }
    }

    pub fn is_ghost(self) -> bool {
        matches!(self, EntityKind::Ghost(_))
    }
}

/// One object on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Top-left corner, in sub-tile units.
    pub pos: IVec2,
    pub size: IVec2,
    /// Immutable respawn position captured at creation.
    pub spawn: IVec2,
    pub direction: Direction,
    pub speed: i32,
    /// Derived; see [`Entity::update_velocity`].
    pub velocity: IVec2,
    pub flags: EntityFlags,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: IVec2, size: IVec2) -> Self {
        Self {
            kind,
            pos,
            size,
            spawn: pos,
            direction: Direction::Up,
            speed: 0,
            velocity: IVec2::ZERO,
            flags: EntityFlags::MOVING,
        }
    }

    /// Recomputes the velocity from the current direction, speed, and flags.
    ///
    /// `powered_up` only affects the player, which gains a flat speed bonus
    /// while a power-up is active. A frozen entity always has zero velocity.
    pub fn update_velocity(&mut self, powered_up: bool) {
        if self.flags.contains(EntityFlags::FROZEN) {
            self.velocity = IVec2::ZERO;
            return;
        }

        let mut speed = self.speed;
        if self.kind == EntityKind::Player && powered_up {
            speed += POWER_UP_SPEED_BONUS;
        }
        self.velocity = self.direction.offset(speed);
    }

    /// Returns the entity to its spawn point with default facing and all
    /// transient flags cleared.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.direction = Direction::Right;
        self.flags.insert(EntityFlags::MOVING);
        self.flags.remove(EntityFlags::SCARED | EntityFlags::FROZEN);
        self.update_velocity(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghost(speed: i32) -> Entity {
        let mut e = Entity::new(EntityKind::Ghost(GhostKind::Red), IVec2::new(64, 64), IVec2::splat(32));
        e.speed = speed;
        e
    }

    #[test]
    fn test_velocity_follows_direction_and_speed() {
        let mut e = ghost(3);
        for dir in direction::DIRECTIONS {
            e.direction = dir;
            e.update_velocity(false);
            assert_eq!(e.velocity, dir.offset(3));
        }
    }

    #[test]
    fn test_frozen_forces_zero_velocity() {
        let mut e = ghost(3);
        e.direction = Direction::Right;
        e.flags.insert(EntityFlags::FROZEN);
        e.update_velocity(false);
        assert_eq!(e.velocity, IVec2::ZERO);
    }

    #[test]
    fn test_power_up_bonus_applies_to_player_only() {
        let mut player = Entity::new(EntityKind::Player, IVec2::ZERO, IVec2::splat(32));
        player.speed = 4;
        player.direction = Direction::Right;
        player.update_velocity(true);
        assert_eq!(player.velocity, IVec2::new(5, 0));

        let mut adversary = ghost(4);
        adversary.direction = Direction::Right;
        adversary.update_velocity(true);
        assert_eq!(adversary.velocity, IVec2::new(4, 0));
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut e = ghost(2);
        e.pos = IVec2::new(300, 300);
        e.direction = Direction::Up;
        e.flags.insert(EntityFlags::SCARED | EntityFlags::FROZEN);
        e.flags.remove(EntityFlags::MOVING);

        e.reset();

        assert_eq!(e.pos, e.spawn);
        assert_eq!(e.direction, Direction::Right);
        assert!(e.flags.contains(EntityFlags::MOVING));
        assert!(!e.flags.contains(EntityFlags::SCARED));
        assert!(!e.flags.contains(EntityFlags::FROZEN));
        assert_eq!(e.velocity, Direction::Right.offset(2));
    }

    #[test]
    fn test_score_values() {
        assert_eq!(EntityKind::Pellet.score_value(), 10);
        assert_eq!(EntityKind::PowerItem.score_value(), 50);
        assert_eq!(EntityKind::Fruit.score_value(), 100);
        assert_eq!(EntityKind::Wall.score_value(), 0);
        assert_eq!(EntityKind::Player.score_value(), 0);
    }
}

//! Movement and collision resolution.
//!
//! All tests are axis-aligned box overlaps with a fixed inward padding
//! shrinking both boxes, so pixel-exact corner contact never counts as a
//! hit. Direction changes are probed against the wall set before they
//! commit; the per-tick displacement is a separate, unconditional step.

use crate::constants::COLLISION_PADDING;
use crate::entity::direction::Direction;
use crate::entity::{Entity, EntityFlags};

/// Tests whether two entities' padded bounding boxes overlap.
///
/// Equality at the inset boundary counts as non-overlap; this exact open
/// interval determines pellet and fruit pickup timing.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    let p = COLLISION_PADDING;
    a.pos.x + p < b.pos.x + b.size.x - p
        && a.pos.x + a.size.x - p > b.pos.x + p
        && a.pos.y + p < b.pos.y + b.size.y - p
        && a.pos.y + a.size.y - p > b.pos.y + p
}

/// Tests an entity against every wall segment.
pub fn hits_wall(entity: &Entity, walls: &[Entity]) -> bool {
    walls.iter().any(|wall| overlaps(entity, wall))
}

/// Attempts to change an entity's facing direction.
///
/// The new direction's velocity is applied as a trial displacement and
/// probed against the wall set. A blocked probe restores the previous
/// position and direction, clears [`EntityFlags::MOVING`], and returns
/// `false`; the entity stands still until a valid direction is found. An
/// accepted probe restores the position only (the displacement was a
/// probe, not a commit), keeps the new direction, and sets the flag.
pub fn try_set_direction(entity: &mut Entity, direction: Direction, walls: &[Entity], powered_up: bool) -> bool {
    let prev_pos = entity.pos;
    let prev_direction = entity.direction;

    entity.direction = direction;
    entity.update_velocity(powered_up);
    entity.pos += entity.velocity;

    let blocked = hits_wall(entity, walls);
    entity.pos = prev_pos;

    if blocked {
        entity.direction = prev_direction;
        entity.update_velocity(powered_up);
        entity.flags.remove(EntityFlags::MOVING);
    } else {
        entity.flags.insert(EntityFlags::MOVING);
    }

    !blocked
}

/// Advances a moving entity by its velocity for one tick.
///
/// Returns `true` when the displacement hit a wall and was undone. The
/// caller decides what a hit means per role: adversaries are marked
/// non-moving to force a fresh policy decision, the player just stays put
/// with its direction unchanged. Entities without [`EntityFlags::MOVING`]
/// do not advance.
pub fn advance(entity: &mut Entity, walls: &[Entity]) -> bool {
    if !entity.flags.contains(EntityFlags::MOVING) {
        return false;
    }

    entity.pos += entity.velocity;
    if hits_wall(entity, walls) {
        entity.pos -= entity.velocity;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use glam::IVec2;

    fn wall(x: i32, y: i32) -> Entity {
        Entity::new(EntityKind::Wall, IVec2::new(x, y), IVec2::splat(32))
    }

    fn mover(x: i32, y: i32, speed: i32) -> Entity {
        let mut e = Entity::new(EntityKind::Player, IVec2::new(x, y), IVec2::splat(32));
        e.speed = speed;
        e
    }

    #[test]
    fn test_overlap_requires_padded_intersection() {
        let a = wall(0, 0);
        let b = wall(16, 0);
        assert!(overlaps(&a, &b));

        // Touching edges are inside the padding band.
        let c = wall(32, 0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_overlap_boundary_equality_is_non_overlap() {
        let a = wall(0, 0);
        let mut b = wall(0, 0);

        // One unit inside the inset boundary still intersects.
        b.pos = IVec2::new(27, 0);
        assert!(overlaps(&a, &b));

        // At x = 28, a's inset right edge and b's inset left edge are both
        // exactly 30: the open interval makes equality non-overlap.
        b.pos = IVec2::new(28, 0);
        assert_eq!(a.pos.x + a.size.x - COLLISION_PADDING, b.pos.x + COLLISION_PADDING);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_try_set_direction_accepts_open_path() {
        let walls = vec![wall(96, 64)];
        let mut e = mover(32, 64, 4);
        e.direction = Direction::Up;
        e.update_velocity(false);

        let committed = try_set_direction(&mut e, Direction::Right, &walls, false);

        assert!(committed);
        assert_eq!(e.direction, Direction::Right);
        // The probe displacement must not persist.
        assert_eq!(e.pos, IVec2::new(32, 64));
        assert!(e.flags.contains(EntityFlags::MOVING));
    }

    #[test]
    fn test_try_set_direction_rejection_restores_state() {
        let walls = vec![wall(64, 64)];
        let mut e = mover(32, 64, 4);
        e.direction = Direction::Up;
        e.update_velocity(false);
        let before_pos = e.pos;
        let before_velocity = e.velocity;

        let committed = try_set_direction(&mut e, Direction::Right, &walls, false);

        assert!(!committed);
        assert_eq!(e.pos, before_pos);
        assert_eq!(e.direction, Direction::Up);
        assert_eq!(e.velocity, before_velocity);
        assert!(!e.flags.contains(EntityFlags::MOVING));
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let walls = Vec::new();
        let mut e = mover(32, 64, 4);
        e.direction = Direction::Right;
        e.update_velocity(false);

        let hit = advance(&mut e, &walls);

        assert!(!hit);
        assert_eq!(e.pos, IVec2::new(36, 64));
    }

    #[test]
    fn test_advance_undoes_displacement_on_wall_hit() {
        let walls = vec![wall(64, 64)];
        let mut e = mover(34, 64, 4);
        e.direction = Direction::Right;
        e.update_velocity(false);

        let hit = advance(&mut e, &walls);

        assert!(hit);
        assert_eq!(e.pos, IVec2::new(34, 64));
    }

    #[test]
    fn test_advance_skips_non_moving_entities() {
        let walls = Vec::new();
        let mut e = mover(32, 64, 4);
        e.direction = Direction::Right;
        e.update_velocity(false);
        e.flags.remove(EntityFlags::MOVING);

        let hit = advance(&mut e, &walls);

        assert!(!hit);
        assert_eq!(e.pos, IVec2::new(32, 64));
    }
}

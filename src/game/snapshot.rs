//! Read-only per-tick view for external renderers.
//!
//! The core performs no drawing; it exposes everything a renderer needs
//! through one flat snapshot value built on demand.

use glam::IVec2;

use crate::entity::direction::Direction;
use crate::entity::{Entity, EntityFlags, EntityKind};
use crate::game::state::GameState;

/// One entity as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: IVec2,
    pub size: IVec2,
    pub direction: Direction,
    pub flags: EntityFlags,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            kind: entity.kind,
            pos: entity.pos,
            size: entity.size,
            direction: entity.direction,
            flags: entity.flags,
        }
    }
}

/// The full read-only frame state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: GameState,
    pub score: u32,
    pub lives: u32,
    pub tier: u32,
    /// Best score recorded for the current tier this session.
    pub high_score: u32,
    /// Remaining power-up ticks, zero when inactive.
    pub power_remaining: u32,
    /// Cursor index of the active menu, if any.
    pub cursor: usize,
    /// Every live entity, walls included, in draw-stable order.
    pub entities: Vec<EntityView>,
}

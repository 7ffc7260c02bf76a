//! Level state: static wall geometry plus the seeded dynamic entities.
//!
//! A [`Map`] value is one load of the fixed board layout. Reloading builds
//! a fresh value from the same seeds, which resets every dynamic entity
//! and clears previously spawned bonus items.

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::constants::{
    Difficulty, Tile, PELLET_INSET, PELLET_SIZE, POWER_ITEM_INSET, POWER_ITEM_SIZE, RAW_BOARD, TILE_SIZE,
};
use crate::entity::direction::Direction;
use crate::entity::{Entity, EntityFlags, EntityKind};
use crate::error::GameResult;
use crate::map::parser::{BoardParser, ParsedBoard};

pub mod parser;

/// Tests whether two positions are within one tile of each other on both
/// axes. Used for all spawn-placement occupancy checks.
fn near(a: IVec2, b: IVec2) -> bool {
    (a.x - b.x).abs() < TILE_SIZE && (a.y - b.y).abs() < TILE_SIZE
}

/// One loaded level: wall geometry and every live dynamic entity.
#[derive(Debug, Clone)]
pub struct Map {
    pub walls: Vec<Entity>,
    pub pellets: Vec<Entity>,
    /// Adversaries in board scan order; this is the fixed iteration order
    /// for policy evaluation and collision resolution.
    pub ghosts: Vec<Entity>,
    pub player: Entity,
    pub fruit: Option<Entity>,
    pub power_item: Option<Entity>,
    /// Sub-tile origins of every floor cell, for spawn placement.
    floor_cells: Vec<IVec2>,
}

impl Map {
    /// Parses the fixed board and builds a freshly seeded level.
    pub fn load(difficulty: &Difficulty, rng: &mut SmallRng) -> GameResult<Self> {
        let board = BoardParser::parse_board(RAW_BOARD)?;
        Ok(Self::from_board(&board, difficulty, rng))
    }

    /// Builds a freshly seeded level from an already parsed board.
    ///
    /// Entity speeds come from the difficulty parameters. The player is
    /// seeded standing still; it starts moving on its first accepted
    /// direction change.
    pub fn from_board(board: &ParsedBoard, difficulty: &Difficulty, rng: &mut SmallRng) -> Self {
        let mut walls = Vec::new();
        let mut pellets = Vec::new();
        let mut floor_cells = Vec::new();

        for (row, cols) in board.tiles.iter().enumerate() {
            for (col, tile) in cols.iter().enumerate() {
                let origin = IVec2::new(col as i32, row as i32) * TILE_SIZE;
                match tile {
                    Tile::Wall => {
                        walls.push(Entity::new(EntityKind::Wall, origin, IVec2::splat(TILE_SIZE)));
                    }
                    Tile::Floor => {
                        floor_cells.push(origin);
                        pellets.push(Entity::new(EntityKind::Pellet, origin + PELLET_INSET, PELLET_SIZE));
                    }
                    _ => {}
                }
            }
        }

        let ghosts = board
            .ghost_spawns
            .iter()
            .map(|(kind, cell)| {
                let mut ghost = Entity::new(EntityKind::Ghost(*kind), *cell * TILE_SIZE, IVec2::splat(TILE_SIZE));
                ghost.speed = difficulty.ghost_speed;
                ghost.update_velocity(false);
                ghost
            })
            .collect();

        let mut player = Entity::new(EntityKind::Player, board.player_spawn * TILE_SIZE, IVec2::splat(TILE_SIZE));
        player.speed = difficulty.player_speed;
        player.direction = Direction::Right;
        player.flags.remove(EntityFlags::MOVING);
        player.update_velocity(false);

        let mut map = Self {
            walls,
            pellets,
            ghosts,
            player,
            fruit: None,
            power_item: None,
            floor_cells,
        };
        map.place_initial_items(rng);
        map
    }

    /// Places the initial fruit and power item on floor cells away from
    /// every spawn point.
    ///
    /// With fewer than two qualifying cells the lower-priority item is
    /// simply omitted for this load.
    fn place_initial_items(&mut self, rng: &mut SmallRng) {
        let mut candidates: Vec<IVec2> = self
            .floor_cells
            .iter()
            .copied()
            .filter(|cell| !near(self.player.spawn, *cell) && !self.ghosts.iter().any(|g| near(g.spawn, *cell)))
            .collect();
        candidates.shuffle(rng);

        let mut candidates = candidates.into_iter();
        if let Some(cell) = candidates.next() {
            self.fruit = Some(Entity::new(EntityKind::Fruit, cell, IVec2::splat(TILE_SIZE)));
        }
        if let Some(cell) = candidates.next() {
            self.power_item = Some(Entity::new(EntityKind::PowerItem, cell + POWER_ITEM_INSET, POWER_ITEM_SIZE));
        }
    }

    /// Returns the floor cells currently available for a bonus spawn: no
    /// live pellet and no live fruit or power item within one tile.
    pub fn spawn_candidates(&self) -> Vec<IVec2> {
        self.floor_cells
            .iter()
            .copied()
            .filter(|cell| {
                !self.pellets.iter().any(|pellet| near(pellet.pos, *cell))
                    && !self.fruit.as_ref().is_some_and(|fruit| near(fruit.pos, *cell))
                    && !self.power_item.as_ref().is_some_and(|item| near(item.pos, *cell))
            })
            .collect()
    }

    /// Attempts to place a fruit on a random free floor cell.
    ///
    /// Returns `false` when no cell qualifies; that skips the spawn
    /// attempt, it is not an error.
    pub fn spawn_fruit(&mut self, rng: &mut SmallRng) -> bool {
        let candidates = self.spawn_candidates();
        let Some(cell) = pick(&candidates, rng) else {
            debug!("no free cell for fruit spawn");
            return false;
        };
        self.fruit = Some(Entity::new(EntityKind::Fruit, cell, IVec2::splat(TILE_SIZE)));
        true
    }

    /// Attempts to place a power item on a random free floor cell.
    pub fn spawn_power_item(&mut self, rng: &mut SmallRng) -> bool {
        let candidates = self.spawn_candidates();
        let Some(cell) = pick(&candidates, rng) else {
            debug!("no free cell for power item spawn");
            return false;
        };
        self.power_item = Some(Entity::new(EntityKind::PowerItem, cell + POWER_ITEM_INSET, POWER_ITEM_SIZE));
        true
    }
}

fn pick(candidates: &[IVec2], rng: &mut SmallRng) -> Option<IVec2> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn load(seed: u64) -> Map {
        let mut rng = SmallRng::seed_from_u64(seed);
        Map::load(&Difficulty::for_tier(1), &mut rng).unwrap()
    }

    #[test]
    fn test_load_seeds_all_entities() {
        let map = load(1);

        assert_eq!(map.ghosts.len(), 4);
        assert!(!map.walls.is_empty());
        assert!(!map.pellets.is_empty());
        // Every floor cell carries exactly one pellet.
        assert_eq!(map.pellets.len(), map.floor_cells.len());
        assert_eq!(map.player.speed, 4);
        assert!(map.ghosts.iter().all(|g| g.speed == 2));
    }

    #[test]
    fn test_player_seeded_standing_still() {
        let map = load(1);
        assert!(!map.player.flags.contains(EntityFlags::MOVING));
        assert_eq!(map.player.direction, Direction::Right);
    }

    #[test]
    fn test_load_is_idempotent() {
        let a = load(42);
        let b = load(42);

        assert_eq!(a.walls, b.walls);
        assert_eq!(a.pellets, b.pellets);
        assert_eq!(a.player, b.player);
        assert_eq!(a.fruit, b.fruit);
        assert_eq!(a.power_item, b.power_item);
    }

    #[test]
    fn test_initial_items_avoid_spawn_points() {
        for seed in 0..16 {
            let map = load(seed);
            let fruit_cell = map.fruit.as_ref().map(|f| f.pos);
            let power_cell = map.power_item.as_ref().map(|p| p.pos - POWER_ITEM_INSET);
            for cell in [fruit_cell, power_cell].into_iter().flatten() {
                assert!(!near(cell, map.player.spawn));
                for ghost in &map.ghosts {
                    assert!(!near(cell, ghost.spawn));
                }
            }
        }
    }

    #[test]
    fn test_spawn_candidates_blocked_by_pellets() {
        let mut map = load(1);
        // Every floor cell starts with a pellet in it or adjacent.
        assert!(map.spawn_candidates().is_empty());

        // Clearing all pellets frees the floor (minus the live items).
        map.pellets.clear();
        assert!(!map.spawn_candidates().is_empty());
    }

    #[test]
    fn test_spawn_fruit_uses_free_cell() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut map = load(5);
        map.pellets.clear();
        map.fruit = None;

        assert!(map.spawn_fruit(&mut rng));
        let fruit = map.fruit.as_ref().unwrap();
        assert_eq!(fruit.kind, EntityKind::Fruit);
        assert_eq!(fruit.pos % TILE_SIZE, IVec2::ZERO);
    }

    #[test]
    fn test_spawn_skipped_without_candidates() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut map = load(5);
        map.fruit = None;

        // All floor cells still hold pellets, so nothing qualifies.
        assert!(!map.spawn_fruit(&mut rng));
        assert!(map.fruit.is_none());
    }
}

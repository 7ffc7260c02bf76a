//! The game master: session state, the per-tick pipeline, and the
//! top-level state machine.
//!
//! All session state (score, lives, tiers, timers) is owned here and
//! mutated only through the transition functions in this module; the
//! resolver and the adversary policy report outcomes and never touch it.
//! Every per-tick operation is total: a tick always produces a defined
//! next state.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum::EnumCount;
use tracing::{debug, trace};

use crate::audio::{AudioService, Track};
use crate::constants::{
    Difficulty, DECISION_INTERVAL, FRUIT_SPAWN_CHANCE, FRUIT_SPAWN_THRESHOLD, GHOST_SCORE, LEVEL_INFO_DURATION,
    MAX_TIER, POWER_ITEM_SPAWN_CHANCE, POWER_ITEM_SPAWN_THRESHOLD, RAW_BOARD, STARTING_LIVES,
};
use crate::entity::ghost;
use crate::entity::{collision, EntityFlags, EntityKind};
use crate::error::GameResult;
use crate::events::GameCommand;
use crate::game::snapshot::{EntityView, Snapshot};
use crate::game::state::{
    GameOverOption, GameState, GameWinOption, LevelSelectOption, MainMenuOption, PauseOption,
};
use crate::game::timers::{PowerUp, SpawnWindow};
use crate::map::parser::{BoardParser, ParsedBoard};
use crate::map::Map;

pub mod snapshot;
pub mod state;
pub mod timers;

/// Builds a freshly seeded level and walks every adversary out of its
/// spawn so the board is immediately live.
fn seeded_map(board: &ParsedBoard, difficulty: &Difficulty, rng: &mut SmallRng) -> Map {
    let mut map = Map::from_board(board, difficulty, rng);
    let Map { ghosts, walls, .. } = &mut map;
    for ghost in ghosts.iter_mut() {
        ghost::reset_to_spawn(ghost, walls, rng);
    }
    map
}

/// The authoritative game simulation.
///
/// Drive it with [`Game::handle`] for decoded input intents and one
/// [`Game::tick`] per frame; read it back through [`Game::snapshot`].
pub struct Game {
    pub state: GameState,
    /// Cursor index scoped to whichever menu is active; reset to the top
    /// whenever a menu state is entered.
    pub cursor: usize,
    pub tier: u32,
    pub difficulty: Difficulty,
    pub score: u32,
    pub lives: u32,
    /// Best score per tier, session only. Holds an entry for every tier.
    pub high_scores: HashMap<u32, u32>,
    pub map: Map,
    pub power: PowerUp,
    pub fruit_window: SpawnWindow,
    pub power_window: SpawnWindow,
    pub level_info_remaining: u32,
    decision_counter: u32,
    exit: bool,
    board: ParsedBoard,
    rng: SmallRng,
    audio: Box<dyn AudioService>,
}

impl Game {
    pub fn new(audio: Box<dyn AudioService>) -> GameResult<Self> {
        Self::with_rng(audio, SmallRng::from_os_rng())
    }

    /// Creates a game with a caller-supplied RNG, giving deterministic
    /// adversary and spawn behavior for a fixed seed.
    pub fn with_rng(audio: Box<dyn AudioService>, rng: SmallRng) -> GameResult<Self> {
        let board = BoardParser::parse_board(RAW_BOARD)?;
        let tier = 1;
        let difficulty = Difficulty::for_tier(tier);
        let mut rng = rng;
        let mut audio = audio;

        let map = seeded_map(&board, &difficulty, &mut rng);
        audio.play_looping(Track::MainMenu);

        Ok(Self {
            state: GameState::MainMenu,
            cursor: 0,
            tier,
            difficulty,
            score: 0,
            lives: STARTING_LIVES,
            high_scores: (1..=MAX_TIER).map(|t| (t, 0)).collect(),
            map,
            power: PowerUp::default(),
            fruit_window: SpawnWindow::new(FRUIT_SPAWN_THRESHOLD, FRUIT_SPAWN_CHANCE),
            power_window: SpawnWindow::new(POWER_ITEM_SPAWN_THRESHOLD, POWER_ITEM_SPAWN_CHANCE),
            level_info_remaining: 0,
            decision_counter: 0,
            exit: false,
            board,
            rng,
            audio,
        })
    }

    /// Whether the terminal quit intent has been accepted.
    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    /// The best score recorded for the current tier this session.
    pub fn high_score(&self) -> u32 {
        self.high_scores.get(&self.tier).copied().unwrap_or(0)
    }

    /// Applies one decoded input intent.
    ///
    /// Intents with no mapping in the current state are ignored.
    pub fn handle(&mut self, cmd: GameCommand) {
        match self.state {
            GameState::MainMenu => self.handle_main_menu(cmd),
            GameState::LevelSelect => self.handle_level_select(cmd),
            GameState::LevelInfo => self.handle_level_info(cmd),
            GameState::Playing => self.handle_playing(cmd),
            GameState::Paused => self.handle_paused(cmd),
            GameState::GameOver => self.handle_game_over(cmd),
            GameState::GameWin => self.handle_game_win(cmd),
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Returns `true` once the quit intent has been accepted; the driver
    /// stops issuing ticks at that point.
    pub fn tick(&mut self) -> bool {
        match self.state {
            GameState::LevelInfo => {
                self.level_info_remaining = self.level_info_remaining.saturating_sub(1);
                if self.level_info_remaining == 0 {
                    self.begin_playing();
                }
            }
            GameState::Playing => self.playing_tick(),
            _ => {}
        }
        self.exit
    }

    /// Builds the read-only frame view for an external renderer.
    pub fn snapshot(&self) -> Snapshot {
        let mut entities: Vec<EntityView> =
            Vec::with_capacity(self.map.walls.len() + self.map.pellets.len() + self.map.ghosts.len() + 3);
        entities.extend(self.map.walls.iter().map(EntityView::from));
        entities.extend(self.map.pellets.iter().map(EntityView::from));
        entities.extend(self.map.fruit.iter().map(EntityView::from));
        entities.extend(self.map.power_item.iter().map(EntityView::from));
        entities.extend(self.map.ghosts.iter().map(EntityView::from));
        entities.push(EntityView::from(&self.map.player));

        Snapshot {
            state: self.state,
            score: self.score,
            lives: self.lives,
            tier: self.tier,
            high_score: self.high_score(),
            power_remaining: self.power.remaining(),
            cursor: self.cursor,
            entities,
        }
    }


    fn handle_main_menu(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::CursorUp => self.move_cursor(MainMenuOption::COUNT, -1),
            GameCommand::CursorDown => self.move_cursor(MainMenuOption::COUNT, 1),
            GameCommand::Confirm => match MainMenuOption::from_repr(self.cursor) {
                Some(MainMenuOption::StartGame) => self.start_session(),
                Some(MainMenuOption::LevelSelect) => {
                    self.state = GameState::LevelSelect;
                    self.cursor = 0;
                }
                Some(MainMenuOption::Quit) => self.quit(),
                None => {}
            },
            GameCommand::Quit => self.quit(),
            _ => self.ignore(cmd),
        }
    }

    fn handle_level_select(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::CursorUp => self.move_cursor(LevelSelectOption::COUNT, -1),
            GameCommand::CursorDown => self.move_cursor(LevelSelectOption::COUNT, 1),
            GameCommand::Confirm => {
                if let Some(option) = LevelSelectOption::from_repr(self.cursor) {
                    if let Some(tier) = option.tier() {
                        self.set_tier(tier);
                    }
                    self.state = GameState::MainMenu;
                    self.cursor = 0;
                }
            }
            GameCommand::Cancel => {
                self.state = GameState::MainMenu;
                self.cursor = 0;
            }
            GameCommand::Quit => self.quit(),
            _ => self.ignore(cmd),
        }
    }

    fn handle_level_info(&mut self, cmd: GameCommand) {
        // The informational pause ends on any input except cancel.
        if cmd == GameCommand::Cancel {
            self.ignore(cmd);
        } else {
            self.begin_playing();
        }
    }

    fn handle_playing(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::SetDirection(direction) => {
                let powered = self.power.is_active();
                let Map { player, walls, .. } = &mut self.map;
                collision::try_set_direction(player, direction, walls, powered);
            }
            GameCommand::TogglePause => {
                self.state = GameState::Paused;
                self.cursor = 0;
            }
            _ => self.ignore(cmd),
        }
    }

    fn handle_paused(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::CursorUp => self.move_cursor(PauseOption::COUNT, -1),
            GameCommand::CursorDown => self.move_cursor(PauseOption::COUNT, 1),
            GameCommand::Confirm => match PauseOption::from_repr(self.cursor) {
                Some(PauseOption::Resume) => self.state = GameState::Playing,
                Some(PauseOption::Restart) => self.restart_session(),
                Some(PauseOption::MainMenu) => self.to_main_menu(),
                Some(PauseOption::Quit) => self.quit(),
                None => {}
            },
            GameCommand::Cancel | GameCommand::TogglePause => self.state = GameState::Playing,
            GameCommand::Quit => self.quit(),
            _ => self.ignore(cmd),
        }
    }

    fn handle_game_over(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::CursorUp => self.move_cursor(GameOverOption::COUNT, -1),
            GameCommand::CursorDown => self.move_cursor(GameOverOption::COUNT, 1),
            GameCommand::Confirm => match GameOverOption::from_repr(self.cursor) {
                Some(GameOverOption::Restart) => {
                    self.restart_session();
                    self.audio.play_looping(Track::InGame);
                }
                Some(GameOverOption::MainMenu) => self.to_main_menu(),
                Some(GameOverOption::Quit) => self.quit(),
                None => {}
            },
            GameCommand::Quit => self.quit(),
            _ => self.ignore(cmd),
        }
    }

    fn handle_game_win(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::CursorUp => self.move_cursor(GameWinOption::COUNT, -1),
            GameCommand::CursorDown => self.move_cursor(GameWinOption::COUNT, 1),
            GameCommand::Confirm => match GameWinOption::from_repr(self.cursor) {
                Some(GameWinOption::NextLevel) => {
                    if self.tier < MAX_TIER {
                        self.advance_tier();
                    } else {
                        self.to_main_menu();
                    }
                }
                Some(GameWinOption::MainMenu) => self.to_main_menu(),
                Some(GameWinOption::Quit) => self.quit(),
                None => {}
            },
            GameCommand::Quit => self.quit(),
            _ => self.ignore(cmd),
        }
    }


    fn move_cursor(&mut self, len: usize, delta: i32) {
        self.cursor = (self.cursor as i32 + delta).rem_euclid(len as i32) as usize;
    }

    fn ignore(&self, cmd: GameCommand) {
        trace!(state = %self.state, ?cmd, "intent has no mapping in this state");
    }

    fn quit(&mut self) {
        debug!("quit accepted");
        self.audio.stop_all();
        self.exit = true;
    }

    fn to_main_menu(&mut self) {
        self.state = GameState::MainMenu;
        self.cursor = 0;
        self.audio.play_looping(Track::MainMenu);
    }

    fn begin_playing(&mut self) {
        self.state = GameState::Playing;
        self.audio.play_looping(Track::InGame);
    }

    fn show_level_info(&mut self) {
        self.state = GameState::LevelInfo;
        self.level_info_remaining = LEVEL_INFO_DURATION;
    }

    /// Fresh session at the current tier, ending in the pre-level pause.
    fn start_session(&mut self) {
        debug!(tier = self.tier, "starting session");
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.reload_level();
        self.show_level_info();
    }

    /// Fresh session at the current tier, straight into play.
    fn restart_session(&mut self) {
        debug!(tier = self.tier, "restarting session");
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.reload_level();
        self.state = GameState::Playing;
    }

    /// Applies a tier's difficulty parameters to the session and to every
    /// live entity.
    fn set_tier(&mut self, tier: u32) {
        debug!(tier, "tier selected");
        self.tier = tier;
        self.difficulty = Difficulty::for_tier(tier);

        self.map.player.speed = self.difficulty.player_speed;
        self.map.player.update_velocity(self.power.is_active());
        for ghost in &mut self.map.ghosts {
            ghost.speed = self.difficulty.ghost_speed;
            ghost.update_velocity(false);
        }
    }

    fn advance_tier(&mut self) {
        self.set_tier(self.tier + 1);
        self.reload_level();
        self.show_level_info();
    }

    /// Reloads the current tier: fresh seeds, adversaries walked out of
    /// their spawns, power-up cleared. Spawn windows keep counting.
    fn reload_level(&mut self) {
        self.map = seeded_map(&self.board, &self.difficulty, &mut self.rng);
        self.power.clear();
    }

    /// Returns every entity to its spawn after a lost life. The player
    /// stands still until its next accepted direction change.
    fn reset_positions(&mut self) {
        self.power.clear();
        let Map { ghosts, walls, player, .. } = &mut self.map;
        player.reset();
        player.flags.remove(EntityFlags::MOVING);
        for ghost in ghosts.iter_mut() {
            ghost::reset_to_spawn(ghost, walls, &mut self.rng);
        }
    }

    fn activate_power_up(&mut self) {
        debug!("power-up active");
        self.power.activate();
        for ghost in &mut self.map.ghosts {
            ghost.flags.insert(EntityFlags::SCARED);
            ghost.flags.remove(EntityFlags::FROZEN);
            ghost.update_velocity(false);
        }
        self.map.player.update_velocity(true);
    }

    fn enter_game_over(&mut self) {
        debug!(score = self.score, "game over");
        self.state = GameState::GameOver;
        self.cursor = 0;
        self.audio.stop_all();
    }

    fn enter_game_win(&mut self) {
        debug!(score = self.score, "all tiers cleared");
        self.state = GameState::GameWin;
        self.cursor = 0;
        self.audio.stop_all();
    }

    /// Adds points and keeps the current tier's high score in step.
    fn award(&mut self, points: u32) {
        self.score += points;
        let best = self.high_scores.entry(self.tier).or_insert(0);
        if self.score > *best {
            *best = self.score;
        }
    }


    fn playing_tick(&mut self) {
        // Power-up countdown; on expiry every adversary calms down and the
        // player loses its speed bonus.
        if self.power.tick() {
            debug!("power-up expired");
            for ghost in &mut self.map.ghosts {
                ghost.flags.remove(EntityFlags::SCARED | EntityFlags::FROZEN);
                ghost.update_velocity(false);
            }
            self.map.player.update_velocity(false);
        }

        // Chance-based bonus spawns. The windows only reset once an item
        // was actually placed.
        if self.fruit_window.tick(self.map.fruit.is_none(), &mut self.rng) && self.map.spawn_fruit(&mut self.rng) {
            self.fruit_window.confirm();
        }
        if self.power_window.tick(self.map.power_item.is_none(), &mut self.rng)
            && self.map.spawn_power_item(&mut self.rng)
        {
            self.power_window.confirm();
        }

        // Player displacement; a wall hit means standing still this tick.
        collision::advance(&mut self.map.player, &self.map.walls);

        // Adversaries, in board scan order. The order is load-fixed so
        // simultaneous collision ties resolve deterministically.
        self.decision_counter += 1;
        let mut bonus = 0u32;
        let mut life_lost = false;
        {
            let Map { ghosts, walls, player, .. } = &mut self.map;
            for ghost in ghosts.iter_mut() {
                if ghost.flags.contains(EntityFlags::FROZEN) {
                    continue;
                }

                if self.decision_counter % DECISION_INTERVAL == 0 || !ghost.flags.contains(EntityFlags::MOVING) {
                    ghost::decide(ghost, player, walls, &self.difficulty, &mut self.rng);
                }

                if collision::advance(ghost, walls) {
                    ghost.flags.remove(EntityFlags::MOVING);
                }

                if collision::overlaps(ghost, player) {
                    if self.power.is_active() && ghost.flags.contains(EntityFlags::SCARED) {
                        ghost::reset_to_spawn(ghost, walls, &mut self.rng);
                        bonus += GHOST_SCORE;
                    } else if !self.power.is_active() {
                        life_lost = true;
                        break;
                    }
                }
            }
        }

        if bonus > 0 {
            self.award(bonus);
        }
        if life_lost {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.enter_game_over();
                return;
            }
            debug!(lives = self.lives, "life lost");
            self.reset_positions();
        }

        // Pellets; each overlap scores and removes exactly that pellet.
        let mut pellet_points = 0u32;
        {
            let Map { pellets, player, .. } = &mut self.map;
            pellets.retain(|pellet| {
                if collision::overlaps(player, pellet) {
                    pellet_points += pellet.kind.score_value();
                    false
                } else {
                    true
                }
            });
        }
        if pellet_points > 0 {
            self.award(pellet_points);
        }

        // Power item and fruit are singleton-or-absent.
        let grabbed_power = self
            .map
            .power_item
            .as_ref()
            .is_some_and(|item| collision::overlaps(&self.map.player, item));
        if grabbed_power {
            self.map.power_item = None;
            self.award(EntityKind::PowerItem.score_value());
            self.activate_power_up();
        }

        let grabbed_fruit = self
            .map
            .fruit
            .as_ref()
            .is_some_and(|fruit| collision::overlaps(&self.map.player, fruit));
        if grabbed_fruit {
            self.map.fruit = None;
            self.award(EntityKind::Fruit.score_value());
        }

        // Level exhaustion: nothing left to clear.
        if self.map.pellets.is_empty() && self.map.power_item.is_none() {
            if self.tier < MAX_TIER {
                debug!(tier = self.tier, "tier cleared");
                self.advance_tier();
            } else {
                self.enter_game_win();
            }
        }
    }
}

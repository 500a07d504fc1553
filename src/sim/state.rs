//! Game state and core simulation types
//!
//! Everything the tick function mutates lives here. The state owns its RNG so
//! a run is fully reproducible from the seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with the ingredient legend
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// The five kinds of falling ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    FrogEye,
    Mushroom,
    Rock,
    Slime,
    Potion,
}

impl ItemKind {
    /// Good ingredients build the combo when caught
    pub fn is_good(&self) -> bool {
        matches!(self, ItemKind::FrogEye | ItemKind::Mushroom)
    }

    /// Bad ingredients cost vitality and break the combo
    pub fn is_bad(&self) -> bool {
        matches!(self, ItemKind::Rock | ItemKind::Slime)
    }
}

/// Domain events emitted by the simulation during a tick
///
/// The driver drains these to fire audio cues and music transitions; the sim
/// itself never talks to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An item landed in the cauldron
    Caught(ItemKind),
    /// Dash accepted this tick
    DashUsed,
    /// Vitality hit zero
    GameOver,
    /// A fresh run replaced a finished one
    RunRestarted,
}

/// A falling ingredient
#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick, fixed at spawn
    pub fall_speed: f32,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ITEM_SIZE, ITEM_SIZE)
    }
}

/// The player's cauldron
#[derive(Debug, Clone)]
pub struct Cauldron {
    /// Top-left corner; only x ever changes
    pub pos: Vec2,
}

impl Default for Cauldron {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CAULDRON_START_X, CAULDRON_Y),
        }
    }
}

impl Cauldron {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CAULDRON_WIDTH, CAULDRON_HEIGHT)
    }

    /// Keep the cauldron fully on-screen, whatever moved it
    pub fn clamp_to_playfield(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, PLAYFIELD_WIDTH - CAULDRON_WIDTH);
    }
}

/// Complete game state (deterministic given the seed and the input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG owned by the run; all draws go through here
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Player cauldron
    pub cauldron: Cauldron,
    /// Falling items, in spawn order
    pub items: Vec<Item>,
    /// Score for the current run
    pub score: u64,
    /// Best score seen this session; never decreases, survives restarts
    pub high_score: u64,
    /// Remaining hit points; zero ends the run
    pub vitality: u8,
    /// Consecutive-catch counter; scales good-catch scoring
    pub combo: u32,
    /// Highest combo reached this run
    pub best_combo: u32,
    /// Ticks until dash is ready again (0 = ready)
    pub dash_cooldown: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            cauldron: Cauldron::default(),
            items: Vec::new(),
            score: 0,
            high_score: 0,
            vitality: STARTING_VITALITY,
            combo: 0,
            best_combo: 0,
            dash_cooldown: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Hand the accumulated events to the driver
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

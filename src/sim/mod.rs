//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::try_spawn;
pub use state::{Cauldron, GameEvent, GamePhase, GameState, Item, ItemKind};
pub use tick::{TickInput, tick};

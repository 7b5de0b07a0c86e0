//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-coupled: one `tick` per display refresh
//! - Seeded RNG only
//! - Stable iteration order (ball list order, grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod grid;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use effects::PaddleShake;
pub use grid::generate_blocks;
pub use state::{
    Ball, Block, BlockStatus, GameEvent, GamePhase, GameState, Hud, Outcome, Paddle,
    PaddleDirection, Playfield,
};
pub use tick::{TickInput, tick};

//! Breakout of Time - a ball-and-paddle game against the clock
//!
//! Core modules:
//! - `sim`: Frame-coupled simulation (physics, collisions, level progression)
//! - `renderer`: Stateless draw pass over a `Surface`
//! - `game`: Loop scheduler wiring input and presentation to the simulation
//! - `config`: Tunable layout and balance, loadable from JSON
//! - `ui`: Overlay messages and a logging presenter

pub mod config;
pub mod game;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{BlockLayout, ConfigError, GameConfig, PaddleLabelFit};
pub use game::{FrameStatus, Game, InputEvent, InputSource, Presenter};

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Default surface dimensions
    pub const SURFACE_WIDTH: f32 = 1280.0;
    pub const SURFACE_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the surface bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_X: f32 = 5.0;
    pub const BALL_SPEED_Y: f32 = -5.0;
    /// Docked ball sits this far above the paddle's top edge
    pub const BALL_DOCK_GAP: f32 = 10.0;

    /// Block grid defaults
    pub const BLOCK_COLS: u32 = 8;
    pub const BLOCK_ROWS: u32 = 4;
    pub const BLOCK_WIDTH: f32 = 100.0;
    pub const BLOCK_HEIGHT: f32 = 30.0;
    pub const BLOCK_PADDING: f32 = 20.0;
    pub const BLOCK_OFFSET_TOP: f32 = 100.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 30.0;

    /// Run defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const STARTING_TIME: f32 = 30.0;
    /// Seconds drained from the clock per frame (~60 Hz)
    pub const TIME_PER_FRAME: f32 = 0.016;
    pub const BLOCK_TIME_BONUS: f32 = 1.0;
    pub const MAX_LEVELS: u32 = 3;

    /// Multiball defaults
    pub const MULTIBALL_CHANCE: f32 = 0.2;
    pub const MULTIBALL_OFFSET_X: f32 = 10.0;
    pub const MULTIBALL_OFFSET_Y: f32 = -10.0;

    /// Level transition countdown: steps shown, frames per step (1 s at 60 Hz)
    pub const COUNTDOWN_STEPS: u32 = 4;
    pub const COUNTDOWN_STEP_TICKS: u32 = 60;

    /// Paddle shake jitter in pixels and its lifetime (~60 ms)
    pub const SHAKE_OFFSET: f32 = 2.0;
    pub const SHAKE_TICKS: u32 = 4;

    /// Horizontal padding around the paddle's time label in grow-to-fit mode
    pub const LABEL_PADDING: f32 = 16.0;
}

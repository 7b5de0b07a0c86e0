//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`. Physics and level
//! functions take it by `&mut`; renderers and HUDs take it by `&`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::PaddleShake;
use super::grid::generate_blocks;
use crate::config::{ConfigError, GameConfig};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (balls may still be docked)
    Playing,
    /// Paused countdown between levels
    LevelTransition {
        /// Countdown value currently shown (counts down to 1)
        remaining: u32,
        /// Ticks until the next countdown step
        step_ticks: u32,
    },
    /// Run is over; nothing simulates until a new state is built
    Ended(Outcome),
}

/// Paddle movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleDirection {
    Left,
    Right,
}

/// Dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per move
    pub speed: f32,
}

impl Paddle {
    /// Centered horizontally, `bottom_offset` above the surface bottom
    pub fn new(config: &GameConfig, field: Playfield) -> Self {
        let mut paddle = Self {
            pos: Vec2::new(
                field.width / 2.0 - config.paddle_width / 2.0,
                field.height - config.paddle_bottom_offset,
            ),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        };
        paddle.clamp_to(field.width);
        paddle
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Move one step in `dir`, staying within `[0, field_width - width]`
    pub fn nudge(&mut self, dir: PaddleDirection, field_width: f32) {
        match dir {
            PaddleDirection::Left => self.pos.x -= self.speed,
            PaddleDirection::Right => self.pos.x += self.speed,
        }
        self.clamp_to(field_width);
    }

    /// Restore the position invariant (also after a resize)
    pub fn clamp_to(&mut self, field_width: f32) {
        // A paddle wider than the field pins to the left edge
        let max_x = (field_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// False while docked on the paddle
    pub moving: bool,
}

impl Ball {
    /// A fresh ball docked above the paddle's center
    pub fn docked(id: u32, paddle: &Paddle, config: &GameConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(paddle.center_x(), paddle.pos.y - config.ball_dock_gap),
            vel: Vec2::new(config.ball_speed_x, config.ball_speed_y),
            radius: config.ball_radius,
            moving: false,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Block status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockStatus {
    #[default]
    Active,
    Destroyed,
}

/// A block entity (destroyed blocks stay in place, inert)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BlockStatus,
}

impl Block {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            status: BlockStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BlockStatus::Active
    }

    /// Mark destroyed; returns false if it already was
    pub fn destroy(&mut self) -> bool {
        if self.is_active() {
            self.status = BlockStatus::Destroyed;
            true
        } else {
            false
        }
    }
}

/// Things that happened during a tick, drained by the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { ball_id: u32 },
    BlockDestroyed { index: usize },
    BallLost { ball_id: u32 },
    LifeLost { lives: u8 },
    MultiballSpawned { ball_id: u32 },
    /// `level` is the level just cleared
    LevelCleared { level: u32 },
    CountdownStep { remaining: u32 },
    LevelStarted { level: u32 },
    RunEnded(Outcome),
}

/// Read-only snapshot for HUD/overlay layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// 0-based level index
    pub level: u32,
    pub max_levels: u32,
    pub lives: u8,
    pub time_left: f32,
    /// Whole seconds shown on the paddle
    pub seconds: u32,
    pub phase: GamePhase,
    pub balls: usize,
    pub blocks_left: usize,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Playfield,
    pub paddle: Paddle,
    /// Ordered; index 0 is normally the template ball
    pub balls: Vec<Ball>,
    /// Grid order, stable for the whole level
    pub blocks: Vec<Block>,
    pub lives: u8,
    /// Seconds; may dip below zero on the frame the run ends
    pub time_left: f32,
    /// 0-based
    pub level: u32,
    /// One-shot latch, reset every level
    pub multiball_triggered: bool,
    pub phase: GamePhase,
    /// Active cosmetic jitter, if any
    pub shake: Option<PaddleShake>,
    /// Ticks simulated while Playing
    pub time_ticks: u64,
    /// Ball that multiball spawns copy
    pub template_ball_id: u32,
    /// Pending events for the presenter
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a run at level 0 with one docked ball
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let field = Playfield {
            width: config.surface_width,
            height: config.surface_height,
        };
        let paddle = Paddle::new(&config, field);
        let blocks = generate_blocks(&config, field.width);

        let mut state = Self {
            lives: config.starting_lives,
            time_left: config.starting_time,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            paddle,
            balls: Vec::new(),
            blocks,
            level: 0,
            multiball_triggered: false,
            phase: GamePhase::Playing,
            shake: None,
            time_ticks: 0,
            template_ball_id: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_ball();

        log::info!(
            "New run: seed={} blocks={} lives={} time={}s",
            seed,
            state.blocks.len(),
            state.lives,
            state.time_left
        );
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-anchor the paddle to the current surface and replace the ball
    /// collection with one fresh docked ball
    pub fn reset_ball(&mut self) {
        self.paddle.pos.y = self.field.height - self.config.paddle_bottom_offset;
        self.paddle.clamp_to(self.field.width);

        let id = self.next_entity_id();
        let ball = Ball::docked(id, &self.paddle, &self.config);
        self.template_ball_id = id;
        self.balls.clear();
        self.balls.push(ball);
    }

    /// Nudge the paddle (ignored once the run has ended)
    pub fn move_paddle(&mut self, dir: PaddleDirection) {
        if self.is_ended() {
            return;
        }
        self.paddle.nudge(dir, self.field.width);
    }

    /// Release every docked ball
    pub fn launch_balls(&mut self) {
        if self.is_ended() {
            return;
        }
        for ball in &mut self.balls {
            ball.moving = true;
        }
    }

    /// Surface size changed. Layout follows at the next reset; the paddle is
    /// re-clamped right away.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.field = Playfield { width, height };
        self.paddle.clamp_to(width);
    }

    /// Paused = not simulating (countdown or ended)
    pub fn is_paused(&self) -> bool {
        !matches!(self.phase, GamePhase::Playing)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_active()).count()
    }

    /// Whole seconds left, never negative
    pub fn seconds_left(&self) -> u32 {
        self.time_left.max(0.0).floor() as u32
    }

    /// Paddle x as drawn (logical x plus any shake jitter)
    pub fn paddle_draw_x(&self) -> f32 {
        self.paddle.pos.x + self.shake.map(|s| s.offset).unwrap_or(0.0)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.level,
            max_levels: self.config.max_levels,
            lives: self.lives,
            time_left: self.time_left,
            seconds: self.seconds_left(),
            phase: self.phase,
            balls: self.balls.len(),
            blocks_left: self.active_blocks(),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(GameConfig::seeded(12345)).unwrap()
    }

    #[test]
    fn test_new_run_defaults() {
        let state = state();
        assert_eq!(state.lives, 3);
        assert_eq!(state.time_left, 30.0);
        assert_eq!(state.level, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.multiball_triggered);
        assert_eq!(state.balls.len(), 1);
        assert!(!state.balls[0].moving);
        assert_eq!(state.blocks.len(), 32);
        assert!(state.blocks.iter().all(Block::is_active));
    }

    #[test]
    fn test_docked_ball_sits_on_paddle_center() {
        let state = state();
        let ball = &state.balls[0];
        assert_eq!(ball.pos.x, state.paddle.center_x());
        assert_eq!(ball.pos.y, state.paddle.pos.y - 10.0);
        assert_eq!(state.template_ball_id, ball.id);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            block_cols: 0,
            ..GameConfig::seeded(1)
        };
        assert!(GameState::new(config).is_err());
    }

    #[test]
    fn test_launch_releases_docked_balls() {
        let mut state = state();
        state.launch_balls();
        assert!(state.balls.iter().all(|b| b.moving));
    }

    #[test]
    fn test_block_destroy_is_one_shot() {
        let mut block = Block::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(block.destroy());
        assert!(!block.destroy());
        assert_eq!(block.status, BlockStatus::Destroyed);
    }

    #[test]
    fn test_resize_clamps_paddle_and_rejects_garbage() {
        let mut state = state();
        for _ in 0..200 {
            state.move_paddle(PaddleDirection::Right);
        }
        state.resize(400.0, 300.0);
        assert_eq!(state.paddle.pos.x, 400.0 - state.paddle.width);

        state.resize(-5.0, 300.0);
        assert_eq!(state.field.width, 400.0);
    }

    #[test]
    fn test_inputs_ignored_after_end() {
        let mut state = state();
        state.phase = GamePhase::Ended(Outcome::Lost);
        let x = state.paddle.pos.x;
        state.move_paddle(PaddleDirection::Left);
        state.launch_balls();
        assert_eq!(state.paddle.pos.x, x);
        assert!(!state.balls[0].moving);
    }

    #[test]
    fn test_seconds_left_floors_and_saturates() {
        let mut state = state();
        state.time_left = 12.9;
        assert_eq!(state.seconds_left(), 12);
        state.time_left = -0.5;
        assert_eq!(state.seconds_left(), 0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(
            moves in prop::collection::vec(any::<bool>(), 0..400),
            width in 130.0f32..2000.0,
        ) {
            let mut state = state();
            state.resize(width, 720.0);
            for right in moves {
                let dir = if right { PaddleDirection::Right } else { PaddleDirection::Left };
                state.move_paddle(dir);
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x <= width - state.paddle.width);
            }
        }
    }
}

//! Game configuration
//!
//! Layout, balance and variant switches. Everything here is validated once at
//! setup; the simulation never sees an out-of-range value.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal placement of the block grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockLayout {
    /// Grid centered on the surface
    #[default]
    Centered,
    /// Grid starts at a fixed left offset
    LeftAligned,
}

impl BlockLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockLayout::Centered => "centered",
            BlockLayout::LeftAligned => "left_aligned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "centered" | "center" => Some(BlockLayout::Centered),
            "left_aligned" | "left-aligned" | "left" => Some(BlockLayout::LeftAligned),
            _ => None,
        }
    }
}

/// How the paddle box relates to its time label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaddleLabelFit {
    /// Box is always the paddle's width
    #[default]
    Fixed,
    /// Box grows to fit the label (drawing only, collision uses the paddle width)
    GrowToFit,
}

impl PaddleLabelFit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleLabelFit::Fixed => "fixed",
            PaddleLabelFit::GrowToFit => "grow_to_fit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(PaddleLabelFit::Fixed),
            "grow_to_fit" | "grow-to-fit" | "grow" => Some(PaddleLabelFit::GrowToFit),
            _ => None,
        }
    }
}

/// Errors raised while building or loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// A size or speed that must be strictly positive was not
    NonPositive { field: &'static str, value: f32 },
    /// An offset or padding that must not be negative was
    Negative { field: &'static str, value: f32 },
    /// Grid has no columns or no rows
    EmptyGrid { cols: u32, rows: u32 },
    /// Multiball chance outside [0, 1]
    InvalidProbability(f32),
    /// A run needs at least one level
    NoLevels,
    /// A run needs at least one life
    NoLives,
    /// Countdown needs at least one step and one tick per step
    InvalidCountdown { steps: u32, step_ticks: u32 },
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// Config file could not be read
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::EmptyGrid { cols, rows } => {
                write!(f, "block grid must be non-empty, got {cols}x{rows}")
            }
            ConfigError::InvalidProbability(p) => {
                write!(f, "multiball_chance must be within [0, 1], got {p}")
            }
            ConfigError::NoLevels => write!(f, "max_levels must be at least 1"),
            ConfigError::NoLives => write!(f, "starting_lives must be at least 1"),
            ConfigError::InvalidCountdown { steps, step_ticks } => write!(
                f,
                "countdown needs at least one step of at least one tick, got {steps} x {step_ticks}"
            ),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels moved per `move_paddle` call
    pub paddle_speed: f32,
    /// Gap between the surface bottom and the paddle's top edge
    pub paddle_bottom_offset: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch velocity in pixels per frame
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    pub ball_dock_gap: f32,

    // === Blocks ===
    pub block_cols: u32,
    pub block_rows: u32,
    pub block_width: f32,
    pub block_height: f32,
    pub block_padding: f32,
    pub block_offset_top: f32,
    /// Only used by `BlockLayout::LeftAligned`
    pub block_offset_left: f32,
    pub block_layout: BlockLayout,

    // === Run ===
    pub starting_lives: u8,
    pub starting_time: f32,
    pub time_per_frame: f32,
    pub block_time_bonus: f32,
    pub max_levels: u32,

    // === Multiball ===
    pub multiball_chance: f32,
    pub multiball_offset_x: f32,
    pub multiball_offset_y: f32,

    // === Level transition ===
    pub countdown_steps: u32,
    pub countdown_step_ticks: u32,

    // === Cosmetics ===
    pub shake_offset: f32,
    pub shake_ticks: u32,
    pub paddle_label_fit: PaddleLabelFit,
    pub label_padding: f32,

    /// RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,
            ball_dock_gap: BALL_DOCK_GAP,

            block_cols: BLOCK_COLS,
            block_rows: BLOCK_ROWS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_padding: BLOCK_PADDING,
            block_offset_top: BLOCK_OFFSET_TOP,
            block_offset_left: BLOCK_OFFSET_LEFT,
            block_layout: BlockLayout::Centered,

            starting_lives: STARTING_LIVES,
            starting_time: STARTING_TIME,
            time_per_frame: TIME_PER_FRAME,
            block_time_bonus: BLOCK_TIME_BONUS,
            max_levels: MAX_LEVELS,

            multiball_chance: MULTIBALL_CHANCE,
            multiball_offset_x: MULTIBALL_OFFSET_X,
            multiball_offset_y: MULTIBALL_OFFSET_Y,

            countdown_steps: COUNTDOWN_STEPS,
            countdown_step_ticks: COUNTDOWN_STEP_TICKS,

            shake_offset: SHAKE_OFFSET,
            shake_ticks: SHAKE_TICKS,
            paddle_label_fit: PaddleLabelFit::Fixed,
            label_padding: LABEL_PADDING,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Default config with a fixed seed (tests, replays)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check every field the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("starting_time", self.starting_time),
            ("time_per_frame", self.time_per_frame),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("block_padding", self.block_padding),
            ("block_offset_top", self.block_offset_top),
            ("block_offset_left", self.block_offset_left),
            ("block_time_bonus", self.block_time_bonus),
            ("ball_dock_gap", self.ball_dock_gap),
            ("paddle_bottom_offset", self.paddle_bottom_offset),
            ("label_padding", self.label_padding),
            ("shake_offset", self.shake_offset),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.block_cols == 0 || self.block_rows == 0 {
            return Err(ConfigError::EmptyGrid {
                cols: self.block_cols,
                rows: self.block_rows,
            });
        }
        if !(0.0..=1.0).contains(&self.multiball_chance) {
            return Err(ConfigError::InvalidProbability(self.multiball_chance));
        }
        if self.max_levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.countdown_steps == 0 || self.countdown_step_ticks == 0 {
            return Err(ConfigError::InvalidCountdown {
                steps: self.countdown_steps,
                step_ticks: self.countdown_step_ticks,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            GameConfig::from_json(r#"{ "block_layout": "left_aligned", "seed": 7 }"#).unwrap();
        assert_eq!(config.block_layout, BlockLayout::LeftAligned);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.block_cols, BLOCK_COLS);
        assert_eq!(config.paddle_label_fit, PaddleLabelFit::Fixed);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig {
            block_rows: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { cols: 8, rows: 0 })
        ));
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let config = GameConfig {
            block_width: -100.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "block_width",
                ..
            })
        ));

        let config = GameConfig {
            block_padding: -1.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "block_padding",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_probability_and_counts() {
        let config = GameConfig {
            multiball_chance: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability(_))
        ));

        let config = GameConfig {
            max_levels: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLevels)));

        let config = GameConfig {
            starting_lives: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLives)));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_variant_names_parse() {
        assert_eq!(BlockLayout::from_str("LEFT"), Some(BlockLayout::LeftAligned));
        assert_eq!(BlockLayout::from_str("diagonal"), None);
        assert_eq!(
            PaddleLabelFit::from_str("grow-to-fit"),
            Some(PaddleLabelFit::GrowToFit)
        );
        assert_eq!(PaddleLabelFit::GrowToFit.as_str(), "grow_to_fit");
    }
}

//! Rendering module
//!
//! `render_frame` is a stateless draw pass over any `Surface`. The web build
//! backs `Surface` with a canvas 2D context; headless runs and tests record
//! into a `DrawList`.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::config::PaddleLabelFit;
use crate::sim::GameState;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Font used for the paddle label and lives indicator
pub const FONT: &str = "16px monospace";
/// One glyph per remaining life
pub const LIFE_GLYPH: char = '♥';
/// Baseline of the lives indicator
pub const LIVES_POS: Vec2 = Vec2::new(20.0, 30.0);
/// Label baseline below the paddle's top edge
const LABEL_BASELINE: f32 = 20.0;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A 2D drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// `pos` is the baseline anchor
    fn fill_text(&mut self, text: &str, pos: Vec2, align: TextAlign, color: Color);
    /// Rendered width of `text` in `FONT`
    fn measure_text(&self, text: &str) -> f32;
}

/// Paddle time label, e.g. `"27s"`
pub fn paddle_label(state: &GameState) -> String {
    format!("{}s", state.seconds_left())
}

/// Width of the drawn paddle box for the configured label fit
pub fn paddle_box_width(state: &GameState, label_width: f32) -> f32 {
    match state.config.paddle_label_fit {
        PaddleLabelFit::Fixed => state.paddle.width,
        PaddleLabelFit::GrowToFit => state
            .paddle
            .width
            .max(label_width + 2.0 * state.config.label_padding),
    }
}

/// Draw one frame of `state`
pub fn render_frame(surface: &mut impl Surface, state: &GameState) {
    surface.clear();
    draw_paddle(surface, state);
    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, BLACK);
    }
    for block in state.blocks.iter().filter(|b| b.is_active()) {
        surface.fill_rect(block.pos, block.size, BLACK);
    }
    draw_lives(surface, state);
}

fn draw_paddle(surface: &mut impl Surface, state: &GameState) {
    let label = paddle_label(state);
    let width = paddle_box_width(state, surface.measure_text(&label));
    let pos = Vec2::new(state.paddle_draw_x(), state.paddle.pos.y);

    surface.fill_rect(pos, Vec2::new(width, state.paddle.height), BLACK);
    surface.fill_text(
        &label,
        pos + Vec2::new(width / 2.0, LABEL_BASELINE),
        TextAlign::Center,
        WHITE,
    );
}

fn draw_lives(surface: &mut impl Surface, state: &GameState) {
    let hearts: String = std::iter::repeat_n(LIFE_GLYPH, state.lives as usize).collect();
    surface.fill_text(&hearts, LIVES_POS, TextAlign::Left, BLACK);
}

//! Collision tests for the rectangular playfield
//!
//! All checks are axis-aligned and response-free: callers flip velocity signs
//! themselves. No penetration correction, so a ball can sit slightly past a
//! wall for a frame or two.

use glam::Vec2;

use super::state::{Ball, Block, Paddle};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point strictly inside (edges excluded)
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Ball's horizontal extent is past either side wall
pub fn crosses_side_wall(ball: &Ball, field_width: f32) -> bool {
    ball.right() > field_width || ball.left() < 0.0
}

/// Ball's top extent is past the ceiling
pub fn crosses_ceiling(ball: &Ball) -> bool {
    ball.top() < 0.0
}

/// Ball's bottom reached the paddle top with its center strictly within the
/// paddle span.
///
/// There is no lower bound: a ball already below the paddle top but inside the
/// span keeps reporting a hit.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() > paddle.pos.y && ball.pos.x > paddle.pos.x && ball.pos.x < paddle.right()
}

/// Ball's top extent is past the bottom boundary
pub fn is_out_of_bounds(ball: &Ball, field_height: f32) -> bool {
    ball.top() > field_height
}

/// Ball's center lies strictly inside the block
pub fn hits_block(ball: &Ball, block: &Block) -> bool {
    block.rect().contains_strict(ball.pos)
}

//! Block grid generation
//!
//! Every level uses the same grid: `block_cols` x `block_rows` blocks laid out
//! column-major from the top offset.

use glam::Vec2;

use super::state::Block;
use crate::config::{BlockLayout, GameConfig};

/// Total width of one grid row including inner padding
pub fn grid_width(config: &GameConfig) -> f32 {
    let cols = config.block_cols as f32;
    cols * config.block_width + (cols - 1.0) * config.block_padding
}

/// X of the first column for the configured layout
pub fn grid_start_x(config: &GameConfig, field_width: f32) -> f32 {
    match config.block_layout {
        // May go negative on narrow surfaces; the grid then overhangs both sides
        BlockLayout::Centered => (field_width - grid_width(config)) / 2.0,
        BlockLayout::LeftAligned => config.block_offset_left,
    }
}

/// Build a fresh, fully active grid for the current surface width
pub fn generate_blocks(config: &GameConfig, field_width: f32) -> Vec<Block> {
    let start_x = grid_start_x(config, field_width);
    let size = Vec2::new(config.block_width, config.block_height);
    let step = size + Vec2::splat(config.block_padding);

    let mut blocks = Vec::with_capacity((config.block_cols * config.block_rows) as usize);
    for c in 0..config.block_cols {
        for r in 0..config.block_rows {
            let pos = Vec2::new(
                start_x + c as f32 * step.x,
                config.block_offset_top + r as f32 * step.y,
            );
            blocks.push(Block::new(pos, size));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BlockStatus;

    #[test]
    fn test_default_grid_is_centered() {
        let config = GameConfig::default();
        let blocks = generate_blocks(&config, 1280.0);
        assert_eq!(blocks.len(), 32);

        // 8 * 100 + 7 * 20 = 940 wide, so (1280 - 940) / 2 = 170
        assert_eq!(blocks[0].pos, Vec2::new(170.0, 100.0));
        let last = blocks.last().unwrap();
        assert_eq!(last.pos, Vec2::new(170.0 + 7.0 * 120.0, 100.0 + 3.0 * 50.0));
        assert_eq!(last.pos.x + last.size.x, 1280.0 - 170.0);
        assert!(blocks.iter().all(|b| b.status == BlockStatus::Active));
    }

    #[test]
    fn test_column_major_order() {
        let config = GameConfig::default();
        let blocks = generate_blocks(&config, 1280.0);
        // Second block is the next row of the first column
        assert_eq!(blocks[1].pos.x, blocks[0].pos.x);
        assert_eq!(blocks[1].pos.y, 150.0);
        assert_eq!(blocks[4].pos.y, blocks[0].pos.y);
    }

    #[test]
    fn test_left_aligned_layout() {
        let config = GameConfig {
            block_layout: BlockLayout::LeftAligned,
            ..GameConfig::default()
        };
        let blocks = generate_blocks(&config, 1280.0);
        assert_eq!(blocks[0].pos.x, config.block_offset_left);
    }

    #[test]
    fn test_regeneration_is_identical() {
        let config = GameConfig::default();
        let a = generate_blocks(&config, 1024.0);
        let b = generate_blocks(&config, 1024.0);
        let positions = |v: &[Block]| v.iter().map(|b| b.pos).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }
}

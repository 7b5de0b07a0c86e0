//! Cosmetic effects scheduled in frames
//!
//! Effects here never touch simulation positions; the renderer reads them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Brief horizontal jitter of the paddle after a ball bounces off it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleShake {
    /// Draw offset in pixels (sign picks the direction)
    pub offset: f32,
    /// Tick at which the jitter reverts
    pub expires_at: u64,
}

/// Start (or restart) a shake in a random direction
pub fn trigger_paddle_shake(state: &mut GameState) {
    let magnitude = state.config.shake_offset;
    let offset = if state.rng.random_bool(0.5) {
        -magnitude
    } else {
        magnitude
    };
    state.shake = Some(PaddleShake {
        offset,
        expires_at: state.time_ticks + state.config.shake_ticks as u64,
    });
}

/// Revert an expired shake. Harmless after a level reset.
pub fn expire_effects(state: &mut GameState) {
    if state
        .shake
        .is_some_and(|shake| state.time_ticks >= shake.expires_at)
    {
        state.shake = None;
    }
}

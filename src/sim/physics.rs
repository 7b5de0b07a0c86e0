//! Per-frame ball movement and collision response
//!
//! Response is a plain velocity sign flip. No reflection angles, no
//! penetration correction.

use glam::Vec2;
use rand::Rng;

use super::collision::{crosses_ceiling, crosses_side_wall, hits_block, hits_paddle, is_out_of_bounds};
use super::effects::trigger_paddle_shake;
use super::level::lose_life;
use super::state::{Ball, GameEvent, GameState};

/// Move every launched ball one frame and resolve its collisions.
///
/// Balls spawned by multiball during this pass are not simulated until the
/// next frame.
pub fn move_balls(state: &mut GameState) {
    let mut end = state.balls.len();
    let mut i = 0;

    while i < end {
        if !state.balls[i].moving {
            i += 1;
            continue;
        }

        {
            let field = state.field;
            let ball = &mut state.balls[i];
            ball.pos += ball.vel;

            if crosses_side_wall(ball, field.width) {
                ball.vel.x = -ball.vel.x;
            }
            if crosses_ceiling(ball) {
                ball.vel.y = -ball.vel.y;
            }
        }

        if hits_paddle(&state.balls[i], &state.paddle) {
            state.balls[i].vel.y = -state.balls[i].vel.y;
            let ball_id = state.balls[i].id;
            state.push_event(GameEvent::PaddleHit { ball_id });
            trigger_paddle_shake(state);
        }

        if is_out_of_bounds(&state.balls[i], state.field.height) {
            let lost = state.balls.remove(i);
            end -= 1;
            state.push_event(GameEvent::BallLost { ball_id: lost.id });
            if state.balls.is_empty() {
                // Either ends the run or redocks a single fresh ball; both
                // finish this pass
                lose_life(state);
                return;
            }
            continue;
        }

        hit_blocks(state, i);
        i += 1;
    }
}

/// Destroy every active block under ball `i`'s center.
///
/// Each hit flips the vertical velocity, so an even number of hits in one
/// frame cancels out and the ball carries straight on. Kept as observed
/// behavior rather than collapsing to a single flip.
fn hit_blocks(state: &mut GameState, i: usize) {
    for index in 0..state.blocks.len() {
        if !state.blocks[index].is_active() || !hits_block(&state.balls[i], &state.blocks[index]) {
            continue;
        }

        state.blocks[index].destroy();
        state.balls[i].vel.y = -state.balls[i].vel.y;
        state.time_left += state.config.block_time_bonus;
        state.push_event(GameEvent::BlockDestroyed { index });

        // Latch first so a closed latch never consumes a random draw
        if !state.multiball_triggered && state.rng.random::<f32>() < state.config.multiball_chance {
            spawn_multiball(state, i);
        }
    }
}

/// Add one ball copied from the template ball (or the hitting ball if the
/// template is gone), offset and with its horizontal velocity mirrored
pub fn spawn_multiball(state: &mut GameState, hitter: usize) {
    state.multiball_triggered = true;

    let template = state
        .balls
        .iter()
        .find(|b| b.id == state.template_ball_id)
        .unwrap_or(&state.balls[hitter])
        .clone();
    let offset = Vec2::new(state.config.multiball_offset_x, state.config.multiball_offset_y);
    let id = state.next_entity_id();

    let ball = Ball {
        id,
        pos: template.pos + offset,
        vel: Vec2::new(-template.vel.x, template.vel.y),
        ..template
    };
    state.balls.push(ball);
    state.push_event(GameEvent::MultiballSpawned { ball_id: id });
    log::debug!("Multiball! {} balls in play", state.balls.len());
}

//! One simulation frame
//!
//! Order within a playing frame: inputs, ball physics, level completion,
//! clock, then cosmetic expiry.

use super::effects::expire_effects;
use super::level::{advance_clock, advance_transition, check_level_complete};
use super::physics::move_balls;
use super::state::{GamePhase, GameState, PaddleDirection};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Nudge the paddle once
    pub direction: Option<PaddleDirection>,
    /// Launch docked balls
    pub launch: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Dead zone around the paddle center for the autopilot, in pixels
const AUTOPILOT_DEAD_ZONE: f32 = 12.0;

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_ended() {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    if let Some(dir) = input.direction {
        state.move_paddle(dir);
    }
    if input.launch {
        state.launch_balls();
    }

    match state.phase {
        GamePhase::Playing => {
            move_balls(state);
            if state.is_ended() {
                return;
            }
            check_level_complete(state);
            advance_clock(state);
            state.time_ticks += 1;
            expire_effects(state);
        }
        GamePhase::LevelTransition { .. } => {
            advance_transition(state);
        }
        GamePhase::Ended(_) => {}
    }
}

/// Launch anything docked and chase the lowest ball that is falling
fn autopilot(state: &GameState, input: &mut TickInput) {
    if state.balls.iter().any(|b| !b.moving) {
        input.launch = true;
    }

    let target = state
        .balls
        .iter()
        .filter(|b| b.moving && b.vel.y > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .or_else(|| state.balls.first());

    if let Some(ball) = target {
        let delta = ball.pos.x - state.paddle.center_x();
        if delta > AUTOPILOT_DEAD_ZONE {
            input.direction = Some(PaddleDirection::Right);
        } else if delta < -AUTOPILOT_DEAD_ZONE {
            input.direction = Some(PaddleDirection::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{BlockStatus, GameEvent, Outcome};
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(GameConfig::seeded(12345)).unwrap()
    }

    #[test]
    fn test_docked_until_launch() {
        let mut state = state();
        let pos = state.balls[0].pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.balls[0].pos, pos);

        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &launch);
        assert!(state.balls[0].moving);
        assert_eq!(state.balls[0].pos, pos + Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_clock_drains_every_playing_frame() {
        let mut state = state();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.time_left - (30.0 - 1.6)).abs() < 1e-3);
        assert_eq!(state.time_ticks, 100);
    }

    #[test]
    fn test_clear_transitions_within_same_tick() {
        let mut state = state();
        for block in &mut state.blocks {
            block.status = BlockStatus::Destroyed;
        }
        tick(&mut state, &TickInput::default());
        assert!(matches!(state.phase, GamePhase::LevelTransition { .. }));
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_transition_pauses_physics_and_clock() {
        let mut state = state();
        state.balls[0].moving = true;
        for block in &mut state.blocks {
            block.status = BlockStatus::Destroyed;
        }
        tick(&mut state, &TickInput::default());
        let time = state.time_left;
        let pos = state.balls[0].pos;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_left, time);
        assert_eq!(state.balls[0].pos, pos);
    }

    #[test]
    fn test_time_out_loses_regardless_of_lives() {
        let mut state = state();
        state.time_left = 0.02;
        tick(&mut state, &TickInput::default());
        assert!(!state.is_ended());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_no_physics_after_run_lost() {
        let mut state = state();
        state.lives = 1;
        let bottom = state.field.height;
        state.balls[0].pos = Vec2::new(5.0, bottom + 5.0);
        state.balls[0].vel = Vec2::new(0.0, 5.0);
        state.balls[0].moving = true;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));

        let snapshot = (state.time_left, state.balls.len(), state.paddle.pos);
        for _ in 0..10 {
            tick(
                &mut state,
                &TickInput {
                    direction: Some(PaddleDirection::Left),
                    launch: true,
                    idle_mode: false,
                },
            );
        }
        assert_eq!(
            snapshot,
            (state.time_left, state.balls.len(), state.paddle.pos)
        );
    }

    #[test]
    fn test_full_run_to_victory() {
        let mut state = state();
        for level in 0..state.config.max_levels {
            assert_eq!(state.level, level);
            for block in &mut state.blocks {
                block.status = BlockStatus::Destroyed;
            }
            tick(&mut state, &TickInput::default());
            while matches!(state.phase, GamePhase::LevelTransition { .. }) {
                tick(&mut state, &TickInput::default());
            }
        }
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Won));
        let cleared = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
            .count();
        assert_eq!(cleared, 3);
    }

    #[test]
    fn test_autopilot_launches_and_tracks() {
        let mut state = state();
        tick(
            &mut state,
            &TickInput {
                idle_mode: true,
                ..Default::default()
            },
        );
        assert!(state.balls[0].moving);

        state.balls[0].pos = Vec2::new(100.0, 400.0);
        state.balls[0].vel = Vec2::new(0.0, 5.0);
        let x = state.paddle.pos.x;
        tick(
            &mut state,
            &TickInput {
                idle_mode: true,
                ..Default::default()
            },
        );
        assert!(state.paddle.pos.x < x);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut state = state();
            let input = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            for _ in 0..2_000 {
                tick(&mut state, &input);
            }
            state.hud()
        };
        assert_eq!(run(), run());
    }
}

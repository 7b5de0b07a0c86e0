//! Game loop scheduler
//!
//! `Game::frame` is called once per display refresh. It owns the `GameState`,
//! pulls input from an `InputSource` between frames and forwards simulation
//! events to a `Presenter`.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::renderer::{Surface, render_frame};
use crate::sim::{GameEvent, GamePhase, GameState, Hud, Outcome, PaddleDirection, TickInput, tick};

/// External input, applied in arrival order before the next frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Move(PaddleDirection),
    Launch,
    Resize { width: f32, height: f32 },
}

/// Source of input events. Only the simulation thread polls it.
pub trait InputSource {
    fn poll_input(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn poll_input(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

/// Input produced on other threads arrives through a channel
impl InputSource for Receiver<InputEvent> {
    fn poll_input(&mut self) -> Option<InputEvent> {
        self.try_recv().ok()
    }
}

/// Overlay/HUD layer driven by the scheduler
pub trait Presenter {
    /// Show the countdown before `level` (0-based) starts
    fn show_countdown(&mut self, level: u32, remaining: u32);
    fn hide_overlay(&mut self);
    fn show_ending(&mut self, outcome: Outcome, hud: &Hud);
    /// Every raw event, before the overlay callbacks
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// What a call to `Game::frame` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// `start` not called yet
    NotStarted,
    /// Level transition countdown ticked; nothing drawn or simulated
    Paused,
    /// Drew and simulated one frame
    Simulated,
    /// Run is over
    Ended,
}

/// Game instance holding all state
pub struct Game<I, P> {
    state: GameState,
    input: I,
    presenter: P,
    started: bool,
    idle_mode: bool,
}

impl<I: InputSource, P: Presenter> Game<I, P> {
    pub fn new(config: GameConfig, input: I, presenter: P) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config)?,
            input,
            presenter,
            started: false,
            idle_mode: false,
        })
    }

    /// Begin simulating on the next frame
    pub fn start(&mut self) {
        if !self.started {
            log::info!("Game started (seed {})", self.state.seed);
        }
        self.started = true;
    }

    /// Let the autopilot play
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Run one scheduler tick
    pub fn frame(&mut self, surface: &mut impl Surface) -> FrameStatus {
        if !self.started {
            // Nothing listens before the run starts
            while self.input.poll_input().is_some() {}
            return FrameStatus::NotStarted;
        }

        self.apply_inputs();

        let input = TickInput {
            idle_mode: self.idle_mode,
            ..Default::default()
        };
        let status = match self.state.phase {
            GamePhase::Ended(_) => FrameStatus::Ended,
            GamePhase::LevelTransition { .. } => {
                tick(&mut self.state, &input);
                FrameStatus::Paused
            }
            GamePhase::Playing => {
                render_frame(surface, &self.state);
                tick(&mut self.state, &input);
                FrameStatus::Simulated
            }
        };

        self.dispatch_events();
        status
    }

    fn apply_inputs(&mut self) {
        while let Some(event) = self.input.poll_input() {
            match event {
                InputEvent::Move(dir) => self.state.move_paddle(dir),
                InputEvent::Launch => self.state.launch_balls(),
                InputEvent::Resize { width, height } => self.state.resize(width, height),
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            self.presenter.on_event(&event);
            match event {
                GameEvent::CountdownStep { remaining } => {
                    self.presenter.show_countdown(self.state.level, remaining)
                }
                GameEvent::LevelStarted { .. } => self.presenter.hide_overlay(),
                GameEvent::RunEnded(outcome) => {
                    let hud = self.state.hud();
                    self.presenter.show_ending(outcome, &hud);
                }
                _ => {}
            }
        }
    }
}

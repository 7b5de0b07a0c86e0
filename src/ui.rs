//! Overlay text and a presenter that writes it to the log
//!
//! Wording is presentation only; the simulation never reads it.

use crate::game::Presenter;
use crate::sim::{Hud, Outcome};

/// Overlay text for a countdown step. `total` is the first value shown.
pub fn countdown_message(remaining: u32, total: u32) -> String {
    let quip = if remaining >= total {
        "Well done. That says more about you than me."
    } else {
        "Still here? Okay then."
    };
    format!("\"{quip}\"\n\nNext level in {remaining}...")
}

/// Overlay text for the end of a run
pub fn end_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "You beat it. Somehow.",
        Outcome::Lost => "Out of time and/or lives.",
    }
}

/// Presenter for headless runs: overlay text goes to the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Countdown length, used to pick the opening quip
    pub countdown_steps: u32,
    /// Overlay text currently "on screen"
    pub overlay: Option<String>,
}

impl LogPresenter {
    pub fn new(countdown_steps: u32) -> Self {
        Self {
            countdown_steps,
            overlay: None,
        }
    }
}

impl Presenter for LogPresenter {
    fn show_countdown(&mut self, level: u32, remaining: u32) {
        let message = countdown_message(remaining, self.countdown_steps);
        log::info!("[level {}] {}", level + 1, message.replace("\n\n", " "));
        self.overlay = Some(message);
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn show_ending(&mut self, outcome: Outcome, hud: &Hud) {
        let message = end_message(outcome);
        log::info!(
            "{} (level {}/{}, {} lives, {}s)",
            message,
            hud.level.min(hud.max_levels),
            hud.max_levels,
            hud.lives,
            hud.seconds
        );
        self.overlay = Some(message.to_string());
    }
}

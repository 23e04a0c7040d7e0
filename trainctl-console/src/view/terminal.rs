//! Terminal rendering surface
//!
//! Prints one status line to stdout each time the displayed state changes.
//! Presenting the same status twice prints nothing the second time.

use colored::*;
use std::sync::Mutex;
use trainctl_core::domain::control::{ControlState, StatusBadge, StopControl};

use super::{StatusView, ViewState};

/// Status line on stdout
#[derive(Debug, Default)]
pub struct TerminalView {
    state: Mutex<ViewState>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what is currently displayed
    pub fn state(&self) -> ViewState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Prints the current state regardless of whether it changed
    pub fn print(&self) {
        println!("{}", render_line(&self.state()));
    }

    fn update(&self, apply: impl FnOnce(&mut ViewState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let before = *state;
        apply(&mut state);

        if *state != before {
            println!("{}", render_line(&state));
        }
    }
}

impl StatusView for TerminalView {
    fn show_controls(&self, controls: ControlState) {
        self.update(|state| state.controls = Some(controls));
    }

    fn show_stop_control(&self, stop: StopControl) {
        self.update(|state| state.stop_control = stop);
    }
}

/// Formats a view state as a single status line
pub fn render_line(state: &ViewState) -> String {
    let badge = match state.controls.map(|c| c.badge) {
        Some(StatusBadge::Training) => format!("● {}", StatusBadge::Training.label()).green(),
        Some(StatusBadge::NotTraining) => {
            format!("○ {}", StatusBadge::NotTraining.label()).dimmed()
        }
        None => "? Status unknown".yellow(),
    };

    format!(
        "{}  [{}] [{}]",
        badge,
        control("Start Training", state.start_enabled()),
        control(state.stop_control.label(), state.stop_enabled()),
    )
}

fn control(label: &str, enabled: bool) -> ColoredString {
    if enabled {
        label.bold()
    } else {
        label.dimmed()
    }
}

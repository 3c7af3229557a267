//! Countdown session state machine.
//!
//! Owns the authoritative timer state and folds every incoming signal
//! (tick, keyboard command, animation frame) into it through a single
//! exhaustive transition function. The machine performs no I/O; anything
//! the driving loop should do next comes back as an [`Effect`].

/// Length of a work session in minutes.
pub const WORK_MINUTES: u64 = 25;

/// A discrete user command delivered by the input-event source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleMode,
    Reset,
}

/// One signal applied to the state machine. The driving loop delivers
/// these strictly one at a time, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Tick,
    Command(Command),
    AnimationFrame,
}

/// What the driving loop should do after a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// No re-targeting needed; keep waiting for the next signal.
    Continue,
    /// The countdown moved; carries the new completion fraction for the
    /// progress indicator.
    Progress(f64),
    /// Stop scheduling ticks and exit the loop.
    Quit,
}

/// Coarse state derived from `is_paused` and `remaining_seconds`.
/// Paused wins over expired so a paused-at-zero session reads as paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Expired,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    total_seconds: u64,
    remaining_seconds: u64,
    is_paused: bool,
    status_message: String,
}

impl SessionState {
    /// Starts a fresh session at full duration.
    ///
    /// `total_seconds` must be positive; the fraction adapter divides by it.
    pub fn new(total_seconds: u64) -> Self {
        debug_assert!(total_seconds > 0, "session duration must be positive");
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            is_paused: false,
            status_message: "running".to_string(),
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Human-readable note about the last pause/resume transition.
    /// Display-only; never consulted by any transition.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn phase(&self) -> Phase {
        if self.is_paused {
            Phase::Paused
        } else if self.remaining_seconds == 0 {
            Phase::Expired
        } else {
            Phase::Running
        }
    }

    /// Normalized completion in `[0.0, 1.0]`: exactly 0.0 at full duration
    /// and exactly 1.0 at zero remaining. Always recomputed from the state,
    /// never cached, so it cannot drift.
    pub fn completion_fraction(&self) -> f64 {
        1.0 - self.remaining_seconds as f64 / self.total_seconds as f64
    }

    /// Applies one signal and reports the resulting effect. Total over the
    /// whole state space; there is no error path.
    pub fn apply(&mut self, signal: Signal) -> Effect {
        match signal {
            Signal::Command(Command::Quit) => Effect::Quit,
            Signal::Command(Command::ToggleMode) => {
                self.is_paused = !self.is_paused;
                let note = if self.is_paused { "Paused" } else { "Resumed" };
                self.status_message = note.to_string();
                Effect::Continue
            }
            Signal::Command(Command::Reset) => {
                // Leaves the pause flag alone: a paused session resets paused.
                self.remaining_seconds = self.total_seconds;
                Effect::Progress(self.completion_fraction())
            }
            Signal::Tick if self.is_paused => Effect::Continue,
            Signal::Tick => {
                // Holds at zero once expired; ticks keep arriving regardless.
                self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                Effect::Progress(self.completion_fraction())
            }
            // Animation frames belong to the progress widget; the session
            // itself has nothing to update.
            Signal::AnimationFrame => Effect::Continue,
        }
    }
}

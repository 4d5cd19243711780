//! Simulation control state and the pause/step protocol
//!
//! The flags are private: `play`, `pause` and `step` are their only writers,
//! and the physics-update pass is the only consumer of an armed step. A step
//! therefore can never be armed while the simulation is running.

use crate::consts::PALETTE_LEN;

/// Observable state of the pause/step machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Physics advances every frame
    Running,
    /// Physics is frozen
    Paused,
    /// Physics is frozen but the next update pass advances once
    PausedStepArmed,
}

/// Commands issued from the inspector panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Step,
}

/// Pause/step flags plus the cosmetic colour selection.
///
/// Owned by the frame loop and passed explicitly into the systems that read or
/// write it.
#[derive(Debug, Clone, Default)]
pub struct SimulationControl {
    paused: bool,
    step_requested: bool,
    selected_colour: usize,
}

impl SimulationControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SimState {
        match (self.paused, self.step_requested) {
            (false, _) => SimState::Running,
            (true, false) => SimState::Paused,
            (true, true) => SimState::PausedStepArmed,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn step_requested(&self) -> bool {
        self.step_requested
    }

    /// Resume. Returns whether anything changed.
    pub fn play(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        // A step armed while paused has nothing to gate once running
        self.step_requested = false;
        log::debug!("Simulation resumed");
        true
    }

    /// Freeze physics. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        log::debug!("Simulation paused");
        true
    }

    /// Arm a single physics advance. Only accepted while paused.
    pub fn step(&mut self) -> bool {
        if !self.paused || self.step_requested {
            return false;
        }
        self.step_requested = true;
        log::debug!("Single step armed");
        true
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Step => self.step(),
        }
    }

    /// True when physics must not advance this frame
    pub fn skip_gate(&self) -> bool {
        self.paused && !self.step_requested
    }

    /// Disarm the step after an update pass. Returns whether one was consumed.
    pub fn consume_step(&mut self) -> bool {
        std::mem::take(&mut self.step_requested)
    }

    /// Palette index used to draw simulated bodies
    pub fn selected_colour(&self) -> usize {
        self.selected_colour
    }

    /// Select a palette entry; out-of-range indices are rejected
    pub fn select_colour(&mut self, index: usize) -> bool {
        if index >= PALETTE_LEN {
            return false;
        }
        self.selected_colour = index;
        true
    }
}

//! Startup settings
//!
//! Window, tick and UI constants gathered in one place. Nothing here is read
//! from the command line or from disk.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StartupError;

/// Startup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Window ===
    /// Window title
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,

    // === Timing ===
    /// Fixed tick rate for input processing (Hz)
    pub tick_rate: u32,
    /// Frame pacing hint for the platform
    pub target_fps: u32,

    // === Debug view ===
    /// Downscale factor of the captured scene in the inspector window
    pub debug_scale: f32,
    /// Inspector widget/font scale
    pub ui_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            tick_rate: TICK_RATE,
            target_fps: TARGET_FPS,

            debug_scale: DEBUG_SCALE,
            ui_scale: UI_SCALE,
        }
    }
}

impl Settings {
    /// Reject settings the frame loop cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.tick_rate == 0 {
            return Err(StartupError::ZeroTickRate);
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(StartupError::InvalidWindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if !(self.debug_scale > 0.0) {
            return Err(StartupError::InvalidDebugScale(self.debug_scale));
        }
        Ok(())
    }

    /// Size of the downscaled debug capture
    pub fn debug_target_size(&self) -> (u32, u32) {
        (
            (self.window_width as f32 / self.debug_scale) as u32,
            (self.window_height as f32 / self.debug_scale) as u32,
        )
    }
}

//! Platform abstraction layer
//!
//! Frame timing, key polling and the close signal. A windowed backend
//! implements `Platform`; `HeadlessPlatform` drives the loop from a script.

use std::collections::HashMap;
use std::time::Duration;

use crate::sim::KeyCode;

pub trait Platform {
    /// Wall-clock duration of the frame that is starting
    fn frame_time(&mut self) -> Duration;
    /// Most recent key pressed this frame, or `KeyCode::NONE`
    fn key_pressed(&mut self) -> KeyCode;
    /// Window-close request, checked once per frame at the loop head
    fn should_close(&self) -> bool;
    /// Frame pacing hint
    fn set_target_fps(&mut self, fps: u32);
}

/// Fixed-delta platform that runs a set number of frames with scripted keys
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    frame_delta: Duration,
    frame_limit: u64,
    frame: u64,
    keys: HashMap<u64, KeyCode>,
    target_fps: Option<u32>,
}

impl HeadlessPlatform {
    pub fn new(frame_delta: Duration, frame_limit: u64) -> Self {
        Self {
            frame_delta,
            frame_limit,
            frame: 0,
            keys: HashMap::new(),
            target_fps: None,
        }
    }

    /// Frame delta matching a render rate in Hz
    pub fn at_rate(rate: u32, frame_limit: u64) -> Self {
        Self::new(
            Duration::from_nanos(1_000_000_000 / u64::from(rate.max(1))),
            frame_limit,
        )
    }

    /// Report `key` as pressed during frame `frame` (1-based)
    pub fn press_on(mut self, frame: u64, key: KeyCode) -> Self {
        self.keys.insert(frame, key);
        self
    }

    /// Frames started so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn target_fps(&self) -> Option<u32> {
        self.target_fps
    }
}

impl Platform for HeadlessPlatform {
    fn frame_time(&mut self) -> Duration {
        self.frame += 1;
        self.frame_delta
    }

    fn key_pressed(&mut self) -> KeyCode {
        self.keys.get(&self.frame).copied().unwrap_or(KeyCode::NONE)
    }

    fn should_close(&self) -> bool {
        self.frame >= self.frame_limit
    }

    fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = Some(fps);
    }
}

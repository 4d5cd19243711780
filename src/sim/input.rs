//! Input buffering and fixed-rate tick scheduling
//!
//! Keys are polled every render frame and appended to the buffer. The scheduler
//! decides once per frame whether a fixed tick has elapsed and, if so, drains
//! the whole buffer in order.

use std::collections::VecDeque;
use std::time::Duration;

/// Raw key code as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Sentinel for "no key pressed this frame"
    pub const NONE: KeyCode = KeyCode(0);
    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const F9: KeyCode = KeyCode(298);

    /// Key that flips debug mode
    pub const DEBUG_TOGGLE: KeyCode = KeyCode::F9;
}

/// FIFO of polled key codes
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    keys: VecDeque<KeyCode>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: KeyCode) {
        self.keys.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Remove and yield every buffered key, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.drain(..)
    }
}

/// What the scheduler did during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A tick boundary was crossed this frame
    pub ticked: bool,
    /// Keys drained from the buffer (including ignored ones)
    pub drained: usize,
    /// Number of debug-mode flips applied
    pub debug_toggles: u32,
}

/// Decides when a fixed tick has elapsed and applies buffered input
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    now: Duration,
    last_tick: Duration,
    ticks: u64,
}

impl TickScheduler {
    /// `tick_rate` is in Hz and must be positive (checked by `Settings::validate`)
    pub fn new(tick_rate: u32) -> Self {
        debug_assert!(tick_rate > 0);
        Self {
            interval: Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1))),
            now: Duration::ZERO,
            last_tick: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Clock time accumulated from frame deltas
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advance the clock by one frame and process a tick if one is due.
    ///
    /// A tick fires when the time since the previous tick strictly exceeds the
    /// interval. The buffer is drained only on tick frames.
    pub fn advance(
        &mut self,
        frame_delta: Duration,
        buffer: &mut InputBuffer,
        debug_mode: &mut bool,
    ) -> TickReport {
        self.now += frame_delta;

        if self.now - self.last_tick <= self.interval {
            return TickReport::default();
        }

        self.last_tick = self.now;
        self.ticks += 1;

        let mut report = TickReport {
            ticked: true,
            ..Default::default()
        };
        for key in buffer.drain() {
            report.drained += 1;
            if key == KeyCode::DEBUG_TOGGLE {
                *debug_mode = !*debug_mode;
                report.debug_toggles += 1;
                log::info!("Debug mode {}", if *debug_mode { "on" } else { "off" });
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME_240HZ: Duration = Duration::from_nanos(1_000_000_000 / 240);

    #[test]
    fn test_interval() {
        let scheduler = TickScheduler::new(60);
        assert_eq!(scheduler.interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_no_tick_before_interval() {
        let mut scheduler = TickScheduler::new(60);
        let mut buffer = InputBuffer::new();
        let mut debug = false;

        buffer.push(KeyCode::F9);
        for _ in 0..4 {
            let report = scheduler.advance(FRAME_240HZ, &mut buffer, &mut debug);
            assert!(!report.ticked);
        }
        assert!(!debug);
        assert_eq!(buffer.len(), 1);

        let report = scheduler.advance(FRAME_240HZ, &mut buffer, &mut debug);
        assert!(report.ticked);
        assert_eq!(report.drained, 1);
        assert!(debug);
        assert!(buffer.is_empty());
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn test_exact_interval_does_not_tick() {
        let mut scheduler = TickScheduler::new(60);
        let mut buffer = InputBuffer::new();
        let mut debug = false;

        let report = scheduler.advance(scheduler.interval(), &mut buffer, &mut debug);
        assert!(!report.ticked);
        let report = scheduler.advance(Duration::from_nanos(1), &mut buffer, &mut debug);
        assert!(report.ticked);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut scheduler = TickScheduler::new(60);
        let mut buffer = InputBuffer::new();
        let mut debug = false;

        buffer.push(KeyCode::NONE);
        buffer.push(KeyCode::ESCAPE);
        buffer.push(KeyCode(65));
        let report = scheduler.advance(Duration::from_millis(20), &mut buffer, &mut debug);

        assert!(report.ticked);
        assert_eq!(report.drained, 3);
        assert_eq!(report.debug_toggles, 0);
        assert!(!debug);
    }

    #[test]
    fn test_held_key_toggles_each_time() {
        let mut scheduler = TickScheduler::new(60);
        let mut buffer = InputBuffer::new();
        let mut debug = false;

        buffer.push(KeyCode::F9);
        buffer.push(KeyCode::F9);
        buffer.push(KeyCode::F9);
        let report = scheduler.advance(Duration::from_millis(20), &mut buffer, &mut debug);

        assert_eq!(report.debug_toggles, 3);
        assert!(debug);
    }

    proptest! {
        #[test]
        fn prop_all_keys_applied_once_at_boundary(
            frames in prop::collection::vec(
                prop::collection::vec(prop_oneof![Just(KeyCode::NONE), Just(KeyCode::F9), Just(KeyCode(65))], 0..4),
                1..4,
            )
        ) {
            // 240 Hz frames against a 60 Hz tick: the first four frames never tick
            let mut scheduler = TickScheduler::new(60);
            let mut buffer = InputBuffer::new();
            let mut debug = false;

            let mut expected = Vec::new();
            for keys in &frames {
                let report = scheduler.advance(FRAME_240HZ, &mut buffer, &mut debug);
                prop_assert!(!report.ticked);
                for key in keys {
                    buffer.push(*key);
                    expected.push(*key);
                }
            }
            prop_assert_eq!(buffer.len(), expected.len());

            let toggles = expected.iter().filter(|k| **k == KeyCode::F9).count();
            let report = scheduler.advance(Duration::from_millis(20), &mut buffer, &mut debug);
            prop_assert!(report.ticked);
            prop_assert_eq!(report.drained, expected.len());
            prop_assert_eq!(report.debug_toggles as usize, toggles);
            prop_assert_eq!(debug, toggles % 2 == 1);
            prop_assert!(buffer.is_empty());
        }
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(KeyCode(1));
        buffer.push(KeyCode(2));
        buffer.push(KeyCode(3));
        let drained: Vec<_> = buffer.drain().collect();
        assert_eq!(drained, vec![KeyCode(1), KeyCode(2), KeyCode(3)]);
        assert!(buffer.is_empty());
    }
}

use std::time::Instant;

/// Longest delta handed to the rig; a stalled window should not teleport the camera
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Where a [`FrameClock`] gets its deltas from
#[derive(Debug, Clone, Copy)]
enum TimeSource {
    Wall { start: Instant, last_tick: Instant },
    /// Scripted runs step by a constant delta
    Fixed { delta: f32, elapsed: f32 },
}

/// Tracks frame numbers and delta time for the camera loop
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: TimeSource,
    frame_number: u64,
    max_delta: f32,
}

impl FrameClock {
    /// Clock driven by wall time, starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            source: TimeSource::Wall { start: now, last_tick: now },
            frame_number: 0,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Clock that advances by exactly `delta` seconds per tick
    pub fn fixed(delta: f32) -> Self {
        Self {
            source: TimeSource::Fixed { delta, elapsed: 0.0 },
            frame_number: 0,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameInfo {
        let (time, raw_delta) = match &mut self.source {
            TimeSource::Wall { start, last_tick } => {
                let now = Instant::now();
                let delta = now.duration_since(*last_tick).as_secs_f32();
                *last_tick = now;
                (now.duration_since(*start).as_secs_f32(), delta)
            }
            TimeSource::Fixed { delta, elapsed } => {
                *elapsed += *delta;
                (*elapsed, *delta)
            }
        };

        let info = FrameInfo::new(self.frame_number, time, raw_delta.min(self.max_delta));
        self.frame_number += 1;
        info
    }

    /// Forget time spent since the last tick, e.g. after the window regains focus
    pub fn reset(&mut self) {
        if let TimeSource::Wall { last_tick, .. } = &mut self.source {
            *last_tick = Instant::now();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.tick())
    }
}

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

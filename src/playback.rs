use std::time::Duration;

use crate::models::LyricLine;

/// Seconds the clock keeps running after the last line before it stops.
pub const END_HOLD_SECS: f64 = 5.0;

/// Playback position for the detail screen. The clock does not read the wall
/// clock itself; the event loop feeds it elapsed time through `tick`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackClock {
    position: f64,
    playing: bool,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flip between playing and paused, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Jump to `secs` without changing the play state. Negative targets land
    /// on zero.
    pub fn seek(&mut self, secs: f64) {
        self.position = secs.max(0.0);
    }

    /// Back to the start, paused.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.playing = false;
    }

    /// Advance by `elapsed` while playing. Once the position passes `end`
    /// plus `END_HOLD_SECS` the clock pauses itself.
    pub fn tick(&mut self, elapsed: Duration, end: f64) {
        if !self.playing {
            return;
        }
        self.position += elapsed.as_secs_f64();
        let stop_at = end + END_HOLD_SECS;
        if self.position >= stop_at {
            self.position = stop_at;
            self.playing = false;
        }
    }
}

/// Index of the line being sung at `time`: the last line whose timestamp is
/// not after `time`. Lines are scanned in order, so unsorted input still
/// produces a stable answer.
pub fn active_line(lines: &[LyricLine], time: f64) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.time <= time)
        .map(|(idx, _)| idx)
        .last()
}

//! Run statistics accumulated from channel events

use serde::Serialize;

use crate::decoder::constants::RESOLUTION;

/// Counters over channel events only
///
/// Overflow, marker and invalid-channel records never touch these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Channel events on channel 0
    pub cnt_0: u64,
    /// Channel events on channels >= 1
    pub cnt_1: u64,
    /// Global time of the last channel event, in ticks
    pub last_global_time: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_channel(&mut self, channel: u8, global_time: u64) {
        if channel == 0 {
            self.cnt_0 += 1;
        } else {
            self.cnt_1 += 1;
        }
        self.last_global_time = global_time;
    }

    /// Total channel events
    pub fn channel_events(&self) -> u64 {
        self.cnt_0 + self.cnt_1
    }

    /// Time span covered by the run, from zero to the last channel event
    pub fn measurement_time_s(&self) -> f64 {
        self.last_global_time as f64 * RESOLUTION
    }

    /// Average count rate in kHz, `None` when no time has elapsed
    pub fn count_rate_khz(&self, count: u64) -> Option<f64> {
        let secs = self.measurement_time_s();
        if secs <= 0.0 {
            return None;
        }
        Some(count as f64 / (secs * 1e3))
    }

    /// Count rate on channel 0
    pub fn rate_0_khz(&self) -> Option<f64> {
        self.count_rate_khz(self.cnt_0)
    }

    /// Count rate on channels >= 1
    pub fn rate_1_khz(&self) -> Option<f64> {
        self.count_rate_khz(self.cnt_1)
    }
}

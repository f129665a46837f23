//! Overflow unwrapping for the 28-bit tick counter

use super::constants;

/// Cumulative overflow offset in ticks
///
/// Starts at zero and grows by [`constants::WRAPAROUND`] per overflow
/// record. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowTracker {
    offset: u64,
    overflows: u64,
}

impl OverflowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one overflow record
    #[inline]
    pub fn on_overflow(&mut self) {
        self.offset += constants::WRAPAROUND;
        self.overflows += 1;
    }

    /// Global time of a record with the given local time
    #[inline]
    pub fn global_time(&self, local_time: u32) -> u64 {
        self.offset + u64::from(local_time)
    }

    /// Current offset in ticks
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of overflow records seen
    pub fn overflows(&self) -> u64 {
        self.overflows
    }
}

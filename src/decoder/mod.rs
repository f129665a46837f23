//! Decoder module for PicoHarp 300 T2 mode records
//!
//! Converts raw 32-bit records into classified events with an unwrapped
//! global timestamp.
//!
//! # Record Format
//!
//! One 32-bit Little-Endian word per event:
//! - bits 0-27:  time (hardware tick counter, wraps around)
//! - bits 28-31: channel (0xF marks a special record)
//!
//! In a special record the low 4 bits of `time` are marker bits;
//! zero marker bits mean the tick counter overflowed.

pub mod classify;
pub mod overflow;
pub mod record;

pub use classify::{DecodedEvent, EventClassifier};
pub use overflow::OverflowTracker;
pub use record::Record;

/// T2 format constants
pub mod constants {
    /// Record size in bytes
    pub const RECORD_SIZE: usize = 4;

    pub const TIME_MASK: u32 = 0x0FFF_FFFF;
    pub const CHANNEL_SHIFT: u32 = 28;
    pub const CHANNEL_MASK: u32 = 0xF;

    /// Channel value of overflow and marker records
    pub const SPECIAL_CHANNEL: u8 = 0xF;
    pub const MARKER_MASK: u32 = 0xF;

    /// Ticks added to the global time on every overflow record
    pub const WRAPAROUND: u64 = 210_698_240;

    /// Seconds per tick (4 ps)
    pub const RESOLUTION: f64 = 4e-12;

    /// Measurement mode value of T2 files
    pub const MEASMODE_T2: i32 = 2;
}

//! Event classification
//!
//! Maps a decoded record to an event variant. Special records (channel 0xF)
//! are split into overflow and marker records by their low 4 time bits;
//! everything else is a channel event unless the channel exceeds the
//! routing channel bound from the file header.
//!
//! Markers carry their marker bits in the low 4 bits of `time`, so their
//! timestamps are coarser than channel events and may appear slightly out
//! of order relative to them. This is how the hardware writes them and is
//! not corrected here.

use serde::{Deserialize, Serialize};

use super::constants;
use super::record::Record;

/// One classified T2 record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedEvent {
    /// Photon arrival on a detector channel
    Channel {
        channel: u8,
        local_time: u32,
        global_time: u64,
    },
    /// Tick counter wrapped around
    Overflow,
    /// External synchronization marker
    Marker {
        markers: u8,
        local_time: u32,
        global_time: u64,
    },
    /// Channel above the routing channel bound
    InvalidChannel { channel: u8 },
}

impl DecodedEvent {
    /// Global timestamp in ticks, for events that carry one
    pub fn global_time(&self) -> Option<u64> {
        match *self {
            DecodedEvent::Channel { global_time, .. } | DecodedEvent::Marker { global_time, .. } => {
                Some(global_time)
            }
            DecodedEvent::Overflow | DecodedEvent::InvalidChannel { .. } => None,
        }
    }

    /// Global timestamp in seconds
    pub fn seconds(&self) -> Option<f64> {
        self.global_time()
            .map(|ticks| ticks as f64 * constants::RESOLUTION)
    }

    /// Short kind label
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedEvent::Channel { .. } => "channel",
            DecodedEvent::Overflow => "overflow",
            DecodedEvent::Marker { .. } => "marker",
            DecodedEvent::InvalidChannel { .. } => "invalid_channel",
        }
    }
}

/// Classification of a record before any timestamp is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Channel { channel: u8, local_time: u32 },
    Overflow,
    Marker { markers: u8, local_time: u32 },
    InvalidChannel { channel: u8 },
}

/// Stateless record classifier
#[derive(Debug, Clone, Copy)]
pub struct EventClassifier {
    routing_channels: i32,
}

impl EventClassifier {
    /// Create a classifier bounded by the header's routing channel count
    pub fn new(routing_channels: i32) -> Self {
        Self { routing_channels }
    }

    pub fn routing_channels(&self) -> i32 {
        self.routing_channels
    }

    /// Classify one record
    pub fn classify(&self, record: Record) -> RecordKind {
        if record.is_special() {
            let markers = (record.time & constants::MARKER_MASK) as u8;
            if markers == 0 {
                return RecordKind::Overflow;
            }
            return RecordKind::Marker {
                markers,
                local_time: record.time,
            };
        }

        // Strict greater-than: channel == routing_channels is still valid
        if i32::from(record.channel) > self.routing_channels {
            return RecordKind::InvalidChannel {
                channel: record.channel,
            };
        }

        RecordKind::Channel {
            channel: record.channel,
            local_time: record.time,
        }
    }
}

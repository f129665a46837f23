//! Record stream processing
//!
//! Drives the per-record loop: read 4 bytes, decode, classify, then either
//! advance the overflow offset or stamp the event with its global time.
//! The overflow offset is a running prefix sum over the stream, so records
//! are processed strictly in file order on a single thread.
//!
//! # State Machine
//! ```text
//! Running ──(record_count records read)──► Completed
//!    │
//!    └──────(source ended early)─────────► Truncated
//! ```
//! Both end states are terminal. A truncated run still returns every event
//! decoded before the short read.

pub mod statistics;

pub use statistics::RunStatistics;

use std::io::{self, Read};

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::common::error::Pt2Result;
use crate::decoder::classify::RecordKind;
use crate::decoder::constants::RECORD_SIZE;
use crate::decoder::{DecodedEvent, EventClassifier, OverflowTracker, Record};

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    /// All announced records were read
    Completed,
    /// The source ended before all announced records were read
    Truncated,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Completed => write!(f, "Completed"),
            RunStatus::Truncated => write!(f, "Truncated"),
        }
    }
}

/// One emitted event with its position in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Record index in the file (0-based)
    pub index: u64,
    /// Raw 32-bit record
    pub raw: u32,
    #[serde(flatten)]
    pub event: DecodedEvent,
}

impl EventRecord {
    /// Global time in seconds, for channel events and markers
    pub fn seconds(&self) -> Option<f64> {
        self.event.seconds()
    }
}

/// Final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub statistics: RunStatistics,
    /// Records announced by the header
    pub record_count: u64,
    /// Records actually read
    pub records_read: u64,
    /// Final overflow offset in ticks
    pub overflow_offset: u64,
    pub overflows: u64,
    pub markers: u64,
    pub invalid_records: u64,
}

/// Events plus summary, for callers that want everything in memory
#[derive(Debug, Clone)]
pub struct RunReport {
    pub events: Vec<EventRecord>,
    pub summary: RunSummary,
}

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Highest valid channel (from the binary header)
    pub routing_channels: i32,
    /// Log a warning for every invalid-channel record
    pub warn_invalid_channels: bool,
}

impl ProcessorConfig {
    pub fn new(routing_channels: i32) -> Self {
        Self {
            routing_channels,
            warn_invalid_channels: true,
        }
    }
}

/// Single-run T2 stream processor
///
/// Owns the overflow offset and statistics for exactly one pass over a
/// record stream; [`StreamProcessor::run`] consumes it.
#[derive(Debug)]
pub struct StreamProcessor {
    classifier: EventClassifier,
    overflow: OverflowTracker,
    statistics: RunStatistics,
    status: RunStatus,
    records_read: u64,
    markers: u64,
    invalid_records: u64,
    warn_invalid_channels: bool,
}

impl StreamProcessor {
    /// Create a processor for the given routing channel bound
    pub fn new(routing_channels: i32) -> Self {
        Self::with_config(ProcessorConfig::new(routing_channels))
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            classifier: EventClassifier::new(config.routing_channels),
            overflow: OverflowTracker::new(),
            statistics: RunStatistics::new(),
            status: RunStatus::Running,
            records_read: 0,
            markers: 0,
            invalid_records: 0,
            warn_invalid_channels: config.warn_invalid_channels,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Current overflow offset in ticks
    pub fn offset(&self) -> u64 {
        self.overflow.offset()
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Decode and account for the next record in file order
    pub fn process_word(&mut self, raw: u32) -> EventRecord {
        let index = self.records_read;
        self.records_read += 1;

        let event = match self.classifier.classify(Record::decode(raw)) {
            RecordKind::Overflow => {
                self.overflow.on_overflow();
                trace!(index, offset = self.overflow.offset(), "Overflow");
                DecodedEvent::Overflow
            }
            RecordKind::Marker {
                markers,
                local_time,
            } => {
                self.markers += 1;
                let global_time = self.overflow.global_time(local_time);
                debug!(index, markers, global_time, "Marker");
                DecodedEvent::Marker {
                    markers,
                    local_time,
                    global_time,
                }
            }
            RecordKind::InvalidChannel { channel } => {
                self.invalid_records += 1;
                if self.warn_invalid_channels {
                    warn!(index, channel, "Illegal channel");
                }
                DecodedEvent::InvalidChannel { channel }
            }
            RecordKind::Channel {
                channel,
                local_time,
            } => {
                let global_time = self.overflow.global_time(local_time);
                self.statistics.record_channel(channel, global_time);
                DecodedEvent::Channel {
                    channel,
                    local_time,
                    global_time,
                }
            }
        };

        EventRecord { index, raw, event }
    }

    /// Process up to `record_count` records from `source`, handing each event
    /// to `sink` in file order.
    ///
    /// A short read ends the run as [`RunStatus::Truncated`]; any other read
    /// error, or an error returned by `sink`, aborts it.
    pub fn run<R, F>(
        mut self,
        mut source: R,
        record_count: u64,
        mut sink: F,
    ) -> Pt2Result<RunSummary>
    where
        R: Read,
        F: FnMut(&EventRecord) -> Pt2Result<()>,
    {
        debug!(
            routing_channels = self.classifier.routing_channels(),
            record_count, "Run started"
        );
        let mut buf = [0u8; RECORD_SIZE];

        while self.records_read < record_count {
            if !read_record(&mut source, &mut buf)? {
                self.status = RunStatus::Truncated;
                warn!(
                    records_read = self.records_read,
                    record_count, "Unexpected end of input file"
                );
                break;
            }
            let record = self.process_word(u32::from_le_bytes(buf));
            sink(&record)?;
        }

        if !self.status.is_terminal() {
            self.status = RunStatus::Completed;
        }

        let summary = self.summary(record_count);
        info!(
            status = %summary.status,
            records = summary.records_read,
            cnt_0 = summary.statistics.cnt_0,
            cnt_1 = summary.statistics.cnt_1,
            last_tag = summary.statistics.last_global_time,
            "Run finished"
        );
        Ok(summary)
    }

    /// Process the stream and keep every event in memory
    pub fn collect<R: Read>(self, source: R, record_count: u64) -> Pt2Result<RunReport> {
        let mut events = Vec::with_capacity(record_count.min(1 << 20) as usize);
        let summary = self.run(source, record_count, |record| {
            events.push(*record);
            Ok(())
        })?;
        Ok(RunReport { events, summary })
    }

    fn summary(&self, record_count: u64) -> RunSummary {
        RunSummary {
            status: self.status,
            statistics: self.statistics,
            record_count,
            records_read: self.records_read,
            overflow_offset: self.overflow.offset(),
            overflows: self.overflow.overflows(),
            markers: self.markers,
            invalid_records: self.invalid_records,
        }
    }
}

/// Fill `buf` with the next record. `Ok(false)` on end of input, including
/// a partial trailing record.
fn read_record<R: Read>(source: &mut R, buf: &mut [u8; RECORD_SIZE]) -> io::Result<bool> {
    match source.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Pt2Error;
    use crate::decoder::constants::WRAPAROUND;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    const OVERFLOW: u32 = 0xF000_0000;

    fn channel_word(channel: u8, time: u32) -> u32 {
        Record { time, channel }.encode()
    }

    fn to_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn collect(words: &[u32], routing_channels: i32, record_count: u64) -> RunReport {
        StreamProcessor::new(routing_channels)
            .collect(Cursor::new(to_bytes(words)), record_count)
            .unwrap()
    }

    /// Reader that fails after yielding its data
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            Ok(n)
        }
    }

    #[test]
    fn test_new_processor_is_running() {
        let p = StreamProcessor::new(4);
        assert_eq!(p.status(), RunStatus::Running);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.records_read(), 0);
        assert_eq!(*p.statistics(), RunStatistics::default());
    }

    #[test]
    fn test_two_overflows_then_channel_event() {
        let report = collect(&[OVERFLOW, OVERFLOW, channel_word(0, 100)], 4, 3);
        assert_eq!(report.events.len(), 3);
        assert_eq!(report.events[0].event, DecodedEvent::Overflow);
        assert_eq!(
            report.events[2].event,
            DecodedEvent::Channel {
                channel: 0,
                local_time: 100,
                global_time: 421_396_580,
            }
        );
        assert_eq!(report.summary.status, RunStatus::Completed);
        assert_eq!(report.summary.overflow_offset, 2 * WRAPAROUND);
        assert_eq!(report.summary.overflows, 2);
    }

    #[test]
    fn test_overflows_do_not_touch_statistics() {
        let report = collect(&[OVERFLOW, OVERFLOW], 4, 2);
        assert_eq!(report.summary.statistics, RunStatistics::default());
    }

    #[test]
    fn test_marker_uses_current_offset() {
        let report = collect(&[OVERFLOW, 0xF000_0013], 4, 2);
        assert_eq!(
            report.events[1].event,
            DecodedEvent::Marker {
                markers: 3,
                local_time: 0x13,
                global_time: WRAPAROUND + 0x13,
            }
        );
        assert_eq!(report.summary.markers, 1);
        assert_eq!(report.summary.statistics.last_global_time, 0);
        assert_eq!(report.summary.statistics.channel_events(), 0);
    }

    #[test]
    fn test_invalid_channel_is_soft_failure() {
        let words = [channel_word(0, 10), channel_word(5, 42), channel_word(1, 50)];
        let report = collect(&words, 2, 3);

        assert_eq!(
            report.events[1].event,
            DecodedEvent::InvalidChannel { channel: 5 }
        );
        // processing continued past the bad record
        assert_eq!(report.events.len(), 3);
        assert_eq!(report.summary.status, RunStatus::Completed);
        assert_eq!(report.summary.statistics.cnt_0, 1);
        assert_eq!(report.summary.statistics.cnt_1, 1);
        assert_eq!(report.summary.statistics.last_global_time, 50);
        assert_eq!(report.summary.invalid_records, 1);
    }

    #[test]
    fn test_invalid_channel_alone_leaves_counters() {
        let report = collect(&[channel_word(5, 42)], 2, 1);
        assert_eq!(report.summary.statistics.cnt_0, 0);
        assert_eq!(report.summary.statistics.cnt_1, 0);
    }

    #[test]
    fn test_truncated_stream() {
        let words: Vec<u32> = (0..10).map(|i| channel_word(1, i * 10)).collect();
        let report = collect(&words, 4, 1000);
        assert_eq!(report.events.len(), 10);
        assert_eq!(report.summary.status, RunStatus::Truncated);
        assert_eq!(report.summary.records_read, 10);
        assert_eq!(report.summary.record_count, 1000);
        assert_eq!(report.summary.statistics.cnt_1, 10);
    }

    #[test]
    fn test_partial_trailing_record_truncates() {
        let mut bytes = to_bytes(&[channel_word(0, 1), channel_word(0, 2)]);
        bytes.extend_from_slice(&[0x01, 0x02]);
        let report = StreamProcessor::new(4)
            .collect(Cursor::new(bytes), 3)
            .unwrap();
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.summary.status, RunStatus::Truncated);
    }

    #[test]
    fn test_empty_stream_zero_records_completes() {
        let report = collect(&[], 4, 0);
        assert!(report.events.is_empty());
        assert_eq!(report.summary.status, RunStatus::Completed);
    }

    #[test]
    fn test_stops_after_record_count() {
        let words: Vec<u32> = (0..5).map(|i| channel_word(0, i)).collect();
        let report = collect(&words, 4, 3);
        assert_eq!(report.events.len(), 3);
        assert_eq!(report.summary.status, RunStatus::Completed);
        assert_eq!(report.summary.statistics.last_global_time, 2);
    }

    #[test]
    fn test_event_indices_and_raw() {
        let words = [channel_word(1, 7), OVERFLOW];
        let report = collect(&words, 4, 2);
        assert_eq!(report.events[0].index, 0);
        assert_eq!(report.events[0].raw, words[0]);
        assert_eq!(report.events[1].index, 1);
        assert_eq!(report.events[1].raw, OVERFLOW);
    }

    #[test]
    fn test_io_error_is_fatal() {
        let source = FailingReader {
            data: Cursor::new(to_bytes(&[channel_word(0, 1)])),
        };
        let result = StreamProcessor::new(4).collect(source, 5);
        assert!(matches!(result, Err(Pt2Error::Io(_))));
    }

    #[test]
    fn test_sink_error_aborts_run() {
        let bytes = to_bytes(&[channel_word(0, 1), channel_word(0, 2)]);
        let mut seen = 0;
        let result = StreamProcessor::new(4).run(Cursor::new(bytes), 2, |_| {
            seen += 1;
            Err(Pt2Error::other("disk full"))
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_overflow_count_matches_offset() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = StreamProcessor::new(4);
        let mut n = 0u64;
        for _ in 0..5000 {
            if rng.gen_bool(0.2) {
                // upper time bits are irrelevant for overflow records
                p.process_word(OVERFLOW | (rng.gen_range(0..0x0FF_FFFFu32) << 4));
                n += 1;
            } else {
                p.process_word(channel_word(rng.gen_range(0..=4), rng.gen_range(0..0x0C8F_0000)));
            }
        }
        assert_eq!(p.offset(), n * WRAPAROUND);
    }

    #[test]
    fn test_channel_global_time_monotonic() {
        // Hardware-like stream: local time increases inside each epoch
        let mut rng = StdRng::seed_from_u64(42);
        let mut words = Vec::new();
        for _ in 0..20 {
            let mut t = 0u32;
            for _ in 0..rng.gen_range(0..50) {
                t += rng.gen_range(0..4_000_000);
                words.push(channel_word(rng.gen_range(0..=1), t));
            }
            words.push(OVERFLOW);
        }

        let report = collect(&words, 1, words.len() as u64);
        let times: Vec<u64> = report
            .events
            .iter()
            .filter_map(|r| match r.event {
                DecodedEvent::Channel { global_time, .. } => Some(global_time),
                _ => None,
            })
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_run_status_display() {
        assert_eq!(RunStatus::Truncated.to_string(), "Truncated");
        assert!(RunStatus::Completed.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
    }

    #[test]
    fn test_event_record_serializes_flat() {
        let record = EventRecord {
            index: 3,
            raw: 0x1000_0064,
            event: DecodedEvent::Channel {
                channel: 1,
                local_time: 100,
                global_time: 100,
            },
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["kind"], "channel");
        assert_eq!(json["global_time"], 100);
    }
}

//! pt2-rs: decoder for PicoHarp 300 T2 mode files (*.pt2)
//!
//! A file is a fixed header followed by 32-bit little-endian records. Each
//! record carries a 28-bit time tag and a 4-bit channel. Channel 15 marks
//! special records: time overflows (which extend the tag range) and
//! external markers.
//!
//! ```no_run
//! use pt2_rs::Pt2Reader;
//!
//! let report = Pt2Reader::open("data.pt2")?.collect()?;
//! println!("{} events, status {}", report.events.len(), report.summary.status);
//! # Ok::<(), pt2_rs::Pt2Error>(())
//! ```

pub mod common;
pub mod config;
pub mod decoder;
pub mod header;
pub mod output;
pub mod processor;
pub mod reader;

pub use common::{Pt2Error, Pt2Result};
pub use decoder::{DecodedEvent, EventClassifier, OverflowTracker, Record};
pub use header::FileHeader;
pub use processor::{EventRecord, RunReport, RunStatistics, RunStatus, RunSummary, StreamProcessor};
pub use reader::Pt2Reader;

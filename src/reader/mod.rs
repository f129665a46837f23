//! Reader for .pt2 files
//!
//! Parses and validates the headers, skips the image header, and hands the
//! positioned record stream to a [`StreamProcessor`]. Header failures are
//! returned before any record is read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::common::error::Pt2Result;
use crate::header::FileHeader;
use crate::processor::{EventRecord, ProcessorConfig, RunReport, RunSummary, StreamProcessor};

/// Reader for one PicoHarp T2 file
pub struct Pt2Reader<R> {
    reader: R,
    header: FileHeader,
    warn_invalid_channels: bool,
}

impl Pt2Reader<BufReader<File>> {
    /// Open a file by path
    pub fn open<P: AsRef<Path>>(path: P) -> Pt2Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening pt2 file");
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> Pt2Reader<R> {
    /// Read the headers from `reader` and position it at the first record
    pub fn new(mut reader: R) -> Pt2Result<Self> {
        let header = FileHeader::read_from(&mut reader)?;
        header.skip_image_header(&mut reader)?;

        info!(
            routing_channels = header.routing_channels(),
            records = header.record_count(),
            img_hdr_size = header.tttr.img_hdr_size,
            "Header validated"
        );

        Ok(Self {
            reader,
            header,
            warn_invalid_channels: true,
        })
    }

    /// Enable or disable per-record warnings for invalid channels
    pub fn set_warn_invalid_channels(&mut self, enabled: bool) {
        self.warn_invalid_channels = enabled;
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn routing_channels(&self) -> i32 {
        self.header.routing_channels()
    }

    /// Record count announced by the TTTR header
    pub fn record_count(&self) -> u64 {
        self.header.record_count()
    }

    fn processor(&self) -> StreamProcessor {
        StreamProcessor::with_config(ProcessorConfig {
            routing_channels: self.routing_channels(),
            warn_invalid_channels: self.warn_invalid_channels,
        })
    }

    /// Decode all records, handing each event to `sink`
    pub fn process<F>(self, sink: F) -> Pt2Result<RunSummary>
    where
        F: FnMut(&EventRecord) -> Pt2Result<()>,
    {
        let processor = self.processor();
        let record_count = self.record_count();
        processor.run(self.reader, record_count, sink)
    }

    /// Decode all records into memory
    pub fn collect(self) -> Pt2Result<RunReport> {
        let processor = self.processor();
        let record_count = self.record_count();
        processor.collect(self.reader, record_count)
    }

    /// Header and the positioned record stream
    pub fn into_parts(self) -> (FileHeader, R) {
        (self.header, self.reader)
    }
}

//! Event output
//!
//! Writers receive the file header, then every event in file order, then
//! the run summary. Formatting is kept out of the decoder.

pub mod json;
pub mod text;

pub use json::JsonWriter;
pub use text::TextWriter;

use std::io::Write;

use crate::common::error::Pt2Result;
use crate::config::OutputFormat;
use crate::header::FileHeader;
use crate::processor::{EventRecord, RunSummary};

/// Sink for decoded runs
pub trait EventWriter {
    fn write_header(&mut self, header: &FileHeader) -> Pt2Result<()>;

    fn write_event(&mut self, record: &EventRecord) -> Pt2Result<()>;

    fn write_summary(&mut self, summary: &RunSummary) -> Pt2Result<()>;

    fn flush(&mut self) -> Pt2Result<()>;
}

/// Create a writer for the configured format
pub fn writer_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn EventWriter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextWriter::new(out)),
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedEvent;

    #[test]
    fn test_writer_for_formats() {
        let record = EventRecord {
            index: 0,
            raw: 0xF000_0000,
            event: DecodedEvent::Overflow,
        };

        let mut text = Vec::new();
        {
            let mut w = writer_for(OutputFormat::Text, &mut text);
            w.write_event(&record).unwrap();
            w.flush().unwrap();
        }
        assert!(String::from_utf8(text).unwrap().contains("ofl"));

        let mut json = Vec::new();
        {
            let mut w = writer_for(OutputFormat::Json, &mut json);
            w.write_event(&record).unwrap();
            w.flush().unwrap();
        }
        assert!(String::from_utf8(json).unwrap().contains("\"overflow\""));
    }
}

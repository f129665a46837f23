//! JSON lines output
//!
//! Every line is one object tagged by `type`: a `header` line, one `event`
//! line per record, and a final `summary` line.

use std::io::Write;

use serde::Serialize;

use super::EventWriter;
use crate::common::error::Pt2Result;
use crate::header::FileHeader;
use crate::processor::{EventRecord, RunSummary};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Line<'a> {
    Header(&'a FileHeader),
    Event(EventLine<'a>),
    Summary(&'a RunSummary),
}

#[derive(Serialize)]
struct EventLine<'a> {
    #[serde(flatten)]
    record: &'a EventRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    seconds: Option<f64>,
}

pub struct JsonWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &Line<'_>) -> Pt2Result<()> {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> EventWriter for JsonWriter<W> {
    fn write_header(&mut self, header: &FileHeader) -> Pt2Result<()> {
        self.write_line(&Line::Header(header))
    }

    fn write_event(&mut self, record: &EventRecord) -> Pt2Result<()> {
        self.write_line(&Line::Event(EventLine {
            record,
            seconds: record.seconds(),
        }))
    }

    fn write_summary(&mut self, summary: &RunSummary) -> Pt2Result<()> {
        self.write_line(&Line::Summary(summary))
    }

    fn flush(&mut self) -> Pt2Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

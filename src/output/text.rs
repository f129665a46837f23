//! Fixed-width ASCII output
//!
//! One line per record:
//! ```text
//!   index      raw  kind
//!       0 f0000000  ofl
//!       1 1000c350   1        50000    210748240 0.000842992960
//!       2 f0000013 MA3           19    210698259 0.000842793036
//!       3 50000001  illegal chan.
//! ```

use std::io::Write;

use super::EventWriter;
use crate::common::error::Pt2Result;
use crate::decoder::DecodedEvent;
use crate::header::FileHeader;
use crate::processor::{EventRecord, RunStatus, RunSummary};

pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn field(&mut self, label: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        writeln!(self.out, "{:<17}: {}", label, value)
    }

    fn board_field(&mut self, label: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        writeln!(self.out, " {:<16}: {}", label, value)
    }
}

impl<W: Write> EventWriter for TextWriter<W> {
    fn write_header(&mut self, header: &FileHeader) -> Pt2Result<()> {
        let text = &header.text;
        self.field("Ident", &text.ident)?;
        self.field("Format Version", &text.format_version)?;
        self.field("Creator Name", &text.creator_name)?;
        self.field("Creator Version", &text.creator_version)?;
        self.field("Time of Creation", &text.file_time)?;
        self.field("File Comment", &text.comment)?;

        let bin = &header.binary;
        self.field("No of Curves", bin.curves)?;
        self.field("Bits per Record", bin.bits_per_record)?;
        self.field("RoutingChannels", bin.routing_channels)?;
        self.field("No of Boards", bin.number_of_boards)?;
        self.field("Active Curve", bin.active_curve)?;
        self.field("Measurement Mode", bin.meas_mode)?;
        self.field("Sub-Mode", bin.sub_mode)?;
        self.field("Range No", bin.range_no)?;
        self.field("Offset", bin.offset)?;
        self.field("AcquisitionTime", bin.tacq_ms)?;
        self.field("Stop at", bin.stop_at)?;
        self.field("Stop on Ovfl.", bin.stop_on_ovfl)?;
        self.field("Restart", bin.restart)?;
        self.field("DispLinLog", bin.disp_lin_log)?;
        self.field("DispTimeAxisFrom", bin.disp_time_from)?;
        self.field("DispTimeAxisTo", bin.disp_time_to)?;
        self.field("DispCountAxisFrom", bin.disp_counts_from)?;
        self.field("DispCountAxisTo", bin.disp_counts_to)?;

        writeln!(self.out, "---------------------")?;
        let board = &header.board;
        self.board_field("HardwareIdent", &board.hardware_ident)?;
        self.board_field("HardwareVersion", &board.hardware_version)?;
        self.board_field("HardwareSerial", board.hardware_serial)?;
        self.board_field("SyncDivider", board.sync_divider)?;
        self.board_field("CFDZeroCross0", board.cfd_zero_cross0)?;
        self.board_field("CFDLevel0", board.cfd_level0)?;
        self.board_field("CFDZeroCross1", board.cfd_zero_cross1)?;
        self.board_field("CFDLevel1", board.cfd_level1)?;
        self.board_field("Resolution", format!("{:.6}", board.resolution))?;

        if board.has_router() {
            writeln!(self.out, " {:<22}: {}", "RouterModelCode", board.router_model_code)?;
            writeln!(self.out, " {:<22}: {}", "RouterEnabled", board.router_enabled)?;
            for (i, ch) in board.router_channels.iter().enumerate() {
                let n = i + 1;
                for (name, value) in [
                    ("InputType", ch.input_type),
                    ("InputLevel", ch.input_level),
                    ("InputEdge", ch.input_edge),
                    ("CFDPresent", ch.cfd_present),
                    ("CFDLevel", ch.cfd_level),
                    ("CFDZeroCross", ch.cfd_zero_cross),
                ] {
                    writeln!(self.out, " {:<22}: {}", format!("RtChan{n}_{name}"), value)?;
                }
            }
        }
        writeln!(self.out, "---------------------")?;

        let tttr = &header.tttr;
        self.field("ExtDevices", tttr.ext_devices)?;
        self.field("CntRate0", tttr.cnt_rate0)?;
        self.field("CntRate1", tttr.cnt_rate1)?;
        self.field("StopAfter", tttr.stop_after)?;
        self.field("StopReason", tttr.stop_reason)?;
        self.field("Records", tttr.records)?;
        self.field("ImgHdrSize", tttr.img_hdr_size)?;
        Ok(())
    }

    fn write_event(&mut self, record: &EventRecord) -> Pt2Result<()> {
        write!(self.out, "{:7} {:08x} ", record.index, record.raw)?;
        match record.event {
            DecodedEvent::Overflow => writeln!(self.out, " ofl")?,
            DecodedEvent::Marker {
                markers,
                local_time,
                global_time,
            } => writeln!(
                self.out,
                "MA{} {:12} {:12} {:14.12}",
                markers,
                local_time,
                global_time,
                record.seconds().unwrap_or_default()
            )?,
            DecodedEvent::Channel {
                channel,
                local_time,
                global_time,
            } => writeln!(
                self.out,
                "  {} {:12} {:12} {:14.12}",
                channel,
                local_time,
                global_time,
                record.seconds().unwrap_or_default()
            )?,
            DecodedEvent::InvalidChannel { .. } => writeln!(self.out, " illegal chan.")?,
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> Pt2Result<()> {
        let stats = &summary.statistics;
        writeln!(self.out)?;
        writeln!(self.out, "Statistics obtained from the data:")?;
        writeln!(self.out, "last tag= {}", stats.last_global_time)?;
        writeln!(self.out, "cnt_0={} cnt_1={}", stats.cnt_0, stats.cnt_1)?;
        match (stats.rate_0_khz(), stats.rate_1_khz()) {
            (Some(a), Some(b)) => writeln!(
                self.out,
                "measurement time= {:.4}s countrate_a = {:.0} kHz, countrate_b = {:.0} kHz",
                stats.measurement_time_s(),
                a,
                b
            )?,
            _ => writeln!(
                self.out,
                "measurement time= {:.4}s (no count rate)",
                stats.measurement_time_s()
            )?,
        }
        writeln!(
            self.out,
            "overflows={} markers={} illegal={}",
            summary.overflows, summary.markers, summary.invalid_records
        )?;
        if summary.status == RunStatus::Truncated {
            writeln!(
                self.out,
                "Unexpected end of input file! ({} of {} records)",
                summary.records_read, summary.record_count
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Pt2Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

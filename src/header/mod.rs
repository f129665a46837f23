//! PicoHarp 300 .pt2 file headers (format version 2.0)
//!
//! File structure:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Text header    (328 bytes, ASCII)       │
//! ├─────────────────────────────────────────┤
//! │  Binary header  (208 bytes)              │
//! ├─────────────────────────────────────────┤
//! │  Board header   (156 bytes)              │
//! ├─────────────────────────────────────────┤
//! │  TTTR header    (36 bytes)               │
//! ├─────────────────────────────────────────┤
//! │  Image header   (ImgHdrSize * 4 bytes)   │
//! ├─────────────────────────────────────────┤
//! │  T2 records     (Records * 4 bytes)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! All numeric fields are 32-bit Little-Endian. Fields are read at fixed
//! offsets; no struct layout is assumed.

mod fields;

use std::fmt;
use std::io::{self, Read, Write};

use serde::Serialize;
use thiserror::Error;

use crate::decoder::constants::MEASMODE_T2;
use fields::{FieldReader, FieldWriter};

/// Expected identifier in the text header
pub const FILE_IDENT: &str = "PicoHarp 300";

/// Supported format version prefix
pub const FORMAT_VERSION: &str = "2.0";

pub const TEXT_HEADER_SIZE: usize = 328;
pub const BINARY_HEADER_SIZE: usize = 208;
pub const BOARD_HEADER_SIZE: usize = 156;
pub const TTTR_HEADER_SIZE: usize = 36;

const DISP_CURVES: usize = 8;
const PARAM_RANGES: usize = 3;
const ROUTER_CHANNELS: usize = 4;

/// Header section, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Text,
    Binary,
    Board,
    Tttr,
    Image,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Text => "txt header",
            Section::Binary => "bin header",
            Section::Board => "board header",
            Section::Tttr => "TTTR header",
            Section::Image => "image header",
        };
        f.write_str(name)
    }
}

/// Header errors. All of them abort before any record is read.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("error reading {section}: unexpected end of file")]
    ShortRead { section: Section },

    #[error("file identifier not found (got {0:?})")]
    InvalidIdent(String),

    #[error("file format version is {0:?}, only version 2.0 is supported")]
    UnsupportedVersion(String),

    #[error("wrong measurement mode {0} (expected T2 mode 2)")]
    UnsupportedMeasMode(i32),

    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: i32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read one whole section, turning EOF into `ShortRead`
fn read_section<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    section: Section,
) -> Result<(), HeaderError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => HeaderError::ShortRead { section },
        _ => HeaderError::Io(e),
    })
}

// =============================================================================
// Text header
// =============================================================================

/// Human-readable header portion
#[derive(Debug, Clone, Serialize)]
pub struct TextHeader {
    pub ident: String,
    pub format_version: String,
    pub creator_name: String,
    pub creator_version: String,
    pub file_time: String,
    pub comment: String,
}

impl Default for TextHeader {
    fn default() -> Self {
        Self {
            ident: FILE_IDENT.to_string(),
            format_version: FORMAT_VERSION.to_string(),
            creator_name: String::new(),
            creator_version: String::new(),
            file_time: String::new(),
            comment: String::new(),
        }
    }
}

impl TextHeader {
    pub fn from_bytes(data: &[u8; TEXT_HEADER_SIZE]) -> Self {
        let mut r = FieldReader::new(data);
        let ident = r.str(16);
        let format_version = r.str(6);
        let creator_name = r.str(18);
        let creator_version = r.str(12);
        let file_time = r.str(18);
        r.skip(2); // CRLF
        let comment = r.str(256);
        debug_assert_eq!(r.position(), TEXT_HEADER_SIZE);

        Self {
            ident,
            format_version,
            creator_name,
            creator_version,
            file_time,
            comment,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = FieldWriter::with_capacity(TEXT_HEADER_SIZE);
        w.str(&self.ident, 16);
        w.str(&self.format_version, 6);
        w.str(&self.creator_name, 18);
        w.str(&self.creator_version, 12);
        w.str(&self.file_time, 18);
        w.bytes(b"\r\n");
        w.str(&self.comment, 256);
        w.finish()
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut buf = [0u8; TEXT_HEADER_SIZE];
        read_section(reader, &mut buf, Section::Text)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Check identifier and format version
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.ident != FILE_IDENT {
            return Err(HeaderError::InvalidIdent(self.ident.clone()));
        }
        if !self.format_version.starts_with(FORMAT_VERSION) {
            return Err(HeaderError::UnsupportedVersion(self.format_version.clone()));
        }
        Ok(())
    }
}

// =============================================================================
// Binary header
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CurveMapping {
    pub map_to: i32,
    pub show: i32,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ParamRange {
    pub start: f32,
    pub step: f32,
    pub end: f32,
}

/// Acquisition settings
#[derive(Debug, Clone, Serialize)]
pub struct BinaryHeader {
    pub curves: i32,
    pub bits_per_record: i32,
    pub routing_channels: i32,
    pub number_of_boards: i32,
    pub active_curve: i32,
    pub meas_mode: i32,
    pub sub_mode: i32,
    pub range_no: i32,
    pub offset: i32,
    /// Acquisition time in ms
    pub tacq_ms: i32,
    pub stop_at: i32,
    pub stop_on_ovfl: i32,
    pub restart: i32,
    pub disp_lin_log: i32,
    pub disp_time_from: i32,
    pub disp_time_to: i32,
    pub disp_counts_from: i32,
    pub disp_counts_to: i32,
    pub disp_curves: [CurveMapping; DISP_CURVES],
    pub params: [ParamRange; PARAM_RANGES],
    pub repeat_mode: i32,
    pub repeats_per_curve: i32,
    pub repeat_time: i32,
    pub repeat_wait_time: i32,
    pub script_name: String,
}

impl Default for BinaryHeader {
    fn default() -> Self {
        Self {
            curves: 0,
            bits_per_record: 32,
            routing_channels: 1,
            number_of_boards: 1,
            active_curve: 0,
            meas_mode: MEASMODE_T2,
            sub_mode: 0,
            range_no: 0,
            offset: 0,
            tacq_ms: 0,
            stop_at: 0,
            stop_on_ovfl: 0,
            restart: 0,
            disp_lin_log: 0,
            disp_time_from: 0,
            disp_time_to: 0,
            disp_counts_from: 0,
            disp_counts_to: 0,
            disp_curves: [CurveMapping::default(); DISP_CURVES],
            params: [ParamRange::default(); PARAM_RANGES],
            repeat_mode: 0,
            repeats_per_curve: 0,
            repeat_time: 0,
            repeat_wait_time: 0,
            script_name: String::new(),
        }
    }
}

impl BinaryHeader {
    pub fn from_bytes(data: &[u8; BINARY_HEADER_SIZE]) -> Self {
        let mut r = FieldReader::new(data);
        let curves = r.i32();
        let bits_per_record = r.i32();
        let routing_channels = r.i32();
        let number_of_boards = r.i32();
        let active_curve = r.i32();
        let meas_mode = r.i32();
        let sub_mode = r.i32();
        let range_no = r.i32();
        let offset = r.i32();
        let tacq_ms = r.i32();
        let stop_at = r.i32();
        let stop_on_ovfl = r.i32();
        let restart = r.i32();
        let disp_lin_log = r.i32();
        let disp_time_from = r.i32();
        let disp_time_to = r.i32();
        let disp_counts_from = r.i32();
        let disp_counts_to = r.i32();

        let mut disp_curves = [CurveMapping::default(); DISP_CURVES];
        for c in disp_curves.iter_mut() {
            c.map_to = r.i32();
            c.show = r.i32();
        }
        let mut params = [ParamRange::default(); PARAM_RANGES];
        for p in params.iter_mut() {
            p.start = r.f32();
            p.step = r.f32();
            p.end = r.f32();
        }

        let repeat_mode = r.i32();
        let repeats_per_curve = r.i32();
        let repeat_time = r.i32();
        let repeat_wait_time = r.i32();
        let script_name = r.str(20);
        debug_assert_eq!(r.position(), BINARY_HEADER_SIZE);

        Self {
            curves,
            bits_per_record,
            routing_channels,
            number_of_boards,
            active_curve,
            meas_mode,
            sub_mode,
            range_no,
            offset,
            tacq_ms,
            stop_at,
            stop_on_ovfl,
            restart,
            disp_lin_log,
            disp_time_from,
            disp_time_to,
            disp_counts_from,
            disp_counts_to,
            disp_curves,
            params,
            repeat_mode,
            repeats_per_curve,
            repeat_time,
            repeat_wait_time,
            script_name,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = FieldWriter::with_capacity(BINARY_HEADER_SIZE);
        for v in [
            self.curves,
            self.bits_per_record,
            self.routing_channels,
            self.number_of_boards,
            self.active_curve,
            self.meas_mode,
            self.sub_mode,
            self.range_no,
            self.offset,
            self.tacq_ms,
            self.stop_at,
            self.stop_on_ovfl,
            self.restart,
            self.disp_lin_log,
            self.disp_time_from,
            self.disp_time_to,
            self.disp_counts_from,
            self.disp_counts_to,
        ] {
            w.i32(v);
        }
        for c in &self.disp_curves {
            w.i32(c.map_to);
            w.i32(c.show);
        }
        for p in &self.params {
            w.f32(p.start);
            w.f32(p.step);
            w.f32(p.end);
        }
        w.i32(self.repeat_mode);
        w.i32(self.repeats_per_curve);
        w.i32(self.repeat_time);
        w.i32(self.repeat_wait_time);
        w.str(&self.script_name, 20);
        w.finish()
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut buf = [0u8; BINARY_HEADER_SIZE];
        read_section(reader, &mut buf, Section::Binary)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Only T2 mode files can be decoded
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.meas_mode != MEASMODE_T2 {
            return Err(HeaderError::UnsupportedMeasMode(self.meas_mode));
        }
        Ok(())
    }
}

// =============================================================================
// Board header
// =============================================================================

/// Router input channel settings
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RouterChannel {
    pub input_type: i32,
    pub input_level: i32,
    pub input_edge: i32,
    pub cfd_present: i32,
    pub cfd_level: i32,
    pub cfd_zero_cross: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardHeader {
    pub hardware_ident: String,
    pub hardware_version: String,
    pub hardware_serial: i32,
    pub sync_divider: i32,
    pub cfd_zero_cross0: i32,
    pub cfd_level0: i32,
    pub cfd_zero_cross1: i32,
    pub cfd_level1: i32,
    /// Board resolution in ns
    pub resolution: f32,
    pub router_model_code: i32,
    pub router_enabled: i32,
    pub router_channels: [RouterChannel; ROUTER_CHANNELS],
}

impl BoardHeader {
    pub fn from_bytes(data: &[u8; BOARD_HEADER_SIZE]) -> Self {
        let mut r = FieldReader::new(data);
        let hardware_ident = r.str(16);
        let hardware_version = r.str(8);
        let hardware_serial = r.i32();
        let sync_divider = r.i32();
        let cfd_zero_cross0 = r.i32();
        let cfd_level0 = r.i32();
        let cfd_zero_cross1 = r.i32();
        let cfd_level1 = r.i32();
        let resolution = r.f32();
        let router_model_code = r.i32();
        let router_enabled = r.i32();

        let mut router_channels = [RouterChannel::default(); ROUTER_CHANNELS];
        for ch in router_channels.iter_mut() {
            ch.input_type = r.i32();
            ch.input_level = r.i32();
            ch.input_edge = r.i32();
            ch.cfd_present = r.i32();
            ch.cfd_level = r.i32();
            ch.cfd_zero_cross = r.i32();
        }
        debug_assert_eq!(r.position(), BOARD_HEADER_SIZE);

        Self {
            hardware_ident,
            hardware_version,
            hardware_serial,
            sync_divider,
            cfd_zero_cross0,
            cfd_level0,
            cfd_zero_cross1,
            cfd_level1,
            resolution,
            router_model_code,
            router_enabled,
            router_channels,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = FieldWriter::with_capacity(BOARD_HEADER_SIZE);
        w.str(&self.hardware_ident, 16);
        w.str(&self.hardware_version, 8);
        w.i32(self.hardware_serial);
        w.i32(self.sync_divider);
        w.i32(self.cfd_zero_cross0);
        w.i32(self.cfd_level0);
        w.i32(self.cfd_zero_cross1);
        w.i32(self.cfd_level1);
        w.f32(self.resolution);
        w.i32(self.router_model_code);
        w.i32(self.router_enabled);
        for ch in &self.router_channels {
            w.i32(ch.input_type);
            w.i32(ch.input_level);
            w.i32(ch.input_edge);
            w.i32(ch.cfd_present);
            w.i32(ch.cfd_level);
            w.i32(ch.cfd_zero_cross);
        }
        w.finish()
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut buf = [0u8; BOARD_HEADER_SIZE];
        read_section(reader, &mut buf, Section::Board)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Router fields are meaningless without a router attached
    pub fn has_router(&self) -> bool {
        self.router_model_code > 0
    }
}

// =============================================================================
// TTTR header
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct TttrHeader {
    pub ext_devices: i32,
    pub reserved1: i32,
    pub reserved2: i32,
    pub cnt_rate0: i32,
    pub cnt_rate1: i32,
    pub stop_after: i32,
    pub stop_reason: i32,
    /// Number of T2 records in the file
    pub records: i32,
    /// Image header size in 4-byte words
    pub img_hdr_size: i32,
}

impl TttrHeader {
    pub fn from_bytes(data: &[u8; TTTR_HEADER_SIZE]) -> Self {
        let mut r = FieldReader::new(data);
        Self {
            ext_devices: r.i32(),
            reserved1: r.i32(),
            reserved2: r.i32(),
            cnt_rate0: r.i32(),
            cnt_rate1: r.i32(),
            stop_after: r.i32(),
            stop_reason: r.i32(),
            records: r.i32(),
            img_hdr_size: r.i32(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = FieldWriter::with_capacity(TTTR_HEADER_SIZE);
        for v in [
            self.ext_devices,
            self.reserved1,
            self.reserved2,
            self.cnt_rate0,
            self.cnt_rate1,
            self.stop_after,
            self.stop_reason,
            self.records,
            self.img_hdr_size,
        ] {
            w.i32(v);
        }
        w.finish()
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut buf = [0u8; TTTR_HEADER_SIZE];
        read_section(reader, &mut buf, Section::Tttr)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Negative counts cannot describe a record stream
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.records < 0 {
            return Err(HeaderError::InvalidField {
                field: "Records",
                value: self.records,
            });
        }
        if self.img_hdr_size < 0 {
            return Err(HeaderError::InvalidField {
                field: "ImgHdrSize",
                value: self.img_hdr_size,
            });
        }
        Ok(())
    }

    /// Validated record count
    pub fn record_count(&self) -> u64 {
        self.records.max(0) as u64
    }

    /// Image header length in bytes
    pub fn image_header_bytes(&self) -> u64 {
        self.img_hdr_size.max(0) as u64 * 4
    }
}

// =============================================================================
// Complete file header
// =============================================================================

/// All header sections of a .pt2 file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileHeader {
    pub text: TextHeader,
    pub binary: BinaryHeader,
    pub board: BoardHeader,
    pub tttr: TttrHeader,
}

impl FileHeader {
    /// Minimal valid T2 header
    pub fn t2(routing_channels: i32, records: i32) -> Self {
        let mut header = Self::default();
        header.binary.routing_channels = routing_channels;
        header.tttr.records = records;
        header
    }

    /// Read and validate all sections, leaving the reader positioned at the
    /// image header. Each section is validated before the next one is read.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let text = TextHeader::read_from(reader)?;
        text.validate()?;

        let binary = BinaryHeader::read_from(reader)?;
        binary.validate()?;

        let board = BoardHeader::read_from(reader)?;

        let tttr = TttrHeader::read_from(reader)?;
        tttr.validate()?;

        Ok(Self {
            text,
            binary,
            board,
            tttr,
        })
    }

    /// Write all sections (without the image header)
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize, HeaderError> {
        let mut written = 0;
        for section in [
            self.text.to_bytes(),
            self.binary.to_bytes(),
            self.board.to_bytes(),
            self.tttr.to_bytes(),
        ] {
            writer.write_all(&section)?;
            written += section.len();
        }
        Ok(written)
    }

    /// Skip the image header so the reader sits on the first record
    pub fn skip_image_header<R: Read>(&self, reader: &mut R) -> Result<(), HeaderError> {
        let len = self.tttr.image_header_bytes();
        if len == 0 {
            return Ok(());
        }
        let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
        if skipped < len {
            return Err(HeaderError::ShortRead {
                section: Section::Image,
            });
        }
        Ok(())
    }

    pub fn routing_channels(&self) -> i32 {
        self.binary.routing_channels
    }

    pub fn record_count(&self) -> u64 {
        self.tttr.record_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header_bytes(header: &FileHeader) -> Vec<u8> {
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_section_sizes() {
        let header = FileHeader::t2(4, 0);
        assert_eq!(header.text.to_bytes().len(), TEXT_HEADER_SIZE);
        assert_eq!(header.binary.to_bytes().len(), BINARY_HEADER_SIZE);
        assert_eq!(header.board.to_bytes().len(), BOARD_HEADER_SIZE);
        assert_eq!(header.tttr.to_bytes().len(), TTTR_HEADER_SIZE);
        assert_eq!(header_bytes(&header).len(), 728);
    }

    #[test]
    fn test_field_offsets() {
        let mut header = FileHeader::t2(3, 1000);
        header.tttr.img_hdr_size = 2;
        let bytes = header_bytes(&header);

        assert_eq!(&bytes[0..12], FILE_IDENT.as_bytes());
        assert_eq!(&bytes[16..19], b"2.0");
        assert_eq!(&bytes[70..72], b"\r\n");

        // RoutingChannels is the third int of the binary header
        let bin = TEXT_HEADER_SIZE;
        assert_eq!(i32::from_le_bytes(bytes[bin + 8..bin + 12].try_into().unwrap()), 3);
        // MeasMode is the sixth
        assert_eq!(i32::from_le_bytes(bytes[bin + 20..bin + 24].try_into().unwrap()), 2);

        // Records and ImgHdrSize are the last two ints of the TTTR header
        let tttr = TEXT_HEADER_SIZE + BINARY_HEADER_SIZE + BOARD_HEADER_SIZE;
        assert_eq!(i32::from_le_bytes(bytes[tttr + 28..tttr + 32].try_into().unwrap()), 1000);
        assert_eq!(i32::from_le_bytes(bytes[tttr + 32..tttr + 36].try_into().unwrap()), 2);
    }

    #[test]
    fn test_read_written_header() {
        let mut header = FileHeader::t2(4, 12345);
        header.text.creator_name = "PicoHarp Software".to_string();
        header.text.comment = "bead scan".to_string();
        header.binary.tacq_ms = 60_000;
        header.binary.params[1].step = 0.5;
        header.board.hardware_ident = "PicoHarp 300".to_string();
        header.board.resolution = 4.0;
        header.board.router_model_code = 1;
        header.board.router_channels[2].cfd_level = -80;

        let bytes = header_bytes(&header);
        let read = FileHeader::read_from(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(read.text.creator_name, "PicoHarp Software");
        assert_eq!(read.text.comment, "bead scan");
        assert_eq!(read.binary.tacq_ms, 60_000);
        assert_eq!(read.binary.params[1].step, 0.5);
        assert_eq!(read.board.resolution, 4.0);
        assert!(read.board.has_router());
        assert_eq!(read.board.router_channels[2].cfd_level, -80);
        assert_eq!(read.routing_channels(), 4);
        assert_eq!(read.record_count(), 12345);
    }

    #[test]
    fn test_invalid_ident() {
        let mut header = FileHeader::t2(4, 0);
        header.text.ident = "HydraHarp".to_string();
        let result = FileHeader::read_from(&mut Cursor::new(header_bytes(&header)));
        assert!(matches!(result, Err(HeaderError::InvalidIdent(ref s)) if s == "HydraHarp"));
    }

    #[test]
    fn test_unsupported_version() {
        let mut header = FileHeader::t2(4, 0);
        header.text.format_version = "1.0".to_string();
        let result = FileHeader::read_from(&mut Cursor::new(header_bytes(&header)));
        assert!(matches!(result, Err(HeaderError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_version_prefix_match() {
        let mut text = TextHeader::default();
        text.format_version = "2.0b".to_string();
        assert!(text.validate().is_ok());
    }

    #[test]
    fn test_wrong_meas_mode() {
        let mut header = FileHeader::t2(4, 0);
        header.binary.meas_mode = 3;
        let result = FileHeader::read_from(&mut Cursor::new(header_bytes(&header)));
        assert!(matches!(result, Err(HeaderError::UnsupportedMeasMode(3))));
    }

    #[test]
    fn test_ident_checked_before_binary_header() {
        // Only a text header with a bad ident: the ident error wins over EOF
        let mut text = TextHeader::default();
        text.ident = "garbage".to_string();
        let result = FileHeader::read_from(&mut Cursor::new(text.to_bytes()));
        assert!(matches!(result, Err(HeaderError::InvalidIdent(_))));
    }

    #[test]
    fn test_short_read_per_section() {
        let bytes = header_bytes(&FileHeader::t2(4, 0));
        let cases = [
            (100, Section::Text),
            (TEXT_HEADER_SIZE + 10, Section::Binary),
            (TEXT_HEADER_SIZE + BINARY_HEADER_SIZE + 10, Section::Board),
            (bytes.len() - 1, Section::Tttr),
        ];
        for (len, expected) in cases {
            let result = FileHeader::read_from(&mut Cursor::new(&bytes[..len]));
            match result {
                Err(HeaderError::ShortRead { section }) => assert_eq!(section, expected),
                other => panic!("expected short read in {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_records_rejected() {
        let header = FileHeader::t2(4, -1);
        let result = FileHeader::read_from(&mut Cursor::new(header_bytes(&header)));
        assert!(matches!(
            result,
            Err(HeaderError::InvalidField { field: "Records", value: -1 })
        ));
    }

    #[test]
    fn test_skip_image_header() {
        let mut header = FileHeader::t2(4, 1);
        header.tttr.img_hdr_size = 3;
        let mut bytes = header_bytes(&header);
        bytes.extend_from_slice(&[0xAA; 12]);
        bytes.extend_from_slice(&0x1000_0007u32.to_le_bytes());

        let mut cursor = Cursor::new(bytes);
        let read = FileHeader::read_from(&mut cursor).unwrap();
        read.skip_image_header(&mut cursor).unwrap();

        let mut record = [0u8; 4];
        cursor.read_exact(&mut record).unwrap();
        assert_eq!(u32::from_le_bytes(record), 0x1000_0007);
    }

    #[test]
    fn test_skip_image_header_short() {
        let mut header = FileHeader::t2(4, 1);
        header.tttr.img_hdr_size = 3;
        let mut bytes = header_bytes(&header);
        bytes.extend_from_slice(&[0xAA; 5]);

        let mut cursor = Cursor::new(bytes);
        let read = FileHeader::read_from(&mut cursor).unwrap();
        let result = read.skip_image_header(&mut cursor);
        assert!(matches!(
            result,
            Err(HeaderError::ShortRead { section: Section::Image })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = HeaderError::ShortRead {
            section: Section::Binary,
        };
        assert!(err.to_string().contains("bin header"));

        let err = HeaderError::UnsupportedMeasMode(3);
        assert!(err.to_string().contains("measurement mode 3"));
    }
}

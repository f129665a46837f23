//! Fixed-offset Little-Endian field access for header sections

/// Sequential reader over a header section buffer
///
/// Callers size the buffer to the section length up front, so every
/// accessor is in bounds by construction of the section layouts.
pub(crate) struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        buf
    }

    pub(crate) fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take::<4>())
    }

    pub(crate) fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take::<4>())
    }

    /// Fixed-width character field, cut at the first NUL
    pub(crate) fn str(&mut self, width: usize) -> String {
        let raw = &self.data[self.offset..self.offset + width];
        self.offset += width;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }

    pub(crate) fn skip(&mut self, width: usize) {
        self.offset += width;
    }

    pub(crate) fn position(&self) -> usize {
        self.offset
    }
}

/// Sequential writer producing a header section buffer
pub(crate) struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    pub(crate) fn with_capacity(size: usize) -> Self {
        Self {
            buf: Vec::with_capacity(size),
        }
    }

    pub(crate) fn i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// NUL-padded fixed-width field; longer strings are truncated
    pub(crate) fn str(&mut self, value: &str, width: usize) {
        let bytes = value.as_bytes();
        let n = bytes.len().min(width);
        self.buf.extend_from_slice(&bytes[..n]);
        self.buf.resize(self.buf.len() + (width - n), 0);
    }

    pub(crate) fn bytes(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_little_endian() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut r = FieldReader::new(&data);
        assert_eq!(r.i32(), 0x1234_5678);
        assert_eq!(r.i32(), -1);
        assert_eq!(r.position(), 8);
    }

    #[test]
    fn test_str_stops_at_nul() {
        let data = b"PicoHarp 300\0\0\0\0";
        let mut r = FieldReader::new(data);
        assert_eq!(r.str(16), "PicoHarp 300");
        assert_eq!(r.position(), 16);
    }

    #[test]
    fn test_str_without_nul_uses_full_width() {
        let data = b"2.0   ";
        let mut r = FieldReader::new(data);
        assert_eq!(r.str(6), "2.0   ");
    }

    #[test]
    fn test_writer_pads_and_truncates() {
        let mut w = FieldWriter::with_capacity(8);
        w.str("ab", 4);
        w.str("abcdef", 4);
        assert_eq!(w.finish(), b"ab\0\0abcd".to_vec());
    }

    #[test]
    fn test_writer_reader_f32() {
        let mut w = FieldWriter::with_capacity(4);
        w.f32(0.004);
        let buf = w.finish();
        let mut r = FieldReader::new(&buf);
        assert_eq!(r.f32(), 0.004);
    }
}

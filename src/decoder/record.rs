//! Raw T2 record bit extraction

use super::constants;

/// One T2 record split into its two bit fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Tick counter value (28 bits)
    pub time: u32,
    /// Input channel (4 bits)
    pub channel: u8,
}

impl Record {
    /// Split a raw word into time and channel
    #[inline]
    pub fn decode(word: u32) -> Self {
        Self {
            time: word & constants::TIME_MASK,
            channel: ((word >> constants::CHANNEL_SHIFT) & constants::CHANNEL_MASK) as u8,
        }
    }

    /// Decode a record from its 4-byte Little-Endian file representation
    #[inline]
    pub fn from_le_bytes(bytes: [u8; constants::RECORD_SIZE]) -> Self {
        Self::decode(u32::from_le_bytes(bytes))
    }

    /// Pack back into a raw word. Out-of-range bits are masked off.
    #[inline]
    pub fn encode(&self) -> u32 {
        ((self.channel as u32 & constants::CHANNEL_MASK) << constants::CHANNEL_SHIFT)
            | (self.time & constants::TIME_MASK)
    }

    /// Whether this is an overflow or marker record
    #[inline]
    pub fn is_special(&self) -> bool {
        self.channel == constants::SPECIAL_CHANNEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero() {
        let r = Record::decode(0);
        assert_eq!(r.time, 0);
        assert_eq!(r.channel, 0);
    }

    #[test]
    fn test_decode_all_ones() {
        let r = Record::decode(0xFFFF_FFFF);
        assert_eq!(r.time, 0x0FFF_FFFF);
        assert_eq!(r.channel, 0xF);
        assert!(r.is_special());
    }

    #[test]
    fn test_decode_channel_and_time() {
        // channel=1, time=0x0123_4567
        let r = Record::decode(0x1123_4567);
        assert_eq!(r.channel, 1);
        assert_eq!(r.time, 0x0123_4567);
        assert!(!r.is_special());
    }

    #[test]
    fn test_from_le_bytes() {
        // 0x2000_0064 stored Little-Endian
        let r = Record::from_le_bytes([0x64, 0x00, 0x00, 0x20]);
        assert_eq!(r.channel, 2);
        assert_eq!(r.time, 100);
    }

    #[test]
    fn test_encode_masks_time() {
        let r = Record {
            time: 0xF000_0001,
            channel: 3,
        };
        assert_eq!(r.encode(), 0x3000_0001);
    }

    #[test]
    fn test_time_boundaries_survive_encode() {
        for channel in 0..=15u8 {
            for time in [0u32, 1, 0x0F, 0x10, 0x0800_0000, 0x0FFF_FFFE, 0x0FFF_FFFF] {
                let r = Record { time, channel };
                assert_eq!(Record::decode(r.encode()), r);
            }
        }
    }
}

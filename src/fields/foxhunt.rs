//! # Foxhunt Register Fields
//!
//! FOXHUNT_CTRL packs volume, keying speed and beacon interval into one
//! register; FOXHUNT_MSG0..3 carry a 16-byte NUL-padded message.
//!
//! ```text
//! FOXHUNT_CTRL:  31            16 15      8 7       0
//!               |    volume      |   wpm   | interval|
//! ```

use serde::Serialize;

/// Message capacity in bytes
pub const FOXHUNT_MESSAGE_LEN: usize = 16;

/// Decoded FOXHUNT_CTRL register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FoxhuntControl {
    /// Beacon volume (0-65535)
    pub volume: u16,

    /// Morse speed in words per minute
    pub wpm: u8,

    /// Seconds between transmissions, 0 disables foxhunt mode
    pub interval: u8,
}

impl FoxhuntControl {
    /// Pack into the register layout
    pub fn pack(self) -> u32 {
        (u32::from(self.volume) << 16) | (u32::from(self.wpm) << 8) | u32::from(self.interval)
    }

    /// Unpack from a raw register value
    pub fn unpack(value: u32) -> Self {
        Self {
            volume: ((value >> 16) & 0xFFFF) as u16,
            wpm: ((value >> 8) & 0xFF) as u8,
            interval: (value & 0xFF) as u8,
        }
    }

    /// Replace the fields that are `Some`, keeping the rest
    pub fn merged(self, volume: Option<u16>, wpm: Option<u8>, interval: Option<u8>) -> Self {
        Self {
            volume: volume.unwrap_or(self.volume),
            wpm: wpm.unwrap_or(self.wpm),
            interval: interval.unwrap_or(self.interval),
        }
    }
}

/// Encode a message into the four FOXHUNT_MSG register values
///
/// Text longer than 16 bytes is truncated; shorter text is NUL padded.
/// Each register holds four consecutive bytes, little-endian.
pub fn encode_message(text: &str) -> [u32; 4] {
    let mut buffer = [0u8; FOXHUNT_MESSAGE_LEN];
    let bytes = text.as_bytes();
    let len = bytes.len().min(FOXHUNT_MESSAGE_LEN);
    buffer[..len].copy_from_slice(&bytes[..len]);

    let mut registers = [0u32; 4];
    for (register, chunk) in registers.iter_mut().zip(buffer.chunks_exact(4)) {
        *register = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    registers
}

/// Decode the four FOXHUNT_MSG register values back into text
///
/// The message ends at the first NUL byte, or after all 16 bytes.
pub fn decode_message(registers: [u32; 4]) -> String {
    let bytes = message_bytes(registers);
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Reassemble the raw 16-byte message buffer
pub fn message_bytes(registers: [u32; 4]) -> [u8; FOXHUNT_MESSAGE_LEN] {
    let mut bytes = [0u8; FOXHUNT_MESSAGE_LEN];
    for (chunk, register) in bytes.chunks_exact_mut(4).zip(registers) {
        chunk.copy_from_slice(&register.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let ctrl = FoxhuntControl {
            volume: 0x1234,
            wpm: 0x56,
            interval: 0x78,
        };
        assert_eq!(ctrl.pack(), 0x1234_5678);
    }

    #[test]
    fn test_unpack_layout() {
        let ctrl = FoxhuntControl::unpack(0xFFFF_1E3C);
        assert_eq!(ctrl.volume, 0xFFFF);
        assert_eq!(ctrl.wpm, 30);
        assert_eq!(ctrl.interval, 60);
    }

    #[test]
    fn test_pack_unpack_extremes() {
        for volume in [0u16, 1, 0x7FFF, 0x8000, u16::MAX] {
            for wpm in [0u8, 1, 20, 0x80, u8::MAX] {
                for interval in [0u8, 1, 60, u8::MAX] {
                    let ctrl = FoxhuntControl {
                        volume,
                        wpm,
                        interval,
                    };
                    assert_eq!(FoxhuntControl::unpack(ctrl.pack()), ctrl);
                }
            }
        }
    }

    #[test]
    fn test_merged_keeps_unset_fields() {
        let current = FoxhuntControl {
            volume: 1000,
            wpm: 15,
            interval: 30,
        };
        let updated = current.merged(None, Some(20), None);
        let expected = FoxhuntControl {
            volume: 1000,
            wpm: 20,
            interval: 30,
        };
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_encode_message_layout() {
        let regs = encode_message("VVV DE N0CALL");
        assert_eq!(regs[0], u32::from_le_bytes(*b"VVV "));
        assert_eq!(regs[1], u32::from_le_bytes(*b"DE N"));
        assert_eq!(regs[2], u32::from_le_bytes(*b"0CAL"));
        assert_eq!(regs[3], u32::from_le_bytes([b'L', 0, 0, 0]));
    }

    #[test]
    fn test_encode_message_truncates() {
        let regs = encode_message("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(decode_message(regs), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn test_encode_empty_message() {
        assert_eq!(encode_message(""), [0, 0, 0, 0]);
        assert_eq!(decode_message([0, 0, 0, 0]), "");
    }

    #[test]
    fn test_message_round_trip() {
        for text in ["A", "N0CALL", "FOX", "0123456789ABCDEF", "hello world"] {
            assert_eq!(decode_message(encode_message(text)), text);
        }
    }

    #[test]
    fn test_decode_without_terminator_uses_all_bytes() {
        let regs = [
            u32::from_le_bytes(*b"ABCD"),
            u32::from_le_bytes(*b"EFGH"),
            u32::from_le_bytes(*b"IJKL"),
            u32::from_le_bytes(*b"MNOP"),
        ];
        assert_eq!(decode_message(regs), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn test_decode_stops_at_first_nul() {
        let regs = [
            u32::from_le_bytes([b'A', b'B', 0, b'X']),
            u32::from_le_bytes(*b"EFGH"),
            0,
            0,
        ];
        assert_eq!(decode_message(regs), "AB");
    }
}

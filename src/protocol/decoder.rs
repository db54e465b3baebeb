//! # AIOC Response Decoder
//!
//! Extracts register values from 7-byte feature-report responses.

use super::{RESPONSE_SIZE, VALUE_OFFSET};
use crate::error::{AiocError, Result};

/// Decode a register read response
///
/// Bytes 0..3 are header/echo bytes and are ignored; bytes 3..7 carry the
/// value little-endian. Extra trailing bytes are ignored.
///
/// # Errors
///
/// Returns `ShortRead` if fewer than 7 bytes are present
pub fn decode_read_response(response: &[u8]) -> Result<u32> {
    if response.len() < RESPONSE_SIZE {
        return Err(AiocError::ShortRead {
            got: response.len(),
            expected: RESPONSE_SIZE,
        });
    }

    let value = [
        response[VALUE_OFFSET],
        response[VALUE_OFFSET + 1],
        response[VALUE_OFFSET + 2],
        response[VALUE_OFFSET + 3],
    ];

    Ok(u32::from_le_bytes(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(header: [u8; 3], value: u32) -> Vec<u8> {
        let mut response = header.to_vec();
        response.extend_from_slice(&value.to_le_bytes());
        response
    }

    #[test]
    fn test_decode_magic() {
        let response = [0x00, 0x00, 0x00, b'A', b'I', b'O', b'C'];
        let value = decode_read_response(&response).unwrap();
        assert_eq!(value.to_le_bytes(), *b"AIOC");
    }

    #[test]
    fn test_decode_ignores_header() {
        for address in [0x00u8, 0x72, 0xA5, 0xFF] {
            for value in [0u32, 1, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
                let response = response_for([0xAA, 0x01, address], value);
                assert_eq!(decode_read_response(&response).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let response = [0, 0, 0, 0x78, 0x56, 0x34, 0x12, 0xEE];
        assert_eq!(decode_read_response(&response).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_decode_short_read() {
        let response = [0u8; 6];
        match decode_read_response(&response) {
            Err(AiocError::ShortRead { got, expected }) => {
                assert_eq!(got, 6);
                assert_eq!(expected, 7);
            }
            other => panic!("Expected ShortRead, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(
            decode_read_response(&[]),
            Err(AiocError::ShortRead { got: 0, .. })
        ));
    }
}

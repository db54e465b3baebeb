//! # AIOC Frame Encoder
//!
//! Builds the outbound HID reports: 8-byte register feature reports and the
//! 5-byte raw PTT output report.

use super::*;
use crate::error::{AiocError, Result};

/// Build a register frame: report id 0, opcode, address, little-endian payload
fn register_frame(command: Command, address: u8, value: u32) -> RegisterFrame {
    let mut frame = [0u8; REGISTER_FRAME_SIZE];
    frame[1] = command.opcode();
    frame[2] = address;
    frame[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&value.to_le_bytes());
    frame
}

/// Encode a register read request
///
/// # Examples
///
/// ```
/// use aioc_util::protocol::encoder::encode_read_request;
///
/// assert_eq!(encode_read_request(0x72), [0, 0x00, 0x72, 0, 0, 0, 0, 0]);
/// ```
pub fn encode_read_request(address: u8) -> RegisterFrame {
    register_frame(Command::None, address, 0)
}

/// Encode a register write
///
/// # Arguments
///
/// * `address` - Register address
/// * `value` - 32-bit value, sent little-endian in bytes 3..=6
///
/// # Examples
///
/// ```
/// use aioc_util::protocol::encoder::encode_write_request;
///
/// let frame = encode_write_request(0x72, 0x0000_0002);
/// assert_eq!(frame, [0, 0x01, 0x72, 0x02, 0x00, 0x00, 0x00, 0x00]);
/// ```
pub fn encode_write_request(address: u8, value: u32) -> RegisterFrame {
    register_frame(Command::WriteStrobe, address, value)
}

/// Encode a bare command (defaults, reboot, recall, store)
pub fn encode_command(command: Command) -> RegisterFrame {
    register_frame(command, 0x00, 0)
}

/// Encode a raw PTT output report
///
/// # Arguments
///
/// * `io_line` - CM108 GPIO line number (1-8)
/// * `on` - Drive the line active
///
/// # Returns
///
/// * `Result<RawPttFrame>` - `[0, 0, data, mask, 0]`
///
/// # Errors
///
/// Returns `InvalidValue` if `io_line` is outside 1-8
pub fn encode_raw_ptt(io_line: u8, on: bool) -> Result<RawPttFrame> {
    if !(1..=8).contains(&io_line) {
        return Err(AiocError::InvalidValue(format!(
            "I/O line {} out of range (1-8)",
            io_line
        )));
    }

    let shift = io_line - 1;
    let io_mask = 1u8 << shift;
    let io_data = u8::from(on) << shift;

    Ok([0, 0, io_data, io_mask, 0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_read_request() {
        let frame = encode_read_request(registers::MAGIC);
        assert_eq!(frame, [0, 0, 0, 0, 0, 0, 0, 0]);

        let frame = encode_read_request(registers::FOXHUNT_MSG3);
        assert_eq!(frame, [0, 0, 0xA5, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_write_request_rx_gain() {
        let frame = encode_write_request(0x72, 0x0000_0002);
        assert_eq!(frame, [0, 0x01, 0x72, 0x02, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_write_request_little_endian() {
        let frame = encode_write_request(registers::USBID, 0x7388_1209);
        assert_eq!(frame, [0, 0x01, 0x08, 0x09, 0x12, 0x88, 0x73, 0x00]);
    }

    #[test]
    fn test_encode_write_request_high_bit_no_sign_issue() {
        let frame = encode_write_request(0xA0, 0xFFFF_FFFF);
        assert_eq!(frame, [0, 0x01, 0xA0, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn test_encode_command() {
        assert_eq!(encode_command(Command::Defaults), [0, 0x10, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_command(Command::Reboot), [0, 0x20, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_command(Command::Recall), [0, 0x40, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_command(Command::Store), [0, 0x80, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_raw_ptt_line1_on() {
        assert_eq!(encode_raw_ptt(1, true).unwrap(), [0, 0, 0x01, 0x01, 0]);
    }

    #[test]
    fn test_encode_raw_ptt_line1_off() {
        assert_eq!(encode_raw_ptt(1, false).unwrap(), [0, 0, 0x00, 0x01, 0]);
    }

    #[test]
    fn test_encode_raw_ptt_line2() {
        assert_eq!(encode_raw_ptt(2, true).unwrap(), [0, 0, 0x02, 0x02, 0]);
        assert_eq!(encode_raw_ptt(2, false).unwrap(), [0, 0, 0x00, 0x02, 0]);
    }

    #[test]
    fn test_encode_raw_ptt_line4_off() {
        assert_eq!(encode_raw_ptt(4, false).unwrap(), [0, 0, 0x00, 0x08, 0]);
    }

    #[test]
    fn test_encode_raw_ptt_out_of_range() {
        assert!(matches!(encode_raw_ptt(0, true), Err(AiocError::InvalidValue(_))));
        assert!(matches!(encode_raw_ptt(9, true), Err(AiocError::InvalidValue(_))));
        assert!(encode_raw_ptt(8, true).is_ok());
    }
}

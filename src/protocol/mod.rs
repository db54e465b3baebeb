//! # AIOC Register Protocol
//!
//! Byte-level protocol spoken over the AIOC's vendor HID interface.
//!
//! This module handles:
//! - Register address map
//! - Read/write/command feature-report frames (8 bytes out, 7 bytes back)
//! - Raw PTT output reports (5 bytes)

pub mod registers;
pub mod encoder;
pub mod decoder;

/// Default AIOC USB vendor ID (pid.codes)
pub const AIOC_VENDOR_ID: u16 = 0x1209;

/// Default AIOC USB product ID
pub const AIOC_PRODUCT_ID: u16 = 0x7388;

/// Value of the MAGIC register, as little-endian ASCII
pub const AIOC_MAGIC: [u8; 4] = *b"AIOC";

/// Register read/write/command frame size (report id + cmd + addr + 4 data + pad)
pub const REGISTER_FRAME_SIZE: usize = 8;

/// Register response size (3 header bytes + 4 data bytes)
pub const RESPONSE_SIZE: usize = 7;

/// Raw PTT output report size
pub const RAW_PTT_FRAME_SIZE: usize = 5;

/// Offset of the little-endian 32-bit value in frames and responses
pub const VALUE_OFFSET: usize = 3;

/// Register request frame
pub type RegisterFrame = [u8; REGISTER_FRAME_SIZE];

/// Raw PTT output report
pub type RawPttFrame = [u8; RAW_PTT_FRAME_SIZE];

/// Command opcodes carried in byte 1 of a register frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Plain register read
    None = 0x00,
    /// Latch the payload into the addressed register
    WriteStrobe = 0x01,
    /// Load hardware defaults
    Defaults = 0x10,
    /// Reboot the device
    Reboot = 0x20,
    /// Recall settings from flash
    Recall = 0x40,
    /// Store settings into flash
    Store = 0x80,
}

impl Command {
    /// Wire value of the opcode
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

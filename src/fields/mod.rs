//! # Register Field Codecs
//!
//! Gives meaning to raw 32-bit register values.
//!
//! This module handles:
//! - Named-flag masks (PTT source, CM108 button source)
//! - Value enumerations (RX gain, TX boost)
//! - Packed foxhunt control and message registers
//! - USB id packing and numeric user input

pub mod flags;
pub mod audio;
pub mod foxhunt;
pub mod usb;

pub use audio::{RxGain, TxBoost};
pub use flags::{ButtonSource, PttSource};
pub use foxhunt::FoxhuntControl;
pub use usb::UsbId;

use crate::error::{AiocError, Result};

/// Parse a non-negative integer in decimal or `0x`/`0X` hex
///
/// # Errors
///
/// Returns `InvalidFormat` if the text is not a number
pub fn parse_number(text: &str) -> Result<u64> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };

    parsed.map_err(|e| AiocError::InvalidFormat(format!("'{}' is not a number: {}", text, e)))
}

/// Parse a number and check it fits in `max`
///
/// # Errors
///
/// Returns `InvalidFormat` for non-numbers and `OutOfRange` above `max`
pub fn parse_bounded(what: &'static str, text: &str, max: u64) -> Result<u64> {
    let value = parse_number(text)?;
    if value > max {
        return Err(AiocError::OutOfRange { what, value, max });
    }
    Ok(value)
}

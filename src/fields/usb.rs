//! USB identity stored in the USBID register and the `VID,PID` text form.

use std::fmt;
use std::str::FromStr;

use crate::error::{AiocError, Result};
use crate::fields::parse_number;

/// USB vendor/product id pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbId {
    pub vid: u16,
    pub pid: u16,
}

impl UsbId {
    pub fn new(vid: u16, pid: u16) -> Self {
        Self { vid, pid }
    }

    /// USBID register layout: PID in the high half, VID in the low half
    pub fn to_register(self) -> u32 {
        (u32::from(self.pid) << 16) | u32::from(self.vid)
    }

    pub fn from_register(value: u32) -> Self {
        Self {
            vid: (value & 0xFFFF) as u16,
            pid: (value >> 16) as u16,
        }
    }
}

fn parse_id(what: &'static str, text: &str) -> Result<u16> {
    let value = parse_number(text.trim())?;
    u16::try_from(value).map_err(|_| AiocError::OutOfRange {
        what,
        value,
        max: u64::from(u16::MAX),
    })
}

impl FromStr for UsbId {
    type Err = AiocError;

    /// Parse `VID,PID`, each half decimal or `0x` hex
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(AiocError::InvalidFormat(format!(
                "'{}' is not VID,PID",
                s
            )));
        }

        Ok(Self {
            vid: parse_id("VID", parts[0])?,
            pid: parse_id("PID", parts[1])?,
        })
    }
}

impl fmt::Display for UsbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x},0x{:04x}", self.vid, self.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_pair() {
        let id: UsbId = "0x1209,0x7388".parse().unwrap();
        assert_eq!(id, UsbId::new(0x1209, 0x7388));
    }

    #[test]
    fn test_parse_mixed_radix_with_spaces() {
        let id: UsbId = "4617, 0X7388".parse().unwrap();
        assert_eq!(id, UsbId::new(0x1209, 0x7388));
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert!(matches!("0x1209".parse::<UsbId>(), Err(AiocError::InvalidFormat(_))));
        assert!(matches!("1,2,3".parse::<UsbId>(), Err(AiocError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_bad_number() {
        assert!(matches!("0xZZ,1".parse::<UsbId>(), Err(AiocError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_out_of_range() {
        match "0x10000,1".parse::<UsbId>() {
            Err(AiocError::OutOfRange { what, value, .. }) => {
                assert_eq!(what, "VID");
                assert_eq!(value, 0x10000);
            }
            other => panic!("Expected OutOfRange, got: {:?}", other),
        }
    }

    #[test]
    fn test_register_packing() {
        let id = UsbId::new(0x1209, 0x7388);
        assert_eq!(id.to_register(), 0x7388_1209);
        assert_eq!(UsbId::from_register(0x7388_1209), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(UsbId::new(0x1209, 0x7388).to_string(), "0x1209,0x7388");
    }
}

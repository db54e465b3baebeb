//! # AIOC Register Map
//!
//! Addresses of the 32-bit configuration registers exposed by the AIOC
//! firmware. [`REGISTER_MAP`] lists them in address order for full dumps.

/// Magic identifier, reads back as "AIOC"
pub const MAGIC: u8 = 0x00;
/// USB VID (bits 15..0) and PID (bits 31..16)
pub const USBID: u8 = 0x08;
/// PTT1 source mux
pub const AIOC_IOMUX0: u8 = 0x24;
/// PTT2 source mux
pub const AIOC_IOMUX1: u8 = 0x25;
/// CM108 button 1 (VolUP) source mux
pub const CM108_IOMUX0: u8 = 0x44;
/// CM108 button 2 (VolDN) source mux
pub const CM108_IOMUX1: u8 = 0x45;
/// CM108 button 3 (PlbMute) source mux
pub const CM108_IOMUX2: u8 = 0x46;
/// CM108 button 4 (RecMute) source mux
pub const CM108_IOMUX3: u8 = 0x47;
pub const SERIAL_CTRL: u8 = 0x60;
pub const SERIAL_IOMUX0: u8 = 0x64;
pub const SERIAL_IOMUX1: u8 = 0x65;
pub const SERIAL_IOMUX2: u8 = 0x66;
pub const SERIAL_IOMUX3: u8 = 0x67;
/// RX gain selection
pub const AUDIO_RX: u8 = 0x72;
/// TX boost selection
pub const AUDIO_TX: u8 = 0x78;
/// Virtual PTT level control
pub const VPTT_LVLCTRL: u8 = 0x82;
/// Virtual PTT timing control
pub const VPTT_TIMCTRL: u8 = 0x84;
/// Virtual COS level control
pub const VCOS_LVLCTRL: u8 = 0x92;
/// Virtual COS timing control
pub const VCOS_TIMCTRL: u8 = 0x94;
/// Foxhunt volume/wpm/interval
pub const FOXHUNT_CTRL: u8 = 0xA0;
/// Foxhunt message, bytes 0..4
pub const FOXHUNT_MSG0: u8 = 0xA2;
/// Foxhunt message, bytes 4..8
pub const FOXHUNT_MSG1: u8 = 0xA3;
/// Foxhunt message, bytes 8..12
pub const FOXHUNT_MSG2: u8 = 0xA4;
/// Foxhunt message, bytes 12..16
pub const FOXHUNT_MSG3: u8 = 0xA5;

/// Foxhunt message registers in byte order
pub const FOXHUNT_MSG: [u8; 4] = [FOXHUNT_MSG0, FOXHUNT_MSG1, FOXHUNT_MSG2, FOXHUNT_MSG3];

/// A named device register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    /// Register address (byte 2 of a request frame)
    pub address: u8,

    /// Display name used in dumps
    pub name: &'static str,
}

const fn reg(address: u8, name: &'static str) -> Register {
    Register { address, name }
}

/// Every known register, in address order
pub const REGISTER_MAP: &[Register] = &[
    reg(MAGIC, "MAGIC"),
    reg(USBID, "USBID"),
    reg(AIOC_IOMUX0, "AIOC_IOMUX0"),
    reg(AIOC_IOMUX1, "AIOC_IOMUX1"),
    reg(CM108_IOMUX0, "CM108_IOMUX0"),
    reg(CM108_IOMUX1, "CM108_IOMUX1"),
    reg(CM108_IOMUX2, "CM108_IOMUX2"),
    reg(CM108_IOMUX3, "CM108_IOMUX3"),
    reg(SERIAL_CTRL, "SERIAL_CTRL"),
    reg(SERIAL_IOMUX0, "SERIAL_IOMUX0"),
    reg(SERIAL_IOMUX1, "SERIAL_IOMUX1"),
    reg(SERIAL_IOMUX2, "SERIAL_IOMUX2"),
    reg(SERIAL_IOMUX3, "SERIAL_IOMUX3"),
    reg(AUDIO_RX, "AUDIO_RX"),
    reg(AUDIO_TX, "AUDIO_TX"),
    reg(VPTT_LVLCTRL, "VPTT_LVLCTRL"),
    reg(VPTT_TIMCTRL, "VPTT_TIMCTRL"),
    reg(VCOS_LVLCTRL, "VCOS_LVLCTRL"),
    reg(VCOS_TIMCTRL, "VCOS_TIMCTRL"),
    reg(FOXHUNT_CTRL, "FOXHUNT_CTRL"),
    reg(FOXHUNT_MSG0, "FOXHUNT_MSG0"),
    reg(FOXHUNT_MSG1, "FOXHUNT_MSG1"),
    reg(FOXHUNT_MSG2, "FOXHUNT_MSG2"),
    reg(FOXHUNT_MSG3, "FOXHUNT_MSG3"),
];

/// Look up a register by its display name
pub fn by_name(name: &str) -> Option<Register> {
    REGISTER_MAP.iter().copied().find(|r| r.name == name)
}

/// Look up the display name of an address
pub fn name_of(address: u8) -> Option<&'static str> {
    REGISTER_MAP
        .iter()
        .find(|r| r.address == address)
        .map(|r| r.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_map_size() {
        assert_eq!(REGISTER_MAP.len(), 24);
    }

    #[test]
    fn test_register_map_is_address_ordered() {
        for pair in REGISTER_MAP.windows(2) {
            assert!(
                pair[0].address < pair[1].address,
                "{} (0x{:02x}) must precede {} (0x{:02x})",
                pair[0].name, pair[0].address, pair[1].name, pair[1].address
            );
        }
    }

    #[test]
    fn test_register_names_unique() {
        for (i, a) in REGISTER_MAP.iter().enumerate() {
            for b in &REGISTER_MAP[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_address_span() {
        assert_eq!(REGISTER_MAP.first().map(|r| r.address), Some(0x00));
        assert_eq!(REGISTER_MAP.last().map(|r| r.address), Some(0xA5));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(by_name("AUDIO_RX").map(|r| r.address), Some(0x72));
        assert_eq!(by_name("audio_rx"), None);
        assert_eq!(name_of(0xA0), Some("FOXHUNT_CTRL"));
        assert_eq!(name_of(0x01), None);
    }

    #[test]
    fn test_foxhunt_message_registers_consecutive() {
        assert_eq!(FOXHUNT_MSG, [0xA2, 0xA3, 0xA4, 0xA5]);
    }
}

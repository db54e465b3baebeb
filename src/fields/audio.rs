//! # Audio Register Fields
//!
//! AUDIO_RX and AUDIO_TX hold value enumerations, not bitmasks: exactly one
//! value from a small set is meaningful.

use std::fmt;
use std::str::FromStr;

use crate::error::{AiocError, Result};

/// Label shown for register values outside the enumeration
pub const UNKNOWN_LABEL: &str = "unknown";

/// Receive gain (AUDIO_RX)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RxGain {
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl RxGain {
    const TABLE: &'static [(RxGain, &'static str, u32)] = &[
        (RxGain::X1, "1x", 0x0000_0000),
        (RxGain::X2, "2x", 0x0000_0001),
        (RxGain::X4, "4x", 0x0000_0002),
        (RxGain::X8, "8x", 0x0000_0003),
        (RxGain::X16, "16x", 0x0000_0004),
    ];

    /// Register value
    pub fn value(self) -> u32 {
        Self::TABLE
            .iter()
            .find(|(gain, _, _)| *gain == self)
            .map_or(0, |&(_, _, value)| value)
    }

    /// User-facing name, e.g. `4x`
    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(gain, _, _)| *gain == self)
            .map_or(UNKNOWN_LABEL, |&(_, name, _)| name)
    }

    /// Interpret a raw register value
    pub fn from_value(value: u32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|&&(_, _, v)| v == value)
            .map(|&(gain, _, _)| gain)
    }

    /// Name for a raw register value, `unknown` if unrecognised
    pub fn label(value: u32) -> &'static str {
        Self::from_value(value).map_or(UNKNOWN_LABEL, Self::name)
    }

    /// All accepted names, in table order
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::TABLE.iter().map(|&(_, name, _)| name)
    }
}

impl FromStr for RxGain {
    type Err = AiocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|&&(_, name, _)| name == s)
            .map(|&(gain, _, _)| gain)
            .ok_or_else(|| {
                AiocError::InvalidFormat(format!(
                    "invalid audio RX gain '{}', expected one of: {}",
                    s,
                    Self::names().collect::<Vec<_>>().join(", ")
                ))
            })
    }
}

impl fmt::Display for RxGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transmit boost (AUDIO_TX)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxBoost {
    Off,
    On,
}

impl TxBoost {
    const TABLE: &'static [(TxBoost, &'static str, u32)] = &[
        (TxBoost::Off, "off", 0x0000_0000),
        (TxBoost::On, "on", 0x0000_0100),
    ];

    pub fn value(self) -> u32 {
        Self::TABLE
            .iter()
            .find(|(boost, _, _)| *boost == self)
            .map_or(0, |&(_, _, value)| value)
    }

    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(boost, _, _)| *boost == self)
            .map_or(UNKNOWN_LABEL, |&(_, name, _)| name)
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|&&(_, _, v)| v == value)
            .map(|&(boost, _, _)| boost)
    }

    pub fn label(value: u32) -> &'static str {
        Self::from_value(value).map_or(UNKNOWN_LABEL, Self::name)
    }
}

impl FromStr for TxBoost {
    type Err = AiocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|&&(_, name, _)| name == s)
            .map(|&(boost, _, _)| boost)
            .ok_or_else(|| {
                AiocError::InvalidFormat(format!(
                    "invalid audio TX boost '{}', expected off or on",
                    s
                ))
            })
    }
}

impl fmt::Display for TxBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rx_gain_values() {
        assert_eq!(RxGain::X1.value(), 0);
        assert_eq!(RxGain::X2.value(), 1);
        assert_eq!(RxGain::X4.value(), 2);
        assert_eq!(RxGain::X8.value(), 3);
        assert_eq!(RxGain::X16.value(), 4);
    }

    #[test]
    fn test_rx_gain_parse() {
        assert_eq!("16x".parse::<RxGain>().unwrap(), RxGain::X16);
        assert_eq!("1x".parse::<RxGain>().unwrap(), RxGain::X1);
        assert!(matches!("3x".parse::<RxGain>(), Err(AiocError::InvalidFormat(_))));
        assert!("16X".parse::<RxGain>().is_err());
    }

    #[test]
    fn test_rx_gain_label() {
        assert_eq!(RxGain::label(2), "4x");
        assert_eq!(RxGain::label(5), "unknown");
        // Value enumeration, not a mask: combined bits are not a gain
        assert_eq!(RxGain::label(0x0000_0101), "unknown");
    }

    #[test]
    fn test_tx_boost() {
        assert_eq!(TxBoost::On.value(), 0x100);
        assert_eq!(TxBoost::Off.value(), 0);
        assert_eq!("on".parse::<TxBoost>().unwrap(), TxBoost::On);
        assert!(matches!("yes".parse::<TxBoost>(), Err(AiocError::InvalidFormat(_))));
        assert_eq!(TxBoost::label(0x100), "on");
        assert_eq!(TxBoost::label(0x1), "unknown");
    }

    #[test]
    fn test_display_matches_name() {
        for name in RxGain::names() {
            assert_eq!(name.parse::<RxGain>().unwrap().to_string(), name);
        }
        assert_eq!(TxBoost::Off.to_string(), "off");
        for boost in [TxBoost::Off, TxBoost::On] {
            assert_eq!(TxBoost::from_value(boost.value()), Some(boost));
            assert_eq!(boost.name().parse::<TxBoost>().unwrap(), boost);
        }
    }
}

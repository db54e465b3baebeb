//! # Named-Flag Register Fields
//!
//! PTT source and CM108 button source registers hold bitmasks over small
//! named vocabularies. Each vocabulary is one ordered `(name, bit)` table that
//! drives both parsing and formatting, so `"A|B"` text and the register value
//! always agree.

use std::fmt;
use std::str::FromStr;

use crate::error::{AiocError, Result};

/// Ordered `(name, bit)` table; declaration order is the display order
pub type Vocabulary = &'static [(&'static str, u32)];

/// Parse `|`-separated flag names into a mask
///
/// Tokens are trimmed and matched case-sensitively. An empty string yields 0.
///
/// # Errors
///
/// Returns `UnknownFlag` for the first token not found in `vocabulary`
pub fn parse_flags(vocabulary: Vocabulary, text: &str) -> Result<u32> {
    if text.is_empty() {
        return Ok(0);
    }

    text.split('|').try_fold(0u32, |mask, token| {
        let token = token.trim();
        vocabulary
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, bit)| mask | bit)
            .ok_or_else(|| AiocError::UnknownFlag(token.to_string()))
    })
}

/// Format a mask as `|`-separated flag names
///
/// Zero formats as `NONE`. Bits not covered by the vocabulary are appended as
/// a single `0x%08x` literal, so no information is lost; a mask with no named
/// bits at all formats as that literal alone.
pub fn format_flags(vocabulary: Vocabulary, mask: u32) -> String {
    if mask == 0 {
        return "NONE".to_string();
    }

    let mut parts = Vec::new();
    let mut leftover = mask;
    for &(name, bit) in vocabulary {
        if bit != 0 && mask & bit != 0 {
            parts.push(name.to_string());
            leftover &= !bit;
        }
    }

    if leftover != 0 {
        parts.push(format!("0x{:08x}", leftover));
    }

    parts.join("|")
}

/// PTT source selection (AIOC_IOMUX0/1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PttSource(pub u32);

impl PttSource {
    pub const NONE: Self = Self(0x0000_0000);
    pub const CM108GPIO1: Self = Self(0x0000_0001);
    pub const CM108GPIO2: Self = Self(0x0000_0002);
    pub const CM108GPIO3: Self = Self(0x0000_0004);
    pub const CM108GPIO4: Self = Self(0x0000_0008);
    pub const SERIALDTR: Self = Self(0x0000_0100);
    pub const SERIALRTS: Self = Self(0x0000_0200);
    pub const SERIALDTRNRTS: Self = Self(0x0000_0400);
    pub const SERIALNDTRRTS: Self = Self(0x0000_0800);
    pub const VPTT: Self = Self(0x0000_1000);

    /// Name/bit table; `NONE` parses but never appears in formatted output
    pub const VOCABULARY: Vocabulary = &[
        ("NONE", Self::NONE.0),
        ("CM108GPIO1", Self::CM108GPIO1.0),
        ("CM108GPIO2", Self::CM108GPIO2.0),
        ("CM108GPIO3", Self::CM108GPIO3.0),
        ("CM108GPIO4", Self::CM108GPIO4.0),
        ("SERIALDTR", Self::SERIALDTR.0),
        ("SERIALRTS", Self::SERIALRTS.0),
        ("SERIALDTRNRTS", Self::SERIALDTRNRTS.0),
        ("SERIALNDTRRTS", Self::SERIALNDTRRTS.0),
        ("VPTT", Self::VPTT.0),
    ];

    /// Raw register value
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Selectable sources, excluding `NONE`
    pub fn named_sources() -> impl Iterator<Item = (&'static str, u32)> {
        Self::VOCABULARY.iter().copied().filter(|&(_, bit)| bit != 0)
    }
}

impl std::ops::BitOr for PttSource {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromStr for PttSource {
    type Err = AiocError;

    fn from_str(s: &str) -> Result<Self> {
        parse_flags(Self::VOCABULARY, s).map(Self)
    }
}

impl fmt::Display for PttSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_flags(Self::VOCABULARY, self.0))
    }
}

/// CM108 button source selection (CM108_IOMUX0..3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonSource(pub u32);

impl ButtonSource {
    pub const NONE: Self = Self(0x0000_0000);
    pub const IN1: Self = Self(0x0001_0000);
    pub const IN2: Self = Self(0x0002_0000);
    pub const VCOS: Self = Self(0x0100_0000);

    pub const VOCABULARY: Vocabulary = &[
        ("NONE", Self::NONE.0),
        ("IN1", Self::IN1.0),
        ("IN2", Self::IN2.0),
        ("VCOS", Self::VCOS.0),
    ];

    /// Raw register value
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for ButtonSource {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromStr for ButtonSource {
    type Err = AiocError;

    fn from_str(s: &str) -> Result<Self> {
        parse_flags(Self::VOCABULARY, s).map(Self)
    }
}

impl fmt::Display for ButtonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_flags(Self::VOCABULARY, self.0))
    }
}

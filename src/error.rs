//! # Error Types
//!
//! Custom error types for AIOC Util using `thiserror`.

use thiserror::Error;

/// Main error type for AIOC Util
#[derive(Debug, Error)]
pub enum AiocError {
    /// The HID transport failed while opening, reading or writing
    #[error("HID transport error: {0}")]
    Transport(#[source] std::io::Error),

    /// The MAGIC register did not read back as "AIOC"
    #[error("Unexpected magic {magic:?}, device does not speak the AIOC protocol")]
    DeviceMismatch {
        /// Raw bytes read from the MAGIC register
        magic: [u8; 4],
    },

    /// The device returned fewer bytes than a register response needs
    #[error("Short read: got {got} bytes, expected {expected}")]
    ShortRead { got: usize, expected: usize },

    /// The device accepted fewer bytes than the frame length
    #[error("Incomplete write: wrote {written} bytes, expected {expected}")]
    ShortWrite { written: usize, expected: usize },

    /// A bitmask token is not part of the vocabulary
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    /// Malformed numeric or "VID,PID" input
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Numeric input outside the field width
    #[error("{what} value {value} out of range (0-{max})")]
    OutOfRange {
        what: &'static str,
        value: u64,
        max: u64,
    },

    /// A codec precondition was violated
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors outside the HID transport (config files, output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AIOC Util
pub type Result<T> = std::result::Result<T, AiocError>;

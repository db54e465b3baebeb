//! # AIOC Util Library
//!
//! Configure the AIOC (All-In-One-Cable) USB audio/PTT interface.
//!
//! This library provides the register-level protocol spoken over the AIOC's
//! vendor HID interface: frame encoding, the handshake-guarded device
//! session, and codecs for the register fields (PTT and button source masks,
//! audio gain, foxhunt beacon settings).

pub mod config;
pub mod error;
pub mod protocol;
pub mod fields;
pub mod device;
pub mod plan;

//! # AIOC Device Session
//!
//! Owns one open HID handle and sequences register traffic through the
//! frame codec.
//!
//! This module handles:
//! - Opening the device and verifying the MAGIC register
//! - Register reads (feature report out, 7-byte feature report back)
//! - Register writes and bare commands (unacknowledged)
//! - Raw PTT output reports
//! - Typed accessors for the register fields
//!
//! A value of [`AiocDevice`] only exists for a device that passed the magic
//! handshake, and [`AiocDevice::close`] consumes it, so register traffic on a
//! closed session cannot be expressed. Every operation is a blocking round
//! trip; nothing is retried.

pub mod transport;

use serde::Serialize;
use std::io;
use tracing::{debug, info, warn};

use crate::error::{AiocError, Result};
use crate::fields::foxhunt::{self, FoxhuntControl};
use crate::fields::{ButtonSource, PttSource};
use crate::protocol::decoder::decode_read_response;
use crate::protocol::encoder::{
    encode_command, encode_raw_ptt, encode_read_request, encode_write_request,
};
use crate::protocol::registers::{self, REGISTER_MAP};
use crate::protocol::{Command, AIOC_MAGIC, RESPONSE_SIZE};

pub use transport::{HidApiTransport, HidTransport};

/// PTT output of the AIOC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PttChannel {
    Ptt1,
    Ptt2,
}

impl PttChannel {
    /// CM108 GPIO line driven by a raw output report for this channel
    ///
    /// The stock firmware routes PTT1 from CM108GPIO3 and PTT2 from
    /// CM108GPIO4.
    pub fn io_line(self) -> u8 {
        match self {
            PttChannel::Ptt1 => 3,
            PttChannel::Ptt2 => 4,
        }
    }

    /// Source mux register for this channel
    pub fn source_register(self) -> u8 {
        match self {
            PttChannel::Ptt1 => registers::AIOC_IOMUX0,
            PttChannel::Ptt2 => registers::AIOC_IOMUX1,
        }
    }
}

/// One row of a register dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterValue {
    pub name: &'static str,
    pub address: u8,
    pub value: u32,
}

/// USB descriptor strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
}

/// Raw AUDIO_RX / AUDIO_TX values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    pub rx: u32,
    pub tx: u32,
}

/// Open AIOC session
pub struct AiocDevice<T: HidTransport = HidApiTransport> {
    transport: T,
}

impl<T: HidTransport> std::fmt::Debug for AiocDevice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiocDevice").finish_non_exhaustive()
    }
}

impl AiocDevice<HidApiTransport> {
    /// Open the first AIOC matching `vendor_id`/`product_id`
    ///
    /// # Errors
    ///
    /// - `Transport` if the device cannot be opened or read
    /// - `DeviceMismatch` if MAGIC is not "AIOC"; the handle is released
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aioc_util::device::AiocDevice;
    /// use aioc_util::protocol::{registers, AIOC_PRODUCT_ID, AIOC_VENDOR_ID};
    ///
    /// let mut aioc = AiocDevice::open(AIOC_VENDOR_ID, AIOC_PRODUCT_ID)?;
    /// let ptt1 = aioc.read(registers::AIOC_IOMUX0)?;
    /// println!("PTT1 source: {:08x}", ptt1);
    /// # Ok::<(), aioc_util::error::AiocError>(())
    /// ```
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self> {
        let transport =
            HidApiTransport::open(vendor_id, product_id).map_err(AiocError::Transport)?;
        Self::from_transport(transport)
    }
}

impl<T: HidTransport> AiocDevice<T> {
    /// Verify the magic register over an already-open transport
    ///
    /// On any failure the transport is dropped before returning.
    pub fn from_transport(transport: T) -> Result<Self> {
        let mut device = Self { transport };

        let magic = device.read(registers::MAGIC)?.to_le_bytes();
        if magic != AIOC_MAGIC {
            warn!(
                "Unexpected magic {:02x?} ({})",
                magic,
                String::from_utf8_lossy(&magic)
            );
            return Err(AiocError::DeviceMismatch { magic });
        }

        info!("AIOC handshake complete");
        Ok(device)
    }

    /// Release the HID handle
    pub fn close(self) {
        debug!("Closing AIOC session");
        drop(self);
    }

    /// Read a 32-bit register
    ///
    /// # Errors
    ///
    /// Returns `Transport` on I/O failure or `ShortRead` if the response is
    /// shorter than 7 bytes
    pub fn read(&mut self, address: u8) -> Result<u32> {
        let request = encode_read_request(address);
        self.transport
            .send_feature_report(&request)
            .map_err(AiocError::Transport)?;

        let mut response = [0u8; RESPONSE_SIZE];
        let len = self
            .transport
            .get_feature_report(&mut response)
            .map_err(AiocError::Transport)?;
        let value = decode_read_response(&response[..len.min(RESPONSE_SIZE)])?;

        debug!("Read register 0x{:02x} = {:08x}", address, value);
        Ok(value)
    }

    /// Write a 32-bit register
    ///
    /// The device does not acknowledge writes; read the register back to
    /// confirm.
    pub fn write(&mut self, address: u8, value: u32) -> Result<()> {
        let request = encode_write_request(address, value);
        self.transport
            .send_feature_report(&request)
            .map_err(AiocError::Transport)?;

        debug!("Wrote register 0x{:02x} = {:08x}", address, value);
        Ok(())
    }

    /// Send a bare command (defaults, reboot, recall, store)
    pub fn send_command(&mut self, command: Command) -> Result<()> {
        let request = encode_command(command);
        self.transport
            .send_feature_report(&request)
            .map_err(AiocError::Transport)?;

        debug!("Sent command {:?} (0x{:02x})", command, command.opcode());
        Ok(())
    }

    /// Drive a PTT output directly with a raw output report
    ///
    /// # Errors
    ///
    /// Returns `ShortWrite` if the transport accepted fewer bytes than the
    /// 5-byte report
    pub fn set_ptt_state(&mut self, channel: PttChannel, on: bool) -> Result<()> {
        let report = encode_raw_ptt(channel.io_line(), on)?;
        let written = self.transport.write(&report).map_err(AiocError::Transport)?;
        if written != report.len() {
            return Err(AiocError::ShortWrite {
                written,
                expected: report.len(),
            });
        }

        debug!("Set {:?} {}", channel, if on { "on" } else { "off" });
        Ok(())
    }

    /// USB descriptor strings
    ///
    /// Best effort: a string the transport cannot fetch is logged and
    /// reported as `None`.
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity {
            manufacturer: descriptor("manufacturer", self.transport.manufacturer()),
            product: descriptor("product", self.transport.product()),
            serial_number: descriptor("serial number", self.transport.serial_number()),
        }
    }

    /// Read every register of the map, in address order
    pub fn dump_registers(&mut self) -> Result<Vec<RegisterValue>> {
        REGISTER_MAP
            .iter()
            .map(|reg| {
                Ok(RegisterValue {
                    name: reg.name,
                    address: reg.address,
                    value: self.read(reg.address)?,
                })
            })
            .collect()
    }

    /// Current PTT source of a channel
    pub fn ptt_source(&mut self, channel: PttChannel) -> Result<PttSource> {
        self.read(channel.source_register()).map(PttSource)
    }

    pub fn set_ptt_source(&mut self, channel: PttChannel, source: PttSource) -> Result<()> {
        self.write(channel.source_register(), source.bits())
    }

    /// Current source of a CM108 button mux register
    pub fn button_source(&mut self, address: u8) -> Result<ButtonSource> {
        self.read(address).map(ButtonSource)
    }

    pub fn set_button_source(&mut self, address: u8, source: ButtonSource) -> Result<()> {
        self.write(address, source.bits())
    }

    pub fn foxhunt_control(&mut self) -> Result<FoxhuntControl> {
        self.read(registers::FOXHUNT_CTRL).map(FoxhuntControl::unpack)
    }

    pub fn set_foxhunt_control(&mut self, control: FoxhuntControl) -> Result<()> {
        self.write(registers::FOXHUNT_CTRL, control.pack())
    }

    /// Raw FOXHUNT_MSG0..3 values
    pub fn foxhunt_message_registers(&mut self) -> Result<[u32; 4]> {
        let mut values = [0u32; 4];
        for (value, address) in values.iter_mut().zip(registers::FOXHUNT_MSG) {
            *value = self.read(address)?;
        }
        Ok(values)
    }

    /// Decoded foxhunt message
    pub fn foxhunt_message(&mut self) -> Result<String> {
        self.foxhunt_message_registers().map(foxhunt::decode_message)
    }

    /// Write a foxhunt message, returning the register values written
    pub fn set_foxhunt_message(&mut self, text: &str) -> Result<[u32; 4]> {
        let values = foxhunt::encode_message(text);
        for (address, value) in registers::FOXHUNT_MSG.into_iter().zip(values) {
            self.write(address, value)?;
        }
        Ok(values)
    }

    pub fn audio_settings(&mut self) -> Result<AudioSettings> {
        Ok(AudioSettings {
            rx: self.read(registers::AUDIO_RX)?,
            tx: self.read(registers::AUDIO_TX)?,
        })
    }
}

fn descriptor(what: &str, result: io::Result<Option<String>>) -> Option<String> {
    result.unwrap_or_else(|e| {
        warn!("Could not read {} string: {}", what, e);
        None
    })
}

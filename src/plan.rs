//! # Command Plan
//!
//! Everything a single `aioc-util` invocation asks for, collected into one
//! immutable [`Plan`] before the device is opened and then executed in a
//! fixed order by [`execute`].
//!
//! All user input (flag names, numbers, VID/PID pairs) is parsed into typed
//! fields while the plan is built, so invalid input is rejected before any
//! HID traffic. Every write is followed by a read-back that is reported. The
//! first error aborts the remaining steps; writes that already happened are
//! not rolled back.

use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

use crate::device::{AiocDevice, DeviceIdentity, HidTransport, PttChannel, RegisterValue};
use crate::error::Result;
use crate::fields::foxhunt;
use crate::fields::{ButtonSource, PttSource, RxGain, TxBoost, UsbId};
use crate::protocol::{registers, Command};

/// Output format of `--dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Text,
    Json,
}

/// Requested actions, in no particular order; [`execute`] fixes the order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub load_defaults: bool,
    pub recall: bool,
    pub dump: Option<DumpFormat>,
    pub swap_ptt: bool,
    pub auto_ptt1: bool,
    pub ptt1_source: Option<PttSource>,
    pub ptt2_source: Option<PttSource>,
    pub usb_id: Option<UsbId>,
    pub vol_up_source: Option<ButtonSource>,
    pub vol_dn_source: Option<ButtonSource>,
    pub vptt_lvlctrl: Option<u32>,
    pub vptt_timctrl: Option<u32>,
    pub vcos_lvlctrl: Option<u32>,
    pub vcos_timctrl: Option<u32>,
    pub enable_hwcos: bool,
    pub enable_vcos: bool,
    pub foxhunt_get_settings: bool,
    pub foxhunt_get_message: bool,
    pub foxhunt_volume: Option<u16>,
    pub foxhunt_wpm: Option<u8>,
    pub foxhunt_interval: Option<u8>,
    pub foxhunt_message: Option<String>,
    pub audio_get_settings: bool,
    pub audio_rx_gain: Option<RxGain>,
    pub audio_tx_boost: Option<TxBoost>,
    pub store: bool,
    pub ptt1_state: Option<bool>,
    pub ptt2_state: Option<bool>,
    pub reboot: bool,
}

impl Plan {
    /// True if nothing was requested
    pub fn is_empty(&self) -> bool {
        *self == Plan::default()
    }
}

#[derive(Serialize)]
struct DumpReport {
    identity: DeviceIdentity,
    registers: Vec<RegisterValue>,
}

/// Print every selectable PTT source with its bit value
pub fn list_ptt_sources<W: Write>(out: &mut W) -> io::Result<()> {
    for (name, bit) in PttSource::named_sources() {
        writeln!(out, "{} (0x{:08x})", name, bit)?;
    }
    Ok(())
}

/// Run a plan against an open device
///
/// # Errors
///
/// Returns the first device or output error; later steps are skipped
pub fn execute<T: HidTransport, W: Write>(
    device: &mut AiocDevice<T>,
    plan: Plan,
    out: &mut W,
) -> Result<()> {
    if plan.load_defaults {
        writeln!(out, "Loading Defaults...")?;
        info!("Loading hardware defaults");
        device.send_command(Command::Defaults)?;
    }

    if plan.recall {
        writeln!(out, "Recalling settings from flash...")?;
        info!("Recalling settings");
        device.send_command(Command::Recall)?;
    }

    if let Some(format) = plan.dump {
        dump(device, format, out)?;
    }

    if plan.swap_ptt {
        let ptt1 = device.ptt_source(PttChannel::Ptt1)?;
        let ptt2 = device.ptt_source(PttChannel::Ptt2)?;

        writeln!(out, "Setting PTT1 Source to {}", ptt2)?;
        device.set_ptt_source(PttChannel::Ptt1, ptt2)?;
        writeln!(out, "Setting PTT2 Source to {}", ptt1)?;
        device.set_ptt_source(PttChannel::Ptt2, ptt1)?;

        report_ptt_sources(device, out)?;
    }

    if plan.auto_ptt1 {
        writeln!(out, "Setting PTT1 Source to {}", PttSource::VPTT)?;
        device.set_ptt_source(PttChannel::Ptt1, PttSource::VPTT)?;

        report_ptt_sources(device, out)?;
    }

    if plan.ptt1_source.is_some() || plan.ptt2_source.is_some() {
        if let Some(source) = plan.ptt1_source {
            writeln!(out, "Setting PTT1 Source to {}", source)?;
            device.set_ptt_source(PttChannel::Ptt1, source)?;
        }
        if let Some(source) = plan.ptt2_source {
            writeln!(out, "Setting PTT2 Source to {}", source)?;
            device.set_ptt_source(PttChannel::Ptt2, source)?;
        }

        report_ptt_sources(device, out)?;
    }

    if let Some(usb_id) = plan.usb_id {
        info!("Setting USB id to {}", usb_id);
        device.write(registers::USBID, usb_id.to_register())?;
        let now = device.read(registers::USBID)?;
        writeln!(out, "Now USBID: {:08x}", now)?;
    }

    if plan.vol_up_source.is_some() || plan.vol_dn_source.is_some() {
        if let Some(source) = plan.vol_up_source {
            writeln!(out, "Setting VolUP button source to {}", source)?;
            device.set_button_source(registers::CM108_IOMUX0, source)?;
        }
        if let Some(source) = plan.vol_dn_source {
            writeln!(out, "Setting VolDN button source to {}", source)?;
            device.set_button_source(registers::CM108_IOMUX1, source)?;
        }

        let up = device.button_source(registers::CM108_IOMUX0)?;
        let dn = device.button_source(registers::CM108_IOMUX1)?;
        writeln!(out, "Now VolUP button source: {}", up)?;
        writeln!(out, "Now VolDN button source: {}", dn)?;
    }

    for (value, address) in [
        (plan.vptt_lvlctrl, registers::VPTT_LVLCTRL),
        (plan.vptt_timctrl, registers::VPTT_TIMCTRL),
        (plan.vcos_lvlctrl, registers::VCOS_LVLCTRL),
        (plan.vcos_timctrl, registers::VCOS_TIMCTRL),
    ] {
        if let Some(value) = value {
            write_raw(device, address, value, out)?;
        }
    }

    if plan.enable_hwcos {
        writeln!(out, "Enabling hardware COS (if your aioc supports it)...")?;
        set_cos_routing(device, ButtonSource::NONE, ButtonSource::IN2, out)?;
    }

    if plan.enable_vcos {
        writeln!(out, "Enabling virtual COS...")?;
        set_cos_routing(device, ButtonSource::IN2, ButtonSource::VCOS, out)?;
    }

    if plan.foxhunt_get_settings {
        let raw = device.read(registers::FOXHUNT_CTRL)?;
        let ctrl = foxhunt::FoxhuntControl::unpack(raw);
        writeln!(out, "Current foxhunt settings:")?;
        writeln!(out, "  Volume: {}", ctrl.volume)?;
        writeln!(out, "  WPM: {}", ctrl.wpm)?;
        writeln!(out, "  Interval: {} seconds", ctrl.interval)?;
        writeln!(out, "  Raw register: {:08x}", raw)?;
    }

    if plan.foxhunt_get_message {
        let values = device.foxhunt_message_registers()?;
        writeln!(out, "Current foxhunt message registers:")?;
        for (i, value) in values.iter().enumerate() {
            writeln!(
                out,
                "  MSG{}: {:08x} ('{}')",
                i,
                value,
                String::from_utf8_lossy(&value.to_le_bytes())
            )?;
        }
        writeln!(out, "Current foxhunt message: '{}'", foxhunt::decode_message(values))?;
    }

    if plan.foxhunt_volume.is_some()
        || plan.foxhunt_wpm.is_some()
        || plan.foxhunt_interval.is_some()
    {
        let ctrl = device.foxhunt_control()?.merged(
            plan.foxhunt_volume,
            plan.foxhunt_wpm,
            plan.foxhunt_interval,
        );
        writeln!(
            out,
            "Setting FOXHUNT_CTRL: volume={}, wpm={}, interval={}",
            ctrl.volume, ctrl.wpm, ctrl.interval
        )?;
        device.set_foxhunt_control(ctrl)?;
        let now = device.read(registers::FOXHUNT_CTRL)?;
        writeln!(out, "Now FOXHUNT_CTRL: {:08x}", now)?;
    }

    if let Some(message) = &plan.foxhunt_message {
        writeln!(out, "Setting foxhunt message: '{}'", message)?;
        let values = device.set_foxhunt_message(message)?;
        for (i, value) in values.iter().enumerate() {
            writeln!(
                out,
                "  MSG{}: {:08x} ('{}')",
                i,
                value,
                String::from_utf8_lossy(&value.to_le_bytes())
            )?;
        }
        let now = device.foxhunt_message()?;
        writeln!(out, "Now foxhunt message: '{}'", now)?;
    }

    if plan.audio_get_settings {
        let audio = device.audio_settings()?;
        writeln!(out, "Current audio settings:")?;
        writeln!(out, "  RX Gain: {}", RxGain::label(audio.rx))?;
        writeln!(out, "  TX Boost: {}", TxBoost::label(audio.tx))?;
        writeln!(out, "  Raw AUDIO_RX: {:08x}", audio.rx)?;
        writeln!(out, "  Raw AUDIO_TX: {:08x}", audio.tx)?;
    }

    if let Some(gain) = plan.audio_rx_gain {
        writeln!(out, "Setting Audio RX gain to {}", gain)?;
        device.write(registers::AUDIO_RX, gain.value())?;
        let now = device.read(registers::AUDIO_RX)?;
        writeln!(out, "Now AUDIO_RX: {:08x}", now)?;
    }

    if let Some(boost) = plan.audio_tx_boost {
        writeln!(out, "Setting Audio TX boost to {}", boost)?;
        device.write(registers::AUDIO_TX, boost.value())?;
        let now = device.read(registers::AUDIO_TX)?;
        writeln!(out, "Now AUDIO_TX: {:08x}", now)?;
    }

    if plan.store {
        writeln!(out, "Storing...")?;
        info!("Storing settings to flash");
        device.send_command(Command::Store)?;
    }

    if let Some(on) = plan.ptt1_state {
        device.set_ptt_state(PttChannel::Ptt1, on)?;
    }

    if let Some(on) = plan.ptt2_state {
        device.set_ptt_state(PttChannel::Ptt2, on)?;
    }

    if plan.reboot {
        writeln!(out, "Rebooting device...")?;
        info!("Rebooting device");
        device.send_command(Command::Reboot)?;
    }

    Ok(())
}

fn dump<T: HidTransport, W: Write>(
    device: &mut AiocDevice<T>,
    format: DumpFormat,
    out: &mut W,
) -> Result<()> {
    let identity = device.identity();

    if format == DumpFormat::Json {
        let report = DumpReport {
            identity,
            registers: device.dump_registers()?,
        };
        serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Manufacturer: {}", identity.manufacturer.unwrap_or_default())?;
    writeln!(out, "Product: {}", identity.product.unwrap_or_default())?;
    writeln!(out, "Serial No: {}", identity.serial_number.unwrap_or_default())?;

    let magic = device.read(registers::MAGIC)?;
    writeln!(out, "Magic: {}", String::from_utf8_lossy(&magic.to_le_bytes()))?;

    writeln!(out, "Current PTT1 Source: {}", device.ptt_source(PttChannel::Ptt1)?)?;
    writeln!(out, "Current PTT2 Source: {}", device.ptt_source(PttChannel::Ptt2)?)?;

    for (i, (label, address)) in [
        ("VolUP", registers::CM108_IOMUX0),
        ("VolDN", registers::CM108_IOMUX1),
        ("PlbMute", registers::CM108_IOMUX2),
        ("RecMute", registers::CM108_IOMUX3),
    ]
    .into_iter()
    .enumerate()
    {
        let source = device.button_source(address)?;
        writeln!(out, "Current CM108 Button {} ({}) Source: {}", i + 1, label, source)?;
    }

    for reg in device.dump_registers()? {
        writeln!(out, "Reg. {}: {:08x}", reg.name, reg.value)?;
    }

    Ok(())
}

fn report_ptt_sources<T: HidTransport, W: Write>(
    device: &mut AiocDevice<T>,
    out: &mut W,
) -> Result<()> {
    let ptt1 = device.ptt_source(PttChannel::Ptt1)?;
    let ptt2 = device.ptt_source(PttChannel::Ptt2)?;
    writeln!(out, "Now PTT1 Source: {}", ptt1)?;
    writeln!(out, "Now PTT2 Source: {}", ptt2)?;
    Ok(())
}

fn write_raw<T: HidTransport, W: Write>(
    device: &mut AiocDevice<T>,
    address: u8,
    value: u32,
    out: &mut W,
) -> Result<()> {
    let name = registers::name_of(address).unwrap_or("?");
    writeln!(out, "Setting {} to 0x{:x}", name, value)?;
    device.write(address, value)?;
    let now = device.read(address)?;
    writeln!(out, "Now {}: {:08x}", name, now)?;
    Ok(())
}

fn set_cos_routing<T: HidTransport, W: Write>(
    device: &mut AiocDevice<T>,
    button1: ButtonSource,
    button2: ButtonSource,
    out: &mut W,
) -> Result<()> {
    device.set_button_source(registers::CM108_IOMUX0, button1)?;
    device.set_button_source(registers::CM108_IOMUX1, button2)?;

    let now0 = device.button_source(registers::CM108_IOMUX0)?;
    let now1 = device.button_source(registers::CM108_IOMUX1)?;
    writeln!(out, "Now CM108_IOMUX0: {}", now0)?;
    writeln!(out, "Now CM108_IOMUX1: {}", now1)?;
    Ok(())
}

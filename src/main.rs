//! # AIOC Util
//!
//! Command-line configuration tool for the AIOC (All-In-One-Cable) USB
//! audio/PTT interface.
//!
//! # Control Flow
//!
//! 1. **Parse**
//!    - Command line parsed with clap and collected into a [`Plan`]; flag
//!      names, numbers and VID/PID pairs are validated here, before any HID
//!      traffic. Empty option values count as not given
//!    - Optional TOML config supplies default device ids and log level
//!
//! 2. **Open**
//!    - First matching HID device opened and its MAGIC register verified
//!
//! 3. **Execute**
//!    - The immutable [`Plan`] runs in a fixed order, printing each change
//!      and its read-back to stdout; logs go to stderr
//!    - The first error aborts the remaining steps
//!
//! # Examples
//!
//! ```text
//! $ aioc-util --ptt1 "CM108GPIO1|SERIALDTR" --store
//! Setting PTT1 Source to CM108GPIO1|SERIALDTR
//! Now PTT1 Source: CM108GPIO1|SERIALDTR
//! Now PTT2 Source: CM108GPIO4
//! Storing...
//! ```

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::{debug, Level};

use aioc_util::config::{Config, LOG_LEVELS};
use aioc_util::device::AiocDevice;
use aioc_util::error::AiocError;
use aioc_util::fields::{parse_bounded, RxGain, TxBoost, UsbId};
use aioc_util::plan::{self, DumpFormat, Plan};

/// On/off argument for the raw PTT state options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn is_on(self) -> bool {
        self == Switch::On
    }
}

/// Configure an AIOC (All-In-One-Cable) over its HID register interface.
#[derive(Debug, Parser)]
#[command(name = "aioc-util", version, about)]
struct Cli {
    /// Load hardware defaults
    #[arg(long)]
    defaults: bool,

    /// Recall settings from flash
    #[arg(long)]
    recall: bool,

    /// Reboot the device
    #[arg(long)]
    reboot: bool,

    /// Dump all known registers
    #[arg(long)]
    dump: bool,

    /// Print the --dump output as JSON
    #[arg(long, requires = "dump")]
    json: bool,

    /// Swap PTT1/PTT2 sources
    #[arg(long)]
    swap_ptt: bool,

    /// Set AutoPTT (VPTT) on PTT1
    #[arg(long)]
    auto_ptt1: bool,

    /// Set arbitrary PTT1 source (e.g. "CM108GPIO1|SERIALDTR"; "NONE" clears it)
    #[arg(long, value_name = "SOURCES")]
    ptt1: Option<String>,

    /// Set arbitrary PTT2 source (e.g. "CM108GPIO2|VPTT")
    #[arg(long, value_name = "SOURCES")]
    ptt2: Option<String>,

    /// List all possible PTT sources
    #[arg(long)]
    list_ptt_sources: bool,

    /// Set USB VID and PID (format: VID,PID in hex or decimal)
    #[arg(long, value_name = "VID,PID")]
    set_usb: Option<UsbId>,

    /// USB VID and PID to use when opening (format: VID,PID)
    #[arg(long, value_name = "VID,PID")]
    open_usb: Option<UsbId>,

    /// Set Volume Up button source (e.g. "IN2")
    #[arg(long, value_name = "SOURCES")]
    vol_up: Option<String>,

    /// Set Volume Down button source (e.g. "VCOS")
    #[arg(long, value_name = "SOURCES")]
    vol_dn: Option<String>,

    /// Set VPTT_LVLCTRL register (hex or decimal)
    #[arg(long, value_name = "VALUE", value_parser = parse_register_value)]
    vptt_lvlctrl: Option<u32>,

    /// Set VPTT_TIMCTRL register (hex or decimal)
    #[arg(long, value_name = "VALUE", value_parser = parse_register_value)]
    vptt_timctrl: Option<u32>,

    /// Set VCOS_LVLCTRL register (hex or decimal)
    #[arg(long, value_name = "VALUE", value_parser = parse_register_value)]
    vcos_lvlctrl: Option<u32>,

    /// Set VCOS_TIMCTRL register (hex or decimal)
    #[arg(long, value_name = "VALUE", value_parser = parse_register_value)]
    vcos_timctrl: Option<u32>,

    /// Store settings into flash
    #[arg(long)]
    store: bool,

    /// Set PTT1 state via raw HID write
    #[arg(long, value_name = "STATE")]
    set_ptt1_state: Option<Switch>,

    /// Set PTT2 state via raw HID write
    #[arg(long, value_name = "STATE")]
    set_ptt2_state: Option<Switch>,

    /// Enable hardware COS (needs an AIOC that supports it)
    #[arg(long)]
    enable_hwcos: bool,

    /// Enable virtual COS (default behavior)
    #[arg(long)]
    enable_vcos: bool,

    /// Set foxhunt volume (0-65535)
    #[arg(long, value_name = "VOLUME", value_parser = parse_foxhunt_volume)]
    foxhunt_volume: Option<u16>,

    /// Set foxhunt words per minute (0-255)
    #[arg(long, value_name = "WPM", value_parser = parse_foxhunt_wpm)]
    foxhunt_wpm: Option<u8>,

    /// Set foxhunt interval in seconds (0-255, 0 disables foxhunt mode)
    #[arg(long, value_name = "SECONDS", value_parser = parse_foxhunt_interval)]
    foxhunt_interval: Option<u8>,

    /// Read and display current foxhunt control settings
    #[arg(long)]
    foxhunt_get_settings: bool,

    /// Set foxhunt message (up to 16 characters)
    #[arg(long, value_name = "TEXT")]
    foxhunt_message: Option<String>,

    /// Read and display current foxhunt message
    #[arg(long)]
    foxhunt_get_message: bool,

    /// Set audio RX gain: 1x, 2x, 4x, 8x, or 16x
    #[arg(long, value_name = "GAIN")]
    audio_rx_gain: Option<RxGain>,

    /// Set audio TX boost: off or on
    #[arg(long, value_name = "BOOST")]
    audio_tx_boost: Option<TxBoost>,

    /// Read and display current audio settings
    #[arg(long)]
    audio_get_settings: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_register_value(s: &str) -> std::result::Result<u32, AiocError> {
    parse_bounded("register", s, u64::from(u32::MAX)).map(|v| v as u32)
}

fn parse_foxhunt_volume(s: &str) -> std::result::Result<u16, AiocError> {
    parse_bounded("foxhunt volume", s, u64::from(u16::MAX)).map(|v| v as u16)
}

fn parse_foxhunt_wpm(s: &str) -> std::result::Result<u8, AiocError> {
    parse_bounded("foxhunt wpm", s, u64::from(u8::MAX)).map(|v| v as u8)
}

fn parse_foxhunt_interval(s: &str) -> std::result::Result<u8, AiocError> {
    parse_bounded("foxhunt interval", s, u64::from(u8::MAX)).map(|v| v as u8)
}

/// Parse an option value; empty text counts as not given
fn non_empty<T: FromStr>(text: Option<&str>) -> std::result::Result<Option<T>, T::Err> {
    text.filter(|t| !t.is_empty()).map(str::parse).transpose()
}

impl Cli {
    /// Collect the device actions into an immutable plan
    ///
    /// # Errors
    ///
    /// Returns `UnknownFlag` for a source name outside the vocabulary
    fn plan(&self) -> std::result::Result<Plan, AiocError> {
        let dump = self
            .dump
            .then_some(if self.json { DumpFormat::Json } else { DumpFormat::Text });

        Ok(Plan {
            load_defaults: self.defaults,
            recall: self.recall,
            dump,
            swap_ptt: self.swap_ptt,
            auto_ptt1: self.auto_ptt1,
            ptt1_source: non_empty(self.ptt1.as_deref())?,
            ptt2_source: non_empty(self.ptt2.as_deref())?,
            usb_id: self.set_usb,
            vol_up_source: non_empty(self.vol_up.as_deref())?,
            vol_dn_source: non_empty(self.vol_dn.as_deref())?,
            vptt_lvlctrl: self.vptt_lvlctrl,
            vptt_timctrl: self.vptt_timctrl,
            vcos_lvlctrl: self.vcos_lvlctrl,
            vcos_timctrl: self.vcos_timctrl,
            enable_hwcos: self.enable_hwcos,
            enable_vcos: self.enable_vcos,
            foxhunt_get_settings: self.foxhunt_get_settings,
            foxhunt_get_message: self.foxhunt_get_message,
            foxhunt_volume: self.foxhunt_volume,
            foxhunt_wpm: self.foxhunt_wpm,
            foxhunt_interval: self.foxhunt_interval,
            foxhunt_message: self.foxhunt_message.clone().filter(|m| !m.is_empty()),
            audio_get_settings: self.audio_get_settings,
            audio_rx_gain: self.audio_rx_gain,
            audio_tx_boost: self.audio_tx_boost,
            store: self.store,
            ptt1_state: self.set_ptt1_state.map(Switch::is_on),
            ptt2_state: self.set_ptt2_state.map(Switch::is_on),
            reboot: self.reboot,
        })
    }
}

/// Configured log level raised by one step per `-v`
fn log_level(configured: &str, verbose: u8) -> Level {
    let base = LOG_LEVELS.iter().position(|l| *l == configured).unwrap_or(1);
    let index = (base + usize::from(verbose)).min(LOG_LEVELS.len() - 1);
    LOG_LEVELS[index].parse().unwrap_or(Level::WARN)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(&config.logging.level, cli.verbose).into()),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_ptt_sources {
        plan::list_ptt_sources(&mut io::stdout().lock())?;
        return Ok(());
    }

    let plan = cli.plan()?;
    if plan.is_empty() {
        Cli::command().print_help()?;
        bail!("no action requested");
    }

    let (vid, pid) = match cli.open_usb {
        Some(id) => (id.vid, id.pid),
        None => (config.device.vendor_id, config.device.product_id),
    };
    debug!("Opening AIOC {:04x}:{:04x}", vid, pid);

    let mut aioc = AiocDevice::open(vid, pid).with_context(|| {
        format!(
            "Could not open AIOC device (VID: 0x{:04x}, PID: 0x{:04x})",
            vid, pid
        )
    })?;

    let result = plan::execute(&mut aioc, plan, &mut io::stdout().lock());
    aioc.close();
    result?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aioc_util::fields::{ButtonSource, PttSource};

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("aioc-util").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_empty_plan() {
        let cli = parse(&[]).unwrap();
        assert!(cli.plan().unwrap().is_empty());
    }

    #[test]
    fn test_ptt_sources_parsed_before_io() {
        let cli = parse(&["--ptt1", "CM108GPIO1|SERIALDTR", "--ptt2", "VPTT"]).unwrap();
        let plan = cli.plan().unwrap();
        assert_eq!(plan.ptt1_source, Some(PttSource(0x101)));
        assert_eq!(plan.ptt2_source, Some(PttSource::VPTT));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let cli = parse(&["--ptt1", "CM108GPIO9"]).unwrap();
        match cli.plan() {
            Err(AiocError::UnknownFlag(token)) => assert_eq!(token, "CM108GPIO9"),
            other => panic!("Expected UnknownFlag, got: {:?}", other),
        }

        let cli = parse(&["--vol-up", "IN1|VPTT"]).unwrap();
        assert!(matches!(cli.plan(), Err(AiocError::UnknownFlag(_))));
    }

    #[test]
    fn test_empty_values_are_not_given() {
        let cli = parse(&["--ptt1", "", "--ptt2", "", "--foxhunt-message", ""]).unwrap();
        assert!(cli.plan().unwrap().is_empty());

        let cli = parse(&["--vol-up", "", "--vol-dn", ""]).unwrap();
        assert!(cli.plan().unwrap().is_empty());

        let cli = parse(&["--ptt2", "NONE", "--vol-dn", "NONE"]).unwrap();
        let plan = cli.plan().unwrap();
        assert_eq!(plan.ptt2_source, Some(PttSource::NONE));
        assert_eq!(plan.vol_dn_source, Some(ButtonSource::NONE));
    }

    #[test]
    fn test_usb_ids() {
        let cli = parse(&["--set-usb", "0x1209,0x7389", "--open-usb", "4617,29576"]).unwrap();
        assert_eq!(cli.set_usb, Some(UsbId::new(0x1209, 0x7389)));
        assert_eq!(cli.open_usb, Some(UsbId::new(0x1209, 0x7388)));
        assert!(parse(&["--set-usb", "0x1209"]).is_err());
    }

    #[test]
    fn test_foxhunt_ranges() {
        let cli = parse(&["--foxhunt-volume", "65535", "--foxhunt-wpm", "0x14"]).unwrap();
        assert_eq!(cli.foxhunt_volume, Some(65535));
        assert_eq!(cli.foxhunt_wpm, Some(20));

        assert!(parse(&["--foxhunt-volume", "65536"]).is_err());
        assert!(parse(&["--foxhunt-interval", "256"]).is_err());
        assert!(parse(&["--foxhunt-wpm", "fast"]).is_err());
    }

    #[test]
    fn test_register_values() {
        let cli = parse(&["--vptt-lvlctrl", "0xFFFFFFFF", "--vcos-timctrl", "100"]).unwrap();
        assert_eq!(cli.vptt_lvlctrl, Some(u32::MAX));
        assert_eq!(cli.vcos_timctrl, Some(100));
        assert!(parse(&["--vptt-timctrl", "0x100000000"]).is_err());
    }

    #[test]
    fn test_audio_and_ptt_state() {
        let audio = ["--audio-rx-gain", "16x", "--audio-tx-boost", "on"];
        let ptt = ["--set-ptt1-state", "on", "--set-ptt2-state", "off"];
        let cli = parse(&[audio, ptt].concat()).unwrap();
        let plan = cli.plan().unwrap();
        assert_eq!(plan.audio_rx_gain, Some(RxGain::X16));
        assert_eq!(plan.audio_tx_boost, Some(TxBoost::On));
        assert_eq!(plan.ptt1_state, Some(true));
        assert_eq!(plan.ptt2_state, Some(false));

        assert!(parse(&["--audio-rx-gain", "3x"]).is_err());
        assert!(parse(&["--set-ptt1-state", "maybe"]).is_err());
    }

    #[test]
    fn test_dump_format() {
        assert_eq!(parse(&["--dump"]).unwrap().plan().unwrap().dump, Some(DumpFormat::Text));
        assert_eq!(
            parse(&["--dump", "--json"]).unwrap().plan().unwrap().dump,
            Some(DumpFormat::Json)
        );
        assert!(parse(&["--json"]).is_err());
    }

    #[test]
    fn test_open_usb_alone_is_not_an_action() {
        let cli = parse(&["--open-usb", "0x1209,0x7388", "-vv"]).unwrap();
        assert!(cli.plan().unwrap().is_empty());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level("warn", 0), Level::WARN);
        assert_eq!(log_level("warn", 1), Level::INFO);
        assert_eq!(log_level("warn", 2), Level::DEBUG);
        assert_eq!(log_level("warn", 9), Level::TRACE);
        assert_eq!(log_level("error", 0), Level::ERROR);
        assert_eq!(log_level("bogus", 0), Level::WARN);
    }
}

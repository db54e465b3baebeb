//! Trait abstraction for HID report I/O to enable testing

use std::io;

use tracing::debug;

/// Trait for HID report I/O operations
///
/// The AIOC session only needs feature reports (register traffic), plain
/// output reports (raw PTT) and the descriptor strings. The handle is
/// released when the implementor is dropped.
#[cfg_attr(test, mockall::automock)]
pub trait HidTransport {
    /// Send a feature report; `data[0]` is the report id
    fn send_feature_report(&mut self, data: &[u8]) -> io::Result<()>;

    /// Fetch a feature report into `buf` (`buf[0]` holds the report id);
    /// returns the number of bytes read
    fn get_feature_report(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write an output report; returns the number of bytes written
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Manufacturer descriptor string
    fn manufacturer(&self) -> io::Result<Option<String>>;

    /// Product descriptor string
    fn product(&self) -> io::Result<Option<String>>;

    /// Serial number descriptor string
    fn serial_number(&self) -> io::Result<Option<String>>;
}

fn hid_err(e: hidapi::HidError) -> io::Error {
    io::Error::other(e.to_string())
}

/// `hidapi` device handle that implements HidTransport
pub struct HidApiTransport {
    device: hidapi::HidDevice,
    // Keeps the library context alive for as long as the handle
    _api: hidapi::HidApi,
}

impl std::fmt::Debug for HidApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidApiTransport").finish_non_exhaustive()
    }
}

impl HidApiTransport {
    /// Open the first HID device matching `vendor_id`/`product_id`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the HID library cannot be initialised or no
    /// matching device can be opened (missing device, permissions)
    pub fn open(vendor_id: u16, product_id: u16) -> io::Result<Self> {
        let api = hidapi::HidApi::new().map_err(hid_err)?;
        debug!("Opening HID device {:04x}:{:04x}", vendor_id, product_id);
        let device = api.open(vendor_id, product_id).map_err(hid_err)?;
        Ok(Self { device, _api: api })
    }
}

impl HidTransport for HidApiTransport {
    fn send_feature_report(&mut self, data: &[u8]) -> io::Result<()> {
        self.device.send_feature_report(data).map_err(hid_err)
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.device.get_feature_report(buf).map_err(hid_err)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.device.write(data).map_err(hid_err)
    }

    fn manufacturer(&self) -> io::Result<Option<String>> {
        self.device.get_manufacturer_string().map_err(hid_err)
    }

    fn product(&self) -> io::Result<Option<String>> {
        self.device.get_product_string().map_err(hid_err)
    }

    fn serial_number(&self) -> io::Result<Option<String>> {
        self.device.get_serial_number_string().map_err(hid_err)
    }
}

use log::debug;
use serialport::SerialPort;
use std::time::Duration;

use super::config::DEFAULT_BAUD;

/// Opens a device only to learn whether it is currently accessible.
pub trait PortProber {
    /// Open handle; the device is released when this is dropped.
    type Handle;

    fn open(&self, device: &str, timeout: Duration) -> serialport::Result<Self::Handle>;

    /// Acquires a handle and releases it before returning, whatever the outcome.
    fn is_accessible(&self, device: &str, timeout: Duration) -> bool {
        match self.open(device, timeout) {
            Ok(handle) => {
                drop(handle);
                debug!("{} is accessible", device);
                true
            }
            Err(e) => {
                debug!("{} skipped ({:?}): {}", device, e.kind(), e);
                false
            }
        }
    }
}

/// Probes through `serialport`'s native open
#[derive(Debug, Clone, Copy)]
pub struct SerialProber {
    pub baud_rate: u32,
}

impl SerialProber {
    pub fn new(baud_rate: u32) -> Self {
        Self { baud_rate }
    }
}

impl Default for SerialProber {
    fn default() -> Self {
        Self::new(DEFAULT_BAUD)
    }
}

impl PortProber for SerialProber {
    type Handle = Box<dyn SerialPort>;

    fn open(&self, device: &str, timeout: Duration) -> serialport::Result<Self::Handle> {
        serialport::new(device, self.baud_rate).timeout(timeout).open()
    }
}

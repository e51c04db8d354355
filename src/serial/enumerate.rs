//! Serial port enumeration backends
//!
//! - `SystemPorts`: the platform registry as exposed by `serialport`
//! - `DevScan`: a plain `/dev` directory scan, Unix only

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serialport::{SerialPortInfo, SerialPortType};

/// A port as reported by a backend, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedPort {
    pub device: String,
    pub description: Option<String>,
}

impl ReportedPort {
    pub fn new(device: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            device: device.into(),
            description: description.map(str::to_string),
        }
    }
}

/// Source of the serial devices known to the OS.
///
/// Implementations should query live state on every call. An error means the
/// facility itself is unusable, never that a single port is.
pub trait PortEnumerator {
    fn enumerate(&self) -> Result<Vec<ReportedPort>>;
}

impl<T: PortEnumerator + ?Sized> PortEnumerator for Box<T> {
    fn enumerate(&self) -> Result<Vec<ReportedPort>> {
        (**self).enumerate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Platform serial registry
    #[default]
    System,
    /// Scan /dev for tty device nodes (Unix only)
    #[value(name = "devscan")]
    DevScan,
}

impl Backend {
    pub fn enumerator(self) -> Result<Box<dyn PortEnumerator>> {
        match self {
            Backend::System => Ok(Box::new(SystemPorts)),
            #[cfg(unix)]
            Backend::DevScan => Ok(Box::new(DevScan::default())),
            #[cfg(not(unix))]
            Backend::DevScan => anyhow::bail!("the devscan backend is only available on Unix"),
        }
    }
}

/// Ports known to the platform registry (SetupAPI, udev/sysfs, IOKit)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPorts;

impl PortEnumerator for SystemPorts {
    fn enumerate(&self) -> Result<Vec<ReportedPort>> {
        let ports = serialport::available_ports().context("failed to enumerate serial ports")?;
        Ok(ports.into_iter().map(ReportedPort::from).collect())
    }
}

impl From<SerialPortInfo> for ReportedPort {
    fn from(info: SerialPortInfo) -> Self {
        let description = match info.port_type {
            SerialPortType::UsbPort(usb) => usb.product.or(usb.manufacturer),
            SerialPortType::PciPort => Some("PCI".to_string()),
            SerialPortType::BluetoothPort => Some("Bluetooth".to_string()),
            SerialPortType::Unknown => None,
        };
        Self {
            device: info.port_name,
            description,
        }
    }
}

#[cfg(unix)]
pub use devscan::DevScan;

#[cfg(unix)]
mod devscan {
    use super::{PortEnumerator, ReportedPort};
    use anyhow::{Context, Result};
    use std::fs;
    use std::path::PathBuf;

    /// Linux, BSD and macOS serial node prefixes
    pub const SERIAL_PREFIXES: &[&str] =
        &["ttyS", "ttyUSB", "ttyACM", "ttyAMA", "rfcomm", "tty.", "cu."];

    /// Lists device nodes whose names match a known serial prefix
    #[derive(Debug, Clone)]
    pub struct DevScan {
        pub root: PathBuf,
    }

    impl Default for DevScan {
        fn default() -> Self {
            Self {
                root: PathBuf::from("/dev"),
            }
        }
    }

    impl DevScan {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        fn is_serial_name(name: &str) -> bool {
            SERIAL_PREFIXES
                .iter()
                .any(|prefix| name.len() > prefix.len() && name.starts_with(prefix))
        }
    }

    impl PortEnumerator for DevScan {
        fn enumerate(&self) -> Result<Vec<ReportedPort>> {
            let entries = fs::read_dir(&self.root)
                .with_context(|| format!("failed to read {}", self.root.display()))?;

            let mut devices = Vec::new();
            for entry in entries {
                let entry = entry?;
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };
                if Self::is_serial_name(name) {
                    devices.push(entry.path().to_string_lossy().into_owned());
                }
            }
            devices.sort();

            Ok(devices
                .into_iter()
                .map(|device| ReportedPort::new(device, None))
                .collect())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn usb(product: Option<&str>, manufacturer: Option<&str>) -> SerialPortInfo {
        SerialPortInfo {
            port_name: "/dev/ttyUSB0".to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x1a86,
                pid: 0x7523,
                serial_number: None,
                manufacturer: manufacturer.map(str::to_string),
                product: product.map(str::to_string),
            }),
        }
    }

    #[test]
    fn usb_description_prefers_product() {
        let port = ReportedPort::from(usb(Some("USB Serial"), Some("QinHeng")));
        assert_eq!(port, ReportedPort::new("/dev/ttyUSB0", Some("USB Serial")));

        let port = ReportedPort::from(usb(None, Some("QinHeng")));
        assert_eq!(port.description.as_deref(), Some("QinHeng"));

        let port = ReportedPort::from(usb(None, None));
        assert_eq!(port.description, None);
    }

    #[test]
    fn non_usb_descriptions() {
        let pci = SerialPortInfo {
            port_name: "/dev/ttyS4".to_string(),
            port_type: SerialPortType::PciPort,
        };
        assert_eq!(ReportedPort::from(pci).description.as_deref(), Some("PCI"));

        let unknown = SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::Unknown,
        };
        assert_eq!(ReportedPort::from(unknown).description, None);
    }

    #[test]
    fn backend_names_in_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: Backend,
        }
        let parsed: Wrapper = toml::from_str(r#"backend = "devscan""#).unwrap();
        assert_eq!(parsed.backend, Backend::DevScan);
        let parsed: Wrapper = toml::from_str(r#"backend = "system""#).unwrap();
        assert_eq!(parsed.backend, Backend::System);
    }
}

use anyhow::Result;
use log::{debug, info};
use std::io::Write;
use std::time::Duration;

use super::enumerate::{PortEnumerator, ReportedPort};
use super::probe::PortProber;

pub const NO_PORTS_MESSAGE: &str = "No serial port is being used";
pub const HEADER: &str = "Available serial ports:";

/// One discovered serial interface. `description` is empty when unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub device: String,
    pub description: String,
}

impl PortRecord {
    pub fn new(device: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            description: description.into(),
        }
    }
}

impl From<ReportedPort> for PortRecord {
    fn from(port: ReportedPort) -> Self {
        Self {
            device: port.device,
            description: port.description.unwrap_or_default(),
        }
    }
}

/// Lists serial ports, keeping only the ones that open within `timeout`
/// when `verify_access` is set.
///
/// Order follows the enumerator. Only an enumeration failure is an error;
/// a port that cannot be opened is left out.
pub fn list_ports<E, P>(
    enumerator: &E,
    prober: &P,
    timeout: Duration,
    verify_access: bool,
) -> Result<Vec<PortRecord>>
where
    E: PortEnumerator + ?Sized,
    P: PortProber + ?Sized,
{
    let reported = enumerator.enumerate()?;
    debug!("enumerator reported {} port(s)", reported.len());

    let records = reported
        .into_iter()
        .filter(|port| !verify_access || prober.is_accessible(&port.device, timeout))
        .map(PortRecord::from)
        .collect();

    Ok(records)
}

pub fn format_ports(records: &[PortRecord]) -> String {
    if records.is_empty() {
        return NO_PORTS_MESSAGE.to_string();
    }

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(String::new());
    for record in records {
        if record.description.is_empty() {
            lines.push(format!("* {}", record.device));
        } else {
            lines.push(format!("* {} - {}", record.device, record.description));
        }
    }
    lines.join("\n")
}

/// Lists, formats and prints. Returns the process exit code.
pub fn run<E, P>(
    enumerator: &E,
    prober: &P,
    timeout: Duration,
    verify_access: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32
where
    E: PortEnumerator + ?Sized,
    P: PortProber + ?Sized,
{
    match list_ports(enumerator, prober, timeout, verify_access) {
        Ok(records) => {
            info!("{} accessible port(s)", records.len());
            if let Err(e) = writeln!(out, "{}", format_ports(&records)) {
                let _ = writeln!(err, "Error: {}", e);
                return 1;
            }
            0
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {:#}", e);
            1
        }
    }
}

use std::io::{self, Write};
use std::time::Duration;

pub mod config;
pub mod enumerate;
pub mod list;
pub mod probe;

use config::{ListConfig, ListSettings};
use enumerate::Backend;
use probe::SerialProber;

pub use enumerate::{PortEnumerator, ReportedPort, SystemPorts};
pub use list::{PortRecord, format_ports, list_ports};
pub use probe::PortProber;

/// List ports on this machine with resolved settings. Returns the exit code.
pub fn run(settings: ListSettings) -> i32 {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let enumerator = match settings.backend.enumerator() {
        Ok(enumerator) => enumerator,
        Err(e) => {
            let _ = writeln!(err, "Error: {:#}", e);
            return 1;
        }
    };
    let prober = SerialProber::new(settings.baud);

    log::debug!(
        "backend={:?} verify={} timeout={:?} baud={}",
        settings.backend,
        settings.verify,
        settings.timeout,
        settings.baud
    );

    list::run(
        &enumerator,
        &prober,
        settings.timeout,
        settings.verify,
        &mut out,
        &mut err,
    )
}

/// Merge CLI arguments with the optional `[list]` config section and run
pub fn run_with_config(
    timeout: Option<Duration>,
    no_verify: bool,
    baud: Option<u32>,
    backend: Option<Backend>,
    config: Option<ListConfig>,
) -> i32 {
    let settings = config
        .unwrap_or_default()
        .merge_cli(timeout, no_verify, baud, backend);
    run(settings)
}

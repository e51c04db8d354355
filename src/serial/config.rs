use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::enumerate::Backend;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_BAUD: u32 = 9600;

/// `[list]` section of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListConfig {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "humantime_serde")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baud: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
}

/// Fully resolved listing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    pub timeout: Duration,
    pub verify: bool,
    pub baud: u32,
    pub backend: Backend,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            verify: true,
            baud: DEFAULT_BAUD,
            backend: Backend::default(),
        }
    }
}

impl ListConfig {
    pub fn with_defaults() -> Self {
        let defaults = ListSettings::default();
        Self {
            timeout: Some(defaults.timeout),
            verify: Some(defaults.verify),
            baud: Some(defaults.baud),
            backend: Some(defaults.backend),
        }
    }

    /// CLI values win over the file, the file wins over built-in defaults.
    pub fn merge_cli(
        mut self,
        cli_timeout: Option<Duration>,
        cli_no_verify: bool,
        cli_baud: Option<u32>,
        cli_backend: Option<Backend>,
    ) -> ListSettings {
        if cli_timeout.is_some() {
            self.timeout = cli_timeout;
        }
        if cli_no_verify {
            self.verify = Some(false);
        }
        if cli_baud.is_some() {
            self.baud = cli_baud;
        }
        if cli_backend.is_some() {
            self.backend = cli_backend;
        }

        let defaults = ListSettings::default();
        ListSettings {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            verify: self.verify.unwrap_or(defaults.verify),
            baud: self.baud.unwrap_or(defaults.baud),
            backend: self.backend.unwrap_or(defaults.backend),
        }
    }
}

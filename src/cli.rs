use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::serial::enumerate::Backend;

#[derive(Parser, Debug)]
#[command(name = "listserial")]
#[command(about = "List the serial ports available on this machine", long_about = None)]
pub struct Cli {
    /// Config file (default: ./.listserial.toml when present)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub list: ListArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Time allowed for opening each port (e.g. 1s, 250ms)
    #[arg(short, long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// List every reported port without trying to open it
    #[arg(long)]
    pub no_verify: bool,

    /// Baud rate used when opening ports
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Port enumeration backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate configuration file (.listserial.toml) in current directory
    Genconfig {
        /// Force overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

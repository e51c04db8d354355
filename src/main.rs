use clap::Parser;
use log::info;
use std::path::PathBuf;

use listserial::cli::{Cli, Commands};
use listserial::config::{AppConfig, CONFIG_FILE};
use listserial::serial;

fn main() {
    // Logs go to stderr; default to warn so stdout carries only the report
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            use std::io::Write;
            let level_style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}:{}] {level_style}{}{level_style:#}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Genconfig { force }) = cli.command {
        let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        if let Err(e) = AppConfig::generate_config_file(&path, force) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let app_config = match cli.config.as_deref() {
        Some(path) => match AppConfig::load_from_file(path) {
            Ok(cfg) => {
                info!("Using configuration file: {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                eprintln!("Error: failed to load {}: {:#}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => AppConfig::discover(),
    };

    let code = serial::run_with_config(
        cli.list.timeout,
        cli.list.no_verify,
        cli.list.baud,
        cli.list.backend,
        app_config.and_then(|c| c.list),
    );
    std::process::exit(code);
}

use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::error;
use lpdpower::config::AppConfig;
use lpdpower::RunOptions;

/// Live status page and control console for an LPD power supply unit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// INI configuration file
    #[arg(short, long, default_value = "config.ini")]
    config: PathBuf,

    /// Poll once, print the page and exit
    #[arg(long)]
    once: bool,

    /// Do not read operator actions from stdin
    #[arg(long)]
    no_input: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first (without logging)
    let config = AppConfig::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        AppConfig::default()
    });

    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    let options = RunOptions {
        once: args.once,
        read_input: !args.no_input && !args.once,
    };

    if let Err(e) = lpdpower::run(config, options).await {
        error!("Application error: {}", e);
        return Err(e);
    }
    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::DEFAULT_CONFIG_PATH;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = r###"unifi_bandwidth_monitoring"###)]
pub struct CmdArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Expose runtime instrumentation to tokio-console.
    #[arg(long)]
    pub tokio_console: bool,

    /// Set up every controller, log its sensors once and exit.
    #[arg(long)]
    pub once: bool,
}

//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
/// Creates a uniform freshwater hosing field over a latitude/longitude box.
///
/// The hosing strength is given in Sv and written as m/s. Longitudes use the
/// -180..180 convention. Example: `gfw_creator -- 45 60 -30 -10 0.15`
pub struct Cli {
    /// First latitude of the box
    pub lat_0: f64,
    /// Second latitude of the box
    pub lat_1: f64,
    /// First longitude of the box
    pub lon_0: f64,
    /// Second longitude of the box
    pub lon_1: f64,
    /// Hosing strength in Sv
    pub hosing: f64,

    /// Output file
    #[arg(short, long, default_value = "out.nc")]
    pub output: PathBuf,

    /// NetCDF template to use instead of the built-in T63 grid
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Name of the forcing variable in the template
    #[arg(long, default_value = "gfw_atmo")]
    pub variable: String,

    /// Log level
    #[arg(short, long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Installs a stderr subscriber at the requested level.
pub fn init_logging(log_level: LogLevel) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

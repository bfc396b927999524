mod area;
mod cli;
mod dataset;
mod error;
mod grid;
mod hosing;
mod template;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, init_logging, Cli};

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let filename = command::homogeneous(&cli)?;
    println!("File saved to `{}`", filename);

    Ok(())
}

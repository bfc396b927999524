//! Generate a homogeneous hosing field and save it to disk.

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    cli::{create_spinner, Cli},
    dataset::save_netcdf,
    grid::BoundingBox,
    hosing::{apply_homogeneous_hosing, create_homogeneous_hosing},
    template::load_template_from,
};

use super::command_line;

pub fn homogeneous(cli: &Cli) -> Result<String> {
    let bar = create_spinner("Generating hosing field...".to_string());
    let dataset = match cli.template {
        Some(ref path) => {
            let template = load_template_from(path, &cli.variable)
                .with_context(|| format!("Failed to load template `{}`", path.display()))?;
            let bbox = BoundingBox::new(cli.lat_0, cli.lat_1, cli.lon_0, cli.lon_1)?;
            apply_homogeneous_hosing(&template, &bbox, cli.hosing)?
        }
        None => create_homogeneous_hosing(cli.lat_0, cli.lat_1, cli.lon_0, cli.lon_1, cli.hosing)?,
    };
    bar.finish_and_clear();

    save_netcdf(&dataset, &cli.output, Some(&command_line()))
        .with_context(|| format!("Failed to write `{}`", cli.output.display()))?;
    info!(path = %cli.output.display(), "wrote forcing file");

    Ok(cli.output.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------

//! Serialises a dataset to a NetCDF file.

use std::path::Path;

use chrono::Local;
use netcdf::AttributeValue;
use tempfile::Builder;
use tracing::debug;

use crate::{dataset::Dataset, error::ForcingError, grid::AttributeList};

const HISTORY: &str = "history";

/// Writes `dataset` to `path`.
///
/// The file is written to a temporary file in the destination directory and
/// moved into place once complete. When `history` is given it is timestamped
/// and prepended to the template's `history` attribute.
pub fn save_netcdf(dataset: &Dataset, path: &Path, history: Option<&str>) -> Result<(), ForcingError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = Builder::new();
    builder.prefix(".gfw_creator").suffix(".nc");
    // Temp files default to 0600; the output should get the usual 0666 less umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let temp_path = builder.tempfile_in(directory)?.into_temp_path();

    write_file(dataset, &temp_path, history)?;
    temp_path.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), "saved dataset");

    Ok(())
}

fn write_file(dataset: &Dataset, path: &Path, history: Option<&str>) -> Result<(), ForcingError> {
    let grid = &dataset.grid;
    let mut file = netcdf::create(path)?;

    if let Some(ref time) = dataset.time {
        file.add_dimension(&time.name, time.len())?;
    }
    file.add_dimension(&grid.lat.name, grid.lat.len())?;
    file.add_dimension(&grid.lon.name, grid.lon.len())?;

    for coordinate in dataset.time.iter().chain([&grid.lat, &grid.lon]) {
        let mut var = file.add_variable::<f64>(&coordinate.name, &[coordinate.name.as_str()])?;
        put_attributes(&mut var, &coordinate.attributes)?;
        var.put_values(&coordinate.values, ..)?;
    }

    {
        let dims = [grid.lat.name.as_str(), grid.lon.name.as_str()];
        let mut var = file.add_variable::<f64>("cell_area", &dims)?;
        put_attributes(&mut var, &grid.cell_area_attributes)?;
        let values: Vec<f64> = grid.cell_area.iter().copied().collect();
        var.put_values(&values, ..)?;
    }

    {
        let forcing = &dataset.forcing;
        let mut dims = vec![];
        if let Some(ref time) = dataset.time {
            dims.push(time.name.as_str());
        }
        dims.extend([grid.lat.name.as_str(), grid.lon.name.as_str()]);

        let mut var = file.add_variable::<f32>(&forcing.name, &dims)?;
        put_attributes(&mut var, &forcing.attributes)?;
        let values: Vec<f32> = forcing.values.iter().copied().collect();
        var.put_values(&values, ..)?;
    }

    for (name, value) in &dataset.attributes {
        if name == HISTORY && history.is_some() {
            continue;
        }
        file.add_attribute(name, value.clone())?;
    }
    if let Some(command) = history {
        file.add_attribute(HISTORY, history_line(command, dataset.global_attribute(HISTORY)))?;
    }

    Ok(())
}

fn put_attributes(var: &mut netcdf::VariableMut, attributes: &AttributeList) -> Result<(), ForcingError> {
    for (name, value) in attributes {
        var.put_attribute(name, value.clone())?;
    }

    Ok(())
}

/// Builds a CDO style history entry, newest first.
fn history_line(command: &str, previous: Option<&AttributeValue>) -> String {
    let entry = format!("{}: {}", Local::now().format("%a %b %d %H:%M:%S %Y"), command);

    match previous {
        Some(AttributeValue::Str(previous)) if !previous.is_empty() => {
            format!("{}\n{}", entry, previous)
        }
        _ => entry,
    }
}

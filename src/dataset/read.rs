//! Reads a forcing template from a NetCDF file.

use std::path::Path;

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::{
    dataset::{Dataset, Forcing},
    error::ForcingError,
    grid::{AttributeList, Coordinate, Grid},
};

const LAT: &str = "lat";
const LON: &str = "lon";
const CELL_AREA: &str = "cell_area";

/// Opens `path` and reads the grid, the forcing variable `forcing_name` and
/// all global attributes. Longitudes are returned as stored in the file.
pub fn open_netcdf(path: &Path, forcing_name: &str) -> Result<Dataset, ForcingError> {
    let file = netcdf::open(path)?;

    let lat = read_coordinate(&file, LAT)?;
    let lon = read_coordinate(&file, LON)?;
    let (n_lat, n_lon) = (lat.len(), lon.len());

    let cell_area_var = file
        .variable(CELL_AREA)
        .ok_or_else(|| ForcingError::MissingVariable(CELL_AREA.to_string()))?;
    check_dimensions(&cell_area_var, &[LAT, LON])?;
    let cell_area = Array2::from_shape_vec((n_lat, n_lon), cell_area_var.get_values::<f64, _>(..)?)?;
    let cell_area_attributes = read_attributes(cell_area_var.attributes());

    let forcing_var = file
        .variable(forcing_name)
        .ok_or_else(|| ForcingError::MissingVariable(forcing_name.to_string()))?;
    let dims: Vec<String> = forcing_var.dimensions().iter().map(|d| d.name()).collect();

    let time = match dims.len() {
        2 => {
            check_dimensions(&forcing_var, &[LAT, LON])?;
            None
        }
        3 => {
            let time_name = dims[0].clone();
            check_dimensions(&forcing_var, &[time_name.as_str(), LAT, LON])?;
            let time = match file.variable(&time_name) {
                Some(_) => read_coordinate(&file, &time_name)?,
                None => {
                    let n_time = forcing_var.dimensions()[0].len();
                    Coordinate::new(&time_name, (0..n_time).map(|t| t as f64).collect(), vec![])
                }
            };
            Some(time)
        }
        _ => {
            return Err(ForcingError::Layout {
                name: forcing_name.to_string(),
                reason: format!("expected (lat, lon) or (time, lat, lon), found {:?}", dims),
            })
        }
    };

    let n_time = time.as_ref().map_or(1, Coordinate::len);
    let values = Array3::from_shape_vec(
        (n_time, n_lat, n_lon),
        forcing_var.get_values::<f32, _>(..)?,
    )?;
    let forcing = Forcing {
        name: forcing_name.to_string(),
        values,
        attributes: read_attributes(forcing_var.attributes()),
    };

    let attributes = read_attributes(file.attributes());

    debug!(
        path = %path.display(),
        n_lat,
        n_lon,
        n_time,
        "read template"
    );

    Ok(Dataset {
        grid: Grid {
            lat,
            lon,
            cell_area,
            cell_area_attributes,
        },
        time,
        forcing,
        attributes,
    })
}

fn read_coordinate(file: &netcdf::File, name: &str) -> Result<Coordinate, ForcingError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ForcingError::MissingVariable(name.to_string()))?;
    if var.dimensions().len() != 1 {
        return Err(ForcingError::Layout {
            name: name.to_string(),
            reason: "coordinate variables must be one-dimensional".to_string(),
        });
    }
    let values: Vec<f64> = var.get_values(..)?;

    Ok(Coordinate::new(name, values, read_attributes(var.attributes())))
}

fn check_dimensions(var: &netcdf::Variable, expected: &[&str]) -> Result<(), ForcingError> {
    let found: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    if found != expected {
        return Err(ForcingError::Layout {
            name: var.name(),
            reason: format!("expected dimensions {:?}, found {:?}", expected, found),
        });
    }

    Ok(())
}

/// Collects attributes in file order, skipping any the library cannot decode.
fn read_attributes<'a>(attributes: impl Iterator<Item = netcdf::Attribute<'a>>) -> AttributeList {
    attributes
        .filter_map(|attr| match attr.value() {
            Ok(value) => Some((attr.name().to_string(), value)),
            Err(e) => {
                debug!(attribute = attr.name(), error = %e, "skipping attribute");
                None
            }
        })
        .collect()
}

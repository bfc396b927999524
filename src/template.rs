//! Provides the grid template the hosing field is written onto.
//!
//! The built-in template is the ECHAM6 T63 Gaussian grid used by AWI-ESM for
//! its `gfw_atmo` freshwater forcing. It is generated in memory on every call,
//! so nothing is written to the working directory.

use std::{f64::consts::PI, path::Path};

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::{
    dataset::{open_netcdf, Dataset, Forcing},
    error::ForcingError,
    grid::{gaussian::gaussian_latitudes, AttributeList, Coordinate, Grid},
};

/// Number of Gaussian latitudes of the T63 grid.
pub const T63_LATITUDES: usize = 96;
/// Number of longitudes of the T63 grid.
pub const T63_LONGITUDES: usize = 192;
/// Earth radius used for cell areas, in metres.
pub const EARTH_RADIUS: f64 = 6_371_000.0;
/// Name of the forcing variable read by the AWI-ESM gfw_atmo switch.
pub const FORCING_VARIABLE: &str = "gfw_atmo";

/// Builds the T63 template with an all-zero forcing field and sorted
/// longitudes in [-180, 180).
pub fn load_template() -> Result<Dataset, ForcingError> {
    let (latitudes, weights) = gaussian_latitudes(T63_LATITUDES);
    let spacing = 360.0 / T63_LONGITUDES as f64;
    let longitudes: Vec<f64> = (0..T63_LONGITUDES).map(|i| i as f64 * spacing).collect();

    // A Gaussian row spans sin(lat) bounds whose difference is its weight.
    let column_width = 2.0 * PI / T63_LONGITUDES as f64;
    let cell_area = Array2::from_shape_fn((T63_LATITUDES, T63_LONGITUDES), |(j, _)| {
        EARTH_RADIUS * EARTH_RADIUS * column_width * weights[j]
    });

    let grid = Grid {
        lat: Coordinate::new("lat", latitudes, coordinate_attributes("latitude", "degrees_north", "Y")),
        lon: Coordinate::new("lon", longitudes, coordinate_attributes("longitude", "degrees_east", "X")),
        cell_area,
        cell_area_attributes: vec![
            ("standard_name".to_string(), "area".into()),
            ("long_name".to_string(), "area of grid cell".into()),
            ("units".to_string(), "m2".into()),
        ],
    };

    let forcing = Forcing {
        name: FORCING_VARIABLE.to_string(),
        values: Array3::zeros((1, T63_LATITUDES, T63_LONGITUDES)),
        attributes: vec![
            ("long_name".to_string(), "freshwater flux".into()),
            ("units".to_string(), "m/s".into()),
        ],
    };

    let attributes: AttributeList = vec![
        ("Conventions".to_string(), "CF-1.6".into()),
        (
            "Comments".to_string(),
            "Freshwater forcing file for use with the gfw_atmo switch in AWI-ESM".into(),
        ),
        ("grid".to_string(), "T63 Gaussian (96 x 192)".into()),
    ];

    let dataset = Dataset {
        grid,
        time: None,
        forcing,
        attributes,
    }
    .normalize_longitudes();

    debug!(
        n_lat = T63_LATITUDES,
        n_lon = T63_LONGITUDES,
        total_area = dataset.grid.total_area(),
        "built T63 template"
    );

    Ok(dataset)
}

/// Reads a template from a NetCDF file and normalizes its longitudes.
pub fn load_template_from(path: &Path, forcing_name: &str) -> Result<Dataset, ForcingError> {
    let dataset = open_netcdf(path, forcing_name)?.normalize_longitudes();

    debug!(path = %path.display(), "loaded template file");

    Ok(dataset)
}

fn coordinate_attributes(name: &str, units: &str, axis: &str) -> AttributeList {
    vec![
        ("standard_name".to_string(), name.into()),
        ("long_name".to_string(), name.into()),
        ("units".to_string(), units.into()),
        ("axis".to_string(), axis.into()),
    ]
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_build_t63_dimensions() {
        let template = load_template().unwrap();

        assert_eq!(template.grid.shape(), (96, 192));
        assert_eq!(template.forcing.values.dim(), (1, 96, 192));
        assert!(template.time.is_none());
        assert_eq!(template.forcing.name, "gfw_atmo");
    }

    #[test]
    fn should_sort_longitudes_into_dateline_convention() {
        let template = load_template().unwrap();
        let lon = &template.grid.lon.values;

        assert_eq!(lon[0], -180.0);
        assert_eq!(lon[191], 178.125);
        assert!(lon.windows(2).all(|w| w[0] < w[1]));
        assert!(lon.iter().all(|l| (-180.0..180.0).contains(l)));
    }

    #[test]
    fn should_start_with_zero_forcing() {
        let template = load_template().unwrap();
        assert!(template.forcing.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn should_cover_the_sphere() {
        let template = load_template().unwrap();
        let sphere = 4.0 * PI * EARTH_RADIUS * EARTH_RADIUS;
        let relative = (template.grid.total_area() - sphere).abs() / sphere;

        assert!(relative < 1e-9, "relative error {}", relative);
    }

    #[test]
    fn should_shrink_cells_towards_the_poles() {
        let template = load_template().unwrap();
        let area = &template.grid.cell_area;

        assert!(area[[0, 0]] < area[[47, 0]]);
        assert_eq!(area[[10, 0]], area[[10, 100]]);
    }

    #[test]
    fn should_fail_for_missing_template_file() {
        let result = load_template_from(Path::new("does/not/exist.nc"), FORCING_VARIABLE);
        assert!(matches!(result, Err(ForcingError::NetCDF(_))));
    }
}

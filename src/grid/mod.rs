//! Latitude/longitude grid, bounding boxes and the longitude convention.

pub mod gaussian;

use std::fmt;

use ndarray::{Array2, Axis};
use netcdf::AttributeValue;

use crate::error::ForcingError;

/// Ordered `(name, value)` NetCDF attributes, kept in file order.
pub type AttributeList = Vec<(String, AttributeValue)>;

#[derive(Debug, Clone)]
/// A 1-D coordinate variable such as `lat`, `lon` or `time`.
pub struct Coordinate {
    pub name: String,
    pub values: Vec<f64>,
    pub attributes: AttributeList,
}

impl Coordinate {
    pub fn new(name: &str, values: Vec<f64>, attributes: AttributeList) -> Self {
        Coordinate {
            name: name.to_string(),
            values,
            attributes,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone)]
/// A rectilinear grid with the physical area of every cell, indexed `(lat, lon)`.
pub struct Grid {
    pub lat: Coordinate,
    pub lon: Coordinate,
    pub cell_area: Array2<f64>,
    pub cell_area_attributes: AttributeList,
}

impl Grid {
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    pub fn total_area(&self) -> f64 {
        self.cell_area.sum()
    }

    /// Reorders the longitude axis so that column `i` becomes column `order[i]`.
    pub fn select_longitudes(&mut self, order: &[usize]) {
        self.lon.values = order.iter().map(|&i| self.lon.values[i]).collect();
        self.cell_area = self.cell_area.select(Axis(1), order);
    }
}

/// Maps a longitude into [-180, 180).
pub fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Normalizes every longitude and returns the permutation that sorts them
/// ascending. Ties keep their original order.
pub fn longitude_sort_order(lon: &mut [f64]) -> Vec<usize> {
    for value in lon.iter_mut() {
        *value = normalize_longitude(*value);
    }

    let mut order: Vec<usize> = (0..lon.len()).collect();
    order.sort_by(|&a, &b| lon[a].total_cmp(&lon[b]));

    order
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A latitude/longitude rectangle. Corners may be given in any order.
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_0: f64, lat_1: f64, lon_0: f64, lon_1: f64) -> Result<Self, ForcingError> {
        for lat in [lat_0, lat_1] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ForcingError::LatitudeOutOfRange(lat));
            }
        }
        for lon in [lon_0, lon_1] {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ForcingError::LongitudeOutOfRange(lon));
            }
        }

        Ok(BoundingBox {
            lat_min: lat_0.min(lat_1),
            lat_max: lat_0.max(lat_1),
            lon_min: lon_0.min(lon_1),
            lon_max: lon_0.max(lon_1),
        })
    }

    /// True when a cell centre lies inside the box, edges included.
    ///
    /// Grids store the dateline as -180, so an eastern edge at 180 also
    /// selects that column.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let on_dateline = self.lon_max == 180.0 && lon == -180.0;

        (self.lat_min..=self.lat_max).contains(&lat)
            && ((self.lon_min..=self.lon_max).contains(&lon) || on_dateline)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {}..{}, lon {}..{}",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        )
    }
}

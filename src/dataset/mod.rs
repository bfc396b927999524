//! In-memory forcing dataset and its NetCDF representation.

pub mod read;
pub mod write;

use ndarray::{Array3, Axis};

use crate::grid::{longitude_sort_order, AttributeList, Coordinate, Grid};

pub use read::open_netcdf;
pub use write::save_netcdf;

#[derive(Debug, Clone)]
/// The forcing variable, indexed `(time, lat, lon)`.
///
/// Templates without a time dimension hold a single time slice.
pub struct Forcing {
    pub name: String,
    pub values: Array3<f32>,
    pub attributes: AttributeList,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub grid: Grid,
    pub time: Option<Coordinate>,
    pub forcing: Forcing,
    /// Global attributes, forwarded unchanged from the template.
    pub attributes: AttributeList,
}

impl Dataset {
    /// Moves longitudes into [-180, 180) and sorts the longitude axis,
    /// carrying every gridded field along.
    pub fn normalize_longitudes(mut self) -> Self {
        let order = longitude_sort_order(&mut self.grid.lon.values);
        self.grid.select_longitudes(&order);
        self.forcing.values = self.forcing.values.select(Axis(2), &order);

        self
    }

    pub fn global_attribute(&self, name: &str) -> Option<&netcdf::AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    #[test]
    fn should_carry_forcing_along_when_sorting_longitudes() {
        let grid = Grid {
            lat: Coordinate::new("lat", vec![0.0], vec![]),
            lon: Coordinate::new("lon", vec![90.0, 270.0, 350.0], vec![]),
            cell_area: array![[1.0, 2.0, 3.0]],
            cell_area_attributes: vec![],
        };
        let dataset = Dataset {
            grid,
            time: None,
            forcing: Forcing {
                name: "gfw_atmo".to_string(),
                values: array![[[10.0, 20.0, 30.0]]],
                attributes: vec![],
            },
            attributes: vec![("Conventions".to_string(), "CF-1.6".into())],
        }
        .normalize_longitudes();

        assert_eq!(dataset.grid.lon.values, vec![-90.0, -10.0, 90.0]);
        assert_eq!(dataset.grid.cell_area, array![[2.0, 3.0, 1.0]]);
        assert_eq!(dataset.forcing.values, array![[[20.0, 30.0, 10.0]]]);
        assert!(dataset.global_attribute("Conventions").is_some());
        assert!(dataset.global_attribute("history").is_none());
    }
}

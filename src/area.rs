//! Area of a latitude/longitude box on a grid.

use ndarray::Array2;

use crate::grid::{BoundingBox, Grid};

/// Marks the cells whose centre lies inside `bbox`.
pub fn box_mask(grid: &Grid, bbox: &BoundingBox) -> Array2<bool> {
    let lat = &grid.lat.values;
    let lon = &grid.lon.values;

    Array2::from_shape_fn(grid.shape(), |(j, i)| bbox.contains(lat[j], lon[i]))
}

/// Total area of the selected cells, in the units of `cell_area` (m²).
pub fn box_area(grid: &Grid, bbox: &BoundingBox) -> f64 {
    box_mask(grid, bbox)
        .iter()
        .zip(grid.cell_area.iter())
        .filter_map(|(&selected, &area)| selected.then_some(area))
        .sum()
}

//! Homogeneous freshwater hosing over a latitude/longitude box.
//!
//! The hosing strength is given as a volume flux in Sverdrups. The forcing
//! field expects a flux per unit area (m/s), so the volume flux is spread
//! evenly over the area of the cells selected by the box.

use ndarray::Axis;
use tracing::info;

use crate::{
    area::{box_area, box_mask},
    dataset::Dataset,
    error::ForcingError,
    grid::BoundingBox,
    template::load_template,
};

/// One Sverdrup in m³/s.
pub const SVERDRUP: f64 = 1.0e6;

pub fn sverdrup_to_cubic_metres(strength_sv: f64) -> f64 {
    strength_sv * SVERDRUP
}

/// Converts a volume flux in Sv into a flux per area (m/s) over `area_m2`.
pub fn per_area_rate(strength_sv: f64, area_m2: f64) -> Result<f64, ForcingError> {
    if !strength_sv.is_finite() {
        return Err(ForcingError::InvalidStrength(strength_sv));
    }

    Ok(sverdrup_to_cubic_metres(strength_sv) / area_m2)
}

/// Creates a hosing field on the built-in template.
///
/// The box corners may be given in any order.
pub fn create_homogeneous_hosing(
    lat_0: f64,
    lat_1: f64,
    lon_0: f64,
    lon_1: f64,
    hosing_strength: f64,
) -> Result<Dataset, ForcingError> {
    let bbox = BoundingBox::new(lat_0, lat_1, lon_0, lon_1)?;
    let template = load_template()?;

    apply_homogeneous_hosing(&template, &bbox, hosing_strength)
}

/// Returns a copy of `template` whose forcing is `hosing_strength` Sv spread
/// uniformly over the cells inside `bbox`, at every time step. Cells outside
/// the box keep their template value.
pub fn apply_homogeneous_hosing(
    template: &Dataset,
    bbox: &BoundingBox,
    hosing_strength: f64,
) -> Result<Dataset, ForcingError> {
    let area = box_area(&template.grid, bbox);
    if area <= 0.0 || !area.is_finite() {
        return Err(ForcingError::EmptyBox(*bbox));
    }
    let rate = per_area_rate(hosing_strength, area)?;

    let mask = box_mask(&template.grid, bbox);
    let mut dataset = template.clone();
    for mut slice in dataset.forcing.values.axis_iter_mut(Axis(0)) {
        slice.zip_mut_with(&mask, |value, &selected| {
            if selected {
                *value = rate as f32;
            }
        });
    }

    info!(
        %bbox,
        area_m2 = area,
        cells = mask.iter().filter(|&&m| m).count(),
        rate_m_per_s = rate,
        "applied homogeneous hosing of {} Sv",
        hosing_strength
    );

    Ok(dataset)
}

//! Errors raised while building a hosing field.

use thiserror::Error;

use crate::grid::BoundingBox;

#[derive(Debug, Error)]
pub enum ForcingError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]; give longitudes in the -180..180 convention")]
    LongitudeOutOfRange(f64),

    #[error("hosing strength must be a finite number of Sv, got {0}")]
    InvalidStrength(f64),

    /// The box selects no grid cell, so there is no area to spread the flux over.
    #[error("bounding box {0} contains no grid cell centres")]
    EmptyBox(BoundingBox),

    #[error("template has no variable `{0}`")]
    MissingVariable(String),

    #[error("variable `{name}` has an unsupported layout: {reason}")]
    Layout { name: String, reason: String },

    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

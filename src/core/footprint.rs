//! Frozen footprint of a control.
//!
//! While the content is swapped for an icon, the control keeps the size it
//! had before the swap so that surrounding layout does not shift.

use super::error::{DimensionError, FootprintError};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Rendered size of a control, in pixels.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::Footprint;
///
/// let footprint = Footprint::new(36.0, 120.0).unwrap();
/// assert_eq!(footprint.height(), 36.0);
/// assert!(Footprint::new(f64::NAN, -1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    height: f64,
    width: f64,
}

impl Footprint {
    /// Build a footprint from a measured size.
    ///
    /// Both dimensions are checked and every violation is reported.
    pub fn new(height: f64, width: f64) -> Result<Self, FootprintError> {
        let checks = vec![
            check_dimension("height", height),
            check_dimension("width", width),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(Self { height, width }),
            Validation::Failure(errors) => Err(FootprintError::Invalid(
                errors.iter().cloned().collect(),
            )),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

fn check_dimension(
    dimension: &'static str,
    value: f64,
) -> Validation<(), NonEmptyVec<DimensionError>> {
    if !value.is_finite() {
        Validation::fail(DimensionError::NotFinite { dimension, value })
    } else if value < 0.0 {
        Validation::fail(DimensionError::Negative { dimension, value })
    } else {
        Validation::success(())
    }
}

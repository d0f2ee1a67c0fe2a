use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Ring radii as fractions of the double-outer radius.
///
/// Defaults follow the regulation board (170 mm from center to the outside
/// of the double ring): 6.35 mm inner bull, 15.9 mm outer bull, triple band
/// 99–107 mm, double band 162–170 mm. Boards photographed at an angle can
/// override these after undistortion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingFractions {
    pub inner_bull: f64,
    pub outer_bull: f64,
    pub triple_inner: f64,
    pub triple_outer: f64,
    pub double_inner: f64,
    pub double_outer: f64,
}

impl Default for RingFractions {
    fn default() -> Self {
        Self {
            inner_bull: 6.35 / 170.0,
            outer_bull: 15.9 / 170.0,
            triple_inner: 99.0 / 170.0,
            triple_outer: 107.0 / 170.0,
            double_inner: 162.0 / 170.0,
            double_outer: 1.0,
        }
    }
}

impl RingFractions {
    fn as_array(&self) -> [f64; 6] {
        [
            self.inner_bull,
            self.outer_bull,
            self.triple_inner,
            self.triple_outer,
            self.double_inner,
            self.double_outer,
        ]
    }
}

/// Errors for inconsistent calibration parameters.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CalibrationError {
    #[error("outer radius must be positive and finite (got {0})")]
    BadRadius(f64),
    #[error("board center must be finite (got ({0}, {1}))")]
    BadCenter(f64, f64),
    #[error("ring fractions must be finite and strictly increasing in (0, 1]")]
    BadRingOrder,
    #[error("the double_outer fraction must be exactly 1.0 (got {0})")]
    BadDoubleOuter(f64),
    #[error("rotation must be finite (got {0} deg)")]
    BadRotation(f64),
}

/// Where the board sits in the camera frame.
///
/// Supplied once at startup or through an explicit recalibration call;
/// nothing in the workspace hard-codes per-camera constants. All lengths are
/// in pixels of the frame the detector reports coordinates in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCalibration {
    /// Center of the bull in frame coordinates.
    pub center: Point2<f64>,
    /// Distance from the center to the outside of the double ring.
    pub outer_radius: f64,
    #[serde(default)]
    pub rings: RingFractions,
    /// Wedge-angle offset for boards not mounted with the 20 at twelve
    /// o'clock. Positive values rotate the board clockwise in the image.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Frame dimensions, when known. Coordinates outside the frame are then
    /// rejected as a caller bug instead of being treated as misses.
    #[serde(default)]
    pub frame_size: Option<[u32; 2]>,
}

impl BoardCalibration {
    /// Calibration with default ring geometry, no rotation, unknown frame.
    pub fn new(center: Point2<f64>, outer_radius: f64) -> Result<Self, CalibrationError> {
        let calibration = Self {
            center,
            outer_radius,
            rings: RingFractions::default(),
            rotation_deg: 0.0,
            frame_size: None,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check every invariant once, so mapping never has to.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(CalibrationError::BadCenter(self.center.x, self.center.y));
        }
        if !self.outer_radius.is_finite() || self.outer_radius <= 0.0 {
            return Err(CalibrationError::BadRadius(self.outer_radius));
        }
        if !self.rotation_deg.is_finite() {
            return Err(CalibrationError::BadRotation(self.rotation_deg));
        }

        let fractions = self.rings.as_array();
        let mut previous = 0.0;
        for f in fractions {
            if !f.is_finite() || f <= previous || f > 1.0 {
                return Err(CalibrationError::BadRingOrder);
            }
            previous = f;
        }
        if self.rings.double_outer != 1.0 {
            return Err(CalibrationError::BadDoubleOuter(self.rings.double_outer));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rings_are_valid() {
        let cal = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        assert!(cal.validate().is_ok());
    }

    #[test]
    fn rejects_bad_radius() {
        assert_eq!(
            BoardCalibration::new(Point2::new(0.0, 0.0), 0.0),
            Err(CalibrationError::BadRadius(0.0))
        );
        assert!(matches!(
            BoardCalibration::new(Point2::new(0.0, 0.0), f64::NAN),
            Err(CalibrationError::BadRadius(_))
        ));
    }

    #[test]
    fn rejects_non_monotonic_rings() {
        let mut cal = BoardCalibration::new(Point2::new(0.0, 0.0), 100.0).unwrap();
        cal.rings.triple_inner = cal.rings.triple_outer + 0.01;
        assert_eq!(cal.validate(), Err(CalibrationError::BadRingOrder));
    }

    #[test]
    fn rejects_short_double_outer() {
        let mut cal = BoardCalibration::new(Point2::new(0.0, 0.0), 100.0).unwrap();
        cal.rings.double_outer = 0.99;
        assert_eq!(cal.validate(), Err(CalibrationError::BadDoubleOuter(0.99)));
    }

    #[test]
    fn serde_defaults_fill_optional_fields() {
        let cal: BoardCalibration =
            serde_json::from_str(r#"{"center": [320.0, 240.0], "outer_radius": 200.0}"#).unwrap();
        assert_eq!(cal.rings, RingFractions::default());
        assert_eq!(cal.rotation_deg, 0.0);
        assert_eq!(cal.frame_size, None);
        assert!(cal.validate().is_ok());
    }
}

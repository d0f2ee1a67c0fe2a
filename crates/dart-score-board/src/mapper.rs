use log::debug;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use dart_score_core::{Hit, InvalidHit, Multiplier, Segment, Throw};

use crate::calibration::{BoardCalibration, CalibrationError};

/// Wedge numbers in clockwise order starting at twelve o'clock.
pub const WEDGE_ORDER: [u8; 20] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

const WEDGE_DEG: f64 = 18.0;

/// Concentric scoring bands, innermost first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Ring {
    InnerBull,
    OuterBull,
    InnerSingle,
    Triple,
    OuterSingle,
    Double,
}

impl Ring {
    pub fn multiplier(self) -> Multiplier {
        match self {
            Ring::InnerBull => Multiplier::Double,
            Ring::OuterBull => Multiplier::Single,
            Ring::InnerSingle | Ring::OuterSingle => Multiplier::Single,
            Ring::Triple => Multiplier::Triple,
            Ring::Double => Multiplier::Double,
        }
    }
}

/// Errors for coordinates the mapper cannot interpret at all.
///
/// A dart landing off the board is *not* an error: `map_point` reports it
/// as `Ok(None)`.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MapError {
    #[error("point ({x:.1}, {y:.1}) is outside the {width}x{height} camera frame")]
    OutOfFrame {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
    #[error("point coordinates must be finite (got ({0}, {1}))")]
    NonFinite(f64, f64),
}

/// Maps detected dart-tip pixels to scored hits.
pub struct BoardMapper {
    calibration: BoardCalibration,
}

impl BoardMapper {
    pub fn new(calibration: BoardCalibration) -> Result<Self, CalibrationError> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &BoardCalibration {
        &self.calibration
    }

    /// Map one detected dart tip to a throw.
    ///
    /// `Ok(None)` means the point is on-frame but off the board (a miss).
    /// Coordinates outside a known frame are a caller bug and are rejected.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self), fields(x = point.x, y = point.y))
    )]
    pub fn map_point(&self, point: Point2<f64>) -> Result<Option<Throw>, MapError> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(MapError::NonFinite(point.x, point.y));
        }
        if let Some([width, height]) = self.calibration.frame_size {
            if point.x < 0.0
                || point.y < 0.0
                || point.x >= f64::from(width)
                || point.y >= f64::from(height)
            {
                return Err(MapError::OutOfFrame {
                    x: point.x,
                    y: point.y,
                    width,
                    height,
                });
            }
        }

        let offset = point - self.calibration.center;
        let distance = offset.norm();
        if distance > self.calibration.outer_radius {
            debug!(
                "miss: ({:.1}, {:.1}) is {:.1}px from center (board radius {:.1})",
                point.x, point.y, distance, self.calibration.outer_radius
            );
            return Ok(None);
        }

        let ring = self.ring_at_fraction(distance / self.calibration.outer_radius);
        let hit = match ring {
            Ring::InnerBull => Hit::INNER_BULL,
            Ring::OuterBull => Hit::OUTER_BULL,
            _ => {
                let wedge = self.wedge_at(offset);
                Hit::new(Segment::Wedge(wedge), ring.multiplier())
                    .expect("wedge table entries are in 1..=20")
            }
        };
        Ok(Some(Throw {
            hit,
            position: point,
        }))
    }

    /// Resolve the ring for a radius fraction in `[0, 1]`.
    ///
    /// Boundaries are half-open toward the center, so a point exactly on a
    /// ring boundary belongs to the outer ring.
    pub fn ring_at_fraction(&self, fraction: f64) -> Ring {
        let rings = &self.calibration.rings;
        if fraction < rings.inner_bull {
            Ring::InnerBull
        } else if fraction < rings.outer_bull {
            Ring::OuterBull
        } else if fraction < rings.triple_inner {
            Ring::InnerSingle
        } else if fraction < rings.triple_outer {
            Ring::Triple
        } else if fraction < rings.double_inner {
            Ring::OuterSingle
        } else {
            Ring::Double
        }
    }

    /// Resolve the wedge for a board angle in degrees, counter-clockwise
    /// with 0 at three o'clock (y up, the usual math convention).
    ///
    /// Wedges are half-open 18-degree sectors swept clockwise from twelve
    /// o'clock, so a point exactly on a wedge boundary belongs to the wedge
    /// clockwise of it.
    pub fn wedge_at_angle(&self, theta_deg: f64) -> u8 {
        let sweep =
            (90.0 + WEDGE_DEG / 2.0 - theta_deg - self.calibration.rotation_deg).rem_euclid(360.0);
        let index = ((sweep / WEDGE_DEG) as usize).min(WEDGE_ORDER.len() - 1);
        WEDGE_ORDER[index]
    }

    /// Pixel at the center of a segment/ring patch.
    ///
    /// The radial center of the band and the angular center of the wedge
    /// (ignored for the bulls). Useful for overlay rendering and for
    /// synthesizing detections in tests.
    pub fn point_at(&self, ring: Ring, wedge: u8) -> Result<Point2<f64>, InvalidHit> {
        if !(1..=20).contains(&wedge) {
            return Err(InvalidHit::WedgeOutOfRange(wedge));
        }
        let rings = &self.calibration.rings;
        let (band_inner, band_outer) = match ring {
            Ring::InnerBull => (0.0, rings.inner_bull),
            Ring::OuterBull => (rings.inner_bull, rings.outer_bull),
            Ring::InnerSingle => (rings.outer_bull, rings.triple_inner),
            Ring::Triple => (rings.triple_inner, rings.triple_outer),
            Ring::OuterSingle => (rings.triple_outer, rings.double_inner),
            Ring::Double => (rings.double_inner, rings.double_outer),
        };
        let distance = (band_inner + band_outer) / 2.0 * self.calibration.outer_radius;

        let index = WEDGE_ORDER
            .iter()
            .position(|&w| w == wedge)
            .expect("wedge numbers 1..=20 all appear in WEDGE_ORDER");
        let theta_deg =
            90.0 - self.calibration.rotation_deg - WEDGE_DEG * index as f64;
        let theta = theta_deg.to_radians();

        let direction = Vector2::new(theta.cos(), -theta.sin());
        Ok(self.calibration.center + direction * distance)
    }

    fn wedge_at(&self, offset: Vector2<f64>) -> u8 {
        // image y grows downward; flip to a counter-clockwise board angle
        let theta_deg = (-offset.y).atan2(offset.x).to_degrees();
        self.wedge_at_angle(theta_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mapper() -> BoardMapper {
        let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        BoardMapper::new(calibration).unwrap()
    }

    fn hit_at(m: &BoardMapper, point: Point2<f64>) -> Hit {
        m.map_point(point)
            .expect("in-frame point")
            .expect("on-board point")
            .hit
    }

    #[test]
    fn every_wedge_center_round_trips() {
        let m = mapper();
        for wedge in 1..=20u8 {
            for (ring, multiplier) in [
                (Ring::InnerSingle, Multiplier::Single),
                (Ring::Triple, Multiplier::Triple),
                (Ring::OuterSingle, Multiplier::Single),
                (Ring::Double, Multiplier::Double),
            ] {
                let point = m.point_at(ring, wedge).unwrap();
                let hit = hit_at(&m, point);
                assert_eq!(hit.segment(), Segment::Wedge(wedge));
                assert_eq!(hit.multiplier(), multiplier);
            }
        }
    }

    #[test]
    fn bulls() {
        let m = mapper();
        assert_eq!(hit_at(&m, Point2::new(320.0, 240.0)), Hit::INNER_BULL);
        let outer = m.point_at(Ring::OuterBull, 20).unwrap();
        assert_eq!(hit_at(&m, outer), Hit::OUTER_BULL);
    }

    #[test]
    fn twelve_oclock_is_a_20() {
        let m = mapper();
        // straight up at half radius: single 20
        let hit = hit_at(&m, Point2::new(320.0, 140.0));
        assert_eq!(hit, Hit::single(20).unwrap());
    }

    #[test]
    fn beyond_the_double_ring_is_a_miss() {
        let m = mapper();
        assert_eq!(m.map_point(Point2::new(320.0, 39.9)), Ok(None));
        assert_eq!(m.map_point(Point2::new(545.0, 240.0)), Ok(None));
    }

    #[test]
    fn board_edge_is_a_double_not_a_miss() {
        let m = mapper();
        // exactly outer_radius to the right of center: double 6
        let hit = hit_at(&m, Point2::new(520.0, 240.0));
        assert_eq!(hit, Hit::double(6).unwrap());
    }

    #[test]
    fn ring_boundary_belongs_to_the_outer_ring() {
        let m = mapper();
        let rings = m.calibration().rings;
        assert_eq!(m.ring_at_fraction(0.0), Ring::InnerBull);
        assert_eq!(m.ring_at_fraction(rings.inner_bull), Ring::OuterBull);
        assert_eq!(m.ring_at_fraction(rings.outer_bull), Ring::InnerSingle);
        assert_eq!(m.ring_at_fraction(rings.triple_inner), Ring::Triple);
        assert_eq!(m.ring_at_fraction(rings.triple_outer), Ring::OuterSingle);
        assert_eq!(m.ring_at_fraction(rings.double_inner), Ring::Double);
        assert_eq!(m.ring_at_fraction(1.0), Ring::Double);
    }

    #[test]
    fn wedge_boundary_belongs_to_the_clockwise_wedge() {
        let m = mapper();
        // boundaries sit at 99 - 18k degrees; the sweep is half-open
        assert_eq!(m.wedge_at_angle(99.0), 20);
        assert_eq!(m.wedge_at_angle(81.0), 1);
        assert_eq!(m.wedge_at_angle(63.0), 18);
        assert_eq!(m.wedge_at_angle(90.0), 20);
        assert_eq!(m.wedge_at_angle(90.0 + 360.0), 20);
        assert_eq!(m.wedge_at_angle(99.0 + 1e-9), 5);
    }

    #[test]
    fn rotation_offset_shifts_the_wedges() {
        let mut calibration = BoardCalibration::new(Point2::new(0.0, 0.0), 100.0).unwrap();
        calibration.rotation_deg = 18.0;
        let m = BoardMapper::new(calibration).unwrap();
        // board rotated one wedge clockwise: the 5 is now at the top
        assert_eq!(m.wedge_at_angle(90.0), 5);
        let top = hit_at(&m, Point2::new(0.0, -50.0));
        assert_eq!(top, Hit::single(5).unwrap());
    }

    #[test]
    fn out_of_frame_is_an_error_not_a_miss() {
        let mut calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        calibration.frame_size = Some([640, 480]);
        let m = BoardMapper::new(calibration).unwrap();
        assert!(matches!(
            m.map_point(Point2::new(-1.0, 10.0)),
            Err(MapError::OutOfFrame { .. })
        ));
        assert!(matches!(
            m.map_point(Point2::new(640.0, 10.0)),
            Err(MapError::OutOfFrame { .. })
        ));
        // on-frame but off-board stays a miss
        assert_eq!(m.map_point(Point2::new(1.0, 1.0)), Ok(None));
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let m = mapper();
        assert!(matches!(
            m.map_point(Point2::new(f64::NAN, 0.0)),
            Err(MapError::NonFinite(..))
        ));
    }

    #[test]
    fn point_at_respects_band_centers() {
        let m = mapper();
        let p = m.point_at(Ring::Double, 20).unwrap();
        let expected = (m.calibration().rings.double_inner + 1.0) / 2.0 * 200.0;
        assert_relative_eq!((p - m.calibration().center).norm(), expected, epsilon = 1e-9);
    }
}

//! Calibrated dartboard geometry built on top of `dart-score-core`.
//!
//! ## Quickstart
//!
//! ```
//! use dart_score_board::{BoardCalibration, BoardMapper};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0)?;
//! let mapper = BoardMapper::new(calibration)?;
//!
//! // twelve o'clock, two thirds out from the center: single 20
//! let throw = mapper.map_point(Point2::new(320.0, 100.0))?;
//! println!("hit: {:?}", throw.map(|t| t.hit.to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! Mapping pipeline:
//! 1. Reject coordinates outside the camera frame (caller bug, not a miss).
//! 2. Euclidean distance from the calibrated center; beyond the double ring
//!    is a miss.
//! 3. Radius fraction resolves the ring (bulls, triple, double, singles).
//! 4. The angle around the center, corrected for board rotation, resolves
//!    one of the 20 wedges.
//!
//! Both boundary families resolve deterministically: ring boundaries belong
//! to the outer ring, wedge boundaries to the wedge clockwise of them.

mod calibration;
mod mapper;

pub use calibration::{BoardCalibration, CalibrationError, RingFractions};
pub use mapper::{BoardMapper, MapError, Ring, WEDGE_ORDER};

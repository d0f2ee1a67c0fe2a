//! High-level facade crate for the `dart-score-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying engine crates
//! - [`MatchController`], the lock-serialized control surface that capture
//!   and presentation collaborators talk to
//! - (feature `cli`) a replay binary that drives a match from recorded
//!   detections.
//!
//! ## Quickstart
//!
//! ```
//! use dart_score::{BoardCalibration, GameConfig, MatchController, ThrowReport};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0)?;
//! let controller = MatchController::new(GameConfig::default(), calibration)?;
//!
//! // one call per detected dart tip
//! let report = controller.register_throw(Point2::new(320.0, 140.0))?;
//! println!("{report:?}");
//! println!("{}", serde_json::to_string(&controller.snapshot())?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dart_score::core`: hit arithmetic and notation ([`Hit`], [`Throw`]).
//! - `dart_score::board`: calibration and the pixel-to-hit mapper.
//! - `dart_score::game`: the x01 state machine and checkout table.

pub use dart_score_board as board;
pub use dart_score_core as core;
pub use dart_score_game as game;

pub use dart_score_board::{BoardCalibration, BoardMapper, CalibrationError, MapError, Ring};
pub use dart_score_core::{Hit, InvalidHit, Multiplier, Segment, Throw};
pub use dart_score_game::{
    suggest_checkout, Checkout, FinishMode, GameConfig, GameError, GameSnapshot, GameState,
    ThrowOutcome,
};

mod controller;

pub use controller::{ControllerError, MatchController, ThrowReport};

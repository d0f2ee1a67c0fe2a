//! Core types and arithmetic for camera-based dart scoring.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! depend on any camera backend, detection model, or presentation layer:
//! those collaborators exchange validated [`Hit`]s and [`Throw`]s with the
//! rest of the workspace through the types defined here.

mod hit;
mod logger;

pub use hit::{Hit, InvalidHit, Multiplier, Segment, Throw};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

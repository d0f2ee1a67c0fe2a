use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Scoring ring multiplier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Multiplier {
    Single,
    Double,
    Triple,
}

impl Multiplier {
    /// Numeric factor applied to the segment value.
    pub fn factor(self) -> u16 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

/// One of the 20 numbered wedges, or the bull.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Numbered wedge, 1..=20.
    Wedge(u8),
    /// The central bull. Single is the outer 25 ring, Double the inner 50.
    Bull,
}

/// Errors for malformed segment/multiplier combinations.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum InvalidHit {
    #[error("wedge number out of range (got {0}, expected 1..=20)")]
    WedgeOutOfRange(u8),
    #[error("a triple bull does not exist on a standard board")]
    TripleBull,
}

/// A validated (segment, multiplier) pair.
///
/// Construction through [`Hit::new`] (or the shorthand constructors) is the
/// only way to obtain a `Hit`, so every `Hit` held by the game engine is
/// well-formed: wedge numbers are in 1..=20 and bull hits are single (25)
/// or double (50), never triple.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hit {
    segment: Segment,
    multiplier: Multiplier,
}

impl Hit {
    /// Outer bull, 25 points.
    pub const OUTER_BULL: Hit = Hit {
        segment: Segment::Bull,
        multiplier: Multiplier::Single,
    };

    /// Inner bull, 50 points. Counts as a double for finishing.
    pub const INNER_BULL: Hit = Hit {
        segment: Segment::Bull,
        multiplier: Multiplier::Double,
    };

    pub fn new(segment: Segment, multiplier: Multiplier) -> Result<Self, InvalidHit> {
        match segment {
            Segment::Wedge(n) if !(1..=20).contains(&n) => Err(InvalidHit::WedgeOutOfRange(n)),
            Segment::Bull if multiplier == Multiplier::Triple => Err(InvalidHit::TripleBull),
            _ => Ok(Self {
                segment,
                multiplier,
            }),
        }
    }

    pub fn single(wedge: u8) -> Result<Self, InvalidHit> {
        Self::new(Segment::Wedge(wedge), Multiplier::Single)
    }

    pub fn double(wedge: u8) -> Result<Self, InvalidHit> {
        Self::new(Segment::Wedge(wedge), Multiplier::Double)
    }

    pub fn triple(wedge: u8) -> Result<Self, InvalidHit> {
        Self::new(Segment::Wedge(wedge), Multiplier::Triple)
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Points scored by this hit: `{1..20} x {1,2,3}`, 25, or 50.
    pub fn value(&self) -> u16 {
        let base = match self.segment {
            Segment::Wedge(n) => u16::from(n),
            Segment::Bull => 25,
        };
        base * self.multiplier.factor()
    }

    /// Whether this hit satisfies the finishing-double rule.
    ///
    /// The inner bull (50) is a double for this purpose.
    pub fn is_double(&self) -> bool {
        self.multiplier == Multiplier::Double
    }
}

impl fmt::Display for Hit {
    /// Conventional dart notation: `"20"`, `"D16"`, `"T19"`, `"25"`, `"Bull"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.segment, self.multiplier) {
            (Segment::Wedge(n), Multiplier::Single) => write!(f, "{n}"),
            (Segment::Wedge(n), Multiplier::Double) => write!(f, "D{n}"),
            (Segment::Wedge(n), Multiplier::Triple) => write!(f, "T{n}"),
            (Segment::Bull, Multiplier::Single) => write!(f, "25"),
            (Segment::Bull, _) => write!(f, "Bull"),
        }
    }
}

/// One detected dart: a validated hit plus the pixel it was mapped from.
///
/// Throws are ephemeral. The board mapper produces one per detection and
/// the game consumes it immediately; nothing persists them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub hit: Hit,
    /// Position in the coordinate space of the calibrated camera frame.
    pub position: Point2<f64>,
}

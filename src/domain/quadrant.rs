//! Rotation quadrant classification.

use std::fmt;

/// Both axes are centred on this value.
pub const NEUTRAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    Leading,
    Improving,
    Weakening,
    Lagging,
}

impl Quadrant {
    /// Ranking order: Leading, Improving, Weakening, Lagging.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Leading,
        Quadrant::Improving,
        Quadrant::Weakening,
        Quadrant::Lagging,
    ];

    pub fn priority(&self) -> usize {
        match self {
            Quadrant::Leading => 0,
            Quadrant::Improving => 1,
            Quadrant::Weakening => 2,
            Quadrant::Lagging => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Leading => "Leading",
            Quadrant::Improving => "Improving",
            Quadrant::Weakening => "Weakening",
            Quadrant::Lagging => "Lagging",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a (RS-Ratio, RS-Momentum) pair.
///
/// A value exactly at 100 counts as "at or above". Anything that fails the
/// first three tests, NaN included, lands in Improving.
pub fn classify(ratio: f64, momentum: f64) -> Quadrant {
    if ratio >= NEUTRAL && momentum >= NEUTRAL {
        Quadrant::Leading
    } else if ratio >= NEUTRAL && momentum < NEUTRAL {
        Quadrant::Weakening
    } else if ratio < NEUTRAL && momentum < NEUTRAL {
        Quadrant::Lagging
    } else {
        Quadrant::Improving
    }
}

//! # Two-Tier Thresholds
//!
//! Classifies a metric against a warning/error threshold pair.
//!
//! ## Comparison
//!
//! A tier triggers only when the value is strictly beyond its threshold:
//! for [`Direction::LowerIsWorse`] that means `value < threshold`, so a
//! value exactly equal to the warning level is still green.
//!
//! Both tiers are checked independently. The warning tier is applied
//! first and the error tier overrides it, so an inverted pair (error
//! less strict than warning) still yields red whenever the error tier
//! triggers.
//!
//! ## Usage
//!
//! ```
//! use cusp_xymon::evaluator::threshold::TwoTier;
//! use cusp_xymon::xymon::protocol::Colour;
//!
//! let battery = TwoTier::lower_is_worse(11.5, 11.0);
//!
//! assert_eq!(battery.classify(12.2), Colour::Green);
//! assert_eq!(battery.classify(11.5), Colour::Green);
//! assert_eq!(battery.classify(11.2), Colour::Yellow);
//! assert_eq!(battery.classify(10.9), Colour::Red);
//! ```

use crate::xymon::protocol::Colour;

/// Which side of a threshold is unhealthy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Values below the threshold trigger (voltage, free space, clock quality)
    LowerIsWorse,
    /// Values above the threshold trigger
    HigherIsWorse,
}

/// Warning and error thresholds for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoTier {
    pub warning: f64,
    pub error: f64,
    pub direction: Direction,
}

impl TwoTier {
    #[must_use]
    pub fn lower_is_worse(warning: f64, error: f64) -> Self {
        Self {
            warning,
            error,
            direction: Direction::LowerIsWorse,
        }
    }

    #[must_use]
    pub fn higher_is_worse(warning: f64, error: f64) -> Self {
        Self {
            warning,
            error,
            direction: Direction::HigherIsWorse,
        }
    }

    /// Colour for `value` against this threshold pair
    #[must_use]
    pub fn classify(&self, value: f64) -> Colour {
        let mut colour = Colour::Green;
        if self.triggers(value, self.warning) {
            colour = Colour::Yellow;
        }
        if self.triggers(value, self.error) {
            colour = Colour::Red;
        }
        colour
    }

    fn triggers(&self, value: f64, threshold: f64) -> bool {
        match self.direction {
            Direction::LowerIsWorse => value < threshold,
            Direction::HigherIsWorse => value > threshold,
        }
    }
}

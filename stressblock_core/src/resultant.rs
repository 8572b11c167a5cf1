//! # Aggregator
//!
//! Turns the summed force and first moment of a compression zone into the
//! resultant and its lever arm.
//!
//! The moment is taken about local depth 0 (the zero-strain end of the
//! zone), so the lever arm measured from the most compressed fibre is
//!
//! ```text
//! lever_arm = zone_depth − moment / force
//! ```
//!
//! A zero force leaves the lever arm undefined. This is a real singularity
//! (e.g. a zero-depth zone) and is represented as its own state rather than
//! as NaN.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Resultant of a compression zone.
///
/// ## JSON Example
///
/// ```json
/// { "state": "Defined", "force": 825714.3, "moment": 144672650.0, "lever_arm": 124.79 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum Resultant {
    Defined {
        force: f64,
        /// First moment about local depth 0
        moment: f64,
        /// Distance from the most compressed fibre
        lever_arm: f64,
    },
    UndefinedLeverArm {
        moment: f64,
    },
}

impl Resultant {
    /// Resultant force; zero when the lever arm is undefined.
    pub fn force(&self) -> f64 {
        match self {
            Resultant::Defined { force, .. } => *force,
            Resultant::UndefinedLeverArm { .. } => 0.0,
        }
    }

    pub fn moment(&self) -> f64 {
        match self {
            Resultant::Defined { moment, .. } | Resultant::UndefinedLeverArm { moment } => *moment,
        }
    }

    /// Lever arm from the most compressed fibre.
    ///
    /// # Errors
    ///
    /// `ZeroForce` when the resultant force is zero.
    pub fn lever_arm(&self) -> CalcResult<f64> {
        match self {
            Resultant::Defined { lever_arm, .. } => Ok(*lever_arm),
            Resultant::UndefinedLeverArm { moment } => Err(CalcError::ZeroForce { moment: *moment }),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Resultant::Defined { .. })
    }
}

/// Combine total force and moment into a [`Resultant`].
///
/// ```rust
/// use stressblock_core::resultant::{aggregate, Resultant};
///
/// // Uniform block of depth 300: centroid at mid-depth
/// let r = aggregate(1000.0, 150_000.0, 300.0);
/// assert_eq!(r.lever_arm().unwrap(), 150.0);
///
/// assert!(!aggregate(0.0, 0.0, 300.0).is_defined());
/// ```
pub fn aggregate(force: f64, moment: f64, zone_depth: f64) -> Resultant {
    if force == 0.0 {
        return Resultant::UndefinedLeverArm { moment };
    }
    let lever_arm = zone_depth - moment / force;
    if !lever_arm.is_finite() {
        tracing::debug!(force, moment, "lever arm not finite, treating as undefined");
        return Resultant::UndefinedLeverArm { moment };
    }
    Resultant::Defined {
        force,
        moment,
        lever_arm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lever_arm_from_compressed_fibre() {
        // Force concentrated at local depth 250 of a 300 zone: 50 from the top
        let r = aggregate(10.0, 2500.0, 300.0);
        assert_eq!(r.lever_arm().unwrap(), 50.0);
        assert_eq!(r.force(), 10.0);
        assert_eq!(r.moment(), 2500.0);
    }

    #[test]
    fn test_zero_force_is_distinct_state() {
        let r = aggregate(0.0, 0.0, 0.0);
        assert_eq!(r, Resultant::UndefinedLeverArm { moment: 0.0 });
        assert_eq!(r.force(), 0.0);
        let err = r.lever_arm().unwrap_err();
        assert_eq!(err.error_code(), "ZERO_FORCE");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_subnormal_force_overflow_is_undefined() {
        let r = aggregate(1e-320, 1e300, 300.0);
        assert!(!r.is_defined());
    }

    #[test]
    fn test_serialization_tag() {
        let json = serde_json::to_string(&aggregate(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(json, r#"{"state":"UndefinedLeverArm","moment":0.0}"#);
        let defined = aggregate(2.0, 4.0, 10.0);
        let roundtrip: Resultant = serde_json::from_str(&serde_json::to_string(&defined).unwrap()).unwrap();
        assert_eq!(defined, roundtrip);
    }
}

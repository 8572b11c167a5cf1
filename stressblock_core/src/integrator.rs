//! # Segment Integrator
//!
//! Closed-form force and first moment of the stress block over one segment.
//!
//! ## Parabola branch
//!
//! With the strain at local depth `x` written as `ε(x) = c·ε_c2·x`, where
//! `c = strain_top / (ε_c2 · zone_depth)`, the normalised stress is
//! `1 − (1 − c·x)ⁿ` and its antiderivatives are:
//!
//! ```text
//! n = 2 (exact):
//!   F(x) = −c·(c·x³/3 − x²)
//!   M(x) = −c·(c·x⁴/4 − 2·x³/3)
//!
//! general n, u = 1 − c·x:
//!   F(x) = uⁿ⁺¹ / (c·(n+1)) + x
//!   M(x) = uⁿ⁺¹ / (c²·(n+1)) − uⁿ⁺² / (c²·(n+2)) + x²/2
//! ```
//!
//! ## Floor guard
//!
//! Each power term of the general form is floored at [`PARABOLA_FLOOR`].
//! This is a numerical-stability guard and not part of the material law:
//! near `x = 1/c` round-off can make `u` slightly negative, and a negative
//! base raised to a fractional power is NaN. The floor replaces such terms
//! (and any term smaller than the floor) with the floor value; the
//! resulting error is of the order of the floor itself. Every trigger is
//! reported through [`Antiderivative::floor_triggered`] and a debug log,
//! since it marks proximity to the singular point of the antiderivative.
//!
//! A parabola segment that reaches the plateau ends on `x = 1/c` by
//! construction. When `|u|` there is within [`TRANSITION_TOLERANCE`] the
//! power terms are taken as exactly zero and no trigger is reported, so the
//! flag only marks evaluations where the floor actually substituted a value.
//!
//! ## Plateau branch
//!
//! Uniform stress `f_cd` over a rectangle of height `h = x1 − x0`: force
//! `f_cd·h·w`, acting at `x0 + h/2`.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::material::ParabolaRectangleLaw;
use crate::segments::{Branch, Segment};

/// Lower bound for each power term of the general-exponent antiderivative.
pub const PARABOLA_FLOOR: f64 = 1e-10;

/// `|1 − c·x|` at or below this is the parabola/plateau transition itself.
pub const TRANSITION_TOLERANCE: f64 = 8.0 * f64::EPSILON;

/// Normalised antiderivative values at one depth (without `w·f_cd`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Antiderivative {
    pub force: f64,
    pub moment: f64,
    /// A power term was replaced by [`PARABOLA_FLOOR`]
    pub floor_triggered: bool,
}

/// Strain-to-depth slope scaled by `1/ε_c2`.
pub fn parabola_slope(strain_top: f64, eps_c2: f64, zone_depth: f64) -> f64 {
    strain_top / (eps_c2 * zone_depth)
}

/// Exact antiderivative for n = 2. Returns exactly zero at `x = 0`.
pub fn exact_quadratic_antiderivative(x: f64, c: f64) -> Antiderivative {
    if x == 0.0 {
        return Antiderivative::default();
    }
    Antiderivative {
        force: -c * (c * x.powi(3) / 3.0 - x.powi(2)),
        moment: -c * (c * x.powi(4) / 4.0 - 2.0 * x.powi(3) / 3.0),
        floor_triggered: false,
    }
}

fn floored(term: f64) -> (f64, bool) {
    // NaN fails the comparison and is floored too
    if term >= PARABOLA_FLOOR {
        (term, false)
    } else {
        (PARABOLA_FLOOR, true)
    }
}

/// Power-law antiderivative for any exponent `n`, floor-guarded.
pub fn general_antiderivative(x: f64, c: f64, n: f64) -> Antiderivative {
    let u = 1.0 - c * x;
    if u.abs() <= TRANSITION_TOLERANCE {
        // x = 1/c: every power term vanishes
        return Antiderivative {
            force: x,
            moment: x * x / 2.0,
            floor_triggered: false,
        };
    }
    let (force_term, t1) = floored(u.powf(n + 1.0) / (c * (n + 1.0)));
    let (moment_lower, t2) = floored(u.powf(n + 1.0) / (c * c * (n + 1.0)));
    let (moment_upper, t3) = floored(u.powf(n + 2.0) / (c * c * (n + 2.0)));

    Antiderivative {
        force: force_term + x,
        moment: moment_lower - moment_upper + x * x / 2.0,
        floor_triggered: t1 || t2 || t3,
    }
}

/// Exact form for n = 2, general form otherwise.
pub fn parabola_antiderivative(x: f64, c: f64, law: &ParabolaRectangleLaw) -> Antiderivative {
    if law.has_exact_exponent() {
        exact_quadratic_antiderivative(x, c)
    } else {
        general_antiderivative(x, c, law.n)
    }
}

/// Force and first moment (about local 0) contributed by segments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentContribution {
    pub force: f64,
    pub moment: f64,
    pub floor_triggered: bool,
}

impl Add for SegmentContribution {
    type Output = SegmentContribution;

    fn add(self, rhs: SegmentContribution) -> SegmentContribution {
        SegmentContribution {
            force: self.force + rhs.force,
            moment: self.moment + rhs.moment,
            floor_triggered: self.floor_triggered || rhs.floor_triggered,
        }
    }
}

impl Sum for SegmentContribution {
    fn sum<I: Iterator<Item = SegmentContribution>>(iter: I) -> Self {
        iter.fold(SegmentContribution::default(), |total, item| total + item)
    }
}

/// Integrate the parabola branch over `(seg.start, seg.end]`.
pub fn integrate_parabola_segment(seg: &Segment, c: f64, law: &ParabolaRectangleLaw) -> SegmentContribution {
    let lower = parabola_antiderivative(seg.start, c, law);
    let upper = parabola_antiderivative(seg.end, c, law);
    let width_f_cd = seg.width * law.f_cd;

    let floor_triggered = lower.floor_triggered || upper.floor_triggered;
    if floor_triggered {
        tracing::debug!(
            start = seg.start,
            end = seg.end,
            c,
            n = law.n,
            "parabola antiderivative floor triggered near x = 1/c"
        );
    }

    SegmentContribution {
        force: width_f_cd * (upper.force - lower.force),
        moment: width_f_cd * (upper.moment - lower.moment),
        floor_triggered,
    }
}

/// Integrate the plateau branch: a uniform rectangular stress block.
pub fn integrate_plateau_segment(seg: &Segment, law: &ParabolaRectangleLaw) -> SegmentContribution {
    let height = seg.height();
    let force = law.f_cd * height * seg.width;
    SegmentContribution {
        force,
        moment: force * (seg.start + height / 2.0),
        floor_triggered: false,
    }
}

pub fn integrate_segment(seg: &Segment, c: f64, law: &ParabolaRectangleLaw) -> SegmentContribution {
    match seg.branch {
        Branch::Parabola => integrate_parabola_segment(seg, c, law),
        Branch::Plateau => integrate_plateau_segment(seg, law),
    }
}

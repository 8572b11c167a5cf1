//! # Strain-Transition Locator
//!
//! Partitions an extracted compression zone into segments over which both
//! the strip width and the active branch of the material law are constant.
//!
//! Strain grows linearly from 0 at local depth 0 to `strain_top` at local
//! depth `zone_depth`. When `strain_top` exceeds ε_c2 the law switches from
//! the parabola to the plateau at
//!
//! ```text
//! z* = ε_c2 / strain_top · zone_depth
//! ```
//!
//! and `z*` becomes an extra breakpoint:
//!
//! ```text
//!  local 0        z*                    zone_depth
//!    ├─ parabola ─┤────── plateau ──────┤
//!    ├──── w0 ────────┼────── w1 ───────┤   width steps
//!    ├─── seg 0 ──┼ 1 ┼────── seg 2 ────┤   partition_index = 0
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{ProfileStep, SectionProfile};

/// Branch of the material law active over a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    Parabola,
    Plateau,
}

/// Interval `(start, end]` of constant width and branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub width: f64,
    pub branch: Branch,
}

impl Segment {
    pub fn height(&self) -> f64 {
        self.end - self.start
    }
}

/// Fully partitioned compression zone.
///
/// Breakpoint `i` closes segment `(breakpoints[i-1].height, breakpoints[i].height]`
/// (with an implicit 0 before the first). Segments up to and including
/// `partition_index` lie on the parabola branch, the rest on the plateau.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentList {
    breakpoints: Vec<ProfileStep>,
    partition_index: usize,
}

impl SegmentList {
    pub fn breakpoints(&self) -> &[ProfileStep] {
        &self.breakpoints
    }

    /// Index of the last parabola breakpoint.
    pub fn partition_index(&self) -> usize {
        self.partition_index
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Local depth where the parabola branch ends.
    pub fn transition_depth(&self) -> f64 {
        self.breakpoints
            .get(self.partition_index)
            .map_or(0.0, |bp| bp.height)
    }

    /// True when at least one segment lies on the plateau.
    pub fn has_plateau(&self) -> bool {
        self.partition_index + 1 < self.breakpoints.len()
    }

    /// All segments in depth order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let mut start = 0.0;
        self.breakpoints.iter().enumerate().map(move |(i, bp)| {
            let segment = Segment {
                start,
                end: bp.height,
                width: bp.width,
                branch: if i <= self.partition_index {
                    Branch::Parabola
                } else {
                    Branch::Plateau
                },
            };
            start = bp.height;
            segment
        })
    }

    pub fn parabola_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segments().filter(|s| s.branch == Branch::Parabola)
    }

    pub fn plateau_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segments().filter(|s| s.branch == Branch::Plateau)
    }
}

/// Local depth at which the linear strain profile reaches `transition_strain`.
pub fn transition_depth(strain_top: f64, transition_strain: f64, zone_depth: f64) -> f64 {
    transition_strain / strain_top * zone_depth
}

/// `DegenerateStrain` for zero, `InvalidInput` for negative or non-finite.
pub(crate) fn validate_strain_top(strain_top: f64) -> CalcResult<()> {
    if strain_top == 0.0 {
        return Err(CalcError::DegenerateStrain { strain_top });
    }
    if !strain_top.is_finite() || strain_top < 0.0 {
        return Err(CalcError::invalid_input(
            "strain_top",
            strain_top.to_string(),
            "Compressive strain must be positive and finite",
        ));
    }
    Ok(())
}

/// Insert the parabola/plateau transition into an extracted zone.
///
/// - `strain_top <= transition_strain`: the whole zone is parabola; the
///   width steps are returned as-is with the partition on the last one.
/// - otherwise `z*` is inserted before the first step whose boundary
///   reaches it and takes that step's width. A step ending exactly at `z*`
///   becomes the partition itself, so no zero-length segment appears.
/// - `z*` past the last boundary (round-off only) is appended with the last
///   width seen, or 0 for an empty zone.
///
/// # Errors
///
/// `DegenerateStrain` when `strain_top == 0`; `InvalidInput` for a
/// negative or non-finite strain.
pub fn locate_strain_transition(
    zone: &SectionProfile,
    strain_top: f64,
    transition_strain: f64,
    zone_depth: f64,
) -> CalcResult<SegmentList> {
    validate_strain_top(strain_top)?;

    let steps = zone.steps();

    if strain_top <= transition_strain {
        return Ok(SegmentList {
            breakpoints: steps.to_vec(),
            partition_index: steps.len().saturating_sub(1),
        });
    }

    let z_star = transition_depth(strain_top, transition_strain, zone_depth);
    let mut breakpoints = Vec::with_capacity(steps.len() + 1);
    let mut partition_index = None;
    let mut last_width = 0.0;

    for step in steps {
        if partition_index.is_none() && step.height >= z_star {
            partition_index = Some(breakpoints.len());
            if step.height > z_star {
                breakpoints.push(ProfileStep::new(z_star, step.width));
            }
        }
        breakpoints.push(*step);
        last_width = step.width;
    }

    let partition_index = match partition_index {
        Some(index) => index,
        None => {
            tracing::debug!(
                z_star,
                zone_depth,
                "transition depth past last boundary, appending with width {}",
                last_width
            );
            breakpoints.push(ProfileStep::new(z_star, last_width));
            breakpoints.len() - 1
        }
    };

    tracing::trace!(z_star, partition_index, segments = breakpoints.len(), "located strain transition");

    Ok(SegmentList {
        breakpoints,
        partition_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_zone() -> SectionProfile {
        SectionProfile::new(vec![ProfileStep::new(50.0, 250.0), ProfileStep::new(200.0, 800.0)]).unwrap()
    }

    #[test]
    fn test_parabola_only_keeps_steps() {
        let zone = two_step_zone();
        let list = locate_strain_transition(&zone, 0.0015, 0.002, 200.0).unwrap();
        assert_eq!(list.breakpoints(), zone.steps());
        assert_eq!(list.partition_index(), 1);
        assert!(!list.has_plateau());
        assert_eq!(list.plateau_segments().count(), 0);
    }

    #[test]
    fn test_transition_at_eps_c2_is_parabola_only() {
        let list = locate_strain_transition(&two_step_zone(), 0.002, 0.002, 200.0).unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list.has_plateau());
    }

    #[test]
    fn test_transition_inserted_in_second_step() {
        // z* = 0.002 / 0.0035 * 200 = 114.29, inside the flange step
        let list = locate_strain_transition(&two_step_zone(), 0.0035, 0.002, 200.0).unwrap();
        let z_star = 0.002 / 0.0035 * 200.0;

        assert_eq!(list.len(), 3);
        assert_eq!(list.partition_index(), 1);
        assert_eq!(list.breakpoints()[1], ProfileStep::new(z_star, 800.0));
        assert_eq!(list.transition_depth(), z_star);

        let segments: Vec<Segment> = list.segments().collect();
        assert_eq!(segments[0].branch, Branch::Parabola);
        assert_eq!(segments[1].branch, Branch::Parabola);
        assert_eq!(segments[2].branch, Branch::Plateau);
        assert_eq!(segments[2].start, z_star);
        assert_eq!(segments[2].end, 200.0);
        assert_eq!(segments[2].width, 800.0);
    }

    #[test]
    fn test_transition_inserted_in_first_step() {
        // z* = 0.002 / 0.01 * 200 = 40, inside the web step
        let list = locate_strain_transition(&two_step_zone(), 0.01, 0.002, 200.0).unwrap();
        assert_eq!(list.partition_index(), 0);
        let widths: Vec<f64> = list.segments().map(|s| s.width).collect();
        assert_eq!(widths, vec![250.0, 250.0, 800.0]);
        assert_eq!(list.plateau_segments().count(), 2);
    }

    #[test]
    fn test_transition_on_step_boundary_adds_no_segment() {
        // z* = 0.002 / 0.008 * 200 = 50, exactly on the web/flange boundary
        let list = locate_strain_transition(&two_step_zone(), 0.008, 0.002, 200.0).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.partition_index(), 0);
        assert!(list.segments().all(|s| s.height() > 0.0));
    }

    #[test]
    fn test_transition_past_last_boundary_is_appended() {
        // zone_depth larger than the zone's last boundary forces z* past it
        let zone = SectionProfile::rectangular(100.0, 300.0).unwrap();
        let list = locate_strain_transition(&zone, 0.0025, 0.002, 200.0).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.partition_index(), 1);
        let z_star = transition_depth(0.0025, 0.002, 200.0);
        assert_eq!(list.breakpoints()[1], ProfileStep::new(z_star, 300.0));
    }

    #[test]
    fn test_zero_strain_is_degenerate() {
        let err = locate_strain_transition(&two_step_zone(), 0.0, 0.002, 200.0).unwrap_err();
        assert_eq!(err, CalcError::DegenerateStrain { strain_top: 0.0 });
        let err = locate_strain_transition(&two_step_zone(), -0.001, 0.002, 200.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}

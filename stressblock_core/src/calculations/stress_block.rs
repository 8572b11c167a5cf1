//! # Stress-Block Resultant
//!
//! Resultant compressive force and lever arm of a parabola-rectangle stress
//! block acting on the compression zone of a stepped section.
//!
//! Pipeline: extract the compression zone, locate the parabola/plateau
//! transition, integrate each segment in closed form, aggregate.
//!
//! ## Assumptions
//!
//! - The compression zone is the **last** `zone_depth` of the profile
//! - Strain is zero at the start of the zone and `strain_top` at the
//!   most compressed fibre, varying linearly
//! - Compressive strains are positive
//!
//! ## Example
//!
//! ```rust
//! use stressblock_core::calculations::stress_block::{calculate, StressBlockInput};
//! use stressblock_core::geometry::SectionProfile;
//! use stressblock_core::material::ParabolaRectangleLaw;
//!
//! let input = StressBlockInput {
//!     label: "R-300x200".to_string(),
//!     profile: SectionProfile::rectangular(300.0, 200.0).unwrap(),
//!     law: ParabolaRectangleLaw::new(0.002, 17.0, 2.0).unwrap(),
//!     zone_depth: 300.0,
//!     strain_top: 0.0035,
//!     strain_bot: 0.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//!
//! // Classic EC2 block: alpha = 0.810, beta = 0.416
//! assert!((result.force() / (17.0 * 200.0 * 300.0) - 0.8095).abs() < 1e-4);
//! assert!((result.lever_arm().unwrap() / 300.0 - 0.4160).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::SectionProfile;
use crate::integrator::{integrate_segment, parabola_slope, SegmentContribution};
use crate::material::ParabolaRectangleLaw;
use crate::resultant::{aggregate, Resultant};
use crate::segments::{locate_strain_transition, validate_strain_top};

/// Input parameters for a stress-block evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "T-beam midspan",
///   "profile": { "steps": [ { "height": 450.0, "width": 250.0 }, { "height": 600.0, "width": 800.0 } ] },
///   "law": { "eps_c2": 0.002, "f_cd": 17.0, "n": 2.0 },
///   "zone_depth": 200.0,
///   "strain_top": 0.0035,
///   "strain_bot": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressBlockInput {
    /// User label (e.g., "B-1 midspan")
    pub label: String,

    /// Section width steps, compressed end last
    pub profile: SectionProfile,

    /// Parabola-rectangle law parameters
    pub law: ParabolaRectangleLaw,

    /// Depth of the compression zone, measured from the end of the profile
    pub zone_depth: f64,

    /// Strain at the most compressed fibre (positive)
    pub strain_top: f64,

    /// Strain at the far end of the section (zero or tensile)
    #[serde(default)]
    pub strain_bot: f64,
}

impl StressBlockInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.law.validate()?;
        validate_strain_top(self.strain_top)?;

        if !self.strain_bot.is_finite() {
            return Err(CalcError::invalid_input(
                "strain_bot",
                self.strain_bot.to_string(),
                "Strain must be finite",
            ));
        }
        if self.strain_bot > 0.0 {
            return Err(CalcError::invalid_input(
                "strain_bot",
                self.strain_bot.to_string(),
                "Fully compressed sections are not supported; the zone starts at zero strain",
            ));
        }

        let total = self.profile.total_depth();
        if !self.zone_depth.is_finite() || self.zone_depth < 0.0 || self.zone_depth > total {
            return Err(CalcError::invalid_geometry(
                "zone_depth",
                self.zone_depth.to_string(),
                format!("Compression zone must lie within 0..={}", total),
            ));
        }
        Ok(())
    }
}

/// Results from a stress-block evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "resultant": { "state": "Defined", "force": 825714.29, "moment": 144673469.39, "lever_arm": 124.79 },
///   "segment_count": 2,
///   "transition_depth": 171.43,
///   "floor_triggered": false,
///   "exceeds_ultimate_strain": false
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBlockResult {
    /// Force, moment and lever arm (or the undefined state)
    pub resultant: Resultant,

    /// Number of integrated segments
    pub segment_count: usize,

    /// Local depth of the parabola/plateau transition, if the plateau is reached
    pub transition_depth: Option<f64>,

    /// The general-exponent floor guard substituted a term. Segments that
    /// end exactly on the plateau transition are evaluated exactly and do
    /// not set this.
    pub floor_triggered: bool,

    /// strain_top is beyond the law's ultimate strain
    pub exceeds_ultimate_strain: bool,
}

impl StressBlockResult {
    pub fn force(&self) -> f64 {
        self.resultant.force()
    }

    /// Lever arm from the most compressed fibre; `ZeroForce` if undefined.
    pub fn lever_arm(&self) -> CalcResult<f64> {
        self.resultant.lever_arm()
    }
}

/// Evaluate the stress block for one compression-zone depth and strain.
///
/// This is the form to call repeatedly from a neutral-axis search. A zone
/// depth of exactly zero yields the undefined-lever-arm resultant.
///
/// # Errors
///
/// - `InvalidInput` for invalid law parameters or a negative strain
/// - `DegenerateStrain` when `strain_top == 0`
/// - `InvalidGeometry` when the zone does not fit in the profile
pub fn integrate(
    profile: &SectionProfile,
    law: &ParabolaRectangleLaw,
    strain_top: f64,
    zone_depth: f64,
) -> CalcResult<StressBlockResult> {
    law.validate()?;
    validate_strain_top(strain_top)?;

    let exceeds_ultimate_strain = law.eps_cu2.is_some_and(|eps_cu2| strain_top > eps_cu2);
    if exceeds_ultimate_strain {
        tracing::warn!(strain_top, eps_cu2 = ?law.eps_cu2, "strain beyond ultimate strain");
    }

    if zone_depth == 0.0 {
        return Ok(StressBlockResult {
            resultant: aggregate(0.0, 0.0, 0.0),
            segment_count: 0,
            transition_depth: None,
            floor_triggered: false,
            exceeds_ultimate_strain,
        });
    }

    let zone = profile.extract_compression_zone(zone_depth)?;
    let segments = locate_strain_transition(&zone, strain_top, law.eps_c2, zone_depth)?;
    let c = parabola_slope(strain_top, law.eps_c2, zone_depth);

    let total: SegmentContribution = segments
        .segments()
        .map(|segment| integrate_segment(&segment, c, law))
        .sum();

    let resultant = aggregate(total.force, total.moment, zone_depth);

    tracing::debug!(
        zone_depth,
        strain_top,
        force = total.force,
        moment = total.moment,
        segments = segments.len(),
        "integrated stress block"
    );

    Ok(StressBlockResult {
        resultant,
        segment_count: segments.len(),
        transition_depth: (strain_top > law.eps_c2).then(|| segments.transition_depth()),
        floor_triggered: total.floor_triggered,
        exceeds_ultimate_strain,
    })
}

/// Validate `input` and evaluate it.
pub fn calculate(input: &StressBlockInput) -> CalcResult<StressBlockResult> {
    input.validate()?;
    integrate(&input.profile, &input.law, input.strain_top, input.zone_depth)
}

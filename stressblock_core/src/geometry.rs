//! # Section Geometry
//!
//! Stepped cross-section profiles and the compression-zone extractor.
//!
//! A profile is an ordered table of `(height, width)` steps. `height` is the
//! cumulative boundary measured from the start of the section and `width` is
//! the strip width that applies up to that boundary:
//!
//! ```text
//!  height
//!    600 ┬ ┌───────────────┐   step 2: (600, 800)  flange
//!        │ └────┐     ┌────┘
//!        │      │     │
//!    450 ┼      │     │        step 1: (450, 250)  web
//!        │      │     │
//!      0 ┴      └─────┘        (implicit start)
//! ```
//!
//! The compression zone is taken from the **far end** of the table: a zone
//! of depth `x` covers boundaries `total - x .. total`. Sections whose
//! compressed fibre is on top must therefore list the top part last (see
//! [`SectionProfile::t_section`]).
//!
//! ## Example
//!
//! ```rust
//! use stressblock_core::geometry::SectionProfile;
//!
//! let t_beam = SectionProfile::t_section(250.0, 450.0, 800.0, 150.0).unwrap();
//! assert_eq!(t_beam.total_depth(), 600.0);
//!
//! // The top 200 of the section: 50 of web, then the 150 flange
//! let zone = t_beam.extract_compression_zone(200.0).unwrap();
//! assert_eq!(zone.steps()[0].height, 50.0);
//! assert_eq!(zone.steps()[1].height, 200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One step of a section profile: the strip `width` applies up to the
/// cumulative boundary `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileStep {
    /// Cumulative boundary depth
    pub height: f64,
    /// Strip width below this boundary
    pub width: f64,
}

impl ProfileStep {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }
}

/// Ordered, validated table of width steps.
///
/// ## JSON Example
///
/// ```json
/// { "steps": [ { "height": 450.0, "width": 250.0 }, { "height": 600.0, "width": 800.0 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct SectionProfile {
    steps: Vec<ProfileStep>,
}

#[derive(Serialize, Deserialize)]
struct RawProfile {
    steps: Vec<ProfileStep>,
}

impl TryFrom<RawProfile> for SectionProfile {
    type Error = CalcError;

    fn try_from(raw: RawProfile) -> CalcResult<Self> {
        SectionProfile::new(raw.steps)
    }
}

impl From<SectionProfile> for RawProfile {
    fn from(profile: SectionProfile) -> Self {
        RawProfile { steps: profile.steps }
    }
}

impl SectionProfile {
    /// Build a profile from cumulative steps.
    ///
    /// Rejects empty tables, non-finite values, a non-positive first
    /// boundary, boundaries that do not strictly increase and negative
    /// widths.
    pub fn new(steps: Vec<ProfileStep>) -> CalcResult<Self> {
        if steps.is_empty() {
            return Err(CalcError::invalid_geometry(
                "steps",
                "[]",
                "Profile needs at least one step",
            ));
        }

        let mut previous = 0.0;
        for (i, step) in steps.iter().enumerate() {
            if !step.height.is_finite() || !step.width.is_finite() {
                return Err(CalcError::invalid_geometry(
                    format!("steps[{}]", i),
                    format!("({}, {})", step.height, step.width),
                    "Height and width must be finite",
                ));
            }
            if step.height <= previous {
                return Err(CalcError::invalid_geometry(
                    format!("steps[{}].height", i),
                    step.height.to_string(),
                    format!("Boundaries must strictly increase (previous {})", previous),
                ));
            }
            if step.width < 0.0 {
                return Err(CalcError::invalid_geometry(
                    format!("steps[{}].width", i),
                    step.width.to_string(),
                    "Width cannot be negative",
                ));
            }
            previous = step.height;
        }

        Ok(Self { steps })
    }

    /// Single rectangle of the given depth and width.
    pub fn rectangular(depth: f64, width: f64) -> CalcResult<Self> {
        Self::new(vec![ProfileStep::new(depth, width)])
    }

    /// Stack rectangles `(thickness, width)` in order, accumulating the
    /// boundaries. This is the usual decomposition of T- and box-sections.
    pub fn from_layers(layers: &[(f64, f64)]) -> CalcResult<Self> {
        let mut height = 0.0;
        let steps = layers
            .iter()
            .map(|&(thickness, width)| {
                height += thickness;
                ProfileStep::new(height, width)
            })
            .collect();
        Self::new(steps)
    }

    /// T-section with the web first and the flange last, so that a
    /// compression zone taken from the end of the profile starts in the
    /// flange.
    pub fn t_section(web_width: f64, web_depth: f64, flange_width: f64, flange_depth: f64) -> CalcResult<Self> {
        Self::from_layers(&[(web_depth, web_width), (flange_depth, flange_width)])
    }

    /// Hollow box: bottom flange, two webs, top flange.
    pub fn box_section(
        outer_width: f64,
        outer_depth: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> CalcResult<Self> {
        if 2.0 * web_thickness > outer_width {
            return Err(CalcError::invalid_geometry(
                "web_thickness",
                web_thickness.to_string(),
                format!("Two webs do not fit in width {}", outer_width),
            ));
        }
        Self::from_layers(&[
            (flange_thickness, outer_width),
            (outer_depth - 2.0 * flange_thickness, 2.0 * web_thickness),
            (flange_thickness, outer_width),
        ])
    }

    pub fn steps(&self) -> &[ProfileStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated profile.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Last boundary of the table.
    pub fn total_depth(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.height)
    }

    /// Gross area, Σ (hᵢ - hᵢ₋₁)·wᵢ
    pub fn area(&self) -> f64 {
        let mut previous = 0.0;
        self.steps
            .iter()
            .map(|step| {
                let area = (step.height - previous) * step.width;
                previous = step.height;
                area
            })
            .sum()
    }

    /// Strip width at `depth`, or `None` outside `[0, total_depth]`.
    ///
    /// A depth lying exactly on a boundary belongs to the step that ends
    /// there.
    pub fn width_at(&self, depth: f64) -> Option<f64> {
        if !(0.0..=self.total_depth()).contains(&depth) {
            return None;
        }
        self.steps.iter().find(|s| s.height >= depth).map(|s| s.width)
    }

    /// Extract the compression zone of depth `zone_depth` in local
    /// coordinates.
    ///
    /// With `origin = total_depth - zone_depth`, only the steps whose
    /// boundary exceeds `origin` are kept and each kept boundary is
    /// re-expressed as `boundary - origin`, so the zone starts at local 0.
    /// The last local boundary equals `zone_depth` exactly.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` unless `0 < zone_depth <= total_depth`.
    pub fn extract_compression_zone(&self, zone_depth: f64) -> CalcResult<SectionProfile> {
        let total = self.total_depth();
        if !zone_depth.is_finite() || zone_depth <= 0.0 {
            return Err(CalcError::invalid_geometry(
                "zone_depth",
                zone_depth.to_string(),
                "Compression-zone depth must be positive",
            ));
        }
        if zone_depth > total {
            return Err(CalcError::invalid_geometry(
                "zone_depth",
                zone_depth.to_string(),
                format!("Compression zone exceeds total depth {}", total),
            ));
        }

        let origin = total - zone_depth;
        let mut steps: Vec<ProfileStep> = self
            .steps
            .iter()
            .filter(|s| s.height > origin)
            .map(|s| ProfileStep::new(s.height - origin, s.width))
            .collect();

        // Round-off in `total - origin`
        if let Some(last) = steps.last_mut() {
            last.height = zone_depth;
        }

        Ok(SectionProfile { steps })
    }
}

//! # stressblock_core - Stress-Block Integration Engine
//!
//! `stressblock_core` computes the resultant compressive force and lever arm
//! of a parabola-rectangle stress-strain law acting on a stepped cross-section
//! (rectangles, T-sections, boxes decomposed into width steps). Integration
//! is exact, using closed-form antiderivatives, so a section can be evaluated
//! cheaply many times inside a neutral-axis search.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use stressblock_core::calculations::integrate;
//! use stressblock_core::geometry::SectionProfile;
//! use stressblock_core::material::ParabolaRectangleLaw;
//!
//! let section = SectionProfile::t_section(250.0, 450.0, 800.0, 150.0).unwrap();
//! let law = ParabolaRectangleLaw::from_ec2_2004(30.0, 0.85, 1.5).unwrap();
//!
//! let result = integrate(&section, &law, 0.0035, 200.0).unwrap();
//! println!("F = {:.0}, z = {:.1}", result.force(), result.lever_arm().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Section profiles and the compression-zone extractor
//! - [`material`] - Parabola-rectangle law parameters
//! - [`segments`] - Strain-transition locator
//! - [`integrator`] - Closed-form segment integrals
//! - [`resultant`] - Aggregation into force and lever arm
//! - [`calculations`] - Input/result types and the `calculate` entry point
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod integrator;
pub mod material;
pub mod resultant;
pub mod segments;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, integrate, StressBlockInput, StressBlockResult};
pub use errors::{CalcError, CalcResult};
pub use geometry::{ProfileStep, SectionProfile};
pub use material::ParabolaRectangleLaw;
pub use resultant::Resultant;

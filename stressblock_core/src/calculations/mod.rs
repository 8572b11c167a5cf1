//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`stress_block`] - Parabola-rectangle stress-block resultant over a stepped section

pub mod stress_block;

pub use stress_block::{calculate, integrate, StressBlockInput, StressBlockResult};

//! # Parabola-Rectangle Material Law
//!
//! Stress-strain law for concrete in compression:
//!
//! ```text
//!  σ
//!  f_cd ┤        ╭──────────────┐
//!       │      ╭─╯              │
//!       │    ╭─╯                │
//!       │  ╭─╯                  │
//!       │╭─╯                    │
//!     0 ┼┴──────────┬───────────┬── ε
//!       0         ε_c2        ε_cu2
//! ```
//!
//! - Parabola branch, `0 ≤ ε ≤ ε_c2`: σ = f_cd·(1 − (1 − ε/ε_c2)ⁿ)
//! - Plateau branch, `ε > ε_c2`: σ = f_cd
//!
//! Strains are compressive-positive and dimensionless (0.002, not 2‰).
//!
//! ## References
//!
//! - EN 1992-1-1:2004, 3.1.7 and Table 3.1

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Parameters of the parabola-rectangle law.
///
/// ## JSON Example
///
/// ```json
/// { "eps_c2": 0.002, "f_cd": 17.0, "n": 2.0, "eps_cu2": 0.0035 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParabolaRectangleLaw {
    /// Strain at the end of the parabola branch (ε_c2 > 0)
    pub eps_c2: f64,

    /// Design compressive strength, the plateau stress
    pub f_cd: f64,

    /// Parabola exponent (2.0 for normal-strength concrete)
    pub n: f64,

    /// Ultimate strain, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps_cu2: Option<f64>,
}

impl ParabolaRectangleLaw {
    /// Create and validate a law without an ultimate strain.
    ///
    /// ```rust
    /// use stressblock_core::material::ParabolaRectangleLaw;
    ///
    /// let law = ParabolaRectangleLaw::new(0.002, 17.0, 2.0).unwrap();
    /// assert_eq!(law.stress(0.002), 17.0);
    /// assert_eq!(law.stress(0.003), 17.0);
    /// assert!((law.stress(0.001) - 17.0 * 0.75).abs() < 1e-12);
    /// ```
    pub fn new(eps_c2: f64, f_cd: f64, n: f64) -> CalcResult<Self> {
        let law = Self {
            eps_c2,
            f_cd,
            n,
            eps_cu2: None,
        };
        law.validate()?;
        Ok(law)
    }

    /// Attach the ultimate strain ε_cu2.
    pub fn with_ultimate_strain(mut self, eps_cu2: f64) -> CalcResult<Self> {
        if !eps_cu2.is_finite() || eps_cu2 < self.eps_c2 {
            return Err(CalcError::invalid_input(
                "eps_cu2",
                eps_cu2.to_string(),
                format!("Ultimate strain must be at least eps_c2 = {}", self.eps_c2),
            ));
        }
        self.eps_cu2 = Some(eps_cu2);
        Ok(self)
    }

    /// Law parameters from EN 1992-1-1:2004 Table 3.1 for a characteristic
    /// cylinder strength `fck` (MPa), with `f_cd = alpha_cc·fck/gamma_c`.
    ///
    /// ```rust
    /// use stressblock_core::material::ParabolaRectangleLaw;
    ///
    /// let c35 = ParabolaRectangleLaw::from_ec2_2004(35.0, 0.85, 1.5).unwrap();
    /// assert!((c35.f_cd - 19.833).abs() < 1e-3);
    /// assert_eq!(c35.n, 2.0);
    /// assert_eq!(c35.eps_c2, 0.002);
    /// ```
    pub fn from_ec2_2004(fck: f64, alpha_cc: f64, gamma_c: f64) -> CalcResult<Self> {
        if !fck.is_finite() || fck <= 0.0 || fck > 90.0 {
            return Err(CalcError::invalid_input(
                "fck",
                fck.to_string(),
                "EC2-2004 parabola-rectangle law covers 0 < fck <= 90 MPa",
            ));
        }
        if !gamma_c.is_finite() || gamma_c <= 0.0 {
            return Err(CalcError::invalid_input(
                "gamma_c",
                gamma_c.to_string(),
                "Partial factor must be positive",
            ));
        }

        let (eps_c2_permille, n, eps_cu2_permille) = if fck <= 50.0 {
            (2.0, 2.0, 3.5)
        } else {
            let reduction = ((90.0 - fck) / 100.0).powi(4);
            (
                2.0 + 0.085 * (fck - 50.0).powf(0.53),
                1.4 + 23.4 * reduction,
                2.6 + 35.0 * reduction,
            )
        };

        // At fck = 90 the fitted ε_c2 overshoots ε_cu2 = 2.6‰ by 0.0005‰
        let eps_cu2_permille = eps_cu2_permille.max(eps_c2_permille);

        Self::new(eps_c2_permille * 1e-3, alpha_cc * fck / gamma_c, n)?
            .with_ultimate_strain(eps_cu2_permille * 1e-3)
    }

    /// Validate the parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.eps_c2.is_finite() || self.eps_c2 <= 0.0 {
            return Err(CalcError::invalid_input(
                "eps_c2",
                self.eps_c2.to_string(),
                "Transition strain must be positive",
            ));
        }
        if !self.f_cd.is_finite() || self.f_cd <= 0.0 {
            return Err(CalcError::invalid_input(
                "f_cd",
                self.f_cd.to_string(),
                "Design strength must be positive",
            ));
        }
        if !self.n.is_finite() || self.n <= 0.0 {
            return Err(CalcError::invalid_input(
                "n",
                self.n.to_string(),
                "Exponent must be positive",
            ));
        }
        if let Some(eps_cu2) = self.eps_cu2 {
            if !eps_cu2.is_finite() || eps_cu2 < self.eps_c2 {
                return Err(CalcError::invalid_input(
                    "eps_cu2",
                    eps_cu2.to_string(),
                    format!("Ultimate strain must be at least eps_c2 = {}", self.eps_c2),
                ));
            }
        }
        Ok(())
    }

    /// True when the exact n = 2 antiderivative applies.
    pub fn has_exact_exponent(&self) -> bool {
        self.n == 2.0
    }

    /// Stress at `strain`; zero for non-compressive strain.
    pub fn stress(&self, strain: f64) -> f64 {
        if strain <= 0.0 {
            0.0
        } else if strain <= self.eps_c2 {
            self.f_cd * (1.0 - (1.0 - strain / self.eps_c2).powf(self.n))
        } else {
            self.f_cd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ec2_high_strength_values() {
        // EN 1992-1-1 Table 3.1 rounded values
        let c55 = ParabolaRectangleLaw::from_ec2_2004(55.0, 1.0, 1.5).unwrap();
        assert!((c55.eps_c2 * 1e3 - 2.2).abs() < 0.01);
        assert!((c55.n - 1.75).abs() < 0.01);
        assert!((c55.eps_cu2.unwrap() * 1e3 - 3.1).abs() < 0.05);

        let c90 = ParabolaRectangleLaw::from_ec2_2004(90.0, 0.85, 1.5).unwrap();
        assert!((c90.eps_c2 * 1e3 - 2.6).abs() < 0.01);
        assert!((c90.n - 1.4).abs() < 1e-12);
        assert!((c90.eps_cu2.unwrap() * 1e3 - 2.6).abs() < 0.01);
        assert!(c90.eps_cu2.unwrap() >= c90.eps_c2);
        assert!((c90.f_cd - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_ec2_rejects_out_of_range() {
        assert!(ParabolaRectangleLaw::from_ec2_2004(100.0, 0.85, 1.5).is_err());
        assert!(ParabolaRectangleLaw::from_ec2_2004(-5.0, 0.85, 1.5).is_err());
        assert!(ParabolaRectangleLaw::from_ec2_2004(30.0, 0.85, 0.0).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ParabolaRectangleLaw::new(0.0, 17.0, 2.0).is_err());
        assert!(ParabolaRectangleLaw::new(0.002, -17.0, 2.0).is_err());
        assert!(ParabolaRectangleLaw::new(0.002, 17.0, f64::NAN).is_err());
        let law = ParabolaRectangleLaw::new(0.002, 17.0, 2.0).unwrap();
        assert!(law.with_ultimate_strain(0.001).is_err());
    }

    #[test]
    fn test_stress_branches() {
        let law = ParabolaRectangleLaw::new(0.002, 20.0, 2.0).unwrap();
        assert_eq!(law.stress(-0.001), 0.0);
        assert_eq!(law.stress(0.0), 0.0);
        assert!((law.stress(0.0005) - 20.0 * (1.0 - 0.75_f64.powi(2))).abs() < 1e-12);
        assert_eq!(law.stress(0.0035), 20.0);
    }

    #[test]
    fn test_serialization_skips_missing_ultimate_strain() {
        let law = ParabolaRectangleLaw::new(0.002, 17.0, 2.0).unwrap();
        let json = serde_json::to_string(&law).unwrap();
        assert!(!json.contains("eps_cu2"));
        let roundtrip: ParabolaRectangleLaw = serde_json::from_str(&json).unwrap();
        assert_eq!(law, roundtrip);
    }
}

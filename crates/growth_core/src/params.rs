//! Parameter records for the growth models.
//!
//! Every record is an immutable value passed explicitly into the model that
//! uses it. `Default` returns the reference calibration used throughout the
//! lectures, and `validate` checks the economic domain once, up front.

use crate::error::{GrowthError, Result};
use serde::{Deserialize, Serialize};

/// Cobb-Douglas Solow-Swan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolowParams {
    /// Total factor productivity `A`.
    pub a: f64,
    /// Savings rate `s`.
    pub s: f64,
    /// Capital share `α`.
    pub alpha: f64,
    /// Depreciation rate `δ`.
    pub delta: f64,
}

impl Default for SolowParams {
    fn default() -> Self {
        Self {
            a: 2.0,
            s: 0.3,
            alpha: 0.3,
            delta: 0.4,
        }
    }
}

impl SolowParams {
    pub fn validate(&self) -> Result<()> {
        positive("a", self.a)?;
        if !self.s.is_finite() || !(0.0..=1.0).contains(&self.s) {
            return Err(GrowthError::invalid("s", self.s, "must lie in [0, 1]"));
        }
        capital_share(self.alpha)?;
        if !self.delta.is_finite() || self.delta <= 0.0 || self.delta > 1.0 {
            return Err(GrowthError::invalid(
                "delta",
                self.delta,
                "must lie in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Lognormal productivity shock parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockParams {
    /// Scale `σ` of the underlying normal.
    pub sigma: f64,
}

impl Default for ShockParams {
    fn default() -> Self {
        Self { sigma: 0.2 }
    }
}

impl ShockParams {
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(GrowthError::invalid(
                "sigma",
                self.sigma,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Overlapping generations parameters with log utility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OlgParams {
    pub alpha: f64,
    /// Discount factor `β`.
    pub beta: f64,
}

impl Default for OlgParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.9,
        }
    }
}

impl OlgParams {
    pub fn validate(&self) -> Result<()> {
        capital_share(self.alpha)?;
        positive("beta", self.beta)
    }
}

/// Overlapping generations parameters with CRRA utility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrraOlgParams {
    pub alpha: f64,
    pub beta: f64,
    /// Coefficient of relative risk aversion `γ`.
    pub gamma: f64,
}

impl Default for CrraOlgParams {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            beta: 0.9,
            gamma: 0.5,
        }
    }
}

impl CrraOlgParams {
    pub fn validate(&self) -> Result<()> {
        capital_share(self.alpha)?;
        positive("beta", self.beta)?;
        positive("gamma", self.gamma)
    }

    /// The log-utility parameters this family collapses to at `γ = 1`.
    pub fn log_limit(&self) -> OlgParams {
        OlgParams {
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GrowthError::invalid(
            name,
            value,
            "must be finite and positive",
        ));
    }
    Ok(())
}

fn capital_share(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(GrowthError::invalid("alpha", alpha, "must lie in (0, 1)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_err_contains(result: Result<()>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn defaults_are_valid() {
        SolowParams::default().validate().expect("solow");
        ShockParams::default().validate().expect("shock");
        OlgParams::default().validate().expect("olg");
        CrraOlgParams::default().validate().expect("crra");
    }

    #[test]
    fn solow_rejects_out_of_domain_values() {
        let base = SolowParams::default();
        assert_err_contains(SolowParams { alpha: 1.0, ..base }.validate(), "alpha");
        assert_err_contains(SolowParams { delta: 0.0, ..base }.validate(), "delta");
        assert_err_contains(SolowParams { delta: 1.5, ..base }.validate(), "delta");
        assert_err_contains(SolowParams { s: -0.1, ..base }.validate(), "`s`");
        assert_err_contains(SolowParams { a: f64::NAN, ..base }.validate(), "`a`");
    }

    #[test]
    fn solow_accepts_boundary_savings_and_full_depreciation() {
        let base = SolowParams::default();
        SolowParams { s: 0.0, ..base }.validate().expect("s = 0");
        SolowParams { s: 1.0, delta: 1.0, ..base }
            .validate()
            .expect("s = 1, delta = 1");
    }

    #[test]
    fn crra_rejects_non_positive_gamma() {
        let params = CrraOlgParams {
            gamma: 0.0,
            ..CrraOlgParams::default()
        };
        assert_err_contains(params.validate(), "gamma");
    }

    #[test]
    fn negative_sigma_is_rejected() {
        assert_err_contains(ShockParams { sigma: -0.1 }.validate(), "sigma");
    }
}

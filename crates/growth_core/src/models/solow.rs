//! Solow-Swan growth with Cobb-Douglas production.
//!
//! Capital per worker evolves as `k_{t+1} = s·A·k_t^α + (1-δ)·k_t`. The
//! stochastic variant replaces `A` with an IID lognormal draw `Z` each period.

use crate::error::Result;
use crate::fixed_point::{closed_form_fixed_point, FixedPoint};
use crate::params::{ShockParams, SolowParams};
use crate::root_finding::ScalarMinimizer;
use crate::shocks::LogNormalShocks;
use crate::traits::{Scalar, UpdateRule};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolowModel {
    params: SolowParams,
}

impl SolowModel {
    pub fn new(params: SolowParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SolowParams {
        &self.params
    }

    /// Output per worker `A·k^α`.
    pub fn production<T: Scalar>(&self, k: T) -> T {
        T::from_f64(self.params.a) * k.powf(self.params.alpha)
    }

    /// `k* = (sA/δ)^(1/(1-α))`.
    pub fn steady_state(&self) -> f64 {
        steady_state_capital(&self.params)
    }

    pub fn fixed_point(&self) -> FixedPoint {
        closed_form_fixed_point(self, self.steady_state())
    }

    /// Consumption per worker at the steady state, `(1-s)·A·k*^α`.
    pub fn steady_state_consumption(&self) -> f64 {
        steady_state_consumption(&self.params)
    }
}

impl<T: Scalar> UpdateRule<T> for SolowModel {
    fn apply(&self, k: T) -> T {
        let SolowParams { s, delta, .. } = self.params;
        T::from_f64(s) * self.production(k) + T::from_f64(1.0 - delta) * k
    }
}

fn steady_state_capital(params: &SolowParams) -> f64 {
    (params.s * params.a / params.delta).powf(1.0 / (1.0 - params.alpha))
}

fn steady_state_consumption(params: &SolowParams) -> f64 {
    let k_star = steady_state_capital(params);
    (1.0 - params.s) * params.a * k_star.powf(params.alpha)
}

/// The savings rate that maximizes steady-state consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldenRule {
    pub savings: f64,
    pub capital: f64,
    pub consumption: f64,
}

/// Searches `s ∈ [0, 1]` for the savings rate maximizing `c*(s)`.
/// For Cobb-Douglas production the answer is `s = α`.
pub fn golden_rule_savings<M: ScalarMinimizer + ?Sized>(
    params: &SolowParams,
    minimizer: &M,
) -> Result<GoldenRule> {
    params.validate()?;
    let objective = |s: f64| -steady_state_consumption(&SolowParams { s, ..*params });
    let minimum = minimizer.minimize_scalar(&objective, (0.0, 1.0))?;

    let at_optimum = SolowParams {
        s: minimum.argmin,
        ..*params
    };
    Ok(GoldenRule {
        savings: minimum.argmin,
        capital: steady_state_capital(&at_optimum),
        consumption: -minimum.value,
    })
}

/// Solow-Swan with multiplicative lognormal productivity shocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticSolow {
    params: SolowParams,
    shock: ShockParams,
}

impl StochasticSolow {
    pub fn new(params: SolowParams, shock: ShockParams) -> Result<Self> {
        params.validate()?;
        shock.validate()?;
        Ok(Self { params, shock })
    }

    pub fn params(&self) -> &SolowParams {
        &self.params
    }

    pub fn shock(&self) -> &ShockParams {
        &self.shock
    }

    /// `Z·s·k^α + (1-δ)·k` for a realised draw `z`.
    pub fn apply_with_shock(&self, k: f64, z: f64) -> f64 {
        let SolowParams { s, alpha, delta, .. } = self.params;
        z * s * k.powf(alpha) + (1.0 - delta) * k
    }

    /// The deterministic model obtained by replacing `Z` with its mean `A`.
    pub fn mean_model(&self) -> SolowModel {
        SolowModel {
            params: self.params,
        }
    }

    /// A reproducible shock stream with `E[Z] = A`.
    pub fn seeded_shocks(&self, seed: u64) -> Result<LogNormalShocks<StdRng>> {
        LogNormalShocks::seeded(self.params.a, self.shock.sigma, seed)
    }
}

//! Overlapping generations with Cobb-Douglas firms.
//!
//! The young supply one unit of labour at wage `w_t = (1-α)k_t^α`, save
//! `s_t`, and consume `R_{t+1}·s_t` when old, with `R = α k^(α-1)`. Market
//! clearing sets `k_{t+1} = s_t`.
//!
//! With log utility the savings rule is linear in the wage and the law of
//! motion is explicit. With CRRA utility the savings of the young depend on
//! next period's interest rate, so `k_{t+1}` is only defined implicitly and
//! each period needs a root-find.

use crate::autodiff::Dual;
use crate::error::{GrowthError, Result};
use crate::fixed_point::{closed_form_fixed_point, FixedPoint};
use crate::params::{CrraOlgParams, OlgParams};
use crate::root_finding::{RootFinder, ScalarMinimizer};
use crate::traits::{Scalar, UpdateRule};
use tracing::debug;

/// Initial guess used by the per-period root-find unless told otherwise.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;

/// Wage `(1-α)k^α`.
pub fn wage<T: Scalar>(alpha: f64, k: T) -> T {
    T::from_f64(1.0 - alpha) * k.powf(alpha)
}

/// Gross rate of return on capital `α k^(α-1)`.
pub fn gross_rate<T: Scalar>(alpha: f64, k: T) -> T {
    T::from_f64(alpha) * k.powf(alpha - 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlgModel {
    params: OlgParams,
}

impl OlgModel {
    pub fn new(params: OlgParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &OlgParams {
        &self.params
    }

    /// Savings of the young out of wage `w`: `β/(1+β)·w`.
    pub fn savings(&self, w: f64) -> f64 {
        self.params.beta / (1.0 + self.params.beta) * w
    }

    /// `k* = (β(1-α)/(1+β))^(1/(1-α))`.
    pub fn steady_state(&self) -> f64 {
        let OlgParams { alpha, beta } = self.params;
        (beta * (1.0 - alpha) / (1.0 + beta)).powf(1.0 / (1.0 - alpha))
    }

    pub fn fixed_point(&self) -> FixedPoint {
        closed_form_fixed_point(self, self.steady_state())
    }
}

impl<T: Scalar> UpdateRule<T> for OlgModel {
    fn apply(&self, k: T) -> T {
        let OlgParams { alpha, beta } = self.params;
        T::from_f64(beta / (1.0 + beta)) * wage(alpha, k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrraOlgModel {
    params: CrraOlgParams,
}

impl CrraOlgModel {
    pub fn new(params: CrraOlgParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CrraOlgParams {
        &self.params
    }

    /// `u(c) = (c^(1-γ) - 1)/(1-γ)`, which is `ln c` at `γ = 1`.
    pub fn utility(&self, c: f64) -> f64 {
        let gamma = self.params.gamma;
        if (gamma - 1.0).abs() < f64::EPSILON {
            c.ln()
        } else {
            (c.powf(1.0 - gamma) - 1.0) / (1.0 - gamma)
        }
    }

    /// Euler-equation savings `w / (1 + β^(-1/γ) R^((γ-1)/γ))`.
    pub fn savings(&self, w: f64, r: f64) -> f64 {
        let CrraOlgParams { beta, gamma, .. } = self.params;
        w / (1.0 + beta.powf(-1.0 / gamma) * r.powf((gamma - 1.0) / gamma))
    }

    /// Solves the household problem `max u(w - s) + β u(R s)` over
    /// `s ∈ (0, w)` numerically. Agrees with `savings` at the optimum.
    pub fn optimal_savings<M: ScalarMinimizer + ?Sized>(
        &self,
        w: f64,
        r: f64,
        minimizer: &M,
    ) -> Result<f64> {
        if !w.is_finite() || w <= 0.0 {
            return Err(GrowthError::invalid("w", w, "wage must be positive"));
        }
        if !r.is_finite() || r <= 0.0 {
            return Err(GrowthError::invalid("r", r, "gross rate must be positive"));
        }
        let beta = self.params.beta;
        let objective = |s: f64| -(self.utility(w - s) + beta * self.utility(r * s));
        let edge = w * 1e-9;
        let minimum = minimizer.minimize_scalar(&objective, (edge, w - edge))?;
        Ok(minimum.argmin)
    }

    /// `f(k', k_t) = k'·[1 + β^(-1/γ)(α k'^(α-1))^((γ-1)/γ)] - (1-α)k_t^α`.
    pub fn residual<T: Scalar>(&self, k_next: T, k: T) -> T {
        let CrraOlgParams { alpha, beta, gamma } = self.params;
        let discount = T::from_f64(beta.powf(-1.0 / gamma));
        let rate_term = gross_rate(alpha, k_next).powf((gamma - 1.0) / gamma);
        k_next * (T::one() + discount * rate_term) - wage(alpha, k)
    }

    /// Next period's capital given `k_t`.
    pub fn solve_implicit_step<F: RootFinder + ?Sized>(
        &self,
        k: f64,
        initial_guess: f64,
        finder: &F,
    ) -> Result<f64> {
        if !k.is_finite() || k <= 0.0 {
            return Err(GrowthError::invalid(
                "k_t",
                k,
                "current capital must be positive",
            ));
        }
        let current = Dual::constant(k);
        let root = finder.find_root(&|k_next| self.residual(k_next, current), initial_guess)?;
        physical_root(root.root, root.residual, root.iterations)
    }

    /// Steady state from `h(k*) = f(k*, k*) = 0`, independent of any path.
    ///
    /// The multiplier is `dk'/dk` of the implicit rule at `k*`, from the
    /// implicit function theorem.
    pub fn steady_state<F: RootFinder + ?Sized>(
        &self,
        initial_guess: f64,
        finder: &F,
    ) -> Result<FixedPoint> {
        let root = finder.find_root(&|k| self.residual(k, k), initial_guess)?;
        let state = physical_root(root.root, root.residual, root.iterations)?;

        let d_next = self
            .residual(Dual::variable(state), Dual::constant(state))
            .eps;
        let d_current = self
            .residual(Dual::constant(state), Dual::variable(state))
            .eps;
        let multiplier = -d_current / d_next;
        debug!(state, multiplier, "CRRA OLG steady state");

        Ok(FixedPoint {
            state,
            residual: root.residual,
            iterations: root.iterations,
            multiplier,
        })
    }
}

/// Solves the implicit CRRA step for explicit parameters.
pub fn solve_implicit_step<F: RootFinder + ?Sized>(
    k: f64,
    params: &CrraOlgParams,
    initial_guess: f64,
    finder: &F,
) -> Result<f64> {
    CrraOlgModel::new(*params)?.solve_implicit_step(k, initial_guess, finder)
}

// A converged but non-positive capital stock is as useless as divergence.
fn physical_root(root: f64, residual: f64, iterations: usize) -> Result<f64> {
    if root <= 0.0 {
        return Err(GrowthError::Convergence {
            iterations,
            residual,
        });
    }
    Ok(root)
}

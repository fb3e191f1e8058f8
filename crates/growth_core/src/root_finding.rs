//! Scalar root-finding and minimization capabilities.
//!
//! Model code only sees the `RootFinder` and `ScalarMinimizer` traits, so a
//! test can swap in a fake and the models stay independent of the solver.

use crate::autodiff::Dual;
use crate::error::{GrowthError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonSettings {
    pub max_steps: usize,
    pub damping: f64,
    pub tolerance: f64,
    /// How many times a step is halved when it lands where the residual is
    /// not finite (e.g. a negative capital stock under a fractional power).
    pub max_halvings: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            max_steps: 50,
            damping: 1.0,
            tolerance: 1e-10,
            max_halvings: 30,
        }
    }
}

impl NewtonSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(GrowthError::invalid(
                "max_steps",
                0.0,
                "must be greater than zero",
            ));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(GrowthError::invalid(
                "damping",
                self.damping,
                "must be positive",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GrowthError::invalid(
                "tolerance",
                self.tolerance,
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// A converged root together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub root: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Locates a zero of a scalar function near an initial guess.
///
/// The function is evaluated on dual numbers so implementations that need a
/// derivative can read it from `eps`; implementations that do not can simply
/// pass constants and read `val`.
pub trait RootFinder {
    fn find_root(&self, f: &dyn Fn(Dual) -> Dual, initial_guess: f64) -> Result<Root>;
}

/// Newton-Raphson with exact derivatives from forward-mode AD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Newton {
    pub settings: NewtonSettings,
}

impl Newton {
    pub fn new(settings: NewtonSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }
}

impl RootFinder for Newton {
    fn find_root(&self, f: &dyn Fn(Dual) -> Dual, initial_guess: f64) -> Result<Root> {
        let settings = self.settings;
        if !initial_guess.is_finite() {
            return Err(GrowthError::invalid(
                "initial_guess",
                initial_guess,
                "must be finite",
            ));
        }

        let mut x = initial_guess;
        let mut eval = f(Dual::variable(x));
        let mut iterations = 0usize;

        loop {
            let residual = eval.val.abs();
            if !residual.is_finite() {
                warn!(x, iterations, "Newton iterate left the domain of the residual");
                return Err(GrowthError::Convergence {
                    iterations,
                    residual,
                });
            }

            if residual < settings.tolerance {
                debug!(root = x, residual, iterations, "Newton solver converged");
                return Ok(Root {
                    root: x,
                    residual,
                    iterations,
                });
            }

            if iterations >= settings.max_steps || eval.eps == 0.0 || !eval.eps.is_finite() {
                warn!(
                    x,
                    residual,
                    iterations,
                    derivative = eval.eps,
                    "Newton solver failed to converge"
                );
                return Err(GrowthError::Convergence {
                    iterations,
                    residual,
                });
            }

            let mut step = settings.damping * eval.val / eval.eps;
            let mut candidate = x - step;
            let mut next = f(Dual::variable(candidate));
            let mut halvings = 0usize;
            while !next.val.is_finite() && halvings < settings.max_halvings {
                step *= 0.5;
                candidate = x - step;
                next = f(Dual::variable(candidate));
                halvings += 1;
            }

            x = candidate;
            eval = next;
            iterations += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenSectionSettings {
    pub max_iters: usize,
    /// Width of the bracket at which the search stops.
    pub x_tolerance: f64,
}

impl Default for GoldenSectionSettings {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_tolerance: 1e-10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minimum {
    pub argmin: f64,
    pub value: f64,
    pub iterations: usize,
}

/// Minimizes a scalar function over a closed interval.
pub trait ScalarMinimizer {
    fn minimize_scalar(&self, f: &dyn Fn(f64) -> f64, bounds: (f64, f64)) -> Result<Minimum>;
}

/// Golden section search on a unimodal objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldenSection {
    pub settings: GoldenSectionSettings,
}

const INV_PHI: f64 = 0.618_033_988_749_894_8;

impl GoldenSection {
    pub fn new(settings: GoldenSectionSettings) -> Result<Self> {
        if !settings.x_tolerance.is_finite() || settings.x_tolerance < 0.0 {
            return Err(GrowthError::invalid(
                "x_tolerance",
                settings.x_tolerance,
                "must be finite and non-negative",
            ));
        }
        Ok(Self { settings })
    }
}

impl ScalarMinimizer for GoldenSection {
    fn minimize_scalar(&self, f: &dyn Fn(f64) -> f64, bounds: (f64, f64)) -> Result<Minimum> {
        let (mut lo, mut hi) = bounds;
        if !lo.is_finite() || !hi.is_finite() {
            return Err(GrowthError::Minimization {
                reason: "bounds must be finite",
            });
        }
        if hi <= lo {
            return Err(GrowthError::Minimization {
                reason: "upper bound must exceed lower bound",
            });
        }

        // Undefined objective values count as worse than anything finite.
        let objective = |x: f64| {
            let value = f(x);
            if value.is_nan() {
                f64::INFINITY
            } else {
                value
            }
        };

        let mut left = hi - INV_PHI * (hi - lo);
        let mut right = lo + INV_PHI * (hi - lo);
        let mut f_left = objective(left);
        let mut f_right = objective(right);
        let mut iterations = 0usize;

        while hi - lo > self.settings.x_tolerance && iterations < self.settings.max_iters {
            if f_left < f_right {
                hi = right;
                right = left;
                f_right = f_left;
                left = hi - INV_PHI * (hi - lo);
                f_left = objective(left);
            } else {
                lo = left;
                left = right;
                f_left = f_right;
                right = lo + INV_PHI * (hi - lo);
                f_right = objective(right);
            }
            iterations += 1;
        }

        let (argmin, value) = if f_left < f_right {
            (left, f_left)
        } else {
            (right, f_right)
        };
        debug!(argmin, value, iterations, "golden section search finished");

        Ok(Minimum {
            argmin,
            value,
            iterations,
        })
    }
}

use crate::autodiff::Dual;
use crate::error::{GrowthError, Result};
use crate::root_finding::RootFinder;
use crate::traits::UpdateRule;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A steady state `k* = g(k*)` of a scalar map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPoint {
    pub state: f64,
    /// `|g(k*) - k*|` at the reported state.
    pub residual: f64,
    /// Root-finder iterations; zero for closed forms.
    pub iterations: usize,
    /// `g'(k*)`, the one-dimensional Jacobian of the map.
    pub multiplier: f64,
}

impl FixedPoint {
    /// Locally attracting when `|g'(k*)| < 1`.
    pub fn is_stable(&self) -> bool {
        self.multiplier.abs() < 1.0
    }
}

/// `g'(k)` via forward-mode AD.
pub fn multiplier<R: UpdateRule<Dual> + ?Sized>(rule: &R, k: f64) -> f64 {
    rule.apply(Dual::variable(k)).eps
}

/// Packages an analytic steady state with its residual and multiplier.
pub fn closed_form_fixed_point<R>(rule: &R, k_star: f64) -> FixedPoint
where
    R: UpdateRule<f64> + UpdateRule<Dual> + ?Sized,
{
    let image = <R as UpdateRule<f64>>::apply(rule, k_star);
    FixedPoint {
        state: k_star,
        residual: (image - k_star).abs(),
        iterations: 0,
        multiplier: multiplier(rule, k_star),
    }
}

/// Solves `g(k) - k = 0` for a rule with no closed-form steady state.
pub fn numerical_fixed_point<R, F>(rule: &R, finder: &F, initial_guess: f64) -> Result<FixedPoint>
where
    R: UpdateRule<Dual> + ?Sized,
    F: RootFinder + ?Sized,
{
    let root = finder.find_root(&|k| rule.apply(k) - k, initial_guess)?;
    if rule.requires_positive_state() && root.root <= 0.0 {
        return Err(GrowthError::Convergence {
            iterations: root.iterations,
            residual: root.residual,
        });
    }

    let multiplier = multiplier(rule, root.root);
    debug!(
        state = root.root,
        multiplier,
        iterations = root.iterations,
        "numerical fixed point"
    );
    Ok(FixedPoint {
        state: root.root,
        residual: root.residual,
        iterations: root.iterations,
        multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OlgModel, SolowModel};
    use crate::params::{OlgParams, SolowParams};
    use crate::root_finding::Newton;
    use crate::traits::Scalar;

    struct Logistic {
        r: f64,
    }

    impl<T: Scalar> UpdateRule<T> for Logistic {
        fn apply(&self, k: T) -> T {
            T::from_f64(self.r) * k * (T::one() - k)
        }

        fn requires_positive_state(&self) -> bool {
            false
        }
    }

    #[test]
    fn numerical_matches_closed_form_for_solow() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let numeric =
            numerical_fixed_point(&model, &Newton::default(), 1.0).expect("converges");
        assert!((numeric.state - model.steady_state()).abs() < 1e-9);
        assert!((numeric.multiplier - model.fixed_point().multiplier).abs() < 1e-8);
    }

    #[test]
    fn numerical_matches_closed_form_for_log_olg() {
        let model = OlgModel::new(OlgParams::default()).expect("valid params");
        let numeric =
            numerical_fixed_point(&model, &Newton::default(), 0.1).expect("converges");
        assert!((numeric.state - model.steady_state()).abs() < 1e-10);
        assert!(numeric.is_stable());
    }

    #[test]
    fn closed_form_residual_is_negligible() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let fixed = model.fixed_point();
        assert_eq!(fixed.iterations, 0);
        assert!(fixed.residual < 1e-12);
    }

    #[test]
    fn unstable_fixed_point_is_flagged() {
        // Logistic map at r = 3.2: k* = 1 - 1/r with g'(k*) = 2 - r = -1.2.
        let map = Logistic { r: 3.2 };
        let fixed = numerical_fixed_point(&map, &Newton::default(), 0.7).expect("converges");
        assert!((fixed.state - (1.0 - 1.0 / 3.2)).abs() < 1e-10);
        assert!((fixed.multiplier + 1.2).abs() < 1e-9);
        assert!(!fixed.is_stable());
    }
}

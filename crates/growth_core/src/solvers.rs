use crate::error::Result;
use crate::models::{CrraOlgModel, StochasticSolow};
use crate::root_finding::RootFinder;
use crate::shocks::ShockSource;
use crate::traits::{Steppable, UpdateRule};

/// Discrete Map Stepper
/// Just evaluates k_{t+1} = g(k_t).
pub struct DiscreteMap<R> {
    rule: R,
}

impl<R: UpdateRule<f64>> DiscreteMap<R> {
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<R: UpdateRule<f64>> Steppable for DiscreteMap<R> {
    fn step(&mut self, k: f64) -> Result<f64> {
        Ok(self.rule.apply(k))
    }

    fn requires_positive_state(&self) -> bool {
        self.rule.requires_positive_state()
    }
}

/// Stochastic Solow stepper.
/// Draws one fresh productivity shock per step.
pub struct ShockedSolowMap<S> {
    model: StochasticSolow,
    shocks: S,
}

impl<S: ShockSource> ShockedSolowMap<S> {
    pub fn new(model: StochasticSolow, shocks: S) -> Self {
        Self { model, shocks }
    }

    pub fn into_shocks(self) -> S {
        self.shocks
    }
}

impl<S: ShockSource> Steppable for ShockedSolowMap<S> {
    fn step(&mut self, k: f64) -> Result<f64> {
        let z = self.shocks.draw();
        Ok(self.model.apply_with_shock(k, z))
    }
}

/// CRRA OLG stepper.
/// Each period solves the implicit law of motion with a fresh root-find
/// from the same initial guess.
pub struct ImplicitOlgMap<F> {
    model: CrraOlgModel,
    finder: F,
    initial_guess: f64,
}

impl<F: RootFinder> ImplicitOlgMap<F> {
    pub fn new(model: CrraOlgModel, finder: F) -> Self {
        Self::with_initial_guess(model, finder, crate::models::olg::DEFAULT_INITIAL_GUESS)
    }

    pub fn with_initial_guess(model: CrraOlgModel, finder: F, initial_guess: f64) -> Self {
        Self {
            model,
            finder,
            initial_guess,
        }
    }
}

impl<F: RootFinder> Steppable for ImplicitOlgMap<F> {
    fn step(&mut self, k: f64) -> Result<f64> {
        self.model
            .solve_implicit_step(k, self.initial_guess, &self.finder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OlgModel, SolowModel};
    use crate::params::{CrraOlgParams, OlgParams, ShockParams, SolowParams};
    use crate::root_finding::Newton;
    use crate::shocks::ScriptedShocks;

    #[test]
    fn discrete_map_applies_rule_once() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let mut stepper = DiscreteMap::new(model);
        let next = stepper.step(0.25).expect("step");
        let expected = 0.3 * 2.0 * 0.25_f64.powf(0.3) + 0.6 * 0.25;
        assert!((next - expected).abs() < 1e-15);
    }

    #[test]
    fn shocked_map_consumes_one_draw_per_step() {
        let model = StochasticSolow::new(SolowParams::default(), ShockParams::default())
            .expect("valid params");
        let shocks = ScriptedShocks::new(vec![1.0, 3.0]).expect("shocks");
        let mut stepper = ShockedSolowMap::new(model, shocks);
        let k1 = stepper.step(1.0).expect("step");
        let k2 = stepper.step(1.0).expect("step");
        assert!((k1 - (0.3 + 0.6)).abs() < 1e-15);
        assert!((k2 - (0.9 + 0.6)).abs() < 1e-15);
        assert_eq!(stepper.into_shocks().consumed(), 2);
    }

    #[test]
    fn implicit_map_at_unit_gamma_tracks_log_rule() {
        let crra = CrraOlgModel::new(CrraOlgParams {
            gamma: 1.0,
            ..CrraOlgParams::default()
        })
        .expect("valid params");
        let log = OlgModel::new(OlgParams {
            alpha: 0.4,
            beta: 0.9,
        })
        .expect("valid params");
        let mut implicit = ImplicitOlgMap::new(crra, Newton::default());
        let mut explicit = DiscreteMap::new(log);
        let mut k = 0.02;
        for _ in 0..10 {
            let a = implicit.step(k).expect("implicit step");
            let b = explicit.step(k).expect("explicit step");
            assert!((a - b).abs() < 1e-10);
            k = b;
        }
    }
}

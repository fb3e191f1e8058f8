use crate::error::{GrowthError, Result};
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};

/// Samples of `k ↦ g(k)` for plotting against the identity line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortyFiveDiagram {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl FortyFiveDiagram {
    /// Grid locations where `g(k) - k` changes sign, refined by linear
    /// interpolation between neighbouring samples.
    pub fn crossings(&self) -> Vec<f64> {
        let gaps: Vec<f64> = self
            .grid
            .iter()
            .zip(&self.values)
            .map(|(k, g)| g - k)
            .collect();

        let mut crossings = Vec::new();
        for i in 0..gaps.len().saturating_sub(1) {
            let (left, right) = (gaps[i], gaps[i + 1]);
            if left == 0.0 {
                crossings.push(self.grid[i]);
            } else if left * right < 0.0 {
                let weight = left / (left - right);
                crossings.push(self.grid[i] + weight * (self.grid[i + 1] - self.grid[i]));
            }
        }
        if gaps.last() == Some(&0.0) {
            crossings.push(self.grid[gaps.len() - 1]);
        }
        crossings
    }
}

/// Evaluates one step of `stepper` on `samples` evenly spaced points in
/// `[k_min, k_max]`. Stochastic steppers consume one draw per sample.
pub fn forty_five_diagram<S: Steppable + ?Sized>(
    stepper: &mut S,
    k_min: f64,
    k_max: f64,
    samples: usize,
) -> Result<FortyFiveDiagram> {
    if !k_min.is_finite() {
        return Err(GrowthError::invalid("k_min", k_min, "must be finite"));
    }
    if !k_max.is_finite() || k_max <= k_min {
        return Err(GrowthError::invalid(
            "k_max",
            k_max,
            "must be finite and exceed k_min",
        ));
    }
    if samples < 2 {
        return Err(GrowthError::invalid(
            "samples",
            samples as f64,
            "at least two samples are required",
        ));
    }

    let positive = stepper.requires_positive_state();
    let spacing = (k_max - k_min) / (samples - 1) as f64;
    let mut grid = Vec::with_capacity(samples);
    let mut values = Vec::with_capacity(samples);
    for i in 0..samples {
        let k = if i == samples - 1 {
            k_max
        } else {
            k_min + spacing * i as f64
        };
        if positive && k <= 0.0 {
            return Err(GrowthError::Domain {
                period: 0,
                value: k,
            });
        }
        grid.push(k);
        values.push(stepper.step(k)?);
    }

    Ok(FortyFiveDiagram { grid, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrraOlgModel, OlgModel, SolowModel};
    use crate::params::{CrraOlgParams, OlgParams, SolowParams};
    use crate::root_finding::Newton;
    use crate::solvers::{DiscreteMap, ImplicitOlgMap};

    #[test]
    fn grid_spans_requested_interval() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let diagram =
            forty_five_diagram(&mut DiscreteMap::new(model), 0.1, 4.0, 40).expect("diagram");
        assert_eq!(diagram.grid.len(), 40);
        assert_eq!(diagram.values.len(), 40);
        assert_eq!(diagram.grid[0], 0.1);
        assert_eq!(diagram.grid[39], 4.0);
    }

    #[test]
    fn single_crossing_is_the_solow_steady_state() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let diagram =
            forty_five_diagram(&mut DiscreteMap::new(model), 0.01, 4.0, 400).expect("diagram");
        let crossings = diagram.crossings();
        assert_eq!(crossings.len(), 1);
        assert!((crossings[0] - model.steady_state()).abs() < 1e-3);
    }

    #[test]
    fn olg_crossing_matches_closed_form() {
        let model = OlgModel::new(OlgParams::default()).expect("valid params");
        let diagram =
            forty_five_diagram(&mut DiscreteMap::new(model), 0.001, 0.2, 200).expect("diagram");
        let crossings = diagram.crossings();
        assert_eq!(crossings.len(), 1);
        assert!((crossings[0] - model.steady_state()).abs() < 1e-3);
    }

    #[test]
    fn implicit_rule_can_be_drawn() {
        let model = CrraOlgModel::new(CrraOlgParams::default()).expect("valid params");
        let newton = Newton::default();
        let steady = model.steady_state(0.1, &newton).expect("steady state");
        let mut stepper = ImplicitOlgMap::new(model, newton);
        let diagram = forty_five_diagram(&mut stepper, 0.01, 0.5, 100).expect("diagram");
        let crossings = diagram.crossings();
        assert_eq!(crossings.len(), 1);
        assert!((crossings[0] - steady.state).abs() < 1e-3);
    }

    #[test]
    fn rejects_degenerate_ranges() {
        let model = SolowModel::new(SolowParams::default()).expect("valid params");
        let mut stepper = DiscreteMap::new(model);
        assert!(forty_five_diagram(&mut stepper, 1.0, 1.0, 10).is_err());
        assert!(forty_five_diagram(&mut stepper, 0.1, 1.0, 1).is_err());
        assert!(matches!(
            forty_five_diagram(&mut stepper, -1.0, 1.0, 10),
            Err(GrowthError::Domain { .. })
        ));
    }
}

//! Trajectory simulation for scalar recurrences.

use crate::error::{GrowthError, Result};
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A fully materialised orbit `k_0, k_1, …, k_{T-1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    values: Vec<f64>,
}

impl Trajectory {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn initial(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn is_monotone_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|w| w[1] >= w[0])
    }

    pub fn is_monotone_non_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[1] <= w[0])
    }

    /// Largest `|k_t - target|` over the whole path.
    pub fn max_abs_deviation_from(&self, target: f64) -> f64 {
        self.values
            .iter()
            .map(|k| (k - target).abs())
            .fold(0.0, f64::max)
    }
}

/// Runs `stepper` from `k0` and returns `horizon` values with
/// `trajectory[0] = k0` and `trajectory[t+1] = g(trajectory[t])`.
pub fn simulate<S: Steppable + ?Sized>(
    stepper: &mut S,
    k0: f64,
    horizon: usize,
) -> Result<Trajectory> {
    if horizon < 1 {
        return Err(GrowthError::invalid(
            "horizon",
            horizon as f64,
            "must be at least one period",
        ));
    }
    if !k0.is_finite() {
        return Err(GrowthError::invalid("k0", k0, "must be finite"));
    }

    let positive = stepper.requires_positive_state();
    check_state(k0, 0, positive)?;

    let mut values = Vec::with_capacity(horizon);
    values.push(k0);
    let mut k = k0;
    for period in 1..horizon {
        k = stepper.step(k)?;
        check_state(k, period, positive)?;
        values.push(k);
    }

    debug!(k0, horizon, last = k, "simulated trajectory");
    Ok(Trajectory { values })
}

/// Independent trajectories from several initial conditions.
///
/// `make_stepper` receives the path index so stochastic runs can be seeded
/// per path. Paths run in order and the first failure is returned.
pub fn simulate_many<S, M>(
    mut make_stepper: M,
    initial_conditions: &[f64],
    horizon: usize,
) -> Result<Vec<Trajectory>>
where
    S: Steppable,
    M: FnMut(usize) -> Result<S>,
{
    initial_conditions
        .iter()
        .enumerate()
        .map(|(index, &k0)| {
            let mut stepper = make_stepper(index)?;
            simulate(&mut stepper, k0, horizon)
        })
        .collect()
}

fn check_state(value: f64, period: usize, positive: bool) -> Result<()> {
    if !value.is_finite() || (positive && value <= 0.0) {
        return Err(GrowthError::Domain { period, value });
    }
    Ok(())
}

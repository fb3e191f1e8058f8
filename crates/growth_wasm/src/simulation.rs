//! Trajectory and 45-degree diagram runners.

use crate::model::{js_error, ModelKind, WasmGrowthModel};
use anyhow::{Context, Result};
use growth_core::diagram::{forty_five_diagram, FortyFiveDiagram};
use growth_core::simulate::{simulate, simulate_many, Trajectory};
use growth_core::solvers::{DiscreteMap, ImplicitOlgMap, ShockedSolowMap};
use growth_core::traits::Steppable;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// Diagram payload handed to the plotting front end.
#[derive(Serialize)]
struct DiagramPayload {
    grid: Vec<f64>,
    values: Vec<f64>,
    crossings: Vec<f64>,
}

impl From<FortyFiveDiagram> for DiagramPayload {
    fn from(diagram: FortyFiveDiagram) -> Self {
        let crossings = diagram.crossings();
        DiagramPayload {
            grid: diagram.grid,
            values: diagram.values,
            crossings,
        }
    }
}

impl WasmGrowthModel {
    /// A fresh stepper for this model. `seed` only matters for the stochastic Solow model.
    pub(crate) fn stepper(&self, seed: u64) -> growth_core::Result<Box<dyn Steppable>> {
        let stepper: Box<dyn Steppable> = match self.kind {
            ModelKind::Solow(model) => Box::new(DiscreteMap::new(model)),
            ModelKind::StochasticSolow(model) => {
                Box::new(ShockedSolowMap::new(model, model.seeded_shocks(seed)?))
            }
            ModelKind::Olg(model) => Box::new(DiscreteMap::new(model)),
            ModelKind::CrraOlg(model) => Box::new(ImplicitOlgMap::with_initial_guess(
                model,
                self.newton,
                self.initial_guess,
            )),
        };
        Ok(stepper)
    }

    pub(crate) fn run(&self, k0: f64, horizon: usize, seed: u64) -> Result<Trajectory> {
        let mut stepper = self.stepper(seed)?;
        simulate(&mut stepper, k0, horizon)
            .with_context(|| format!("{} simulation from k0 = {} failed", self.kind.name(), k0))
    }

    /// Path `i` is seeded with `seed + i`.
    pub(crate) fn run_many(
        &self,
        initial_conditions: &[f64],
        horizon: usize,
        seed: u64,
    ) -> Result<Vec<Trajectory>> {
        simulate_many(
            |index| self.stepper(seed.wrapping_add(index as u64)),
            initial_conditions,
            horizon,
        )
        .with_context(|| format!("{} batch simulation failed", self.kind.name()))
    }

    pub(crate) fn diagram(
        &self,
        k_min: f64,
        k_max: f64,
        samples: usize,
        seed: u64,
    ) -> Result<FortyFiveDiagram> {
        let mut stepper = self.stepper(seed)?;
        forty_five_diagram(&mut stepper, k_min, k_max, samples)
            .with_context(|| format!("{} diagram on [{}, {}] failed", self.kind.name(), k_min, k_max))
    }
}

#[wasm_bindgen]
impl WasmGrowthModel {
    pub fn simulate(&self, k0: f64, horizon: u32, seed: u32) -> Result<js_sys::Float64Array, JsValue> {
        let trajectory = self
            .run(k0, horizon as usize, seed as u64)
            .map_err(js_error)?;
        Ok(js_sys::Float64Array::from(trajectory.values()))
    }

    pub fn simulate_many(
        &self,
        initial_conditions: Vec<f64>,
        horizon: u32,
        seed: u32,
    ) -> Result<JsValue, JsValue> {
        let paths: Vec<Vec<f64>> = self
            .run_many(&initial_conditions, horizon as usize, seed as u64)
            .map_err(js_error)?
            .into_iter()
            .map(Trajectory::into_values)
            .collect();

        to_value(&paths).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn forty_five(
        &self,
        k_min: f64,
        k_max: f64,
        samples: u32,
        seed: u32,
    ) -> Result<JsValue, JsValue> {
        let payload = DiagramPayload::from(
            self.diagram(k_min, k_max, samples as usize, seed as u64)
                .map_err(js_error)?,
        );

        to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

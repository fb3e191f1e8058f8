//! Steady-state and golden-rule queries.

use crate::model::{js_error, ModelKind, WasmGrowthModel};
use anyhow::{bail, Context, Result};
use growth_core::fixed_point::FixedPoint;
use growth_core::models::solow::{golden_rule_savings, GoldenRule};
use growth_core::root_finding::GoldenSection;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

impl WasmGrowthModel {
    /// The stochastic model reports the steady state of its mean model.
    pub(crate) fn fixed_point(&self) -> Result<FixedPoint> {
        match self.kind {
            ModelKind::Solow(model) => Ok(model.fixed_point()),
            ModelKind::StochasticSolow(model) => Ok(model.mean_model().fixed_point()),
            ModelKind::Olg(model) => Ok(model.fixed_point()),
            ModelKind::CrraOlg(model) => model
                .steady_state(self.initial_guess, &self.newton)
                .with_context(|| {
                    format!(
                        "CRRA steady state search from {} failed",
                        self.initial_guess
                    )
                }),
        }
    }

    pub(crate) fn golden_rule_point(&self) -> Result<GoldenRule> {
        let params = match self.kind {
            ModelKind::Solow(model) => *model.params(),
            ModelKind::StochasticSolow(model) => *model.params(),
            _ => bail!("Golden rule is only defined for Solow models, not {}", self.kind.name()),
        };
        Ok(golden_rule_savings(&params, &GoldenSection::default())?)
    }
}

#[wasm_bindgen]
impl WasmGrowthModel {
    pub fn steady_state(&self) -> Result<JsValue, JsValue> {
        let fixed_point = self.fixed_point().map_err(js_error)?;
        to_value(&fixed_point).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn golden_rule(&self) -> Result<JsValue, JsValue> {
        let rule = self.golden_rule_point().map_err(js_error)?;
        to_value(&rule).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

//! Core WASM model wrapper and low-level utilities.

use growth_core::models::{CrraOlgModel, OlgModel, SolowModel, StochasticSolow};
use growth_core::params::{CrraOlgParams, OlgParams, ShockParams, SolowParams};
use growth_core::root_finding::{Newton, NewtonSettings};
use growth_core::GrowthError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGrowthModel {
    pub(crate) kind: ModelKind,
    pub(crate) newton: Newton,
    pub(crate) initial_guess: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ModelKind {
    Solow(SolowModel),
    StochasticSolow(StochasticSolow),
    Olg(OlgModel),
    CrraOlg(CrraOlgModel),
}

impl ModelKind {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ModelKind::Solow(_) => "solow",
            ModelKind::StochasticSolow(_) => "stochastic_solow",
            ModelKind::Olg(_) => "olg",
            ModelKind::CrraOlg(_) => "olg_crra",
        }
    }
}

/// Stochastic Solow parameters arrive as one flat object: `{ a, s, alpha, delta, sigma }`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct StochasticSolowConfig {
    #[serde(flatten)]
    params: SolowParams,
    #[serde(flatten)]
    shock: ShockParams,
}

/// Missing objects fall back to the reference calibration.
fn parse_params<P: DeserializeOwned + Default>(params: JsValue) -> Result<P, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(P::default());
    }
    from_value(params).map_err(|e| JsValue::from_str(&format!("Invalid params: {}", e)))
}

pub(crate) fn js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

fn core_error(err: GrowthError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl WasmGrowthModel {
    pub(crate) fn from_kind(kind: ModelKind) -> Self {
        Self {
            kind,
            newton: Newton::default(),
            initial_guess: growth_core::models::olg::DEFAULT_INITIAL_GUESS,
        }
    }

    pub(crate) fn configure_newton(
        &mut self,
        settings: NewtonSettings,
        initial_guess: f64,
    ) -> anyhow::Result<()> {
        if !initial_guess.is_finite() {
            anyhow::bail!("Initial guess must be finite, got {}", initial_guess);
        }
        self.newton = Newton::new(settings)?;
        self.initial_guess = initial_guess;
        Ok(())
    }
}

#[wasm_bindgen]
impl WasmGrowthModel {
    #[wasm_bindgen(constructor)]
    pub fn new(model: &str, params: JsValue) -> Result<WasmGrowthModel, JsValue> {
        console_error_panic_hook::set_once();

        let kind = match model {
            "solow" => ModelKind::Solow(
                SolowModel::new(parse_params(params)?).map_err(core_error)?,
            ),
            "stochastic_solow" => {
                let config: StochasticSolowConfig = parse_params(params)?;
                ModelKind::StochasticSolow(
                    StochasticSolow::new(config.params, config.shock).map_err(core_error)?,
                )
            }
            "olg" => ModelKind::Olg(
                OlgModel::new(parse_params::<OlgParams>(params)?).map_err(core_error)?,
            ),
            "olg_crra" => ModelKind::CrraOlg(
                CrraOlgModel::new(parse_params::<CrraOlgParams>(params)?).map_err(core_error)?,
            ),
            _ => return Err(JsValue::from_str(&format!("Unknown model: {}", model))),
        };

        Ok(WasmGrowthModel::from_kind(kind))
    }

    /// Root-finder settings for the implicit CRRA law of motion.
    pub fn set_newton_settings(
        &mut self,
        max_steps: u32,
        damping: f64,
        tolerance: f64,
        initial_guess: f64,
    ) -> Result<(), JsValue> {
        let settings = NewtonSettings {
            max_steps: max_steps as usize,
            damping,
            tolerance,
            ..NewtonSettings::default()
        };
        self.configure_newton(settings, initial_guess)
            .map_err(js_error)
    }

    pub fn model_name(&self) -> String {
        self.kind.name().to_string()
    }
}

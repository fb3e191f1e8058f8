pub mod equilibrium;
pub mod model;
pub mod simulation;

pub use model::WasmGrowthModel;

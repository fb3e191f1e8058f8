pub mod olg;
pub mod solow;

pub use olg::{CrraOlgModel, OlgModel};
pub use solow::{SolowModel, StochasticSolow};

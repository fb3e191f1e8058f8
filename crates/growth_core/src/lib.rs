pub mod autodiff;
pub mod diagram;
pub mod error;
pub mod fixed_point;
pub mod models;
pub mod params;
pub mod root_finding;
pub mod shocks;
pub mod simulate;
pub mod solvers;
/// The `growth_core` crate provides the numerical engine behind the Solow-Swan
/// and overlapping generations growth model lectures.
/// Every model is a scalar recurrence `k_{t+1} = g(k_t)` on capital per worker.
///
/// Key components:
/// - **Traits**: `Scalar` (`f64` or `Dual`), `UpdateRule` (explicit maps), `Steppable` (one period).
/// - **Models**: deterministic and stochastic Solow, log and CRRA OLG.
/// - **Solvers**: steppers for explicit, shocked and implicit laws of motion.
/// - **Root finding**: Newton on dual-number derivatives and golden section search,
///   behind the `RootFinder` and `ScalarMinimizer` traits.
/// - **Simulate / Fixed point / Diagram**: trajectories, steady states and
///   45-degree diagram samples handed to a plotting front end.
pub mod traits;

pub use error::{GrowthError, Result};

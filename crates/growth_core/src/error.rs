use thiserror::Error;

/// Failures surfaced by the growth models, root-finders and simulator.
///
/// None of these are recovered locally: every computation is a single-shot
/// scalar evaluation, so the caller decides whether to retry (for example
/// with a different initial guess).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    /// An economic parameter or simulation setting is out of its domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A trajectory value left the positive half-line while the update rule
    /// raises capital to a fractional power.
    #[error("state left the domain at period {period} (k = {value}); a positive value is required")]
    Domain { period: usize, value: f64 },

    /// The root-finder did not meet its tolerance within the iteration budget,
    /// produced a non-finite iterate, or landed on a non-physical root.
    #[error("root-finder failed to converge after {iterations} iterations (|f(x)| = {residual})")]
    Convergence { iterations: usize, residual: f64 },

    /// The scalar minimiser was handed an unusable bracket.
    #[error("minimization failed: {reason}")]
    Minimization { reason: &'static str },
}

impl GrowthError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;

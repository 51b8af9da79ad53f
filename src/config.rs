//! Solver configuration.
//!
//! ```rust
//! use hungarian_matching::{NegativeWeights, SolverConfig};
//!
//! let config = SolverConfig {
//!     negative_weights: NegativeWeights::Shift,
//!     ..Default::default()
//! };
//! assert_eq!(config.max_dual_adjustments, None);
//! ```

/// How the solver treats cost matrices with negative entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeWeights {
    /// Fail with `InputShapeError::NegativeWeight` at the first negative
    /// entry in row-major order.
    #[default]
    Reject,
    /// Subtract the global minimum from every entry before reducing. Every
    /// assignment's cost moves by the same amount, so the optimum is kept.
    Shift,
}

/// Options for [`HungarianSolver`](crate::HungarianSolver).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub negative_weights: NegativeWeights,
    /// Upper bound on dual adjustments for one solve. Exceeding it fails
    /// with `Error::DualAdjustmentLimit`. `None` leaves the solve unbounded.
    pub max_dual_adjustments: Option<usize>,
}

impl SolverConfig {
    pub fn with_negative_weights(mut self, negative_weights: NegativeWeights) -> Self {
        self.negative_weights = negative_weights;
        self
    }

    pub fn with_max_dual_adjustments(mut self, limit: usize) -> Self {
        self.max_dual_adjustments = Some(limit);
        self
    }
}

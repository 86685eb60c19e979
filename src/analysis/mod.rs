//! Analysis options, Newton-Raphson solver and load control

mod load_control;
mod newton_raphson;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

pub use load_control::LoadControl;
pub use newton_raphson::{NewtonRaphson, SolveOutcome};

/// Norm used for the residual convergence check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormType {
    /// Euclidean norm
    #[default]
    L2,
    /// Largest absolute entry
    Inf,
}

impl FromStr for NormType {
    type Err = FrameError;

    fn from_str(s: &str) -> FrameResult<Self> {
        match s {
            "L2" | "l2" => Ok(Self::L2),
            "inf" | "Inf" | "INF" => Ok(Self::Inf),
            other => Err(FrameError::UnknownNorm(other.to_string())),
        }
    }
}

/// Options for the Newton-Raphson solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Convergence tolerance on the free-DOF residual norm
    pub tolerance: f64,
    /// Maximum iterations per solve
    pub max_iterations: usize,
    /// Residual norm
    pub norm: NormType,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 20,
            norm: NormType::L2,
        }
    }
}

impl SolverOptions {
    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set residual norm
    pub fn with_norm(mut self, norm: NormType) -> Self {
        self.norm = norm;
        self
    }

    /// Reject non-positive tolerance or a zero iteration cap
    pub fn validate(&self) -> FrameResult<()> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(FrameError::InvalidInput(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FrameError::InvalidInput(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//! Error types for the nonlinear frame solver

use thiserror::Error;

/// Main error type for frame analysis operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Duplicate node id {0}")]
    DuplicateNode(usize),

    #[error("Duplicate element id {0}")]
    DuplicateElement(usize),

    #[error("Length mismatch for {what}: expected {expected}, got {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported norm type '{0}'")]
    UnknownNorm(String),

    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    #[error("Singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Newton-Raphson did not converge after {0} iterations")]
    ConvergenceFailed(usize),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FrameError {
    /// Input or contract violation raised at the offending call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound(_)
                | Self::DuplicateNode(_)
                | Self::DuplicateElement(_)
                | Self::DimensionMismatch { .. }
                | Self::InvalidGeometry(_)
                | Self::InvalidInput(_)
                | Self::UnknownNorm(_)
        )
    }

    /// NaN/Inf residual or a failed linear solve
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::NumericalInstability(_) | Self::SingularMatrix)
    }

    /// Iteration cap reached without meeting the tolerance
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::ConvergenceFailed(_))
    }
}

/// Result type for frame analysis operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Check that a user supplied vector has the expected length
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> FrameResult<()> {
    if expected != found {
        return Err(FrameError::DimensionMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

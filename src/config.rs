//! Problem dimension and DOFs-per-node configuration

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Spatial dimension and number of DOFs per node for one analysis.
///
/// Passed explicitly to every constructor that needs it so independent
/// analyses never share configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of spatial coordinates per node
    pub dimension: usize,
    /// Degrees of freedom per node (UX, UY, RZ for a plane frame)
    pub ndof: usize,
}

impl ModelConfig {
    /// Create a configuration, rejecting zero dimension or DOF count
    pub fn new(dimension: usize, ndof: usize) -> FrameResult<Self> {
        if dimension == 0 || ndof == 0 {
            return Err(FrameError::InvalidInput(format!(
                "dimension ({dimension}) and ndof ({ndof}) must be positive"
            )));
        }
        Ok(Self { dimension, ndof })
    }

    /// Plane frame: 2 coordinates, 3 DOFs per node
    pub fn plane_frame() -> Self {
        Self {
            dimension: 2,
            ndof: 3,
        }
    }

    /// Whether 2-node frame elements can be built under this configuration
    pub fn is_plane_frame(&self) -> bool {
        self.dimension == 2 && self.ndof == 3
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::plane_frame()
    }
}

//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::error::FrameResult;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub ux: f64,
    /// Displacement in Y direction
    pub uy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [UX, UY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            ux: arr[0],
            uy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.ux.hypot(self.uy)
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// Element end forces of the current trial state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementForces {
    /// Element id
    pub element: usize,
    /// Axial basic force (positive in tension)
    pub axial: f64,
    /// End moment at node i
    pub moment_i: f64,
    /// End moment at node j
    pub moment_j: f64,
    /// Shear from end moments, (M_i + M_j) / L
    pub shear: f64,
    /// Local end forces [N_i, V_i, M_i, N_j, V_j, M_j]
    pub local: [f64; 6],
}

/// Model counts, logged when the model is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub num_nodes: usize,
    pub num_elements: usize,
    pub system_ndof: usize,
    pub num_free: usize,
    pub num_restrained: usize,
}

/// Per-step record of an incremental analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadHistory {
    /// Pseudo-time of every converged step, starting at t = 0
    pub time: Vec<f64>,
    /// Committed global displacement after every converged step
    pub displacements: Vec<Vec<f64>>,
    /// Residual-norm history of every converged step
    pub residuals: Vec<Vec<f64>>,
    /// Newton iterations used by every converged step
    pub iterations: Vec<usize>,
    /// Message of the step that stopped the analysis, if any
    pub failure: Option<String>,
}

impl LoadHistory {
    /// Number of converged steps, the t = 0 step included
    pub fn converged_steps(&self) -> usize {
        self.iterations.len()
    }

    pub fn completed(&self) -> bool {
        self.failure.is_none()
    }

    /// Displacement history of one global DOF
    pub fn dof_history(&self, dof: usize) -> Vec<f64> {
        self.displacements
            .iter()
            .map(|u| u.get(dof).copied().unwrap_or(0.0))
            .collect()
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! Nodal loads - force/moment patterns applied directly to nodes

use serde::{Deserialize, Serialize};

use crate::error::{check_len, FrameResult};
use crate::math::Vec as FEVec;

/// A load pattern applied to a node.
///
/// The stored vector is a pattern, not an absolute force: the force
/// applied at pseudo-time `t` is `pattern * time_series.factor(t)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Id of the loaded node
    node: usize,
    /// One component per DOF, e.g. [FX, FY, MZ]
    pattern: FEVec,
}

impl NodalLoad {
    /// Create a new nodal load; the pattern length must equal the node's DOF count
    pub fn new(node: usize, pattern: &[f64], ndof: usize) -> FrameResult<Self> {
        check_len("load pattern", ndof, pattern.len())?;
        Ok(Self {
            node,
            pattern: FEVec::from_column_slice(pattern),
        })
    }

    pub fn node(&self) -> usize {
        self.node
    }

    pub fn pattern(&self) -> &FEVec {
        &self.pattern
    }

    /// Force vector at the given time-series factor
    pub fn scaled(&self, factor: f64) -> FEVec {
        &self.pattern * factor
    }
}

//! Node - owns the per-DOF displacement and force state at a point

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::elements::{Restraint, Restraints};
use crate::error::{check_len, FrameError, FrameResult};
use crate::loads::NodalLoad;
use crate::math::Vec as FEVec;

/// A node of the frame model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 1-based identifier
    id: usize,
    coords: Vec<f64>,
    ndof: usize,
    /// Global DOF indices, `(id - 1) * ndof + k`
    idx: Vec<usize>,

    u_trial: FEVec,
    u_committed: FEVec,
    f_int: FEVec,
    f_ext: FEVec,

    restraints: Restraints,
    loads: Vec<NodalLoad>,
}

impl Node {
    /// Create a new free node
    ///
    /// # Arguments
    /// * `id` - Positive identifier; ids must be dense and start at 1
    /// * `coords` - One coordinate per spatial dimension
    /// * `config` - Dimension and DOFs per node
    pub fn new(id: usize, coords: &[f64], config: &ModelConfig) -> FrameResult<Self> {
        if id == 0 {
            return Err(FrameError::InvalidInput(
                "node ids are 1-based, got 0".to_string(),
            ));
        }
        check_len("node coordinates", config.dimension, coords.len())?;

        let ndof = config.ndof;
        Ok(Self {
            id,
            coords: coords.to_vec(),
            ndof,
            idx: (0..ndof).map(|k| (id - 1) * ndof + k).collect(),
            u_trial: FEVec::zeros(ndof),
            u_committed: FEVec::zeros(ndof),
            f_int: FEVec::zeros(ndof),
            f_ext: FEVec::zeros(ndof),
            restraints: Restraints::free(ndof),
            loads: Vec::new(),
        })
    }

    /// Builder form of [`Node::set_restraints`]
    pub fn with_restraints(mut self, flags: &[Restraint]) -> FrameResult<Self> {
        self.set_restraints(flags)?;
        Ok(self)
    }

    /// Builder form of [`Node::add_load`]
    pub fn with_load(mut self, pattern: &[f64]) -> FrameResult<Self> {
        self.add_load(pattern)?;
        Ok(self)
    }

    /// Replace the restraint flags
    pub fn set_restraints(&mut self, flags: &[Restraint]) -> FrameResult<()> {
        self.restraints.set_flags(flags)
    }

    /// Replace the full restraint set (flags and prescribed displacements)
    pub fn set_restraint_set(&mut self, restraints: Restraints) -> FrameResult<()> {
        check_len("restraint flags", self.ndof, restraints.flags().len())?;
        self.restraints = restraints;
        Ok(())
    }

    /// Append a load pattern; the applied force is pattern x time-series factor
    pub fn add_load(&mut self, pattern: &[f64]) -> FrameResult<()> {
        self.loads.push(NodalLoad::new(self.id, pattern, self.ndof)?);
        Ok(())
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn ndof(&self) -> usize {
        self.ndof
    }

    /// Dimension and DOF count this node was built with
    pub fn config(&self) -> ModelConfig {
        ModelConfig {
            dimension: self.coords.len(),
            ndof: self.ndof,
        }
    }

    pub fn idx(&self) -> &[usize] {
        &self.idx
    }

    pub fn restraints(&self) -> &Restraints {
        &self.restraints
    }

    pub fn loads(&self) -> &[NodalLoad] {
        &self.loads
    }

    pub fn trial_displacement(&self) -> &FEVec {
        &self.u_trial
    }

    pub fn committed_displacement(&self) -> &FEVec {
        &self.u_committed
    }

    pub fn internal_force(&self) -> &FEVec {
        &self.f_int
    }

    pub fn external_force(&self) -> &FEVec {
        &self.f_ext
    }

    /// Sum of all load patterns scaled by `factor`
    pub fn load_at(&self, factor: f64) -> FEVec {
        self.loads
            .iter()
            .fold(FEVec::zeros(self.ndof), |acc, load| acc + load.scaled(factor))
    }

    /// Copy this node's entries of a global displacement vector into the trial state
    pub fn set_trial_from_global(&mut self, u: &FEVec) {
        for (k, &i) in self.idx.iter().enumerate() {
            self.u_trial[k] = u[i];
        }
    }

    /// Set the trial displacement directly
    pub fn set_trial_displacement(&mut self, u: &[f64]) -> FrameResult<()> {
        check_len("trial displacement", self.ndof, u.len())?;
        self.u_trial.copy_from_slice(u);
        Ok(())
    }

    pub(crate) fn set_forces(&mut self, f_ext: &FEVec, f_int: &FEVec) {
        for (k, &i) in self.idx.iter().enumerate() {
            self.f_ext[k] = f_ext[i];
            self.f_int[k] = f_int[i];
        }
    }

    pub fn commit_state(&mut self) {
        self.u_committed.copy_from(&self.u_trial);
    }

    pub fn reset_trial(&mut self) {
        self.u_trial.copy_from(&self.u_committed);
    }

    pub fn revert_to_start(&mut self) {
        self.u_trial.fill(0.0);
        self.u_committed.fill(0.0);
        self.f_int.fill(0.0);
        self.f_ext.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: usize) -> Node {
        Node::new(id, &[1.0, 2.0], &ModelConfig::default()).unwrap()
    }

    #[test]
    fn test_dof_indices() {
        assert_eq!(node(1).idx(), &[0, 1, 2]);
        assert_eq!(node(4).idx(), &[9, 10, 11]);
    }

    #[test]
    fn test_invalid_construction() {
        let config = ModelConfig::default();
        assert!(Node::new(0, &[0.0, 0.0], &config).is_err());
        assert!(Node::new(1, &[0.0, 0.0, 0.0], &config).is_err());
    }

    #[test]
    fn test_restraint_length_must_match_ndof() {
        let mut n = node(1);
        assert!(n.set_restraints(&[Restraint::Restrained; 2]).is_err());
        assert!(n.set_restraints(&[Restraint::Restrained; 3]).is_ok());
        assert_eq!(n.restraints().num_restrained(), 3);
    }

    #[test]
    fn test_load_patterns_accumulate() {
        let n = node(2)
            .with_load(&[1.0, -2.0, 0.0])
            .unwrap()
            .with_load(&[0.0, -1.0, 0.5])
            .unwrap();
        assert!(node(2).with_load(&[1.0]).is_err());

        let f = n.load_at(0.5);
        assert_eq!(f.as_slice(), &[0.5, -1.5, 0.25]);
        let by_hand = n.loads().iter().fold(FEVec::zeros(3), |acc, l| acc + l.scaled(0.5));
        assert_eq!(f, by_hand);
    }

    #[test]
    fn test_commit_reset_revert() {
        let mut n = node(1);
        n.set_trial_displacement(&[0.1, 0.2, 0.3]).unwrap();
        n.commit_state();
        n.set_trial_displacement(&[9.0, 9.0, 9.0]).unwrap();
        n.reset_trial();
        assert_eq!(n.trial_displacement(), n.committed_displacement());
        assert_eq!(n.trial_displacement().as_slice(), &[0.1, 0.2, 0.3]);

        n.revert_to_start();
        n.revert_to_start();
        assert!(n.trial_displacement().iter().all(|&v| v == 0.0));
        assert!(n.committed_displacement().iter().all(|&v| v == 0.0));
    }
}

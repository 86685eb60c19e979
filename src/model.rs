//! Frame model - node/element container, assembly and state orchestration

use std::collections::{BTreeSet, HashMap, HashSet};

use log::{debug, info};

use crate::analysis::NormType;
use crate::config::ModelConfig;
use crate::elements::{FrameElement, Node, Restraint};
use crate::error::{check_len, FrameError, FrameResult};
use crate::loads::{LinearRamp, TimeSeries};
use crate::math::{self, Mat, Vec as FEVec, Vec6};
use crate::results::{ElementForces, ModelSummary, NodeDisplacement, Reactions};

/// The nonlinear plane frame model.
///
/// Nodes are stored once, sorted by id; elements refer to them by id and
/// by global DOF index. All state transitions go through the model so
/// nodes and elements never drift apart.
#[derive(Debug)]
pub struct Model {
    config: ModelConfig,
    nodes: Vec<Node>,
    /// Node id -> position in `nodes`
    lookup: HashMap<usize, usize>,
    elements: Vec<FrameElement>,
    time_series: Box<dyn TimeSeries>,
    system_ndof: usize,
    free: Vec<usize>,
    restrained: Vec<usize>,
}

impl Model {
    /// Build a model from its elements and the nodes they connect
    ///
    /// Only nodes referenced by at least one element are kept. Node ids
    /// must be dense (1..=n) so that the global DOF indices fill the system,
    /// and each node must sit where its elements saw it at construction.
    ///
    /// # Arguments
    /// * `nodes` - Candidate nodes, at most one per id
    /// * `elements` - Frame elements, at most one per id
    /// * `config` - Dimension and DOFs per node shared by all nodes
    pub fn new(
        nodes: Vec<Node>,
        elements: Vec<FrameElement>,
        config: ModelConfig,
    ) -> FrameResult<Self> {
        let mut element_ids = HashSet::new();
        for element in &elements {
            if !element_ids.insert(element.id()) {
                return Err(FrameError::DuplicateElement(element.id()));
            }
        }

        let mut by_id: HashMap<usize, Node> = HashMap::new();
        for node in nodes {
            check_len("node DOFs", config.ndof, node.ndof())?;
            let id = node.id();
            if by_id.insert(id, node).is_some() {
                return Err(FrameError::DuplicateNode(id));
            }
        }

        let referenced: BTreeSet<usize> = elements.iter().flat_map(|e| e.nodes()).collect();
        let mut kept = Vec::with_capacity(referenced.len());
        for id in &referenced {
            let node = by_id.remove(id).ok_or(FrameError::NodeNotFound(*id))?;
            kept.push(node);
        }
        if !by_id.is_empty() {
            debug!("Dropping {} node(s) not connected to any element", by_id.len());
        }

        let lookup: HashMap<usize, usize> =
            kept.iter().enumerate().map(|(pos, n)| (n.id(), pos)).collect();
        for element in &elements {
            for (node_id, xy) in element.nodes().iter().zip(element.coords()) {
                let node = &kept[lookup[node_id]];
                if node.coords() != xy.as_slice() {
                    return Err(FrameError::InvalidGeometry(format!(
                        "element {} was built with node {} at {:?}, model node is at {:?}",
                        element.id(),
                        node_id,
                        xy,
                        node.coords()
                    )));
                }
            }
        }

        let system_ndof = kept.len() * config.ndof;
        if let Some(node) = kept.iter().find(|n| n.idx().iter().any(|&i| i >= system_ndof)) {
            return Err(FrameError::InvalidInput(format!(
                "node ids must run from 1 to {} without gaps, found node {}",
                kept.len(),
                node.id()
            )));
        }

        let mut model = Self {
            config,
            nodes: kept,
            lookup,
            elements,
            time_series: Box::new(LinearRamp::default()),
            system_ndof,
            free: Vec::new(),
            restrained: Vec::new(),
        };
        model.sync_restraints();

        let summary = model.summary();
        info!(
            "Model assembled: {} nodes, {} elements, {} DOFs ({} free, {} restrained)",
            summary.num_nodes,
            summary.num_elements,
            summary.system_ndof,
            summary.num_free,
            summary.num_restrained
        );

        Ok(model)
    }

    /// Replace the load time series (default: linear ramp reaching 1 at t = 1)
    pub fn with_time_series(mut self, series: Box<dyn TimeSeries>) -> Self {
        self.time_series = series;
        self
    }

    pub fn set_time_series(&mut self, series: Box<dyn TimeSeries>) {
        self.time_series = series;
    }

    // ========================
    // Topology and Boundary Conditions
    // ========================

    /// Replace the restraint flags of a node and refresh the free/restrained partition
    pub fn set_restraints(&mut self, node_id: usize, flags: &[Restraint]) -> FrameResult<()> {
        let pos = self.position(node_id)?;
        self.nodes[pos].set_restraints(flags)?;
        self.sync_restraints();
        Ok(())
    }

    /// Append a load pattern to a node
    pub fn add_nodal_load(&mut self, node_id: usize, pattern: &[f64]) -> FrameResult<()> {
        let pos = self.position(node_id)?;
        self.nodes[pos].add_load(pattern)
    }

    /// Push node restraints into the elements and recompute the DOF partition
    fn sync_restraints(&mut self) {
        for node in &self.nodes {
            for element in self.elements.iter_mut() {
                element.set_restraints(node.id(), node.restraints().flags());
            }
        }

        let mut flags = vec![Restraint::Free; self.system_ndof];
        for node in &self.nodes {
            for (&i, &flag) in node.idx().iter().zip(node.restraints().flags()) {
                flags[i] = flag;
            }
        }

        self.free = (0..self.system_ndof)
            .filter(|&i| !flags[i].is_restrained())
            .collect();
        self.restrained = (0..self.system_ndof)
            .filter(|&i| flags[i].is_restrained())
            .collect();
    }

    fn position(&self, node_id: usize) -> FrameResult<usize> {
        self.lookup
            .get(&node_id)
            .copied()
            .ok_or(FrameError::NodeNotFound(node_id))
    }

    // ========================
    // Assembly
    // ========================

    /// Assemble the global tangent stiffness at the current trial state
    pub fn get_stiffness_matrix(&mut self) -> Mat {
        let u = self.trial_displacement();
        let mut k_global = Mat::zeros(self.system_ndof, self.system_ndof);

        for element in self.elements.iter_mut() {
            let idx = *element.idx();
            let k_element = element.global_stiffness(&gather(&u, &idx));

            for (a, &ia) in idx.iter().enumerate() {
                for (b, &ib) in idx.iter().enumerate() {
                    k_global[(ia, ib)] += k_element[(a, b)];
                }
            }
        }

        k_global
    }

    /// Assemble the internal (resisting) force vector at the current trial state
    pub fn get_resistance_force(&mut self) -> FEVec {
        let u = self.trial_displacement();
        let mut f_int = FEVec::zeros(self.system_ndof);

        for element in self.elements.iter_mut() {
            let idx = *element.idx();
            let fg = element.force_recovery(&gather(&u, &idx)).fg;

            for (a, &ia) in idx.iter().enumerate() {
                f_int[ia] += fg[a];
            }
        }

        f_int
    }

    /// External force vector: every nodal load pattern scaled by the time series at `t`
    pub fn get_external_force(&self, t: f64) -> FEVec {
        let factor = self.time_series.factor(t);
        let mut f_ext = FEVec::zeros(self.system_ndof);

        for node in &self.nodes {
            let load = node.load_at(factor);
            for (k, &i) in node.idx().iter().enumerate() {
                f_ext[i] += load[k];
            }
        }

        f_ext
    }

    /// Residual `f_ext(t) - f_int` over all DOFs; also stored on the nodes
    pub fn calculate_residual(&mut self, t: f64) -> FEVec {
        let f_ext = self.get_external_force(t);
        let f_int = self.get_resistance_force();

        for node in self.nodes.iter_mut() {
            node.set_forces(&f_ext, &f_int);
        }

        f_ext - f_int
    }

    /// Residual norm over the free DOFs only
    pub fn residual_norm(&mut self, t: f64, norm: NormType) -> f64 {
        let residual = self.calculate_residual(t);
        self.free_norm(&residual, norm)
    }

    /// Norm of the free-DOF entries of a global vector
    pub fn free_norm(&self, v: &FEVec, norm: NormType) -> f64 {
        let free = math::subvector(v, &self.free);
        match norm {
            NormType::L2 => free.norm(),
            NormType::Inf => free.amax(),
        }
    }

    // ========================
    // State Transitions
    // ========================

    /// Scatter a global displacement vector into the nodes' trial state
    pub fn update_trial_state(&mut self, u: &FEVec) -> FrameResult<()> {
        check_len("global displacement", self.system_ndof, u.len())?;
        for node in self.nodes.iter_mut() {
            node.set_trial_from_global(u);
        }
        Ok(())
    }

    pub fn trial_displacement(&self) -> FEVec {
        self.assemble_nodal(Node::trial_displacement)
    }

    pub fn committed_displacement(&self) -> FEVec {
        self.assemble_nodal(Node::committed_displacement)
    }

    fn assemble_nodal(&self, field: impl Fn(&Node) -> &FEVec) -> FEVec {
        let mut u = FEVec::zeros(self.system_ndof);
        for node in &self.nodes {
            let values = field(node);
            for (k, &i) in node.idx().iter().enumerate() {
                u[i] = values[k];
            }
        }
        u
    }

    pub fn commit_state(&mut self) {
        self.nodes.iter_mut().for_each(Node::commit_state);
        self.elements.iter_mut().for_each(FrameElement::commit_state);
    }

    pub fn reset_trial(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset_trial);
        self.elements.iter_mut().for_each(FrameElement::reset_trial);
    }

    pub fn revert_to_start(&mut self) {
        self.nodes.iter_mut().for_each(Node::revert_to_start);
        self.elements
            .iter_mut()
            .for_each(FrameElement::revert_to_start);
    }

    // ========================
    // Accessors and Results
    // ========================

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn system_ndof(&self) -> usize {
        self.system_ndof
    }

    pub fn free_indices(&self) -> &[usize] {
        &self.free
    }

    pub fn restrained_indices(&self) -> &[usize] {
        &self.restrained
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[FrameElement] {
        &self.elements
    }

    pub fn node(&self, id: usize) -> FrameResult<&Node> {
        Ok(&self.nodes[self.position(id)?])
    }

    /// Load factor applied at pseudo-time `t`
    pub fn load_factor(&self, t: f64) -> f64 {
        self.time_series.factor(t)
    }

    /// Committed displacement of a node
    pub fn node_displacement(&self, id: usize) -> FrameResult<NodeDisplacement> {
        let u = self.node(id)?.committed_displacement();
        Ok(NodeDisplacement::from_array([u[0], u[1], u[2]]))
    }

    /// Reaction at a node (internal minus external force) as of the last residual evaluation
    pub fn node_reactions(&self, id: usize) -> FrameResult<Reactions> {
        let node = self.node(id)?;
        let r = node.internal_force() - node.external_force();
        Ok(Reactions::from_array([r[0], r[1], r[2]]))
    }

    /// End forces of every element at the current trial state
    pub fn element_forces(&self) -> Vec<ElementForces> {
        self.elements
            .iter()
            .map(|element| {
                let fb = element.basic_force();
                let fl = element.local_force();
                let length = element.transformation().length();
                ElementForces {
                    element: element.id(),
                    axial: fb[0],
                    moment_i: fb[1],
                    moment_j: fb[2],
                    shear: (fb[1] + fb[2]) / length,
                    local: [fl[0], fl[1], fl[2], fl[3], fl[4], fl[5]],
                }
            })
            .collect()
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.len(),
            system_ndof: self.system_ndof,
            num_free: self.free.len(),
            num_restrained: self.restrained.len(),
        }
    }
}

/// Element end displacements picked out of a global vector
fn gather(u: &FEVec, idx: &[usize; 6]) -> Vec6 {
    Vec6::from_fn(|k, _| u[idx[k]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Restraints, Section, TransformationKind};
    use approx::assert_relative_eq;

    fn cantilever() -> Model {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config)
            .unwrap()
            .with_restraints(Restraints::fixed(3).flags())
            .unwrap();
        let n2 = Node::new(2, &[120.0, 0.0], &config)
            .unwrap()
            .with_load(&[0.0, -10.0, 0.0])
            .unwrap();
        let section = Section::new(Material::linear_elastic(29_000.0), 10.0, 100.0).unwrap();
        let element =
            FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear).unwrap();
        Model::new(vec![n1, n2], vec![element], config).unwrap()
    }

    #[test]
    fn test_partition() {
        let model = cantilever();
        assert_eq!(model.system_ndof(), 6);
        assert_eq!(model.restrained_indices(), &[0, 1, 2]);
        assert_eq!(model.free_indices(), &[3, 4, 5]);
    }

    #[test]
    fn test_set_restraints_updates_partition() {
        let mut model = cantilever();
        model
            .set_restraints(2, &[Restraint::Free, Restraint::Restrained, Restraint::Free])
            .unwrap();
        assert_eq!(model.free_indices(), &[3, 5]);
        assert_eq!(model.elements()[0].restraints()[4], Restraint::Restrained);
        assert!(model.set_restraints(9, &[Restraint::Free; 3]).is_err());
    }

    #[test]
    fn test_stiffness_symmetric() {
        let mut model = cantilever();
        let k = model.get_stiffness_matrix();
        assert_relative_eq!(k, k.transpose(), epsilon = 1e-9);
    }

    #[test]
    fn test_external_force_follows_ramp() {
        let model = cantilever();
        let f = model.get_external_force(0.25);
        assert_relative_eq!(f[4], -2.5);
        let f = model.get_external_force(2.0);
        assert_relative_eq!(f[4], -10.0);
    }

    #[test]
    fn test_residual_norm_ignores_restrained_dofs() {
        let mut model = cantilever();
        let mut r = model.calculate_residual(1.0);
        let before = model.free_norm(&r, NormType::L2);
        r[0] = 1e9;
        r[2] = -1e9;
        assert_relative_eq!(model.free_norm(&r, NormType::L2), before);
        assert_relative_eq!(model.free_norm(&r, NormType::Inf), 10.0);
    }

    #[test]
    fn test_duplicate_and_missing_nodes() {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let n2 = Node::new(2, &[1.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let e = FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear).unwrap();

        let result = Model::new(vec![n1.clone(), n1.clone(), n2.clone()], vec![], config);
        assert!(matches!(result, Err(FrameError::DuplicateNode(1))));

        let result = Model::new(vec![n1], vec![e], config);
        assert!(matches!(result, Err(FrameError::NodeNotFound(2))));
    }

    #[test]
    fn test_duplicate_elements() {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let n2 = Node::new(2, &[1.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let e1 = FrameElement::new(7, &n1, &n2, section.clone(), TransformationKind::Linear)
            .unwrap();
        let e2 = FrameElement::new(7, &n2, &n1, section, TransformationKind::Linear).unwrap();

        let result = Model::new(vec![n1, n2], vec![e1, e2], config);
        assert!(matches!(result, Err(FrameError::DuplicateElement(7))));
    }

    #[test]
    fn test_moved_node_rejected() {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let n2 = Node::new(2, &[1.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let e = FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear).unwrap();

        let moved = Node::new(2, &[2.0, 0.0], &config).unwrap();
        let result = Model::new(vec![n1, moved], vec![e], config);
        assert!(matches!(result, Err(FrameError::InvalidGeometry(_))));
    }

    #[test]
    fn test_unreferenced_nodes_dropped() {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let n2 = Node::new(2, &[1.0, 0.0], &config).unwrap();
        let n3 = Node::new(3, &[5.0, 5.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let e = FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear).unwrap();

        let model = Model::new(vec![n3, n2, n1], vec![e], config).unwrap();
        assert_eq!(model.summary().num_nodes, 2);
        assert_eq!(model.nodes()[0].id(), 1);
        assert!(model.node(3).is_err());
    }

    #[test]
    fn test_sparse_node_ids_rejected() {
        let config = ModelConfig::plane_frame();
        let n1 = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let n5 = Node::new(5, &[1.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let e = FrameElement::new(1, &n1, &n5, section, TransformationKind::Linear).unwrap();
        assert!(Model::new(vec![n1, n5], vec![e], config).is_err());
    }

    #[test]
    fn test_commit_reset_round_trip() {
        let mut model = cantilever();
        let mut u = FEVec::zeros(6);
        u[4] = -0.5;
        model.update_trial_state(&u).unwrap();
        model.commit_state();

        u[4] = -3.0;
        model.update_trial_state(&u).unwrap();
        model.reset_trial();
        assert_eq!(model.trial_displacement(), model.committed_displacement());
        assert_relative_eq!(model.node_displacement(2).unwrap().uy, -0.5);

        model.revert_to_start();
        model.revert_to_start();
        assert!(model.committed_displacement().iter().all(|&v| v == 0.0));
        assert!(model.trial_displacement().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_update_trial_length_checked() {
        let mut model = cantilever();
        assert!(model.update_trial_state(&FEVec::zeros(4)).is_err());
    }
}

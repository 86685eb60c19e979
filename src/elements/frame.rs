//! Frame element - 2-node plane beam-column with pluggable kinematics

use crate::elements::section::Section;
use crate::elements::transformation::{Transformation, TransformationKind};
use crate::elements::{Node, Restraint};
use crate::error::{FrameError, FrameResult};
use crate::math::{basic_frame_stiffness, Mat3, Mat6, Vec3, Vec6};

/// Intermediate quantities of one force recovery
#[derive(Debug, Clone, PartialEq)]
pub struct ForceRecovery {
    /// Basic forces [N, M_i, M_j]
    pub fb: Vec3,
    /// Local end forces
    pub fl: Vec6,
    /// Global end forces, the element's resistance contribution
    pub fg: Vec6,
    pub u_basic: Vec3,
    pub u_local: Vec6,
    pub u_global: Vec6,
}

/// A 2-node frame element with 3 DOFs per node (ux, uy, rz)
#[derive(Debug)]
pub struct FrameElement {
    id: usize,
    /// Node ids [i, j]
    nodes: [usize; 2],
    /// End coordinates captured at construction
    coords: [[f64; 2]; 2],
    /// Global DOF indices of node i followed by node j
    idx: [usize; 6],
    restraints: [Restraint; 6],
    section: Section,
    transformation: Box<dyn Transformation>,
}

impl FrameElement {
    /// Create a new frame element
    ///
    /// # Arguments
    /// * `id` - Element identifier
    /// * `node_i` - Start node
    /// * `node_j` - End node
    /// * `section` - Section (material + A, I)
    /// * `kind` - Kinematic formulation
    pub fn new(
        id: usize,
        node_i: &Node,
        node_j: &Node,
        section: Section,
        kind: TransformationKind,
    ) -> FrameResult<Self> {
        for node in [node_i, node_j] {
            if !node.config().is_plane_frame() {
                return Err(FrameError::InvalidInput(format!(
                    "frame element {id} needs plane frame nodes, node {} has {} coordinates and {} DOFs",
                    node.id(),
                    node.coords().len(),
                    node.ndof()
                )));
            }
        }
        if node_i.id() == node_j.id() {
            return Err(FrameError::InvalidGeometry(format!(
                "frame element {id} connects node {} to itself",
                node_i.id()
            )));
        }

        let transformation = kind.build(node_i.coords(), node_j.coords())?;

        let mut idx = [0; 6];
        let mut restraints = [Restraint::Free; 6];
        for (k, node) in [node_i, node_j].iter().enumerate() {
            for d in 0..3 {
                idx[3 * k + d] = node.idx()[d];
                restraints[3 * k + d] = node.restraints().flags()[d];
            }
        }

        Ok(Self {
            id,
            nodes: [node_i.id(), node_j.id()],
            coords: [
                [node_i.coords()[0], node_i.coords()[1]],
                [node_j.coords()[0], node_j.coords()[1]],
            ],
            idx,
            restraints,
            section,
            transformation,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn nodes(&self) -> [usize; 2] {
        self.nodes
    }

    pub fn coords(&self) -> &[[f64; 2]; 2] {
        &self.coords
    }

    pub fn idx(&self) -> &[usize; 6] {
        &self.idx
    }

    /// Restraint flags captured from the end nodes at construction
    pub fn restraints(&self) -> &[Restraint; 6] {
        &self.restraints
    }

    pub(crate) fn set_restraints(&mut self, node_id: usize, flags: &[Restraint]) {
        for (k, &n) in self.nodes.iter().enumerate() {
            if n == node_id {
                self.restraints[3 * k..3 * k + 3].copy_from_slice(&flags[..3]);
            }
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn transformation(&self) -> &dyn Transformation {
        self.transformation.as_ref()
    }

    /// Basic stiffness from the section's current EA, EI and the transformation length
    pub fn basic_stiffness(&self) -> Mat3 {
        let (ea, ei) = self.section.stiffness();
        basic_frame_stiffness(ea, ei, self.transformation.length())
    }

    /// Refresh the trial state from the element's global end displacements
    /// and push the basic forces back to global axes.
    pub fn force_recovery(&mut self, u_global: &Vec6) -> ForceRecovery {
        self.transformation.update_trial(u_global);
        let u_basic = self.transformation.basic_trial_disp();
        self.section
            .set_trial_strain(u_basic[0] / self.transformation.l0());

        let tlg = self.transformation.tlg();
        let tbl = self.transformation.tbl();
        let u_local = tlg * u_global;

        let fb = self.basic_stiffness() * u_basic;
        let fl = tbl.transpose() * fb;
        let fg = tlg.transpose() * fl;

        ForceRecovery {
            fb,
            fl,
            fg,
            u_basic,
            u_local,
            u_global: *u_global,
        }
    }

    /// Tangent stiffness in local axes: material part plus geometric part
    pub fn local_stiffness(&mut self, u_global: &Vec6) -> Mat6 {
        let fb = self.force_recovery(u_global).fb;

        let tbl = self.transformation.tbl();
        let kl_material = tbl.transpose() * self.basic_stiffness() * tbl;

        let (geo_axial, geo_moment) = self.transformation.geometric_matrices();
        let kl_geometric = geo_axial * fb[0] + geo_moment * (fb[1] + fb[2]);

        kl_material + kl_geometric
    }

    /// Tangent stiffness in global axes, ready for assembly
    pub fn global_stiffness(&mut self, u_global: &Vec6) -> Mat6 {
        let tlg = self.transformation.tlg();
        tlg.transpose() * self.local_stiffness(u_global) * tlg
    }

    /// Basic forces of the current trial state, without updating it
    pub fn basic_force(&self) -> Vec3 {
        self.basic_stiffness() * self.transformation.basic_trial_disp()
    }

    /// Local end forces of the current trial state
    pub fn local_force(&self) -> Vec6 {
        self.transformation.tbl().transpose() * self.basic_force()
    }

    pub fn commit_state(&mut self) {
        self.transformation.commit_state();
        self.section.commit_state();
    }

    pub fn reset_trial(&mut self) {
        self.transformation.reset_trial();
        self.section.reset_trial();
    }

    pub fn revert_to_start(&mut self) {
        self.transformation.revert_to_start();
        self.section.revert_to_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::elements::Material;
    use approx::assert_relative_eq;

    fn element(kind: TransformationKind, xj: [f64; 2]) -> FrameElement {
        let config = ModelConfig::plane_frame();
        let ni = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let nj = Node::new(2, &xj, &config).unwrap();
        let section = Section::new(Material::linear_elastic(29_000.0), 10.0, 100.0).unwrap();
        FrameElement::new(1, &ni, &nj, section, kind).unwrap()
    }

    #[test]
    fn test_dof_indices_concatenated() {
        let e = element(TransformationKind::Linear, [120.0, 0.0]);
        assert_eq!(e.idx(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(e.nodes(), [1, 2]);
        assert_eq!(e.coords(), &[[0.0, 0.0], [120.0, 0.0]]);
    }

    #[test]
    fn test_linear_stiffness_matches_classic_beam() {
        let mut e = element(TransformationKind::Linear, [120.0, 0.0]);
        let k = e.global_stiffness(&Vec6::zeros());

        let (ei, l) = (29_000.0 * 100.0, 120.0);
        assert_relative_eq!(k[(0, 0)], 29_000.0 * 10.0 / l, epsilon = 1e-9);
        assert_relative_eq!(k[(1, 1)], 12.0 * ei / l.powi(3), epsilon = 1e-9);
        assert_relative_eq!(k[(1, 2)], 6.0 * ei / l.powi(2), epsilon = 1e-9);
        assert_relative_eq!(k[(2, 2)], 4.0 * ei / l, epsilon = 1e-6);
        assert_relative_eq!(k, k.transpose(), epsilon = 1e-9);
    }

    #[test]
    fn test_inclined_stiffness_symmetric() {
        for kind in [
            TransformationKind::Linear,
            TransformationKind::Corotational,
            TransformationKind::PDelta,
        ] {
            let mut e = element(kind, [30.0, 40.0]);
            let k = e.global_stiffness(&Vec6::zeros());
            assert_relative_eq!(k, k.transpose(), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_force_recovery_equilibrium() {
        let mut e = element(TransformationKind::Corotational, [120.0, 0.0]);
        let u = Vec6::new(0.0, 0.0, 0.0, 0.01, 1.5, -0.02);
        let rec = e.force_recovery(&u);

        // Sum of global forces vanishes
        assert_relative_eq!(rec.fg[0] + rec.fg[3], 0.0, epsilon = 1e-8);
        assert_relative_eq!(rec.fg[1] + rec.fg[4], 0.0, epsilon = 1e-8);
        assert_eq!(rec.u_global, u);
        assert_relative_eq!(e.basic_force(), rec.fb, epsilon = 1e-12);
    }

    #[test]
    fn test_state_forwarded_to_section() {
        let config = ModelConfig::plane_frame();
        let ni = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let nj = Node::new(2, &[1.0, 0.0], &config).unwrap();
        let section = Section::new(Material::elasto_plastic(100.0, 1.0).unwrap(), 1.0, 1.0).unwrap();
        let mut e = FrameElement::new(1, &ni, &nj, section, TransformationKind::Linear).unwrap();

        e.force_recovery(&Vec6::new(0.0, 0.0, 0.0, 0.05, 0.0, 0.0));
        assert_relative_eq!(e.section().stiffness().0, 0.0);

        e.reset_trial();
        assert_relative_eq!(e.section().stiffness().0, 100.0);

        e.revert_to_start();
        assert_relative_eq!(e.transformation().basic_trial_disp(), Vec3::zeros());
    }

    #[test]
    fn test_rejects_same_node() {
        let config = ModelConfig::plane_frame();
        let n = Node::new(1, &[0.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        assert!(FrameElement::new(1, &n, &n, section, TransformationKind::Linear).is_err());
    }

    #[test]
    fn test_rejects_space_frame_nodes() {
        let config = ModelConfig::new(3, 6).unwrap();
        let ni = Node::new(1, &[0.0, 0.0, 0.0], &config).unwrap();
        let nj = Node::new(2, &[1.0, 0.0, 0.0], &config).unwrap();
        let section = Section::new(Material::linear_elastic(1.0), 1.0, 1.0).unwrap();
        let result = FrameElement::new(1, &ni, &nj, section, TransformationKind::Linear);
        assert!(matches!(result, Err(FrameError::InvalidInput(_))));
    }
}

//! Small-displacement transformation

use super::{BasicState, Geometry, Transformation, TransformationKind};
use crate::math::{Mat3x6, Mat6, Vec6};

/// First-order kinematics on the undeformed axis
#[derive(Debug, Clone)]
pub struct Linear {
    geometry: Geometry,
    basic: BasicState,
}

impl Linear {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            basic: BasicState::default(),
        }
    }
}

impl Transformation for Linear {
    fn kind(&self) -> TransformationKind {
        TransformationKind::Linear
    }

    fn length(&self) -> f64 {
        self.geometry.l0
    }

    fn tbl(&self) -> Mat3x6 {
        let l = self.geometry.l0;

        #[rustfmt::skip]
        let data = [
            -1.0, 0.0,     0.0, 1.0, 0.0,      0.0,
             0.0, 1.0 / l, 1.0, 0.0, -1.0 / l, 0.0,
             0.0, 1.0 / l, 0.0, 0.0, -1.0 / l, 1.0,
        ];

        Mat3x6::from_row_slice(&data)
    }

    fn geometric_matrices(&self) -> (Mat6, Mat6) {
        (Mat6::zeros(), Mat6::zeros())
    }

    fn update_trial(&mut self, u_global: &Vec6) {
        let ub = self.tbl() * (self.tlg() * u_global);
        self.basic.update(ub);
    }

    fn commit_state(&mut self) {
        self.basic.commit();
    }

    fn reset_trial(&mut self) {
        self.basic.reset();
    }

    fn revert_to_start(&mut self) {
        self.basic.revert();
    }

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn basic(&self) -> &BasicState {
        &self.basic
    }
}

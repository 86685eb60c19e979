//! P-Delta transformation (consistent variant)

use super::{BasicState, Chord, Geometry, Transformation, TransformationKind};
use crate::math::{Mat3x6, Mat6, Vec6};

/// Second-order transformation: corotational deformation measures with a
/// `Tbl` linearized about the undeformed length and only an axial-force
/// geometric term.
#[derive(Debug, Clone)]
pub struct PDelta {
    geometry: Geometry,
    basic: BasicState,
    trial_chord: Chord,
    committed_chord: Chord,
}

impl PDelta {
    pub fn new(geometry: Geometry) -> Self {
        let chord = Chord::undeformed(geometry.l0);
        Self {
            geometry,
            basic: BasicState::default(),
            trial_chord: chord,
            committed_chord: chord,
        }
    }
}

impl Transformation for PDelta {
    fn kind(&self) -> TransformationKind {
        TransformationKind::PDelta
    }

    fn length(&self) -> f64 {
        self.trial_chord.length
    }

    fn tbl(&self) -> Mat3x6 {
        let l0 = self.geometry.l0;
        let d = self.trial_chord.dy / l0;
        let d2 = self.trial_chord.dy / (l0 * l0);

        #[rustfmt::skip]
        let data = [
            -1.0, -d,       0.0, 1.0, d,         0.0,
            -d2,  1.0 / l0, 1.0, d2,  -1.0 / l0, 0.0,
            -d2,  1.0 / l0, 0.0, d2,  -1.0 / l0, 1.0,
        ];

        Mat3x6::from_row_slice(&data)
    }

    fn geometric_matrices(&self) -> (Mat6, Mat6) {
        let l = self.trial_chord.length;

        let mut axial = Mat6::zeros();
        axial[(1, 1)] = 1.0;
        axial[(1, 4)] = -1.0;
        axial[(4, 1)] = -1.0;
        axial[(4, 4)] = 1.0;

        (axial / l, Mat6::zeros())
    }

    fn update_trial(&mut self, u_global: &Vec6) {
        let ul = self.tlg() * u_global;
        self.trial_chord = Chord::from_local(self.geometry.l0, &ul);
        let ub = self
            .trial_chord
            .basic_deformation(self.geometry.l0, u_global);
        self.basic.update(ub);
    }

    fn commit_state(&mut self) {
        self.basic.commit();
        self.committed_chord = self.trial_chord;
    }

    fn reset_trial(&mut self) {
        self.basic.reset();
        self.trial_chord = self.committed_chord;
    }

    fn revert_to_start(&mut self) {
        self.basic.revert();
        self.trial_chord = Chord::undeformed(self.geometry.l0);
        self.committed_chord = self.trial_chord;
    }

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn basic(&self) -> &BasicState {
        &self.basic
    }
}

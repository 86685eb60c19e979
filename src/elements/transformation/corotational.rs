//! Corotational transformation for large displacements and rotations

use super::{BasicState, Chord, Geometry, Transformation, TransformationKind};
use crate::math::{Mat3x6, Mat6, Vec6};

/// Exact rigid-body kinematics of the deformed chord (small strains)
#[derive(Debug, Clone)]
pub struct Corotational {
    geometry: Geometry,
    basic: BasicState,
    trial_chord: Chord,
    committed_chord: Chord,
}

impl Corotational {
    pub fn new(geometry: Geometry) -> Self {
        let chord = Chord::undeformed(geometry.l0);
        Self {
            geometry,
            basic: BasicState::default(),
            trial_chord: chord,
            committed_chord: chord,
        }
    }

    /// Chord rotation of the current trial state
    pub fn chord_rotation(&self) -> f64 {
        self.trial_chord.beta
    }
}

impl Transformation for Corotational {
    fn kind(&self) -> TransformationKind {
        TransformationKind::Corotational
    }

    fn length(&self) -> f64 {
        self.trial_chord.length
    }

    fn tbl(&self) -> Mat3x6 {
        let (c, s) = (self.trial_chord.beta.cos(), self.trial_chord.beta.sin());
        let l = self.trial_chord.length;

        #[rustfmt::skip]
        let data = [
            -c,     -s,    0.0, c,     s,      0.0,
            -s / l, c / l, 1.0, s / l, -c / l, 0.0,
            -s / l, c / l, 0.0, s / l, -c / l, 1.0,
        ];

        Mat3x6::from_row_slice(&data)
    }

    fn geometric_matrices(&self) -> (Mat6, Mat6) {
        let (c, s) = (self.trial_chord.beta.cos(), self.trial_chord.beta.sin());
        let l = self.trial_chord.length;
        let (ss, cc, sc) = (s * s, c * c, s * c);

        #[rustfmt::skip]
        let axial = [
             ss, -sc, 0.0, -ss,  sc, 0.0,
            -sc,  cc, 0.0,  sc, -cc, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            -ss,  sc, 0.0,  ss, -sc, 0.0,
             sc, -cc, 0.0, -sc,  cc, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ];

        let d = cc - ss;
        let cs2 = 2.0 * sc;

        #[rustfmt::skip]
        let moment = [
            -cs2,  d,   0.0,  cs2, -d,   0.0,
             d,    cs2, 0.0, -d,   -cs2, 0.0,
             0.0,  0.0, 0.0,  0.0,  0.0, 0.0,
             cs2, -d,   0.0, -cs2,  d,   0.0,
            -d,   -cs2, 0.0,  d,    cs2, 0.0,
             0.0,  0.0, 0.0,  0.0,  0.0, 0.0,
        ];

        (
            Mat6::from_row_slice(&axial) / l,
            Mat6::from_row_slice(&moment) / (l * l),
        )
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

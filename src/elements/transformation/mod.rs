//! Geometric transformations between global, local and basic systems
//!
//! A transformation maps the six global end displacements of a plane
//! frame element to three basic deformations `[axial, rotation_i, rotation_j]`
//! and provides the matrices needed to push basic forces back out:
//! - `Tlg` (6x6): global -> local rotation
//! - `Tbl` (3x6): local -> basic
//! - geometric matrices weighted by the basic forces in the local stiffness

mod corotational;
mod linear;
mod pdelta;

use std::f64::consts::{PI, TAU};
use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{check_len, FrameError, FrameResult};
use crate::math::{frame_rotation_matrix, Mat3x6, Mat6, Vec3, Vec6};

pub use corotational::Corotational;
pub use linear::Linear;
pub use pdelta::PDelta;

/// Kinematic description of a frame element
pub trait Transformation: Debug {
    fn kind(&self) -> TransformationKind;

    /// Undeformed length
    fn l0(&self) -> f64 {
        self.geometry().l0
    }

    /// Length used by the basic stiffness
    fn length(&self) -> f64;

    /// Undeformed axis as (cos, sin, L0)
    fn cosine_director(&self) -> (f64, f64, f64) {
        let g = self.geometry();
        (g.c, g.s, g.l0)
    }

    fn tlg(&self) -> Mat6 {
        self.geometry().tlg()
    }

    fn tbl(&self) -> Mat3x6;

    /// Matrices multiplied by the axial basic force and by the sum of end moments
    fn geometric_matrices(&self) -> (Mat6, Mat6);

    /// Recompute the trial basic deformation from global end displacements
    fn update_trial(&mut self, u_global: &Vec6);

    fn commit_state(&mut self);
    fn reset_trial(&mut self);
    fn revert_to_start(&mut self);

    fn geometry(&self) -> &Geometry;
    fn basic(&self) -> &BasicState;

    fn basic_trial_disp(&self) -> Vec3 {
        self.basic().trial
    }

    /// Trial minus committed basic deformation
    fn basic_incr_disp(&self) -> Vec3 {
        self.basic().trial - self.basic().committed
    }

    /// Trial minus previous-iteration basic deformation
    fn basic_incr_delta_disp(&self) -> Vec3 {
        self.basic().trial - self.basic().previous
    }
}

/// Available transformation formulations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformationKind {
    #[default]
    Linear,
    Corotational,
    PDelta,
}

impl TransformationKind {
    /// Build a transformation for an element running from `xi` to `xj`
    pub fn build(self, xi: &[f64], xj: &[f64]) -> FrameResult<Box<dyn Transformation>> {
        let geometry = Geometry::new(xi, xj)?;
        Ok(match self {
            Self::Linear => Box::new(Linear::new(geometry)),
            Self::Corotational => Box::new(Corotational::new(geometry)),
            Self::PDelta => Box::new(PDelta::new(geometry)),
        })
    }
}

impl FromStr for TransformationKind {
    type Err = FrameError;

    fn from_str(s: &str) -> FrameResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "corotational" => Ok(Self::Corotational),
            "pdelta" | "p-delta" => Ok(Self::PDelta),
            other => Err(FrameError::InvalidInput(format!(
                "unknown transformation '{other}'"
            ))),
        }
    }
}

/// Undeformed element axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub c: f64,
    pub s: f64,
    pub l0: f64,
}

impl Geometry {
    pub fn new(xi: &[f64], xj: &[f64]) -> FrameResult<Self> {
        check_len("element end coordinates", 2, xi.len())?;
        check_len("element end coordinates", 2, xj.len())?;

        let dx = xj[0] - xi[0];
        let dy = xj[1] - xi[1];
        let l0 = dx.hypot(dy);
        if !(l0 > 0.0 && l0.is_finite()) {
            return Err(FrameError::InvalidGeometry(format!(
                "element length must be positive, got {l0}"
            )));
        }

        let alpha = dy.atan2(dx);
        Ok(Self {
            c: alpha.cos(),
            s: alpha.sin(),
            l0,
        })
    }

    pub fn tlg(&self) -> Mat6 {
        frame_rotation_matrix(self.c, self.s)
    }
}

/// Trial, committed and previous-iteration basic deformations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BasicState {
    pub trial: Vec3,
    pub committed: Vec3,
    pub previous: Vec3,
}

impl BasicState {
    pub fn update(&mut self, ub: Vec3) {
        self.previous = self.trial;
        self.trial = ub;
    }

    pub fn commit(&mut self) {
        self.committed = self.trial;
    }

    pub fn reset(&mut self) {
        self.trial = self.committed;
        self.previous = self.committed;
    }

    pub fn revert(&mut self) {
        *self = Self::default();
    }
}

/// Deformed chord in local axes, shared by the large-displacement formulations
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Chord {
    /// Chord rotation relative to the undeformed axis
    pub beta: f64,
    /// Deformed length
    pub length: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Chord {
    pub fn undeformed(l0: f64) -> Self {
        Self {
            beta: 0.0,
            length: l0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn from_local(l0: f64, ul: &Vec6) -> Self {
        let dx = ul[3] - ul[0];
        let dy = ul[4] - ul[1];
        Self {
            beta: dy.atan2(l0 + dx),
            length: (l0 + dx).hypot(dy),
            dx,
            dy,
        }
    }

    /// Basic deformation `[Ln - L0, theta_i - beta, theta_j - beta]`
    ///
    /// `beta` is only known modulo 2*pi, so the end rotations are wrapped
    /// into (-pi, pi].
    pub fn basic_deformation(&self, l0: f64, u_global: &Vec6) -> Vec3 {
        Vec3::new(
            self.length - l0,
            wrap_angle(u_global[2] - self.beta),
            wrap_angle(u_global[5] - self.beta),
        )
    }
}

/// Map an angle into (-pi, pi]
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometry_direction() {
        let g = Geometry::new(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert_relative_eq!(g.l0, 5.0);
        assert_relative_eq!(g.c, 0.6, epsilon = 1e-12);
        assert_relative_eq!(g.s, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = TransformationKind::Linear.build(&[1.0, 1.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(FrameError::InvalidGeometry(_))));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "Corotational".parse::<TransformationKind>().unwrap(),
            TransformationKind::Corotational
        );
        assert_eq!(
            "p-delta".parse::<TransformationKind>().unwrap(),
            TransformationKind::PDelta
        );
        assert!("arc-length".parse::<TransformationKind>().is_err());
    }

    #[test]
    fn test_basic_state_transitions() {
        let mut state = BasicState::default();
        state.update(Vec3::new(1.0, 2.0, 3.0));
        state.update(Vec3::new(2.0, 2.0, 3.0));
        assert_relative_eq!(state.previous[0], 1.0);

        state.commit();
        state.update(Vec3::new(5.0, 0.0, 0.0));
        state.reset();
        assert_eq!(state.trial, state.committed);
        assert_eq!(state.previous, state.committed);

        state.revert();
        assert_eq!(state, BasicState::default());
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(0.3), 0.3);
        assert_relative_eq!(wrap_angle(TAU + 0.3), 0.3, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(-TAU - 0.3), -0.3, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(PI), PI);
        assert_relative_eq!(wrap_angle(-PI), PI);
    }

    #[test]
    fn test_bending_survives_large_rigid_rotation() {
        // Rigid rotation past pi plus a small relative end rotation at j
        let (phi, kappa) = (4.0_f64, 0.01);
        let mut t = TransformationKind::Corotational
            .build(&[0.0, 0.0], &[3.0, 4.0])
            .unwrap();
        let (c, s) = (phi.cos(), phi.sin());
        let u = Vec6::new(
            0.0,
            0.0,
            phi,
            c * 3.0 - s * 4.0 - 3.0,
            s * 3.0 + c * 4.0 - 4.0,
            phi + kappa,
        );
        t.update_trial(&u);

        let ub = t.basic_trial_disp();
        assert_relative_eq!(ub[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(ub[1], 0.0, epsilon = 1e-10);
        assert_relative_eq!(ub[2], kappa, epsilon = 1e-10);
    }

    #[test]
    fn test_rigid_body_rotation_gives_no_deformation() {
        for kind in [TransformationKind::Corotational, TransformationKind::PDelta] {
            for phi in [0.5_f64, 1.0, 2.5, 3.5, 4.0, -4.0, 7.0] {
                // Inclined element, rotated rigidly about node i
                let (xi, xj) = ([1.0, 2.0], [4.0, 6.0]);
                let mut t = kind.build(&xi, &xj).unwrap();

                let (dx, dy) = (xj[0] - xi[0], xj[1] - xi[1]);
                let (c, s) = (phi.cos(), phi.sin());
                let u = Vec6::new(
                    0.0,
                    0.0,
                    phi,
                    c * dx - s * dy - dx,
                    s * dx + c * dy - dy,
                    phi,
                );
                t.update_trial(&u);

                let ub = t.basic_trial_disp();
                for k in 0..3 {
                    assert_relative_eq!(ub[k], 0.0, epsilon = 1e-10);
                }
            }
        }
    }
}

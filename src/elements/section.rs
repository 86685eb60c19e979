//! Section - pairs a uniaxial material with cross-section geometry

use serde::{Deserialize, Serialize};

use crate::elements::material::{Material, UniaxialMaterial};
use crate::error::{FrameError, FrameResult};

/// Cross-section of a frame element.
///
/// Stiffness follows the material's current tangent, so a yielded
/// elasto-plastic material gives zero EA and EI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub material: Material,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area about the bending axis
    pub i: f64,
}

impl Section {
    /// Create a new section
    ///
    /// # Arguments
    /// * `material` - Uniaxial material driving EA and EI
    /// * `a` - Area (positive)
    /// * `i` - Second moment of area (positive)
    pub fn new(material: Material, a: f64, i: f64) -> FrameResult<Self> {
        if !(a > 0.0 && i > 0.0) {
            return Err(FrameError::InvalidInput(format!(
                "section needs A > 0 and I > 0, got A={a}, I={i}"
            )));
        }
        Ok(Self { material, a, i })
    }

    /// Solid rectangle of width `b` and depth `h`, bending about the width axis
    pub fn rectangular(material: Material, b: f64, h: f64) -> FrameResult<Self> {
        Self::new(material, b * h, b * h.powi(3) / 12.0)
    }

    /// Axial and flexural stiffness (EA, EI) from the current tangent
    pub fn stiffness(&self) -> (f64, f64) {
        let e = self.material.tangent();
        (e * self.a, e * self.i)
    }

    /// Axial force from the material's trial stress
    pub fn axial_force(&self) -> f64 {
        self.material.trial_stress() * self.a
    }

    pub fn set_trial_strain(&mut self, eps: f64) {
        self.material.set_trial_strain(eps);
    }

    pub fn commit_state(&mut self) {
        self.material.commit_state();
    }

    pub fn reset_trial(&mut self) {
        self.material.reset_trial();
    }

    pub fn revert_to_start(&mut self) {
        self.material.revert_to_start();
    }
}

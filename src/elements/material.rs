//! Uniaxial material models with explicit trial/commit state
//!
//! Every model keeps a committed (last converged) and a trial
//! (iteration-local) strain/stress pair:
//! - `set_trial_strain` evaluates trial stress from the trial strain and committed history
//! - `trial_stress` and `tangent` only read the current trial state
//! - `commit_state` copies trial into committed, `reset_trial` copies committed into trial

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Common interface of all 1D stress-strain laws
pub trait UniaxialMaterial {
    fn set_trial_strain(&mut self, eps: f64);
    fn trial_strain(&self) -> f64;
    fn trial_stress(&self) -> f64;
    fn tangent(&self) -> f64;
    fn committed_strain(&self) -> f64;
    fn committed_stress(&self) -> f64;
    fn commit_state(&mut self);
    fn reset_trial(&mut self);
    fn revert_to_start(&mut self);
}

/// Strain/stress pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct StressStrain {
    eps: f64,
    sig: f64,
}

/// Linear elastic: stress = E * eps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearElastic {
    /// Modulus of elasticity
    pub e: f64,
    #[serde(skip)]
    trial: StressStrain,
    #[serde(skip)]
    committed: StressStrain,
}

impl LinearElastic {
    pub fn new(e: f64) -> Self {
        Self {
            e,
            trial: StressStrain::default(),
            committed: StressStrain::default(),
        }
    }
}

impl UniaxialMaterial for LinearElastic {
    fn set_trial_strain(&mut self, eps: f64) {
        self.trial = StressStrain {
            eps,
            sig: self.e * eps,
        };
    }

    fn trial_strain(&self) -> f64 {
        self.trial.eps
    }

    fn trial_stress(&self) -> f64 {
        self.trial.sig
    }

    fn tangent(&self) -> f64 {
        self.e
    }

    fn committed_strain(&self) -> f64 {
        self.committed.eps
    }

    fn committed_stress(&self) -> f64 {
        self.committed.sig
    }

    fn commit_state(&mut self) {
        self.committed = self.trial;
    }

    fn reset_trial(&mut self) {
        self.trial = self.committed;
    }

    fn revert_to_start(&mut self) {
        self.trial = StressStrain::default();
        self.committed = StressStrain::default();
    }
}

/// Elastic-perfectly plastic material, symmetric yield at +/- fy.
///
/// Plastic strain only accumulates on commit. The increment found by the
/// last `set_trial_strain` is kept as trial state and is zero when the
/// trial point is elastic or has been reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElastoPlastic {
    /// Modulus of elasticity
    pub e: f64,
    /// Yield stress (positive)
    pub fy: f64,
    #[serde(skip)]
    trial: StressStrain,
    #[serde(skip)]
    committed: StressStrain,
    #[serde(skip)]
    eps_p_committed: f64,
    #[serde(skip)]
    eps_p_increment: f64,
}

impl ElastoPlastic {
    pub fn new(e: f64, fy: f64) -> FrameResult<Self> {
        if e <= 0.0 || fy <= 0.0 {
            return Err(FrameError::InvalidInput(format!(
                "elasto-plastic material needs E > 0 and fy > 0, got E={e}, fy={fy}"
            )));
        }
        Ok(Self {
            e,
            fy,
            trial: StressStrain::default(),
            committed: StressStrain::default(),
            eps_p_committed: 0.0,
            eps_p_increment: 0.0,
        })
    }

    /// Committed plastic strain
    pub fn plastic_strain(&self) -> f64 {
        self.eps_p_committed
    }

    /// Plastic strain increment that the next commit will add
    pub fn pending_plastic_increment(&self) -> f64 {
        self.eps_p_increment
    }

    fn yield_function(&self, sigma: f64) -> f64 {
        sigma.abs() - self.fy
    }
}

impl UniaxialMaterial for ElastoPlastic {
    fn set_trial_strain(&mut self, eps: f64) {
        let trial_stress = self.e * (eps - self.eps_p_committed);
        let f = self.yield_function(trial_stress);

        if f <= 0.0 {
            self.trial = StressStrain {
                eps,
                sig: trial_stress,
            };
            self.eps_p_increment = 0.0;
        } else {
            // Radial return onto the yield surface
            let sign = trial_stress.signum();
            self.trial = StressStrain {
                eps,
                sig: sign * self.fy,
            };
            self.eps_p_increment = sign * f / self.e;
        }
    }

    fn trial_strain(&self) -> f64 {
        self.trial.eps
    }

    fn trial_stress(&self) -> f64 {
        self.trial.sig
    }

    fn tangent(&self) -> f64 {
        if self.yield_function(self.trial.sig) < 0.0 {
            self.e
        } else {
            0.0
        }
    }

    fn committed_strain(&self) -> f64 {
        self.committed.eps
    }

    fn committed_stress(&self) -> f64 {
        self.committed.sig
    }

    fn commit_state(&mut self) {
        self.committed = self.trial;
        self.eps_p_committed += self.eps_p_increment;
        self.eps_p_increment = 0.0;
    }

    fn reset_trial(&mut self) {
        self.trial = self.committed;
        self.eps_p_increment = 0.0;
    }

    fn revert_to_start(&mut self) {
        self.trial = StressStrain::default();
        self.committed = StressStrain::default();
        self.eps_p_committed = 0.0;
        self.eps_p_increment = 0.0;
    }
}

/// Compression-only concrete envelope (no tension, no unloading branch).
///
/// Compressive quantities are negative: `fc`, `fcu`, `eps_c0`, `eps_u`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concrete01 {
    /// Initial modulus, reported as tangent at zero strain
    pub e0: f64,
    /// Peak compressive strength
    pub fc: f64,
    /// Strain at peak strength
    pub eps_c0: f64,
    /// Residual crushing strength
    pub fcu: f64,
    /// Strain at crushing strength
    pub eps_u: f64,
    #[serde(skip)]
    trial: StressStrain,
    #[serde(skip)]
    committed: StressStrain,
}

impl Concrete01 {
    pub fn new(e0: f64, fc: f64, eps_c0: f64, fcu: f64, eps_u: f64) -> FrameResult<Self> {
        if eps_c0 >= 0.0 || eps_u >= eps_c0 {
            return Err(FrameError::InvalidInput(format!(
                "concrete strains must satisfy eps_u < eps_c0 < 0, got eps_c0={eps_c0}, eps_u={eps_u}"
            )));
        }
        Ok(Self {
            e0,
            fc,
            eps_c0,
            fcu,
            eps_u,
            trial: StressStrain::default(),
            committed: StressStrain::default(),
        })
    }

    /// Stress on the loading envelope
    pub fn envelope(&self, eps: f64) -> f64 {
        if eps >= 0.0 {
            return 0.0;
        }
        if eps > self.eps_c0 {
            // Ascending parabola
            let ratio = eps / self.eps_c0;
            return self.fc * ratio * (2.0 - ratio);
        }
        if eps > self.eps_u {
            // Linear softening
            return (self.fc - self.fcu) * ((eps - self.eps_c0) / (self.eps_u - self.eps_c0))
                + self.fc;
        }
        self.fcu
    }
}

impl UniaxialMaterial for Concrete01 {
    fn set_trial_strain(&mut self, eps: f64) {
        self.trial = StressStrain {
            eps,
            sig: self.envelope(eps),
        };
    }

    fn trial_strain(&self) -> f64 {
        self.trial.eps
    }

    fn trial_stress(&self) -> f64 {
        self.trial.sig
    }

    /// Secant modulus sigma / eps, E0 at zero strain
    fn tangent(&self) -> f64 {
        if self.trial.eps == 0.0 {
            return self.e0;
        }
        self.trial.sig / self.trial.eps
    }

    fn committed_strain(&self) -> f64 {
        self.committed.eps
    }

    fn committed_stress(&self) -> f64 {
        self.committed.sig
    }

    fn commit_state(&mut self) {
        self.committed = self.trial;
    }

    fn reset_trial(&mut self) {
        self.trial = self.committed;
    }

    fn revert_to_start(&mut self) {
        self.trial = StressStrain::default();
        self.committed = StressStrain::default();
    }
}

/// Material selected for a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    LinearElastic(LinearElastic),
    ElastoPlastic(ElastoPlastic),
    Concrete01(Concrete01),
}

impl Material {
    pub fn linear_elastic(e: f64) -> Self {
        Self::LinearElastic(LinearElastic::new(e))
    }

    pub fn elasto_plastic(e: f64, fy: f64) -> FrameResult<Self> {
        Ok(Self::ElastoPlastic(ElastoPlastic::new(e, fy)?))
    }

    pub fn concrete01(e0: f64, fc: f64, eps_c0: f64, fcu: f64, eps_u: f64) -> FrameResult<Self> {
        Ok(Self::Concrete01(Concrete01::new(e0, fc, eps_c0, fcu, eps_u)?))
    }

    fn inner(&self) -> &dyn UniaxialMaterial {
        match self {
            Self::LinearElastic(m) => m,
            Self::ElastoPlastic(m) => m,
            Self::Concrete01(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn UniaxialMaterial {
        match self {
            Self::LinearElastic(m) => m,
            Self::ElastoPlastic(m) => m,
            Self::Concrete01(m) => m,
        }
    }
}

impl UniaxialMaterial for Material {
    fn set_trial_strain(&mut self, eps: f64) {
        self.inner_mut().set_trial_strain(eps)
    }

    fn trial_strain(&self) -> f64 {
        self.inner().trial_strain()
    }

    fn trial_stress(&self) -> f64 {
        self.inner().trial_stress()
    }

    fn tangent(&self) -> f64 {
        self.inner().tangent()
    }

    fn committed_strain(&self) -> f64 {
        self.inner().committed_strain()
    }

    fn committed_stress(&self) -> f64 {
        self.inner().committed_stress()
    }

    fn commit_state(&mut self) {
        self.inner_mut().commit_state()
    }

    fn reset_trial(&mut self) {
        self.inner_mut().reset_trial()
    }

    fn revert_to_start(&mut self) {
        self.inner_mut().revert_to_start()
    }
}

impl From<LinearElastic> for Material {
    fn from(m: LinearElastic) -> Self {
        Self::LinearElastic(m)
    }
}

impl From<ElastoPlastic> for Material {
    fn from(m: ElastoPlastic) -> Self {
        Self::ElastoPlastic(m)
    }
}

impl From<Concrete01> for Material {
    fn from(m: Concrete01) -> Self {
        Self::Concrete01(m)
    }
}

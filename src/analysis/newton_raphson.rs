//! Full Newton-Raphson iteration at a fixed pseudo-time

use log::{debug, warn};

use super::SolverOptions;
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Vec as FEVec};
use crate::model::Model;

/// Converged result of one solve
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Converged global displacement
    pub displacement: FEVec,
    /// Free-DOF residual norm at the start of every iteration
    pub residuals: Vec<f64>,
    /// Iterations used, the converged residual evaluation included
    pub iterations: usize,
}

/// Newton-Raphson solver with tangent re-assembly every iteration
#[derive(Debug, Clone, Default)]
pub struct NewtonRaphson {
    options: SolverOptions,
    residual_history: Vec<f64>,
}

impl NewtonRaphson {
    pub fn new(options: SolverOptions) -> FrameResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            residual_history: Vec::new(),
        })
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Residual norms of the last successful solve
    pub fn residual_history(&self) -> &[f64] {
        &self.residual_history
    }

    /// Drive the model to equilibrium at pseudo-time `t`
    ///
    /// Starts from the committed state. On convergence the model state is
    /// committed; on any failure the model is reverted to its initial,
    /// all-zero state before the error is returned.
    ///
    /// # Errors
    /// * `NumericalInstability` - residual norm is NaN or infinite
    /// * `SingularMatrix` - free-DOF stiffness cannot be factorized
    /// * `ConvergenceFailed` - iteration cap reached
    pub fn solve(&mut self, model: &mut Model, t: f64) -> FrameResult<SolveOutcome> {
        let mut u = model.committed_displacement();
        model.reset_trial();

        let free = model.free_indices().to_vec();
        let mut residuals = Vec::with_capacity(self.options.max_iterations);

        for i in 0..self.options.max_iterations {
            let r = model.calculate_residual(t);
            let k = model.get_stiffness_matrix();
            let norm = model.free_norm(&r, self.options.norm);
            residuals.push(norm);
            debug!("t = {t:.4}, iteration {i}: residual norm = {norm:.3e}");

            if !norm.is_finite() {
                model.revert_to_start();
                return Err(FrameError::NumericalInstability(format!(
                    "residual norm is {norm} at iteration {i}"
                )));
            }

            if norm < self.options.tolerance {
                model.commit_state();
                self.residual_history = residuals.clone();
                return Ok(SolveOutcome {
                    displacement: u,
                    residuals,
                    iterations: i + 1,
                });
            }

            let k_ff = math::submatrix(&k, &free);
            let r_f = math::subvector(&r, &free);

            let cond = math::condition_number(&k_ff);
            if cond * math::SINGULAR_RCOND > 1.0 {
                model.revert_to_start();
                return Err(FrameError::SingularMatrix);
            }
            if cond > math::ILL_CONDITIONED {
                warn!("Ill-conditioned stiffness matrix (cond = {cond:.3e})");
            }

            let du = match math::solve_linear_system(&k_ff, &r_f) {
                Some(du) => du,
                None => {
                    model.revert_to_start();
                    return Err(FrameError::SingularMatrix);
                }
            };

            for (k, &dof) in free.iter().enumerate() {
                u[dof] += du[k];
            }
            debug!("  |du| = {:.3e}", du.norm());

            if let Err(err) = model.update_trial_state(&u) {
                model.revert_to_start();
                return Err(err);
            }
        }

        model.revert_to_start();
        Err(FrameError::ConvergenceFailed(self.options.max_iterations))
    }
}

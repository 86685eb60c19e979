//! Load-controlled incremental analysis

use log::{info, warn};

use super::NewtonRaphson;
use crate::error::{FrameError, FrameResult};
use crate::math::Vec as FEVec;
use crate::model::Model;
use crate::results::LoadHistory;

/// Steps pseudo-time from 0 to `t_end` and solves for equilibrium at each value
#[derive(Debug)]
pub struct LoadControl<'a> {
    model: &'a mut Model,
    solver: NewtonRaphson,
    t_end: f64,
    steps: usize,
    time_values: Vec<f64>,
    u_history: Vec<FEVec>,
    residual_history: Vec<Vec<f64>>,
    iteration_counts: Vec<usize>,
    failure: Option<String>,
}

impl<'a> LoadControl<'a> {
    /// # Arguments
    /// * `model` - Model to drive; borrowed for the whole analysis
    /// * `solver` - Newton-Raphson solver used at every step
    /// * `t_end` - Final pseudo-time
    /// * `steps` - Number of increments; `steps + 1` equally spaced times are solved
    pub fn new(
        model: &'a mut Model,
        solver: NewtonRaphson,
        t_end: f64,
        steps: usize,
    ) -> FrameResult<Self> {
        if steps == 0 {
            return Err(FrameError::InvalidInput(
                "load control needs at least one step".to_string(),
            ));
        }
        if !t_end.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "final pseudo-time must be finite, got {t_end}"
            )));
        }

        let dt = t_end / steps as f64;
        let time_values = (0..=steps).map(|i| i as f64 * dt).collect();

        Ok(Self {
            model,
            solver,
            t_end,
            steps,
            time_values,
            u_history: Vec::new(),
            residual_history: Vec::new(),
            iteration_counts: Vec::new(),
            failure: None,
        })
    }

    /// Solve every pseudo-time in turn, stopping at the first failed step.
    ///
    /// Results of all converged steps stay available afterwards.
    pub fn run(&mut self) {
        info!(
            "Load control: t_end = {}, {} steps",
            self.t_end, self.steps
        );

        for (i, &t) in self.time_values.iter().enumerate() {
            match self.solver.solve(self.model, t) {
                Ok(outcome) => {
                    let final_residual = outcome.residuals.last().copied().unwrap_or(f64::NAN);
                    info!(
                        "Step {i}/{} (t = {t:.3}): {} iterations, residual {final_residual:.3e}",
                        self.steps, outcome.iterations
                    );
                    self.u_history.push(outcome.displacement);
                    self.residual_history.push(outcome.residuals);
                    self.iteration_counts.push(outcome.iterations);
                }
                Err(err) => {
                    warn!("Step {i} failed: {err}");
                    self.failure = Some(format!("step {i} (t = {t}): {err}"));
                    break;
                }
            }
        }
    }

    pub fn model(&self) -> &Model {
        self.model
    }

    pub fn time_values(&self) -> &[f64] {
        &self.time_values
    }

    pub fn u_history(&self) -> &[FEVec] {
        &self.u_history
    }

    pub fn residual_history(&self) -> &[Vec<f64>] {
        &self.residual_history
    }

    pub fn iteration_counts(&self) -> &[usize] {
        &self.iteration_counts
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Serializable record of every converged step
    pub fn history(&self) -> LoadHistory {
        LoadHistory {
            time: self.time_values[..self.u_history.len()].to_vec(),
            displacements: self
                .u_history
                .iter()
                .map(|u| u.iter().copied().collect())
                .collect(),
            residuals: self.residual_history.clone(),
            iterations: self.iteration_counts.clone(),
            failure: self.failure.clone(),
        }
    }
}

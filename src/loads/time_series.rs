//! Time series - pseudo-time scaling of load patterns

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Scale factor applied to every load pattern at pseudo-time `t`
pub trait TimeSeries: Debug {
    fn factor(&self, t: f64) -> f64;
}

/// Ramp from 0 at t = 0 to 1 at `t_end`, held at 1 afterwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRamp {
    t_end: f64,
}

impl LinearRamp {
    pub fn new(t_end: f64) -> FrameResult<Self> {
        if !(t_end.is_finite() && t_end > 0.0) {
            return Err(FrameError::InvalidInput(format!(
                "ramp end time must be positive and finite, got {t_end}"
            )));
        }
        Ok(Self { t_end })
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }
}

impl Default for LinearRamp {
    fn default() -> Self {
        Self { t_end: 1.0 }
    }
}

impl TimeSeries for LinearRamp {
    fn factor(&self, t: f64) -> f64 {
        (t / self.t_end).min(1.0)
    }
}

/// Constant factor regardless of time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    factor: f64,
}

impl Constant {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TimeSeries for Constant {
    fn factor(&self, _t: f64) -> f64 {
        self.factor
    }
}

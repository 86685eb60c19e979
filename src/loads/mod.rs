//! Nodal load patterns and pseudo-time series

mod nodal_load;
mod time_series;

pub use nodal_load::NodalLoad;
pub use time_series::{Constant, LinearRamp, TimeSeries};

//! Nonlinear Frame - incremental-iterative analysis of 2D frames in Rust
//!
//! This library solves plane frame structures under quasi-static loading,
//! with both material and geometric nonlinearity:
//! - 2-node frame elements with 3 DOFs per node (ux, uy, rz)
//! - Uniaxial materials: linear elastic, elastic-perfectly plastic, Concrete01
//! - Linear, corotational and P-Delta geometric transformations
//! - Full Newton-Raphson equilibrium iterations
//! - Load control over a pseudo-time axis
//!
//! ## Example
//! ```rust
//! use nonlinear_frame::prelude::*;
//!
//! let config = ModelConfig::plane_frame();
//!
//! // Nodes (120 in cantilever, fixed at node 1, tip load at node 2)
//! let n1 = Node::new(1, &[0.0, 0.0], &config)?
//!     .with_restraints(Restraints::fixed(3).flags())?;
//! let n2 = Node::new(2, &[120.0, 0.0], &config)?.with_load(&[0.0, -10.0, 0.0])?;
//!
//! // Element
//! let section = Section::new(Material::linear_elastic(29_000.0), 10.0, 100.0)?;
//! let element = FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear)?;
//!
//! let mut model = Model::new(vec![n1, n2], vec![element], config)?;
//!
//! // Solve at full load
//! let mut solver = NewtonRaphson::new(SolverOptions::default())?;
//! solver.solve(&mut model, 1.0)?;
//!
//! let tip = model.node_displacement(2)?;
//! assert!((tip.uy + 10.0 * 120.0_f64.powi(3) / (3.0 * 29_000.0 * 100.0)).abs() < 1e-6);
//! # Ok::<(), nonlinear_frame::error::FrameError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{LoadControl, NewtonRaphson, NormType, SolveOutcome, SolverOptions};
    pub use crate::config::ModelConfig;
    pub use crate::elements::{
        Concrete01, ElastoPlastic, ForceRecovery, FrameElement, LinearElastic, Material, Node,
        Restraint, Restraints, Section, Transformation, TransformationKind, UniaxialMaterial,
    };
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{Constant, LinearRamp, NodalLoad, TimeSeries};
    pub use crate::model::Model;
    pub use crate::results::{ElementForces, LoadHistory, ModelSummary, NodeDisplacement, Reactions};
}

//! Structural elements module

mod frame;
mod material;
mod node;
mod restraints;
mod section;
pub mod transformation;

pub use frame::{ForceRecovery, FrameElement};
pub use material::{Concrete01, ElastoPlastic, LinearElastic, Material, UniaxialMaterial};
pub use node::Node;
pub use restraints::{Restraint, Restraints};
pub use section::Section;
pub use transformation::{Transformation, TransformationKind};

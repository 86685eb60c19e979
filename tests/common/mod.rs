//! Model builders shared by the integration tests

#![allow(dead_code)]

use nonlinear_frame::prelude::*;

pub const E: f64 = 29_000.0;
pub const A: f64 = 10.0;
pub const I: f64 = 100.0;
pub const L: f64 = 120.0;

/// Horizontal cantilever fixed at node 1 with a tip load pattern at node 2
pub fn cantilever(kind: TransformationKind, tip_load: [f64; 3]) -> Model {
    let config = ModelConfig::plane_frame();
    let n1 = Node::new(1, &[0.0, 0.0], &config)
        .unwrap()
        .with_restraints(Restraints::fixed(3).flags())
        .unwrap();
    let n2 = Node::new(2, &[L, 0.0], &config)
        .unwrap()
        .with_load(&tip_load)
        .unwrap();

    let section = Section::new(Material::linear_elastic(E), A, I).unwrap();
    let element = FrameElement::new(1, &n1, &n2, section, kind).unwrap();

    Model::new(vec![n1, n2], vec![element], config).unwrap()
}

/// Vertical column fixed at the base (node 1) with a load pattern at the top (node 2)
pub fn column(kind: TransformationKind, top_load: [f64; 3]) -> Model {
    let config = ModelConfig::plane_frame();
    let n1 = Node::new(1, &[0.0, 0.0], &config)
        .unwrap()
        .with_restraints(Restraints::fixed(3).flags())
        .unwrap();
    let n2 = Node::new(2, &[0.0, L], &config)
        .unwrap()
        .with_load(&top_load)
        .unwrap();

    let section = Section::new(Material::linear_elastic(E), A, I).unwrap();
    let element = FrameElement::new(1, &n1, &n2, section, kind).unwrap();

    Model::new(vec![n1, n2], vec![element], config).unwrap()
}

/// Unit bar along X with only the end UX free, loaded axially at node 2
pub fn axial_bar(material: Material, load: f64) -> Model {
    let config = ModelConfig::plane_frame();
    let n1 = Node::new(1, &[0.0, 0.0], &config)
        .unwrap()
        .with_restraints(Restraints::from_codes("rrr", 3).unwrap().flags())
        .unwrap();
    let n2 = Node::new(2, &[1.0, 0.0], &config)
        .unwrap()
        .with_restraints(Restraints::from_codes("frr", 3).unwrap().flags())
        .unwrap()
        .with_load(&[load, 0.0, 0.0])
        .unwrap();

    let section = Section::new(material, 1.0, 1.0).unwrap();
    let element = FrameElement::new(1, &n1, &n2, section, TransformationKind::Linear).unwrap();

    Model::new(vec![n1, n2], vec![element], config).unwrap()
}

pub fn is_all_zero(model: &Model) -> bool {
    model.trial_displacement().iter().all(|&v| v == 0.0)
        && model.committed_displacement().iter().all(|&v| v == 0.0)
}

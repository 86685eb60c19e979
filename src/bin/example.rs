//! Nonlinear Frame Example - Portal Frame Pushover
//!
//! Usage: `frame-example [solver-options.json]`
//!
//! Set `RUST_LOG=debug` to follow the Newton iterations.

use anyhow::{Context, Result};
use nonlinear_frame::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Nonlinear Frame Example: Portal Frame Pushover ===\n");

    let options = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read solver options from {path}"))?;
            serde_json::from_str::<SolverOptions>(&text).context("invalid solver options")?
        }
        None => SolverOptions::default(),
    };

    // Portal frame
    //
    //     N3 -------- N4
    //     |          |
    //     |          |
    //     N1        N2
    //   Fixed     Fixed
    //
    let config = ModelConfig::plane_frame();
    let height = 144.0;
    let span = 240.0;

    let n1 = Node::new(1, &[0.0, 0.0], &config)?
        .with_restraints(Restraints::from_codes("rrr", 3)?.flags())?;
    let n2 = Node::new(2, &[span, 0.0], &config)?
        .with_restraints(Restraints::from_codes("rrr", 3)?.flags())?;
    let n3 = Node::new(3, &[0.0, height], &config)?.with_load(&[20.0, -200.0, 0.0])?;
    let n4 = Node::new(4, &[span, height], &config)?.with_load(&[0.0, -200.0, 0.0])?;

    let steel = Material::elasto_plastic(29_000.0, 50.0)?;
    let column = Section::rectangular(steel.clone(), 6.0, 12.0)?;
    let beam = Section::rectangular(steel, 6.0, 18.0)?;

    let kind = TransformationKind::Corotational;
    let elements = vec![
        FrameElement::new(1, &n1, &n3, column.clone(), kind)?,
        FrameElement::new(2, &n2, &n4, column, kind)?,
        FrameElement::new(3, &n3, &n4, beam, kind)?,
    ];

    let mut model = Model::new(vec![n1, n2, n3, n4], elements, config)?
        .with_time_series(Box::new(LinearRamp::new(1.0)?));
    println!("{:?}\n", model.summary());

    let solver = NewtonRaphson::new(options)?;
    let history = {
        let mut analysis = LoadControl::new(&mut model, solver, 1.0, 10)?;
        analysis.run();
        analysis.history()
    };

    // Roof drift is UX of node 3
    let roof_dof = 6;
    println!("{:>6} {:>8} {:>12} {:>6}", "step", "t", "roof ux", "iters");
    for (i, ((t, ux), iters)) in history
        .time
        .iter()
        .zip(history.dof_history(roof_dof))
        .zip(&history.iterations)
        .enumerate()
    {
        println!("{i:>6} {t:>8.3} {ux:>12.6} {iters:>6}");
    }

    if let Some(failure) = &history.failure {
        println!("\nAnalysis stopped early: {failure}");
    }

    println!("\nElement forces at the final model state:");
    for forces in model.element_forces() {
        println!(
            "  E{}: N = {:10.3}, Mi = {:10.3}, Mj = {:10.3}, V = {:8.3}",
            forces.element, forces.axial, forces.moment_i, forces.moment_j, forces.shear
        );
    }

    for id in [1, 2] {
        let r = model.node_reactions(id)?;
        println!("  Reaction N{id}: Fx = {:9.3}, Fy = {:9.3}, Mz = {:11.3}", r.fx, r.fy, r.mz);
    }

    Ok(())
}

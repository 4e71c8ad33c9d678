//! Planar Statics Example - beam, truss and portal frame

use planar_statics::prelude::*;

fn beam_example() -> anyhow::Result<()> {
    println!("--- Beam: 12 m span, point load and partial UDL ---");

    let beam = BeamModel::new(12.0)
        .with_load(PointLoad::new(3.0, 10.0).with_label("P1"))
        .with_load(DistributedLoad::new(4.0, 10.0, 5.0).with_label("w1"));

    let results = beam.analyze(&AnalysisOptions::default())?;
    println!(
        "RA = {:.3}  RB = {:.3}",
        results.reactions.a.vertical, results.reactions.b.vertical
    );
    println!(
        "Total load V = {:.3}, acting at x = {:?}",
        results.equilibrium.sum_vertical_loads, results.load_resultant_position
    );
    if let Some(peak) = results.max_moment() {
        println!("Peak moment {:.3} at x = {:.3}", peak.moment, peak.position);
    }
    Ok(())
}

fn truss_example() -> anyhow::Result<()> {
    println!("\n--- Truss: 3-4-5 triangle ---");

    let mut truss = TrussModel::default();
    truss.add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned()));
    truss.add_node(Node::new(2, 4.0, 0.0).with_support(Support::roller_y()));
    truss.add_node(Node::new(3, 4.0, 3.0).with_load(NodeLoad::force(0.0, -1000.0)));
    truss.add_member(1, 3);
    truss.add_member(3, 2);
    truss.add_member(1, 2);

    let results = truss.solve(&AnalysisOptions::default())?;
    for f in &results.member_forces {
        println!(
            "Member {}-{}: {:>10.3} ({:?})",
            f.start, f.end, f.force, f.state
        );
    }
    for r in &results.reactions {
        println!("Node {}: Rx = {:.3}, Ry = {:.3}", r.node, r.fx, r.fy);
    }
    Ok(())
}

fn frame_example() -> anyhow::Result<()> {
    println!("\n--- Frame: portal with lateral load ---");

    // N3 -------- N4
    // |           |
    // N1          N2  (fixed bases)
    let height = 4.0;
    let span = 6.0;
    let section = Section::rectangular(0.3, 0.5);
    let steel = Material::steel();

    let mut frame = FrameModel::default();
    frame.add_node(Node::new(1, 0.0, 0.0).with_support(Support::fixed()));
    frame.add_node(Node::new(2, span, 0.0).with_support(Support::fixed()));
    frame.add_node(Node::new(3, 0.0, height).with_load(NodeLoad::force(10e3, 0.0)));
    frame.add_node(Node::new(4, span, height));
    frame.add_member(FrameMember::from_properties(1, 3, &steel, &section));
    frame.add_member(FrameMember::from_properties(2, 4, &steel, &section));
    frame.add_member(FrameMember::from_properties(3, 4, &steel, &section));

    let results = frame.solve(&AnalysisOptions::default())?;
    for d in &results.displacements {
        println!(
            "Node {}: DX = {:.6e} m, DY = {:.6e} m, RZ = {:.6e} rad",
            d.node, d.dx, d.dy, d.rz
        );
    }
    for r in &results.reactions {
        println!(
            "Node {}: FX = {:.3} N, FY = {:.3} N, MZ = {:.3} N·m",
            r.node, r.fx, r.fy, r.mz
        );
    }
    println!("Free DOF residual: {:.3e}", results.free_dof_residual);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== Planar Statics Example ===\n");

    beam_example()?;
    truss_example()?;
    frame_example()?;
    Ok(())
}

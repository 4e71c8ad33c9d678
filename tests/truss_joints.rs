use approx::assert_relative_eq;
use planar_statics::prelude::*;
use planar_statics::request::TrussRequest;

fn triangle() -> TrussModel {
    let mut truss = TrussModel::default();
    truss.add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned()));
    truss.add_node(Node::new(2, 4.0, 0.0).with_support(Support::roller_y()));
    truss.add_node(Node::new(3, 4.0, 3.0).with_load(NodeLoad::force(0.0, -1000.0)));
    truss.add_member(1, 3);
    truss.add_member(3, 2);
    truss.add_member(1, 2);
    truss
}

/// Six-node Howe-style truss with loads on the bottom chord
fn bridge() -> TrussModel {
    let mut truss = TrussModel::default();
    truss.add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned()));
    truss.add_node(Node::new(2, 3.0, 0.0).with_load(NodeLoad::force(0.0, -20.0)));
    truss.add_node(Node::new(3, 6.0, 0.0).with_load(NodeLoad::force(5.0, -10.0)));
    truss.add_node(Node::new(4, 9.0, 0.0).with_support(Support::roller_y()));
    truss.add_node(Node::new(5, 3.0, 2.5));
    truss.add_node(Node::new(6, 6.0, 2.5));
    for (a, b) in [(1, 2), (2, 3), (3, 4), (5, 6), (1, 5), (6, 4), (2, 5), (3, 6), (2, 6)] {
        truss.add_member(a, b);
    }
    truss
}

/// Largest joint imbalance over every node
fn max_joint_imbalance(truss: &TrussModel, results: &TrussResults) -> f64 {
    let mut worst: f64 = 0.0;
    for node in &truss.nodes {
        let mut fx = node.load.fx;
        let mut fy = node.load.fy;
        if let Some(r) = results.reaction(node.id) {
            fx += r.fx;
            fy += r.fy;
        }
        for f in &results.member_forces {
            let start = truss.nodes.iter().find(|n| n.id == f.start).unwrap();
            let end = truss.nodes.iter().find(|n| n.id == f.end).unwrap();
            let length = start.distance_to(end);
            let (c, s) = ((end.x - start.x) / length, (end.y - start.y) / length);
            if f.start == node.id {
                fx += f.force * c;
                fy += f.force * s;
            } else if f.end == node.id {
                fx -= f.force * c;
                fy -= f.force * s;
            }
        }
        worst = worst.max(fx.abs()).max(fy.abs());
    }
    worst
}

#[test]
fn triangle_reactions_carry_the_load() {
    let truss = triangle();
    let results = truss.solve(&AnalysisOptions::default()).unwrap();

    assert_eq!(results.determinacy, Determinacy::Determinate);
    assert_eq!(results.equations, 6);
    assert_eq!(results.unknowns, 6);
    assert!(results.member_forces.iter().all(|f| f.force.is_finite()));

    let total_up: f64 = results.reactions.iter().map(|r| r.fy).sum();
    assert_relative_eq!(total_up, 1000.0, epsilon = 1e-9);
    assert!(max_joint_imbalance(&truss, &results) < 1e-9);
}

#[test]
fn bridge_is_determinate_and_balanced() {
    let truss = bridge();
    let results = truss.solve(&AnalysisOptions::default()).unwrap();
    assert_eq!(results.determinacy, Determinacy::Determinate);
    assert!(max_joint_imbalance(&truss, &results) < 1e-9);

    let rx: f64 = results.reactions.iter().map(|r| r.fx).sum();
    let ry: f64 = results.reactions.iter().map(|r| r.fy).sum();
    assert_relative_eq!(rx, -5.0, epsilon = 1e-9);
    assert_relative_eq!(ry, 30.0, epsilon = 1e-9);

    // Bottom chord in tension, top chord in compression under gravity
    assert_eq!(results.member_forces[0].state, MemberState::Tension);
    assert_eq!(results.member_forces[3].state, MemberState::Compression);
}

#[test]
fn missing_bar_is_classified_unstable() {
    let mut truss = triangle();
    truss.members.pop();
    let results = truss.solve(&AnalysisOptions::default()).unwrap();
    assert_eq!(results.determinacy, Determinacy::Unstable);
    assert_eq!(results.unknowns, 5);
    assert_eq!(results.warnings.len(), 1);
    assert_eq!(results.member_forces.len(), 2);
}

#[test]
fn extra_restraint_is_classified_indeterminate() {
    let mut truss = triangle();
    truss.nodes[1].support = Support::pinned();
    let results = truss.solve(&AnalysisOptions::default()).unwrap();
    assert_eq!(results.determinacy, Determinacy::Indeterminate);
    assert!(results.warnings[0].contains("indeterminate"));
    // The least-squares answer still balances every joint
    assert!(max_joint_imbalance(&truss, &results) < 1e-6);
}

#[test]
fn unsupported_square_truss_is_singular() {
    let mut truss = TrussModel::default();
    truss.add_node(Node::new(1, 0.0, 0.0).with_support(Support::roller_y()));
    truss.add_node(Node::new(2, 4.0, 0.0).with_support(Support::roller_y()));
    truss.add_node(Node::new(3, 2.0, 2.0));
    truss.add_member(1, 2);
    truss.add_member(2, 3);
    truss.add_member(3, 1);
    truss.add_member(1, 3);
    let err = truss.solve(&AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SingularSystem);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let mut truss = triangle();
    truss.add_node(Node::new(4, 4.0, 3.0));
    truss.add_member(3, 4);
    let err = truss.solve(&AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);

    let mut truss = triangle();
    truss.add_node(Node::new(2, 9.0, 9.0));
    let err = truss.solve(&AnalysisOptions::default()).unwrap_err();
    assert!(matches!(err, StaticsError::DuplicateNode(2)));

    let err = TrussModel::default()
        .solve(&AnalysisOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn json_request_matches_typed_model() {
    let json = r#"{
        "nodes": [
            {"id": 1, "x": 0.0, "y": 0.0, "support": "pinned"},
            {"id": 2, "x": 4.0, "y": 0.0, "support": "roller"},
            {"id": 3, "x": 4.0, "y": 3.0, "fy": -1000.0}
        ],
        "members": [[1, 3], [3, 2], [1, 2]]
    }"#;
    let request: TrussRequest = serde_json::from_str(json).unwrap();
    let model = request.into_model().unwrap();
    assert_eq!(model, triangle());

    let results = model.solve(&AnalysisOptions::default()).unwrap();
    assert_relative_eq!(results.force(1).unwrap(), -1000.0, epsilon = 1e-9);
}

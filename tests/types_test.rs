use graphwalk::types::*;

#[test]
fn visit_state_as_str_roundtrip() {
    let states = vec![
        VisitState::Unvisited,
        VisitState::Visiting,
        VisitState::Current,
        VisitState::Visited,
    ];

    for state in states {
        let s = state.as_str();
        let parsed = VisitState::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse VisitState from '{}'", s));
        assert_eq!(state, parsed, "roundtrip failed for VisitState::{}", s);
    }
}

#[test]
fn visit_state_default_is_unvisited() {
    assert_eq!(VisitState::default(), VisitState::Unvisited);
}

#[test]
fn visit_state_from_str_unknown_returns_none() {
    assert!(VisitState::from_str("pending").is_none());
    assert!(VisitState::from_str("").is_none());
}

#[test]
fn graph_algorithm_as_str_roundtrip() {
    for algorithm in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs] {
        let s = algorithm.as_str();
        let parsed = GraphAlgorithm::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse GraphAlgorithm from '{}'", s));
        assert_eq!(algorithm, parsed, "roundtrip failed for '{}'", s);
    }
    assert!(GraphAlgorithm::from_str("dijkstra").is_none());
}

#[test]
fn tree_traversal_as_str_roundtrip() {
    let traversals = vec![
        TreeTraversal::Preorder,
        TreeTraversal::Inorder,
        TreeTraversal::Postorder,
        TreeTraversal::LevelOrder,
    ];

    for traversal in traversals {
        let s = traversal.as_str();
        let parsed = TreeTraversal::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse TreeTraversal from '{}'", s));
        assert_eq!(traversal, parsed, "roundtrip failed for '{}'", s);
    }
    assert!(TreeTraversal::from_str("reverse").is_none());
}

#[test]
fn child_side_as_str_roundtrip() {
    for side in [ChildSide::Left, ChildSide::Right] {
        let s = side.as_str();
        let parsed = ChildSide::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse ChildSide from '{}'", s));
        assert_eq!(side, parsed, "roundtrip failed for '{}'", s);
    }
    assert!(ChildSide::from_str("middle").is_none());
}

#[test]
fn mint_node_id_is_deterministic() {
    let id1 = mint_node_id("alpha", 7);
    let id2 = mint_node_id("alpha", 7);
    assert_eq!(id1, id2, "same inputs must produce the same id");
}

#[test]
fn mint_node_id_format() {
    let id = mint_node_id("alpha", 0);

    // Format should be "node:16hexchars"
    let parts: Vec<&str> = id.splitn(2, ':').collect();
    assert_eq!(parts.len(), 2, "id should have exactly one colon separator");
    assert_eq!(parts[0], "node", "prefix should be 'node'");
    assert_eq!(parts[1].len(), 16, "hex portion should be 16 characters");
    assert!(
        parts[1].chars().all(|c| c.is_ascii_hexdigit()),
        "hex portion should contain only hex digits"
    );
}

#[test]
fn mint_node_id_different_inputs_produce_different_ids() {
    let id1 = mint_node_id("alpha", 0);
    let id2 = mint_node_id("alpha", 1);
    let id3 = mint_node_id("beta", 0);

    assert_ne!(id1, id2, "different sequence numbers should differ");
    assert_ne!(id1, id3, "different values should differ");
}

#[test]
fn traversal_step_serde_roundtrip() {
    let step = TraversalStep {
        node_id: "A".to_string(),
        kind: StepKind::Enqueue,
        frontier: vec!["B".to_string(), "C".to_string()],
        is_final: false,
    };

    let json = serde_json::to_string(&step).expect("failed to serialize TraversalStep");
    let deserialized: TraversalStep =
        serde_json::from_str(&json).expect("failed to deserialize TraversalStep");

    assert_eq!(step, deserialized);
}

#[test]
fn position_serde_roundtrip() {
    let position = Position::new(42.5, -7.25);

    let json = serde_json::to_string(&position).expect("failed to serialize Position");
    let deserialized: Position =
        serde_json::from_str(&json).expect("failed to deserialize Position");

    assert_eq!(position, deserialized);
}

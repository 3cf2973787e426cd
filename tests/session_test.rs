use std::time::Duration;

use graphwalk::errors::GraphWalkError;
use graphwalk::graph::model::GraphModel;
use graphwalk::session::{GraphSession, TreeSession};
use graphwalk::tree::model::TreeModel;
use graphwalk::types::*;

/// A tick long enough that no step beyond step 0 fires during a test.
const FROZEN: Duration = Duration::from_secs(3600);

// ---------------------------------------------------------------------------
// Graph sessions
// ---------------------------------------------------------------------------

#[test]
fn graph_session_edits_are_rejected_while_traversing() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .run_with_tick(GraphAlgorithm::Bfs, "A", FROZEN)
        .expect("run failed");
    assert!(session.is_traversing());

    let before = session.model().clone();

    let err = session
        .add_node("Z", Position::default())
        .expect_err("add_node should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    let err = session
        .remove_node("A")
        .expect_err("remove_node should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    let err = session
        .toggle_edge("A", "D")
        .expect_err("toggle_edge should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    let err = session
        .set_position("A", Position::new(1.0, 1.0))
        .expect_err("set_position should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    assert_eq!(
        session.model(),
        &before,
        "rejected edits must leave the model unchanged"
    );
}

#[test]
fn graph_session_allows_edits_after_stop() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .run_with_tick(GraphAlgorithm::Bfs, "A", FROZEN)
        .expect("run failed");
    session.stop();

    session
        .add_node("Z", Position::default())
        .expect("edits should work again once stopped");
    assert!(session.model().contains("Z"));
}

#[test]
fn graph_session_rejects_a_second_run() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .run_with_tick(GraphAlgorithm::Bfs, "A", FROZEN)
        .expect("run failed");

    let err = session
        .run_with_tick(GraphAlgorithm::Dfs, "A", FROZEN)
        .expect_err("second run should fail");
    assert!(matches!(err, GraphWalkError::AlreadyRunning));
    assert!(session.is_traversing(), "first run keeps going");
}

#[test]
fn graph_session_replays_to_completion() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .run_with_tick(GraphAlgorithm::Dfs, "A", FROZEN)
        .expect("run failed");

    while session.step() {}

    assert!(!session.is_traversing());
    assert_eq!(
        session.visited_order(),
        &["A", "B", "D", "E", "F", "C"].map(String::from)
    );
    assert_eq!(session.visit_state("C"), VisitState::Visited);
}

#[test]
fn graph_session_run_rejects_missing_start() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    let err = session
        .run_with_tick(GraphAlgorithm::Bfs, "nope", FROZEN)
        .expect_err("missing start should fail");
    assert!(matches!(err, GraphWalkError::InvalidStartNode { .. }));
    assert!(!session.is_traversing());
}

#[test]
fn graph_session_snapshot_round_trips() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .toggle_edge("A", "F")
        .expect("customize the graph first");
    let snapshot = session.snapshot("custom");
    assert_eq!(snapshot.name, "custom");

    let mut other = GraphSession::new();
    other.restore(&snapshot).expect("restore failed");
    assert_eq!(
        other.model(),
        session.model(),
        "restored model should equal the captured one"
    );
}

#[test]
fn graph_session_restore_is_rejected_while_traversing() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    let snapshot = session.snapshot("keep");

    session
        .run_with_tick(GraphAlgorithm::Bfs, "A", FROZEN)
        .expect("run failed");
    let err = session
        .restore(&snapshot)
        .expect_err("restore should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));
}

#[test]
fn graph_session_reset_clears_playback_state() {
    let mut session = GraphSession::with_model(GraphModel::sample());
    session
        .run_with_tick(GraphAlgorithm::Bfs, "A", FROZEN)
        .expect("run failed");
    session.step();
    session.reset();

    assert!(!session.is_traversing());
    assert!(session.visited_order().is_empty());
    assert!(session.frontier().is_empty());
    assert_eq!(session.visit_state("A"), VisitState::Unvisited);
}

// ---------------------------------------------------------------------------
// Tree sessions
// ---------------------------------------------------------------------------

#[test]
fn tree_session_edits_are_rejected_while_traversing() {
    let mut session = TreeSession::with_model(TreeModel::sample());
    session
        .run_with_tick(TreeTraversal::Preorder, FROZEN)
        .expect("run failed");
    assert!(session.is_traversing());

    let err = session
        .add_node("new", Position::default())
        .expect_err("add_node should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    let err = session
        .remove_node("A")
        .expect_err("remove_node should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));

    let err = session
        .connect("A", "H", ChildSide::Left)
        .expect_err("connect should be rejected mid-run");
    assert!(matches!(err, GraphWalkError::TraversalActive));
}

#[test]
fn tree_session_replays_postorder_to_completion() {
    let mut session = TreeSession::new();
    let a = session.add_node("A", Position::default()).expect("add A");
    let b = session.add_node("B", Position::default()).expect("add B");
    let c = session.add_node("C", Position::default()).expect("add C");
    session.connect(&a, &b, ChildSide::Left).expect("connect");
    session.connect(&a, &c, ChildSide::Right).expect("connect");

    session
        .run_with_tick(TreeTraversal::Postorder, FROZEN)
        .expect("run failed");
    while session.step() {}

    assert_eq!(
        session.visited_order(),
        &[b.clone(), c.clone(), a.clone()],
        "postorder finishes children before the root"
    );
    assert_eq!(session.visit_state(&a), VisitState::Visited);
}

#[test]
fn tree_session_run_on_an_empty_tree_completes_immediately() {
    let mut session = TreeSession::new();
    session
        .run_with_tick(TreeTraversal::Inorder, FROZEN)
        .expect("an empty tree run is a no-op, not an error");
    assert!(!session.is_traversing());
    assert!(session.visited_order().is_empty());
}

#[test]
fn tree_session_snapshot_round_trips() {
    let mut session = TreeSession::with_model(TreeModel::sample());
    let snapshot = session.snapshot("demo");

    let mut other = TreeSession::new();
    other.restore(&snapshot).expect("restore failed");

    assert_eq!(
        other.model().to_parts(),
        session.model().to_parts(),
        "restored tree should equal the captured one"
    );
    assert_eq!(other.model().root(), Some("A"));
}

#[test]
fn tree_session_completed_event_reaches_subscribers() {
    use graphwalk::scheduler::SchedulerEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut session = TreeSession::with_model(TreeModel::sample());
    let completions = Rc::new(RefCell::new(Vec::new()));
    let sink = completions.clone();
    session.subscribe(Box::new(move |event| {
        if let SchedulerEvent::Completed { order } = event {
            sink.borrow_mut().push(order.clone());
        }
    }));

    session
        .run_with_tick(TreeTraversal::LevelOrder, FROZEN)
        .expect("run failed");
    while session.step() {}

    let completions = completions.borrow();
    assert_eq!(completions.len(), 1, "one completion per run");
    assert_eq!(
        completions[0].len(),
        session.model().len(),
        "completion order covers every node"
    );
}

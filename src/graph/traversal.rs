use std::collections::{HashSet, VecDeque};

use crate::errors::{GraphWalkError, Result};
use crate::graph::model::GraphModel;
use crate::types::{GraphAlgorithm, StepKind, TraversalStep};

/// Computes the full step sequence for `algorithm` starting at `start_id`.
///
/// Pure and eager: the entire sequence exists before any playback begins, so
/// cancelling a run never changes what was computed, only how much plays out.
pub fn compute_graph_steps(
    model: &GraphModel,
    algorithm: GraphAlgorithm,
    start_id: &str,
) -> Result<Vec<TraversalStep>> {
    match algorithm {
        GraphAlgorithm::Bfs => bfs(model, start_id),
        GraphAlgorithm::Dfs => dfs(model, start_id),
    }
}

/// Breadth-first step sequence.
///
/// Emits a `Visit` step per dequeue, with the frontier snapshot taken after
/// the dequeue and before any enqueue, then one `Enqueue` step per neighbor
/// inserted (unvisited and not already queued, in stored neighbor order).
/// Nodes unreachable from `start_id` never appear.
pub fn bfs(model: &GraphModel, start_id: &str) -> Result<Vec<TraversalStep>> {
    if !model.contains(start_id) {
        return Err(GraphWalkError::InvalidStartNode {
            id: start_id.to_string(),
        });
    }

    let mut steps = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queued: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    queue.push_back(start_id.to_string());
    queued.insert(start_id.to_string());

    while let Some(current) = queue.pop_front() {
        queued.remove(&current);
        if !visited.insert(current.clone()) {
            // Only the first dequeue of a node counts.
            continue;
        }

        steps.push(TraversalStep {
            node_id: current.clone(),
            kind: StepKind::Visit,
            frontier: queue.iter().cloned().collect(),
            is_final: false,
        });

        if let Some(node) = model.node(&current) {
            for neighbor in &node.neighbors {
                if visited.contains(neighbor) || queued.contains(neighbor) {
                    continue;
                }
                queue.push_back(neighbor.clone());
                queued.insert(neighbor.clone());
                steps.push(TraversalStep {
                    node_id: neighbor.clone(),
                    kind: StepKind::Enqueue,
                    frontier: queue.iter().cloned().collect(),
                    is_final: false,
                });
            }
        }
    }

    mark_final(&mut steps);
    Ok(steps)
}

/// Depth-first step sequence.
///
/// Emits a `Visit` step per pop and an `Enqueue` step per push. Unvisited
/// neighbors are pushed in reverse stored order so the stack yields them in
/// their stored order; the stack may hold duplicates, which are skipped when
/// popped.
pub fn dfs(model: &GraphModel, start_id: &str) -> Result<Vec<TraversalStep>> {
    if !model.contains(start_id) {
        return Err(GraphWalkError::InvalidStartNode {
            id: start_id.to_string(),
        });
    }

    let mut steps = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack = vec![start_id.to_string()];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }

        steps.push(TraversalStep {
            node_id: current.clone(),
            kind: StepKind::Visit,
            frontier: stack.clone(),
            is_final: false,
        });

        if let Some(node) = model.node(&current) {
            for neighbor in node.neighbors.iter().rev() {
                if visited.contains(neighbor) {
                    continue;
                }
                stack.push(neighbor.clone());
                steps.push(TraversalStep {
                    node_id: neighbor.clone(),
                    kind: StepKind::Enqueue,
                    frontier: stack.clone(),
                    is_final: false,
                });
            }
        }
    }

    mark_final(&mut steps);
    Ok(steps)
}

fn mark_final(steps: &mut [TraversalStep]) {
    if let Some(last) = steps.last_mut() {
        last.is_final = true;
    }
}

use std::collections::VecDeque;

use crate::tree::model::TreeModel;
use crate::types::{StepKind, TraversalStep, TreeTraversal};

/// Computes the full step sequence for `traversal` over `model`.
///
/// Pure and eager; an empty tree yields an empty sequence. Trees are acyclic
/// by invariant, so every node is visited exactly once and no visited-set is
/// needed.
pub fn compute_tree_steps(model: &TreeModel, traversal: TreeTraversal) -> Vec<TraversalStep> {
    match traversal {
        TreeTraversal::Preorder => preorder(model),
        TreeTraversal::Inorder => inorder(model),
        TreeTraversal::Postorder => postorder(model),
        TreeTraversal::LevelOrder => level_order(model),
    }
}

/// Preorder: pop, record, then push right child before left so the left
/// subtree is processed first. Frontier snapshots are the remaining stack at
/// each pop.
pub fn preorder(model: &TreeModel) -> Vec<TraversalStep> {
    let Some(root) = model.root() else {
        return Vec::new();
    };
    let mut order = Vec::new();
    let mut snapshots = Vec::new();
    let mut stack = vec![root.to_string()];

    while let Some(current) = stack.pop() {
        order.push(current.clone());
        snapshots.push(stack.clone());

        if let Some(node) = model.node(&current) {
            if let Some(right) = &node.right {
                stack.push(right.clone());
            }
            if let Some(left) = &node.left {
                stack.push(left.clone());
            }
        }
    }
    zip_steps(order, snapshots)
}

/// Inorder: descend left while possible, pushing and snapshotting per push;
/// on exhausting the left spine, pop, record, and move to the right child.
pub fn inorder(model: &TreeModel) -> Vec<TraversalStep> {
    let Some(root) = model.root() else {
        return Vec::new();
    };
    let mut order = Vec::new();
    let mut snapshots = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut cursor = Some(root.to_string());

    while cursor.is_some() || !stack.is_empty() {
        while let Some(current) = cursor {
            stack.push(current.clone());
            snapshots.push(stack.clone());
            cursor = model.node(&current).and_then(|n| n.left.clone());
        }
        if let Some(popped) = stack.pop() {
            cursor = model.node(&popped).and_then(|n| n.right.clone());
            order.push(popped);
        }
    }
    zip_steps(order, snapshots)
}

/// Postorder via two stacks: stack1 pops (snapshotted) feed stack2 in
/// root-right-left order, pushing left before right; draining stack2 yields
/// the final left-right-root order.
pub fn postorder(model: &TreeModel) -> Vec<TraversalStep> {
    let Some(root) = model.root() else {
        return Vec::new();
    };
    let mut snapshots = Vec::new();
    let mut stack1 = vec![root.to_string()];
    let mut stack2: Vec<String> = Vec::new();

    while let Some(current) = stack1.pop() {
        snapshots.push(stack1.clone());
        if let Some(node) = model.node(&current) {
            if let Some(left) = &node.left {
                stack1.push(left.clone());
            }
            if let Some(right) = &node.right {
                stack1.push(right.clone());
            }
        }
        stack2.push(current);
    }

    let mut order = Vec::new();
    while let Some(id) = stack2.pop() {
        order.push(id);
    }
    zip_steps(order, snapshots)
}

/// Level order: dequeue, record, snapshot the remaining queue, then enqueue
/// the left child followed by the right child.
pub fn level_order(model: &TreeModel) -> Vec<TraversalStep> {
    let Some(root) = model.root() else {
        return Vec::new();
    };
    let mut order = Vec::new();
    let mut snapshots = Vec::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(root.to_string());

    while let Some(current) = queue.pop_front() {
        snapshots.push(queue.iter().cloned().collect());
        if let Some(node) = model.node(&current) {
            if let Some(left) = &node.left {
                queue.push_back(left.clone());
            }
            if let Some(right) = &node.right {
                queue.push_back(right.clone());
            }
        }
        order.push(current);
    }
    zip_steps(order, snapshots)
}

/// Pairs the i-th visited node with the i-th emitted frontier snapshot.
///
/// The snapshot streams are algorithm-specific (inorder snapshots come from
/// pushes, the others from pops/dequeues); replay always pairs them
/// positionally with the visit order.
fn zip_steps(order: Vec<String>, snapshots: Vec<Vec<String>>) -> Vec<TraversalStep> {
    let last = order.len().saturating_sub(1);
    order
        .into_iter()
        .enumerate()
        .map(|(i, node_id)| TraversalStep {
            node_id,
            kind: StepKind::Visit,
            frontier: snapshots.get(i).cloned().unwrap_or_default(),
            is_final: i == last,
        })
        .collect()
}

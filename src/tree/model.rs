use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{GraphWalkError, Result};
use crate::types::{mint_node_id, ChildSide, Position};

/// A node in a binary tree.
///
/// `value` is an opaque payload for the presentation layer. Parent and child
/// links are kept mutually consistent by the model's operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub value: String,
    pub position: Position,
    pub left: Option<String>,
    pub right: Option<String>,
    pub parent: Option<String>,
}

/// A binary tree keyed by node id.
///
/// `root` is `None` iff the map is empty. Detached subtrees may exist after a
/// removal; they stay reachable through the map even when the root traversals
/// do not reach them.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    nodes: HashMap<String, TreeNode>,
    root: Option<String>,
    next_seq: u64,
}

impl TreeModel {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fifteen-node demo tree (`A` through `O`) an interactive front end
    /// seeds with.
    pub fn sample() -> Self {
        let layout: [(&str, Option<&str>, Option<&str>, Option<&str>, f64, f64); 15] = [
            ("A", Some("B"), Some("C"), None, 500.0, 50.0),
            ("B", Some("D"), Some("E"), Some("A"), 300.0, 120.0),
            ("C", Some("F"), Some("G"), Some("A"), 700.0, 120.0),
            ("D", Some("H"), Some("I"), Some("B"), 200.0, 190.0),
            ("E", Some("J"), Some("K"), Some("B"), 400.0, 190.0),
            ("F", Some("L"), Some("M"), Some("C"), 600.0, 190.0),
            ("G", Some("N"), Some("O"), Some("C"), 800.0, 190.0),
            ("H", None, None, Some("D"), 150.0, 260.0),
            ("I", None, None, Some("D"), 250.0, 260.0),
            ("J", None, None, Some("E"), 350.0, 260.0),
            ("K", None, None, Some("E"), 450.0, 260.0),
            ("L", None, None, Some("F"), 550.0, 260.0),
            ("M", None, None, Some("F"), 650.0, 260.0),
            ("N", None, None, Some("G"), 750.0, 260.0),
            ("O", None, None, Some("G"), 850.0, 260.0),
        ];
        let mut nodes = HashMap::new();
        for (id, left, right, parent, x, y) in layout {
            nodes.insert(
                id.to_string(),
                TreeNode {
                    id: id.to_string(),
                    value: id.to_string(),
                    position: Position::new(x, y),
                    left: left.map(String::from),
                    right: right.map(String::from),
                    parent: parent.map(String::from),
                },
            );
        }
        Self {
            nodes,
            root: Some("A".to_string()),
            next_seq: 0,
        }
    }

    /// Inserts a parentless, childless node and returns its freshly minted id.
    ///
    /// The first node added to an empty tree becomes the root.
    pub fn add_node(&mut self, value: &str, position: Position) -> String {
        let id = loop {
            let candidate = mint_node_id(value, self.next_seq);
            self.next_seq += 1;
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        self.nodes.insert(
            id.clone(),
            TreeNode {
                id: id.clone(),
                value: value.to_string(),
                position,
                left: None,
                right: None,
                parent: None,
            },
        );
        if self.root.is_none() {
            self.root = Some(id.clone());
        }
        id
    }

    /// Removes a node, detaching it from its parent and orphaning its
    /// children.
    ///
    /// Children are not deleted; they become roots of detached subtrees. If
    /// the removed node was the root, an arbitrary remaining node takes over
    /// (or the root clears when the tree empties).
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        let Some(removed) = self.nodes.remove(id) else {
            return Err(GraphWalkError::NotFound { id: id.to_string() });
        };
        if let Some(parent_id) = &removed.parent {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                if parent.left.as_deref() == Some(id) {
                    parent.left = None;
                }
                if parent.right.as_deref() == Some(id) {
                    parent.right = None;
                }
            }
        }
        for child_id in removed.left.iter().chain(removed.right.iter()) {
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.parent = None;
            }
        }
        if self.root.as_deref() == Some(id) {
            self.root = self.nodes.keys().next().cloned();
        }
        Ok(())
    }

    /// Attaches `child_id` as the `side` child of `parent_id`.
    ///
    /// The child is detached from any current parent first, and a node
    /// already occupying the slot is displaced (its parent link cleared).
    /// Fails with `WouldCycle` if `child_id` is an ancestor of `parent_id`,
    /// leaving the tree unchanged.
    pub fn connect(&mut self, parent_id: &str, child_id: &str, side: ChildSide) -> Result<()> {
        if !self.nodes.contains_key(parent_id) {
            return Err(GraphWalkError::NotFound {
                id: parent_id.to_string(),
            });
        }
        if !self.nodes.contains_key(child_id) {
            return Err(GraphWalkError::NotFound {
                id: child_id.to_string(),
            });
        }
        if parent_id == child_id {
            return Err(GraphWalkError::SelfConnection {
                id: parent_id.to_string(),
            });
        }
        if self.is_ancestor(child_id, parent_id) {
            return Err(GraphWalkError::WouldCycle {
                parent: parent_id.to_string(),
                child: child_id.to_string(),
            });
        }

        // Detach the child from its current parent, if any.
        let old_parent = self.nodes.get(child_id).and_then(|n| n.parent.clone());
        if let Some(old_parent_id) = old_parent {
            if let Some(old_parent) = self.nodes.get_mut(&old_parent_id) {
                if old_parent.left.as_deref() == Some(child_id) {
                    old_parent.left = None;
                }
                if old_parent.right.as_deref() == Some(child_id) {
                    old_parent.right = None;
                }
            }
        }

        // Displace whatever currently occupies the target slot.
        let displaced = self.nodes.get(parent_id).and_then(|n| match side {
            ChildSide::Left => n.left.clone(),
            ChildSide::Right => n.right.clone(),
        });
        if let Some(displaced_id) = displaced {
            if let Some(displaced) = self.nodes.get_mut(&displaced_id) {
                displaced.parent = None;
            }
        }

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            match side {
                ChildSide::Left => parent.left = Some(child_id.to_string()),
                ChildSide::Right => parent.right = Some(child_id.to_string()),
            }
        }
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id.to_string());
        }
        Ok(())
    }

    /// Repositions a node. The position is presentation data only.
    pub fn set_position(&mut self, id: &str, position: Position) -> Result<()> {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                Ok(())
            }
            None => Err(GraphWalkError::NotFound { id: id.to_string() }),
        }
    }

    /// Retrieves a node by id.
    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// The current root id, `None` iff the tree is empty.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Returns `true` if a node with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node ids in sorted order (map iteration order is unspecified).
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds a model from snapshot parts, validating every structural
    /// invariant.
    pub fn from_parts(nodes: Vec<TreeNode>, root: Option<String>) -> Result<Self> {
        let mut map = HashMap::new();
        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(GraphWalkError::DuplicateId { id });
            }
        }
        let next_seq = map.len() as u64;
        let model = Self {
            nodes: map,
            root,
            next_seq,
        };
        model.validate()?;
        Ok(model)
    }

    /// Snapshot parts: nodes sorted by id plus the root id.
    pub fn to_parts(&self) -> (Vec<TreeNode>, Option<String>) {
        let mut nodes: Vec<TreeNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        (nodes, self.root.clone())
    }

    /// Checks every structural invariant, returning the first violation.
    ///
    /// Mutation operations maintain these on their own; this is the guard for
    /// data loaded from a snapshot and for tests.
    pub fn validate(&self) -> Result<()> {
        match &self.root {
            Some(root) => {
                if !self.nodes.contains_key(root) {
                    return Err(GraphWalkError::NotFound { id: root.clone() });
                }
            }
            None => {
                if !self.nodes.is_empty() {
                    return Err(GraphWalkError::Snapshot {
                        message: "non-empty tree has no root".to_string(),
                    });
                }
            }
        }

        // Each node may be referenced as a child in at most one slot, and
        // that slot must agree with the child's parent back-reference.
        let mut child_refs: HashMap<&str, &str> = HashMap::new();
        for (key, node) in &self.nodes {
            if *key != node.id {
                return Err(GraphWalkError::Snapshot {
                    message: format!("map key '{}' does not match node id '{}'", key, node.id),
                });
            }
            for child in node.left.iter().chain(node.right.iter()) {
                if child == key {
                    return Err(GraphWalkError::SelfConnection { id: key.clone() });
                }
                if !self.nodes.contains_key(child) {
                    return Err(GraphWalkError::NotFound { id: child.clone() });
                }
                if child_refs.insert(child.as_str(), key.as_str()).is_some() {
                    return Err(GraphWalkError::Snapshot {
                        message: format!("node '{}' has more than one parent", child),
                    });
                }
            }
        }
        for (key, node) in &self.nodes {
            let referrer = child_refs.get(key.as_str()).copied();
            match (&node.parent, referrer) {
                (Some(parent), Some(referrer)) if parent.as_str() == referrer => {}
                (None, None) => {}
                _ => {
                    return Err(GraphWalkError::Snapshot {
                        message: format!(
                            "parent link of '{}' does not match any child slot",
                            key
                        ),
                    });
                }
            }
        }

        // Acyclicity: no parent chain may revisit a node.
        for key in self.nodes.keys() {
            let mut hops = 0;
            let mut cursor = self.nodes.get(key).and_then(|n| n.parent.as_deref());
            while let Some(current) = cursor {
                hops += 1;
                if current == key || hops > self.nodes.len() {
                    return Err(GraphWalkError::Snapshot {
                        message: format!("parent chain of '{}' forms a cycle", key),
                    });
                }
                cursor = self.nodes.get(current).and_then(|n| n.parent.as_deref());
            }
        }
        Ok(())
    }

    /// Returns `true` if `ancestor_id` appears on the parent chain above
    /// `node_id`.
    fn is_ancestor(&self, ancestor_id: &str, node_id: &str) -> bool {
        let mut cursor = self.nodes.get(node_id).and_then(|n| n.parent.as_deref());
        while let Some(current) = cursor {
            if current == ancestor_id {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent.as_deref());
        }
        false
    }
}

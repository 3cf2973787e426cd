use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{GraphWalkError, Result};
use crate::types::Position;

/// A node in an undirected graph.
///
/// `neighbors` is ordered: traversal algorithms expand neighbors in exactly
/// this order, so insertion order is semantically significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub neighbors: Vec<String>,
}

/// An undirected edge.
///
/// `from`/`to` record insertion orientation only; the edge is compared as an
/// unordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    /// Returns `true` if this edge connects `a` and `b` in either orientation.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Outcome of a `toggle_edge` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeToggle {
    Added,
    Removed,
}

/// An undirected graph keyed by node id.
///
/// The model owns its nodes and edges exclusively; all mutation goes through
/// the operations below, each of which either fully succeeds with every
/// invariant restored or fails leaving the structure unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: HashMap<String, GraphNode>,
    edges: Vec<Edge>,
}

impl GraphModel {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The six-node demo graph an interactive front end seeds with.
    pub fn sample() -> Self {
        let positions = [
            ("A", 200.0, 100.0),
            ("B", 100.0, 200.0),
            ("C", 300.0, 200.0),
            ("D", 50.0, 300.0),
            ("E", 150.0, 300.0),
            ("F", 250.0, 300.0),
        ];
        let mut nodes = HashMap::new();
        for (id, x, y) in positions {
            nodes.insert(
                id.to_string(),
                GraphNode {
                    id: id.to_string(),
                    position: Position::new(x, y),
                    neighbors: Vec::new(),
                },
            );
        }
        let mut model = Self {
            nodes,
            edges: Vec::new(),
        };
        for (a, b) in [
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("B", "E"),
            ("C", "F"),
            ("E", "F"),
        ] {
            // Endpoints exist by construction, so this cannot fail.
            let _ = model.toggle_edge(a, b);
        }
        model
    }

    /// Inserts a new isolated node.
    pub fn add_node(&mut self, id: &str, position: Position) -> Result<()> {
        if self.nodes.contains_key(id) {
            return Err(GraphWalkError::DuplicateId { id: id.to_string() });
        }
        self.nodes.insert(
            id.to_string(),
            GraphNode {
                id: id.to_string(),
                position,
                neighbors: Vec::new(),
            },
        );
        Ok(())
    }

    /// Removes a node together with every edge touching it.
    ///
    /// After this returns, no remaining neighbor list or edge refers to `id`.
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        if self.nodes.remove(id).is_none() {
            return Err(GraphWalkError::NotFound { id: id.to_string() });
        }
        for node in self.nodes.values_mut() {
            node.neighbors.retain(|n| n != id);
        }
        self.edges.retain(|e| e.from != id && e.to != id);
        Ok(())
    }

    /// Adds the edge `a`–`b` if absent, removes it if present.
    ///
    /// Neighbor lists and the edge set are updated symmetrically; calling
    /// twice from the same state returns the graph to that state.
    pub fn toggle_edge(&mut self, a: &str, b: &str) -> Result<EdgeToggle> {
        if !self.nodes.contains_key(a) {
            return Err(GraphWalkError::NotFound { id: a.to_string() });
        }
        if !self.nodes.contains_key(b) {
            return Err(GraphWalkError::NotFound { id: b.to_string() });
        }
        if a == b {
            return Err(GraphWalkError::SelfLoop { id: a.to_string() });
        }

        if let Some(idx) = self.edges.iter().position(|e| e.connects(a, b)) {
            self.edges.remove(idx);
            if let Some(node) = self.nodes.get_mut(a) {
                node.neighbors.retain(|n| n != b);
            }
            if let Some(node) = self.nodes.get_mut(b) {
                node.neighbors.retain(|n| n != a);
            }
            Ok(EdgeToggle::Removed)
        } else {
            if let Some(node) = self.nodes.get_mut(a) {
                if !node.neighbors.iter().any(|n| n == b) {
                    node.neighbors.push(b.to_string());
                }
            }
            if let Some(node) = self.nodes.get_mut(b) {
                if !node.neighbors.iter().any(|n| n == a) {
                    node.neighbors.push(a.to_string());
                }
            }
            self.edges.push(Edge {
                from: a.to_string(),
                to: b.to_string(),
            });
            Ok(EdgeToggle::Added)
        }
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
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
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

    /// The edge set, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds a model from snapshot parts, validating every structural
    /// invariant.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<Edge>) -> Result<Self> {
        let mut map = HashMap::new();
        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(GraphWalkError::DuplicateId { id });
            }
        }
        let model = Self { nodes: map, edges };
        model.validate()?;
        Ok(model)
    }

    /// Snapshot parts: nodes sorted by id plus the edge list in insertion
    /// order.
    pub fn to_parts(&self) -> (Vec<GraphNode>, Vec<Edge>) {
        let mut nodes: Vec<GraphNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        (nodes, self.edges.clone())
    }

    /// Checks every structural invariant, returning the first violation.
    ///
    /// Mutation operations maintain these on their own; this is the guard for
    /// data loaded from a snapshot and for tests.
    pub fn validate(&self) -> Result<()> {
        for (key, node) in &self.nodes {
            if *key != node.id {
                return Err(GraphWalkError::Snapshot {
                    message: format!("map key '{}' does not match node id '{}'", key, node.id),
                });
            }
            for (i, neighbor) in node.neighbors.iter().enumerate() {
                if neighbor == key {
                    return Err(GraphWalkError::SelfLoop { id: key.clone() });
                }
                if node.neighbors[..i].contains(neighbor) {
                    return Err(GraphWalkError::Snapshot {
                        message: format!("'{}' lists neighbor '{}' twice", key, neighbor),
                    });
                }
                let Some(other) = self.nodes.get(neighbor) else {
                    return Err(GraphWalkError::NotFound {
                        id: neighbor.clone(),
                    });
                };
                if !other.neighbors.iter().any(|n| n == key) {
                    return Err(GraphWalkError::Snapshot {
                        message: format!(
                            "neighbor lists are not symmetric between '{}' and '{}'",
                            key, neighbor
                        ),
                    });
                }
                if !self.edges.iter().any(|e| e.connects(key, neighbor)) {
                    return Err(GraphWalkError::Snapshot {
                        message: format!("no edge backs the neighbor pair '{}'–'{}'", key, neighbor),
                    });
                }
            }
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.from == edge.to {
                return Err(GraphWalkError::SelfLoop {
                    id: edge.from.clone(),
                });
            }
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(GraphWalkError::NotFound {
                        id: endpoint.clone(),
                    });
                }
            }
            if self.edges[..i].iter().any(|e| e.connects(&edge.from, &edge.to)) {
                return Err(GraphWalkError::Snapshot {
                    message: format!("duplicate edge '{}'–'{}'", edge.from, edge.to),
                });
            }
            let from_lists = self
                .nodes
                .get(&edge.from)
                .map(|n| n.neighbors.iter().any(|x| x == &edge.to))
                .unwrap_or(false);
            if !from_lists {
                return Err(GraphWalkError::Snapshot {
                    message: format!(
                        "edge '{}'–'{}' is missing from the neighbor lists",
                        edge.from, edge.to
                    ),
                });
            }
        }
        Ok(())
    }
}

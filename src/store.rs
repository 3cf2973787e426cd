use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::graph::model::{Edge, GraphModel, GraphNode};
use crate::tree::model::{TreeModel, TreeNode};

/// Plain-data form of a named graph, suitable for any key-value storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub name: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Captures a model under `name`, with nodes sorted by id for
    /// determinism.
    pub fn capture(name: &str, model: &GraphModel) -> Self {
        let (nodes, edges) = model.to_parts();
        Self {
            name: name.to_string(),
            nodes,
            edges,
        }
    }

    /// Rebuilds the model, validating every structural invariant.
    pub fn to_model(&self) -> Result<GraphModel> {
        GraphModel::from_parts(self.nodes.clone(), self.edges.clone())
    }
}

/// Plain-data form of a named binary tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub name: String,
    pub nodes: Vec<TreeNode>,
    pub root: Option<String>,
}

impl TreeSnapshot {
    /// Captures a model under `name`, with nodes sorted by id for
    /// determinism.
    pub fn capture(name: &str, model: &TreeModel) -> Self {
        let (nodes, root) = model.to_parts();
        Self {
            name: name.to_string(),
            nodes,
            root,
        }
    }

    /// Rebuilds the model, validating every structural invariant.
    pub fn to_model(&self) -> Result<TreeModel> {
        TreeModel::from_parts(self.nodes.clone(), self.root.clone())
    }
}

/// Durable key-value storage for named snapshots.
///
/// Implemented by the embedding application (browser-style local storage, a
/// file, a network service); the core only defines the contract and the JSON
/// value shape stored under each key.
pub trait SnapshotStore {
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn delete(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

const GRAPH_PREFIX: &str = "graph/";
const TREE_PREFIX: &str = "tree/";

fn graph_key(name: &str) -> String {
    format!("{}{}", GRAPH_PREFIX, name)
}

fn tree_key(name: &str) -> String {
    format!("{}{}", TREE_PREFIX, name)
}

/// Serializes and stores a graph snapshot under its name.
pub fn save_graph(store: &mut dyn SnapshotStore, snapshot: &GraphSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    store.put(&graph_key(&snapshot.name), &json)
}

/// Loads a graph snapshot by name, `None` if absent.
pub fn load_graph(store: &dyn SnapshotStore, name: &str) -> Result<Option<GraphSnapshot>> {
    match store.get(&graph_key(name))? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Deletes a stored graph snapshot by name.
pub fn delete_graph(store: &mut dyn SnapshotStore, name: &str) -> Result<()> {
    store.delete(&graph_key(name))
}

/// Names of all stored graph snapshots, sorted.
pub fn list_graphs(store: &dyn SnapshotStore) -> Result<Vec<String>> {
    list_with_prefix(store, GRAPH_PREFIX)
}

/// Serializes and stores a tree snapshot under its name.
pub fn save_tree(store: &mut dyn SnapshotStore, snapshot: &TreeSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    store.put(&tree_key(&snapshot.name), &json)
}

/// Loads a tree snapshot by name, `None` if absent.
pub fn load_tree(store: &dyn SnapshotStore, name: &str) -> Result<Option<TreeSnapshot>> {
    match store.get(&tree_key(name))? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Deletes a stored tree snapshot by name.
pub fn delete_tree(store: &mut dyn SnapshotStore, name: &str) -> Result<()> {
    store.delete(&tree_key(name))
}

/// Names of all stored tree snapshots, sorted.
pub fn list_trees(store: &dyn SnapshotStore) -> Result<Vec<String>> {
    list_with_prefix(store, TREE_PREFIX)
}

fn list_with_prefix(store: &dyn SnapshotStore, prefix: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = store
        .keys()?
        .into_iter()
        .filter_map(|k| k.strip_prefix(prefix).map(String::from))
        .collect();
    names.sort();
    Ok(names)
}

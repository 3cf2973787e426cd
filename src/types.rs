use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A 2D canvas position.
///
/// Carried through models and snapshots for the presentation layer; the
/// engine never interprets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-node visualization state during a scheduled run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitState {
    #[default]
    Unvisited,
    /// Discovered and waiting in the frontier (queue or stack).
    Visiting,
    /// The node being finalized by the current step.
    Current,
    Visited,
}

#[allow(clippy::should_implement_trait)]
impl VisitState {
    /// Returns the string representation of this visit state.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitState::Unvisited => "unvisited",
            VisitState::Visiting => "visiting",
            VisitState::Current => "current",
            VisitState::Visited => "visited",
        }
    }

    /// Parses a string into a `VisitState`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<VisitState> {
        match s {
            "unvisited" => Some(VisitState::Unvisited),
            "visiting" => Some(VisitState::Visiting),
            "current" => Some(VisitState::Current),
            "visited" => Some(VisitState::Visited),
            _ => None,
        }
    }
}

/// What a traversal step did to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// A node was taken out of the frontier and finalized.
    Visit,
    /// A node was inserted into the frontier.
    Enqueue,
}

/// One unit of traversal progress: a node paired with the frontier snapshot
/// observed at that moment.
///
/// The full ordered sequence is computed once per traversal invocation and
/// consumed read-only by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalStep {
    pub node_id: String,
    pub kind: StepKind,
    /// Pending node ids after this step, in frontier order.
    pub frontier: Vec<String>,
    pub is_final: bool,
}

/// Graph traversal algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
}

#[allow(clippy::should_implement_trait)]
impl GraphAlgorithm {
    /// Returns the string representation of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "bfs",
            GraphAlgorithm::Dfs => "dfs",
        }
    }

    /// Parses a string into a `GraphAlgorithm`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<GraphAlgorithm> {
        match s {
            "bfs" => Some(GraphAlgorithm::Bfs),
            "dfs" => Some(GraphAlgorithm::Dfs),
            _ => None,
        }
    }
}

/// Binary-tree traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeTraversal {
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
}

#[allow(clippy::should_implement_trait)]
impl TreeTraversal {
    /// Returns the string representation of this traversal order.
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeTraversal::Preorder => "preorder",
            TreeTraversal::Inorder => "inorder",
            TreeTraversal::Postorder => "postorder",
            TreeTraversal::LevelOrder => "levelorder",
        }
    }

    /// Parses a string into a `TreeTraversal`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<TreeTraversal> {
        match s {
            "preorder" => Some(TreeTraversal::Preorder),
            "inorder" => Some(TreeTraversal::Inorder),
            "postorder" => Some(TreeTraversal::Postorder),
            "levelorder" => Some(TreeTraversal::LevelOrder),
            _ => None,
        }
    }
}

/// Which child slot of a tree node a connection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildSide {
    Left,
    Right,
}

#[allow(clippy::should_implement_trait)]
impl ChildSide {
    /// Returns the string representation of this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildSide::Left => "left",
            ChildSide::Right => "right",
        }
    }

    /// Parses a string into a `ChildSide`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<ChildSide> {
        match s {
            "left" => Some(ChildSide::Left),
            "right" => Some(ChildSide::Right),
            _ => None,
        }
    }
}

/// Mints a node id from a value and an insertion sequence number.
///
/// The ID format is `"node:16hexchars"` where the hex portion is the first 16
/// characters of the SHA-256 hash of the input components.
pub fn mint_node_id(value: &str, seq: u64) -> String {
    let input = format!("{}:{}", value, seq);
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hash = hasher.finalize();
    let hex_str = hex::encode(hash);
    format!("node:{}", &hex_str[..16])
}

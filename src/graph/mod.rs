/// The owned, mutable graph structure the traversal algorithms read.
pub mod model;

/// Step-sequence computation for graph traversals.
pub mod traversal;

pub use model::{Edge, EdgeToggle, GraphModel, GraphNode};
pub use traversal::{bfs, compute_graph_steps, dfs};

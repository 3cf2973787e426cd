use thiserror::Error;

/// Errors that can occur during structure mutation, traversal, or playback.
///
/// All variants are local, recoverable conditions reported synchronously to
/// the caller; a failed operation leaves the structure unchanged.
#[derive(Error, Debug)]
pub enum GraphWalkError {
    #[error("duplicate node id '{id}'")]
    DuplicateId { id: String },

    #[error("node '{id}' not found")]
    NotFound { id: String },

    #[error("self-loop edge on '{id}' is not allowed")]
    SelfLoop { id: String },

    #[error("cannot connect node '{id}' to itself")]
    SelfConnection { id: String },

    #[error("connecting '{child}' under '{parent}' would create a cycle")]
    WouldCycle { parent: String, child: String },

    #[error("start node '{id}' is not present in the structure")]
    InvalidStartNode { id: String },

    #[error("scheduler is already running")]
    AlreadyRunning,

    #[error("structure is read-only while a traversal is running")]
    TraversalActive,

    #[error("snapshot error: {message}")]
    Snapshot { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `GraphWalkError`.
pub type Result<T> = std::result::Result<T, GraphWalkError>;

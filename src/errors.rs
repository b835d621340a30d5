use thiserror::Error;


/// Errors raised while building a graph or running a search
///
/// "No path to the goal" is not an error, searches report it through
/// `SearchResult::found`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start, goal or edge endpoint is not registered in the graph
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Edge weight is negative or not a number
    #[error("invalid edge weight: {0}")]
    InvalidWeight(String),

    /// Pop or peek on an empty priority queue
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Node re-registered on a strict graph
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// A* invoked without a heuristic
    #[error("A* search requires a heuristic")]
    MissingHeuristic,

    /// Path cost exceeded the largest value of the cost type
    #[error("path cost overflow reaching node: {0}")]
    CostOverflow(String),

    /// Algorithm or heuristic name that could not be parsed
    #[error("unrecognized name: {0}")]
    UnknownName(String),
}

impl From<strum::ParseError> for SearchError {
    fn from(error: strum::ParseError) -> Self {
        SearchError::UnknownName(error.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SearchError>;

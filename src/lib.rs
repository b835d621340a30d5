//! Weighted graph plus breadth-first, depth-first, Dijkstra and A* search.
//!
//! Build a [`Graph`], then run one of the algorithms from a start node to a
//! goal node. Every algorithm returns a [`SearchResult`]; an unreachable goal
//! is `found == false`, only caller mistakes (unknown nodes, bad weights, A*
//! without a heuristic) are errors.
//!
//! ```
//! use pathsearch::{search, Algorithm, Graph, SearchOptions};
//!
//! let mut graph = Graph::new(false);
//! graph.add_edge("A", "B", 5).unwrap();
//! graph.add_edge("B", "C", 3).unwrap();
//! graph.add_edge("A", "C", 10).unwrap();
//!
//! let result = search(&graph, &"A", &"C", Algorithm::Dijkstra, &SearchOptions::new()).unwrap();
//! assert_eq!(result.path, vec!["A", "B", "C"]);
//! assert_eq!(result.cost, 8);
//! ```
//!
//! Searches never mutate the graph and keep no state between calls. The
//! crate does no locking; sharing a graph between threads is fine as long as
//! nothing mutates it.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod priority_queue;

pub use collections::FxIndexMap;
pub use errors::{Result, SearchError};
pub use geometry::Point;
pub use graph::{Cost, Graph, NodePolicy};
pub use graph_algos::{
    a_star::{a_star, a_star_path, a_star_with, Heuristic, HeuristicKind, NodePositions},
    bfs::{bfs_path, breadth_first_search},
    dfs::{depth_first_search, dfs_path},
    dijkstra::{dijkstra, dijkstra_path, shortest_distances},
    options::SearchOptions,
    search, Algorithm, SearchResult,
};
pub use priority_queue::PriorityQueue;

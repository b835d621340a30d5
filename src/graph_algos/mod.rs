pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod a_star;
pub mod options;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;
use crate::errors::Result;
use crate::graph::{Cost, Graph};
use options::SearchOptions;

use std::{fmt::Debug, hash::Hash};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map, usize::MAX for the start node
/// - cost is the total cost to reach this node from the start
pub(crate) type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;


/// Search algorithm selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
}


/// Outcome of a single search
/// `path` is empty and `cost` is zero unless `found` is true
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult<N, C> {
    pub found: bool,
    pub path: Vec<N>, // start to goal
    pub cost: C, // edge weight sum, or edge count for unweighted searches
    pub nodes_explored: usize, // nodes popped from the frontier and expanded
    pub visited: Vec<N>, // expansion order
    pub truncated: bool, // stopped by max_nodes before reaching the goal
}

impl<N: Clone, C: Cost> SearchResult<N, C> {

    /// Goal was expanded, rebuild the path from the predecessor map
    pub(crate) fn reached(node_map: &GraphNodeMap<N, C>, goal_index: usize, visited: Vec<N>) -> Self {
        Self {
            found: true,
            path: shortest_path(node_map, goal_index),
            cost: node_map[goal_index].1,
            nodes_explored: visited.len(),
            visited,
            truncated: false,
        }
    }

    pub(crate) fn unreached(visited: Vec<N>, truncated: bool) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            cost: C::zero(),
            nodes_explored: visited.len(),
            visited,
            truncated,
        }
    }

    /// Path if the goal was found
    pub fn into_path(self) -> Option<Vec<N>> {
        self.found.then_some(self.path)
    }
}


/// Run one search algorithm from start to goal
///
/// Fails with UnknownNode when start or goal is not in the graph, and with
/// MissingHeuristic when A* is selected without `options.heuristic`.
/// An unreachable goal is reported as `found == false`, not as an error.
pub fn search<N, C>(
    graph: &Graph<N, C>,
    start: &N,
    goal: &N,
    algorithm: Algorithm,
    options: &SearchOptions<'_, N, C>,
) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    match algorithm {
        Algorithm::BreadthFirst => bfs::breadth_first_search(graph, start, goal, options),
        Algorithm::DepthFirst => dfs::depth_first_search(graph, start, goal, options),
        Algorithm::Dijkstra => dijkstra::dijkstra(graph, start, goal, options),
        Algorithm::AStar => a_star::a_star(graph, start, goal, options),
    }
}

/// Debug summary emitted by every algorithm when it returns
fn log_finished<N, C: Debug>(algorithm: Algorithm, result: &SearchResult<N, C>) {
    debug!(
        %algorithm,
        found = result.found,
        cost = ?result.cost,
        nodes_explored = result.nodes_explored,
        truncated = result.truncated,
        "search finished"
    );
}

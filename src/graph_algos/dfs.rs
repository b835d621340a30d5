use super::options::SearchOptions;
use super::{log_finished, Algorithm, GraphNodeMap, SearchResult};
use crate::collections::FxIndexMap;
use crate::errors::Result;
use crate::graph::{Cost, Graph};

use std::{fmt::Debug, hash::Hash};
use tracing::{debug, trace, warn};


/// Depth-first search
/// https://en.wikipedia.org/wiki/Depth-first_search
///
/// Follows one branch to its end before backtracking. Returns a path if one
/// exists, not necessarily the shortest. Neighbors are tried in the order the
/// graph stores them, so the same graph always yields the same path.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
pub fn depth_first_search<N, C>(graph: &Graph<N, C>, start: &N, goal: &N, options: &SearchOptions<'_, N, C>) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    graph.require_node(start)?;
    graph.require_node(goal)?;
    debug!("starting depth-first search");

    // Expanded nodes, a node enters the map when it is popped for the first time
    // The tuple contains (parent_index, cost from start along the tree edges)
    let mut node_map: GraphNodeMap<N, C> = FxIndexMap::default();

    // LIFO frontier of (node, parent index, cost from start)
    // A node may be on the stack several times, only the first pop counts
    let mut stack: Vec<(N, usize, C)> = vec![(start.clone(), usize::MAX, C::zero())];

    let mut visited: Vec<N> = Vec::new();
    let mut truncated = false;

    while let Some((node, parent_index, cost)) = stack.pop() {

        if node_map.contains_key(&node) {
            continue;
        }

        if options.limit_reached(visited.len()) {
            warn!(max_nodes = ?options.max_nodes, "node budget exhausted before reaching the goal");
            truncated = true;
            break;
        }

        trace!(?node, "expanding");
        let index = node_map.insert_full(node.clone(), (parent_index, cost)).0;
        visited.push(node.clone());

        if node == *goal {
            let result = SearchResult::reached(&node_map, index, visited);
            log_finished(Algorithm::DepthFirst, &result);
            return Ok(result);
        }

        // push in reverse so the first stored neighbor is popped first
        for (neighbor, weight) in graph.neighbors(&node)?.iter().rev() {
            if !node_map.contains_key(neighbor) {
                stack.push((neighbor.clone(), index, options.step_cost(cost, *weight, neighbor)?));
            }
        }
    }

    let result = SearchResult::unreached(visited, truncated);
    log_finished(Algorithm::DepthFirst, &result);
    Ok(result)
}

/// DFS path with default options, None if the goal is unreachable
pub fn dfs_path<N, C>(graph: &Graph<N, C>, start: &N, goal: &N) -> Result<Option<Vec<N>>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let result = depth_first_search(graph, start, goal, &SearchOptions::default())?;
    Ok(result.into_path())
}

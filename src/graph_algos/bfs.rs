use super::options::SearchOptions;
use super::{log_finished, Algorithm, GraphNodeMap, SearchResult};
use crate::collections::FxIndexMap;
use crate::errors::Result;
use crate::graph::{Cost, Graph};

use std::{collections::VecDeque, fmt::Debug, hash::Hash};
use indexmap::map::Entry::Vacant;
use tracing::{debug, trace, warn};


/// Breadth-first search
/// https://en.wikipedia.org/wiki/Breadth-first_search
///
/// Expands nodes level by level, so the returned path has the fewest edges of
/// any start -> goal path. Edge weights never affect the order; with
/// `options.weighted` they only feed the reported cost.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
pub fn breadth_first_search<N, C>(graph: &Graph<N, C>, start: &N, goal: &N, options: &SearchOptions<'_, N, C>) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    graph.require_node(start)?;
    graph.require_node(goal)?;
    debug!("starting breadth-first search");

    // Discovered nodes, a node is marked when it is queued so it is never queued twice
    // The tuple contains (parent_index, cost from start along the discovery edges)
    let mut node_map: GraphNodeMap<N, C> = FxIndexMap::default();
    let start_index = node_map.insert_full(start.clone(), (usize::MAX, C::zero())).0;

    // FIFO frontier of (node, index in node_map)
    let mut frontier: VecDeque<(N, usize)> = VecDeque::from([(start.clone(), start_index)]);

    let mut visited: Vec<N> = Vec::new();
    let mut truncated = false;

    while let Some((node, index)) = frontier.pop_front() {

        if options.limit_reached(visited.len()) {
            warn!(max_nodes = ?options.max_nodes, "node budget exhausted before reaching the goal");
            truncated = true;
            break;
        }

        trace!(?node, "expanding");
        visited.push(node.clone());

        if node == *goal {
            let result = SearchResult::reached(&node_map, index, visited);
            log_finished(Algorithm::BreadthFirst, &result);
            return Ok(result);
        }

        let cost = node_map[index].1;
        for (neighbor, weight) in graph.neighbors(&node)? {
            if let Vacant(e) = node_map.entry(neighbor.clone()) {
                let neighbor_index = e.index();
                e.insert((index, options.step_cost(cost, *weight, neighbor)?));
                frontier.push_back((neighbor.clone(), neighbor_index));
            }
        }
    }

    let result = SearchResult::unreached(visited, truncated);
    log_finished(Algorithm::BreadthFirst, &result);
    Ok(result)
}

/// BFS path with default options, None if the goal is unreachable
pub fn bfs_path<N, C>(graph: &Graph<N, C>, start: &N, goal: &N) -> Result<Option<Vec<N>>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let result = breadth_first_search(graph, start, goal, &SearchOptions::default())?;
    Ok(result.into_path())
}

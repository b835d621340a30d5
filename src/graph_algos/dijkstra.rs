use super::options::SearchOptions;
use super::{log_finished, Algorithm, GraphNodeMap, SearchResult};
use crate::collections::FxIndexMap;
use crate::errors::{Result, SearchError};
use crate::graph::{Cost, Graph};
use crate::priority_queue::PriorityQueue;

use std::{fmt::Debug, hash::Hash};
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::{debug, trace, warn};


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until the goal is expanded
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
pub fn dijkstra<N, C>(graph: &Graph<N, C>, start: &N, goal: &N, options: &SearchOptions<'_, N, C>) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    graph.require_node(start)?;
    graph.require_node(goal)?;
    debug!("starting Dijkstra search");

    // Build the graph - terminates when the goal is met
    let exploration = explore(graph, start, Some(goal), |_| C::zero(), options)?;
    let result = exploration.into_result();

    log_finished(Algorithm::Dijkstra, &result);
    Ok(result)
}

/// Shortest path with default options, None if the goal is unreachable
pub fn dijkstra_path<N, C>(graph: &Graph<N, C>, start: &N, goal: &N) -> Result<Option<Vec<N>>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let result = dijkstra(graph, start, goal, &SearchOptions::default())?;
    Ok(result.into_path())
}

/// Returns the shortest distance to every node reachable from start, in the order the nodes were finalized
/// With `max_nodes` set only the first max_nodes finalized nodes are returned
pub fn shortest_distances<N, C>(graph: &Graph<N, C>, start: &N, options: &SearchOptions<'_, N, C>) -> Result<FxIndexMap<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    graph.require_node(start)?;

    // No goal - runs until every reachable node is expanded
    let exploration = explore(graph, start, None, |_| C::zero(), options)?;

    Ok(exploration.visited
        .into_iter()
        .map(|node| {
            let cost = exploration.node_map[&node].1;
            (node, cost)
        })
        .collect())
}


/// State left behind by a best-first traversal
pub(crate) struct Exploration<N, C> {
    pub node_map: GraphNodeMap<N, C>, // best known (parent_index, cost) per discovered node
    pub goal_index: Option<usize>,
    pub visited: Vec<N>, // expansion order
    pub truncated: bool,
}

impl<N: Clone, C: Cost> Exploration<N, C> {

    pub fn into_result(self) -> SearchResult<N, C> {
        match self.goal_index {
            Some(goal_index) => SearchResult::reached(&self.node_map, goal_index, self.visited),
            None => SearchResult::unreached(self.visited, self.truncated),
        }
    }
}


/// Traverses the graph best-first, shared by Dijkstra and A*
/// Entries are ordered by cost + heuristic_fn(node); Dijkstra passes a zero heuristic
/// Stops when the goal is expanded, the frontier empties, or the node budget runs out
///
/// There is no decrease-key: an improved node is pushed again and the older
/// entry is skipped when popped because its cost is above the best known cost.
/// With an admissible but inconsistent heuristic a node can be expanded more
/// than once, so `visited` may list it twice.
///
/// Edges whose cost no longer fits in `C` are skipped. If that leaves the goal
/// (or, without a goal, some node) undiscovered the search fails with CostOverflow.
pub(crate) fn explore<N, C, H>(
    graph: &Graph<N, C>,
    start: &N,
    goal: Option<&N>,
    heuristic_fn: H,
    options: &SearchOptions<'_, N, C>,
) -> Result<Exploration<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
    H: Fn(&N) -> C,
{
    // Open List
    // Nodes that need to be evaluated, priority is cost + heuristic
    // Payload is (node, index in node_map, cost from start when queued)
    let mut open_list: PriorityQueue<C, (N, usize, C)> = PriorityQueue::new();

    // Discovered nodes with their best cost so far
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in node_map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut node_map: GraphNodeMap<N, C> = FxIndexMap::default();

    let start_index = node_map.insert_full(start.clone(), (usize::MAX, C::zero())).0;
    open_list.push(heuristic_fn(start), (start.clone(), start_index, C::zero()));

    let mut visited: Vec<N> = Vec::new();
    let mut goal_index = None;
    let mut truncated = false;

    // Neighbors only reachable through a path whose cost overflows C
    let mut overflowed: Vec<N> = Vec::new();

    while !open_list.is_empty() {
        let (_, (node, index, cost)) = open_list.pop_min()?;

        // fetch current best cost for node
        let best = node_map[index].1;

        // If cost of the queued entry is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > best {
            trace!(?node, ?cost, ?best, "skipping stale entry");
            continue;
        }

        if options.limit_reached(visited.len()) {
            warn!(max_nodes = ?options.max_nodes, "node budget exhausted before reaching the goal");
            truncated = true;
            break;
        }

        trace!(?node, ?cost, "expanding");
        visited.push(node.clone());

        // Check if we've reached the goal
        if goal == Some(&node) {
            goal_index = Some(index);
            break;
        }

        // loop over neighbors
        for (neighbor, weight) in graph.neighbors(&node)? {

            // new cost to reach this neighbor = edge cost + node cost
            let Some(new_cost) = best.checked_sum(options.edge_cost(*weight)) else {
                trace!(?neighbor, "skipping edge, path cost overflows");
                overflowed.push(neighbor.clone());
                continue;
            };

            let neighbor_index = match node_map.entry(neighbor.clone()) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        // The existing path is at least as good, do nothing
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            // an estimate past the top of C still sorts last
            let priority = new_cost.checked_sum(heuristic_fn(neighbor)).unwrap_or_else(C::max_value);
            open_list.push(priority, (neighbor.clone(), neighbor_index, new_cost));
        }
    }

    if goal_index.is_none() && !truncated {
        if let Some(node) = overflowed.iter().find(|node| !node_map.contains_key(*node)) {
            return Err(SearchError::CostOverflow(format!("{node:?}")));
        }
    }

    Ok(Exploration { node_map, goal_index, visited, truncated })
}

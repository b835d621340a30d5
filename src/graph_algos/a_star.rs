use super::dijkstra::explore;
use super::options::SearchOptions;
use super::{log_finished, Algorithm, SearchResult};
use crate::collections::FxIndexMap;
use crate::errors::{Result, SearchError};
use crate::geometry::Point;
use crate::graph::{Cost, Graph};

use std::{fmt::{self, Debug}, hash::Hash};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;


/// Node id -> position, consumed by the named heuristics
pub type NodePositions<N> = FxIndexMap<N, Point>;


/// Built-in distance estimates between two positioned nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum HeuristicKind {
    Euclidean, // straight-line, admissible when edges are at least as long as the distance they span
    Manhattan, // grid distance, admissible on 4-connected grids with unit spacing
    Zero, // A* degrades to Dijkstra
}

impl HeuristicKind {

    pub fn distance(&self, from: &Point, to: &Point) -> f64 {
        match self {
            HeuristicKind::Euclidean => from.euclidean(to),
            HeuristicKind::Manhattan => from.manhattan(to),
            HeuristicKind::Zero => 0.0,
        }
    }
}


/// Remaining-cost estimate used by A*
///
/// Optimal paths require the estimate to be admissible (never above the true
/// remaining cost) and consistent (h(a) <= w(a, b) + h(b) for every edge).
/// Neither is checked; an overestimating heuristic still returns a path, just
/// not necessarily the cheapest one. An admissible but inconsistent heuristic
/// still returns the cheapest path, but a node is expanded again whenever a
/// cheaper way to it turns up later. Such nodes appear more than once in
/// `visited`, and `nodes_explored` can exceed the node count.
pub enum Heuristic<'a, N, C> {
    /// Built-in distance over caller supplied positions
    /// A node without a position estimates 0
    Named {
        kind: HeuristicKind,
        positions: &'a NodePositions<N>,
    },
    /// Caller supplied estimate, called as f(node, goal)
    Custom(&'a dyn Fn(&N, &N) -> C),
}

impl<N, C> Clone for Heuristic<'_, N, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, C> Copy for Heuristic<'_, N, C> {}

impl<N, C> Debug for Heuristic<'_, N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Named { kind, positions } => f
                .debug_struct("Named")
                .field("kind", kind)
                .field("positions", &positions.len())
                .finish(),
            Heuristic::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<'a, N, C> Heuristic<'a, N, C>
where
    N: Eq + Hash,
    C: Cost,
{

    pub fn named(kind: HeuristicKind, positions: &'a NodePositions<N>) -> Self {
        Heuristic::Named { kind, positions }
    }

    /// Estimated cost from node to goal
    /// Float estimates are truncated toward zero for integer costs, which keeps them admissible
    pub fn estimate(&self, node: &N, goal: &N) -> C {
        match self {
            Heuristic::Named { kind, positions } => match (positions.get(node), positions.get(goal)) {
                (Some(from), Some(to)) => C::from_f64(kind.distance(from, to)).unwrap_or_else(C::zero),
                _ => C::zero(),
            },
            Heuristic::Custom(heuristic_fn) => heuristic_fn(node, goal),
        }
    }
}


/// A* search using `options.heuristic`
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// Fails with MissingHeuristic when no heuristic is configured.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
pub fn a_star<N, C>(graph: &Graph<N, C>, start: &N, goal: &N, options: &SearchOptions<'_, N, C>) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    graph.require_node(start)?;
    graph.require_node(goal)?;

    let heuristic = options.heuristic.ok_or(SearchError::MissingHeuristic)?;
    run(graph, start, goal, |node: &N, target: &N| heuristic.estimate(node, target), options)
}

/// A* search with a statically dispatched heuristic closure, called as heuristic(node, goal)
/// `options.heuristic` is ignored
///
/// Priority of a frontier entry is cost so far + heuristic(node, goal); ties
/// leave the queue in insertion order. Relaxation and stale-entry handling
/// are shared with Dijkstra.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, goal = ?goal))]
pub fn a_star_with<N, C, H>(
    graph: &Graph<N, C>,
    start: &N,
    goal: &N,
    heuristic: H,
    options: &SearchOptions<'_, N, C>,
) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
    H: Fn(&N, &N) -> C,
{
    graph.require_node(start)?;
    graph.require_node(goal)?;
    run(graph, start, goal, heuristic, options)
}

/// A* over nodes already known to be in the graph
fn run<N, C, H>(graph: &Graph<N, C>, start: &N, goal: &N, heuristic: H, options: &SearchOptions<'_, N, C>) -> Result<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
    H: Fn(&N, &N) -> C,
{
    debug!("starting A* search");

    let exploration = explore(graph, start, Some(goal), |node| heuristic(node, goal), options)?;
    let result = exploration.into_result();

    log_finished(Algorithm::AStar, &result);
    Ok(result)
}

/// Path found by A* with default options, None if the goal is unreachable
pub fn a_star_path<N, C, H>(graph: &Graph<N, C>, start: &N, goal: &N, heuristic: H) -> Result<Option<Vec<N>>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
    H: Fn(&N, &N) -> C,
{
    let result = a_star_with(graph, start, goal, heuristic, &SearchOptions::default())?;
    Ok(result.into_path())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::dijkstra::dijkstra;

    /// size x size grid of unit edges, nodes are (row, col)
    fn grid(size: i32) -> (Graph<(i32, i32), f64>, NodePositions<(i32, i32)>) {
        let mut graph = Graph::new(false);
        let mut positions = NodePositions::default();

        for r in 0..size {
            for c in 0..size {
                positions.insert((r, c), Point::new(r as f64, c as f64));
                if c + 1 < size {
                    graph.add_edge((r, c), (r, c + 1), 1.0).unwrap();
                }
                if r + 1 < size {
                    graph.add_edge((r, c), (r + 1, c), 1.0).unwrap();
                }
            }
        }
        (graph, positions)
    }

    #[test]
    fn test_a_star() {
        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        let mut graph = Graph::new(true);
        graph.add_edge("A", "B", 1).unwrap();
        graph.add_edge("A", "C", 3).unwrap();
        graph.add_edge("B", "D", 5).unwrap();
        graph.add_edge("C", "D", 1).unwrap();

        // Simple zero heuristic (makes A* behave like Dijkstra)
        let path = a_star_path(&graph, &"A", &"D", |_: &&str, _: &&str| 0).unwrap();

        // The expected path is A -> C -> D (the cheapest path)
        assert_eq!(path, Some(vec!["A", "C", "D"]));
    }

    #[test]
    fn test_a_star_handles_unreachable_goal() {
        let mut graph = Graph::new(true);
        graph.add_edge("A", "B", 1).unwrap();
        graph.add_edge("B", "C", 1).unwrap();
        graph.add_node("D").unwrap(); // D is not connected

        let result = a_star_with(&graph, &"A", &"D", |_: &&str, _: &&str| 0, &SearchOptions::new()).unwrap();

        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_a_star_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph = Graph::new(true);
        graph.add_edge("A", "B", 1).unwrap();
        graph.add_edge("B", "C", 1).unwrap();
        graph.add_edge("C", "A", 1).unwrap();
        graph.add_edge("C", "D", 2).unwrap();

        let result = a_star_with(&graph, &"A", &"D", |_: &&str, _: &&str| 0, &SearchOptions::new()).unwrap();

        assert_eq!(result.path, vec!["A", "B", "C", "D"]);
        assert_eq!(result.cost, 4);
    }

    #[test]
    fn test_a_star_with_heuristic() {
        // A(0,0) -> B(1,0) -> D(2,0)
        //   |
        //   v
        // C(0,1) ------> D(2,0)
        let mut graph = Graph::new(true);
        graph.add_edge("A", "C", 1.0).unwrap();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "D", 1.0).unwrap();
        graph.add_edge("C", "D", 2.0).unwrap();

        let positions = NodePositions::from_iter([
            ("A", Point::new(0.0, 0.0)),
            ("B", Point::new(1.0, 0.0)),
            ("C", Point::new(0.0, 1.0)),
            ("D", Point::new(2.0, 0.0)),
        ]);

        let options = SearchOptions::new().with_heuristic(Heuristic::named(HeuristicKind::Manhattan, &positions));
        let result = a_star(&graph, &"A", &"D", &options).unwrap();

        // The heuristic steers past C even though it was discovered first
        assert_eq!(result.path, vec!["A", "B", "D"]);
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.visited, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_a_star_requires_heuristic() {
        let mut graph: Graph<&str, u32> = Graph::new(false);
        graph.add_edge("A", "B", 1).unwrap();

        let result = a_star(&graph, &"A", &"B", &SearchOptions::new());
        assert_eq!(result, Err(SearchError::MissingHeuristic));

        // unknown nodes are reported before the missing heuristic
        let result = a_star(&graph, &"Z", &"B", &SearchOptions::new());
        assert!(matches!(result, Err(SearchError::UnknownNode(_))));
    }

    #[test]
    fn test_grid_optimal_and_efficient() {
        let (graph, positions) = grid(3);

        for kind in [HeuristicKind::Manhattan, HeuristicKind::Euclidean, HeuristicKind::Zero] {
            let options = SearchOptions::new().with_heuristic(Heuristic::named(kind, &positions));

            let a_star_result = a_star(&graph, &(0, 0), &(2, 2), &options).unwrap();
            let dijkstra_result = dijkstra(&graph, &(0, 0), &(2, 2), &options).unwrap();

            assert!(a_star_result.found);
            assert_eq!(a_star_result.cost, 4.0);
            assert_eq!(a_star_result.cost, dijkstra_result.cost);
            assert!(a_star_result.nodes_explored <= dijkstra_result.nodes_explored, "{kind} explored more nodes than Dijkstra");
        }
    }

    #[test]
    fn test_manhattan_explores_fewer_nodes_on_open_grid() {
        let (graph, positions) = grid(6);
        let options = SearchOptions::new().with_heuristic(Heuristic::named(HeuristicKind::Manhattan, &positions));

        let a_star_result = a_star(&graph, &(0, 0), &(0, 5), &options).unwrap();
        let dijkstra_result = dijkstra(&graph, &(0, 0), &(0, 5), &options).unwrap();

        assert_eq!(a_star_result.cost, 5.0);
        assert_eq!(a_star_result.path.len(), 6);
        assert!(a_star_result.nodes_explored < dijkstra_result.nodes_explored);
    }

    #[test]
    fn test_inadmissible_heuristic_still_finds_a_path() {
        // Direct edge is expensive, detour is cheap, heuristic wildly overestimates the detour
        let mut graph = Graph::new(false);
        graph.add_edge("S", "G", 10).unwrap();
        graph.add_edge("S", "M", 1).unwrap();
        graph.add_edge("M", "G", 1).unwrap();

        let overestimate = |node: &&str, _: &&str| if *node == "M" { 100 } else { 0 };
        let result = a_star_with(&graph, &"S", &"G", overestimate, &SearchOptions::new()).unwrap();

        assert!(result.found);
        assert_eq!(result.path, vec!["S", "G"]);
        assert_eq!(result.cost, 10);
    }

    #[test]
    fn test_missing_positions_estimate_zero() {
        let positions: NodePositions<&str> = NodePositions::from_iter([("A", Point::new(0.0, 0.0))]);
        let heuristic: Heuristic<'_, &str, u32> = Heuristic::named(HeuristicKind::Euclidean, &positions);

        assert_eq!(heuristic.estimate(&"A", &"B"), 0);
        assert_eq!(heuristic.estimate(&"B", &"A"), 0);
    }

    #[test]
    fn test_named_estimate_truncates_for_integer_costs() {
        let positions = NodePositions::from_iter([
            ("A", Point::new(0.0, 0.0)),
            ("B", Point::new(1.0, 1.0)),
        ]);
        let heuristic: Heuristic<'_, &str, u32> = Heuristic::named(HeuristicKind::Euclidean, &positions);
        assert_eq!(heuristic.estimate(&"A", &"B"), 1);

        let heuristic: Heuristic<'_, &str, f64> = Heuristic::named(HeuristicKind::Manhattan, &positions);
        assert_eq!(heuristic.estimate(&"A", &"B"), 2.0);
    }

    #[test]
    fn test_heuristic_kind_names() {
        assert_eq!("manhattan".parse::<HeuristicKind>().unwrap(), HeuristicKind::Manhattan);
        assert_eq!(HeuristicKind::Euclidean.to_string(), "euclidean");
        let error: SearchError = "octile".parse::<HeuristicKind>().unwrap_err().into();
        assert!(matches!(error, SearchError::UnknownName(_)));
    }

    #[test]
    fn test_inconsistent_heuristic_reexpands_node() {
        // h(B) = 4 is admissible (B -> C -> G costs 4) but h(B) > w(B, C) + h(C)
        // C is first expanded through A at cost 4, then again through B at cost 3
        let mut graph = Graph::new(true);
        graph.add_edge("S", "A", 1).unwrap();
        graph.add_edge("S", "B", 2).unwrap();
        graph.add_edge("A", "C", 3).unwrap();
        graph.add_edge("B", "C", 1).unwrap();
        graph.add_edge("C", "G", 3).unwrap();

        let estimate = |node: &&str, _: &&str| if *node == "B" { 4 } else { 0 };
        let result = a_star_with(&graph, &"S", &"G", estimate, &SearchOptions::new()).unwrap();

        assert!(result.found);
        assert_eq!(result.path, vec!["S", "B", "C", "G"]);
        assert_eq!(result.cost, 6);
        assert_eq!(result.visited, vec!["S", "A", "C", "B", "C", "G"]);
        assert!(result.nodes_explored > graph.node_count());
    }

    #[test]
    fn test_estimate_past_cost_range_sorts_last() {
        let mut graph: Graph<&str, u8> = Graph::new(true);
        graph.add_edge("S", "M", 10).unwrap();
        graph.add_edge("M", "G", 10).unwrap();
        graph.add_edge("S", "X", 1).unwrap();

        // 10 + 250 does not fit in u8, M is queued behind X
        let estimate = |node: &&str, _: &&str| if *node == "M" { 250 } else { 0 };
        let result = a_star_with(&graph, &"S", &"G", estimate, &SearchOptions::new()).unwrap();

        assert_eq!(result.path, vec!["S", "M", "G"]);
        assert_eq!(result.cost, 20);
        assert_eq!(result.visited, vec!["S", "X", "M", "G"]);
    }
}

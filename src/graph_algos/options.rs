use super::a_star::Heuristic;
use crate::errors::{Result, SearchError};
use crate::graph::Cost;

use std::fmt::{self, Debug};


/// Per-call search configuration
///
/// heuristic: required by A*, ignored by the other algorithms
/// weighted: true accumulates stored edge weights, false counts every edge as 1
/// max_nodes: stop and report not found once this many nodes were expanded
pub struct SearchOptions<'a, N, C> {
    pub heuristic: Option<Heuristic<'a, N, C>>,
    pub weighted: bool,
    pub max_nodes: Option<usize>,
}

impl<N, C> Default for SearchOptions<'_, N, C> {
    fn default() -> Self {
        Self {
            heuristic: None,
            weighted: true,
            max_nodes: None,
        }
    }
}

impl<N, C> Clone for SearchOptions<'_, N, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, C> Copy for SearchOptions<'_, N, C> {}

impl<N, C> Debug for SearchOptions<'_, N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("heuristic", &self.heuristic)
            .field("weighted", &self.weighted)
            .field("max_nodes", &self.max_nodes)
            .finish()
    }
}

impl<'a, N, C> SearchOptions<'a, N, C> {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic<'a, N, C>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// True once `explored` expansions used up the node budget
    pub(crate) fn limit_reached(&self, explored: usize) -> bool {
        self.max_nodes.is_some_and(|max| explored >= max)
    }
}

impl<N, C: Cost> SearchOptions<'_, N, C> {

    /// Cost of traversing one edge under this configuration
    pub(crate) fn edge_cost(&self, weight: C) -> C {
        if self.weighted {
            weight
        } else {
            C::one()
        }
    }

    /// Cost of reaching `to` through an edge of `weight` from a node at `cost`
    pub(crate) fn step_cost(&self, cost: C, weight: C, to: &N) -> Result<C>
    where
        N: Debug,
    {
        cost.checked_sum(self.edge_cost(weight))
            .ok_or_else(|| SearchError::CostOverflow(format!("{to:?}")))
    }
}

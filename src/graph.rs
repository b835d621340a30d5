use crate::collections::FxIndexMap;
use crate::errors::{Result, SearchError};

use std::{cmp::Ordering, fmt::Debug, hash::Hash};
use num_traits::{Bounded, FromPrimitive, Num};


/// Numeric edge weight / path cost
/// Implemented for every primitive integer and float type
pub trait Cost: Num + Bounded + FromPrimitive + PartialOrd + Copy + Debug {

    /// self + other, None when the sum does not fit in the type
    /// self is a path cost and is never negative, so only the upper bound can be crossed
    fn checked_sum(self, other: Self) -> Option<Self> {
        if other > Self::zero() && self > Self::max_value() - other {
            None
        } else {
            Some(self + other)
        }
    }
}

impl<T> Cost for T where T: Num + Bounded + FromPrimitive + PartialOrd + Copy + Debug {}


/// How the graph treats node registration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodePolicy {
    /// `add_node` is idempotent, `add_edge` registers unknown endpoints
    #[default]
    Lenient,
    /// `add_node` rejects duplicates, `add_edge` rejects unknown endpoints
    Strict,
}


/// Weighted graph
/// N: Node identifier supplied by the caller
/// C: Edge weight, always >= 0
///
/// Nodes and each node's neighbors keep insertion order, so every search over
/// the same graph expands nodes in the same order.
#[derive(Clone, Debug)]
pub struct Graph<N, C> {
    adjacency: FxIndexMap<N, Vec<(N, C)>>, // node -> [(neighbor, weight)]
    directed: bool,
    policy: NodePolicy,
    edge_count: usize,
}

impl<N, C> Default for Graph<N, C> {
    fn default() -> Self {
        Self {
            adjacency: FxIndexMap::default(),
            directed: false,
            policy: NodePolicy::Lenient,
            edge_count: 0,
        }
    }
}

impl<N, C> Graph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{

    /// Create an empty lenient graph
    pub fn new(directed: bool) -> Self {
        Self::with_policy(directed, NodePolicy::Lenient)
    }

    pub fn with_policy(directed: bool, policy: NodePolicy) -> Self {
        Self {
            directed,
            policy,
            ..Self::default()
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn policy(&self) -> NodePolicy {
        self.policy
    }

    /// Register a node
    /// Lenient graphs ignore re-registration, strict graphs fail with DuplicateNode
    pub fn add_node(&mut self, id: N) -> Result<()> {
        if self.adjacency.contains_key(&id) {
            return match self.policy {
                NodePolicy::Lenient => Ok(()),
                NodePolicy::Strict => Err(SearchError::DuplicateNode(format!("{id:?}"))),
            };
        }
        self.adjacency.insert(id, Vec::new());
        Ok(())
    }

    /// Add an edge from a to b
    /// Undirected graphs also get the b -> a entry; both are written or neither is.
    /// Adding an existing edge again overwrites its weight in place.
    pub fn add_edge(&mut self, a: N, b: N, weight: C) -> Result<()> {

        // validate everything before touching storage
        match weight.partial_cmp(&C::zero()) {
            Some(Ordering::Greater) | Some(Ordering::Equal) => {}
            _ => return Err(SearchError::InvalidWeight(format!("{weight:?}"))),
        }

        match self.policy {
            NodePolicy::Strict => {
                for endpoint in [&a, &b] {
                    if !self.adjacency.contains_key(endpoint) {
                        return Err(SearchError::UnknownNode(format!("{endpoint:?}")));
                    }
                }
            }
            NodePolicy::Lenient => {
                self.adjacency.entry(a.clone()).or_default();
                self.adjacency.entry(b.clone()).or_default();
            }
        }

        let is_new = self.upsert(&a, b.clone(), weight)?;
        if !self.directed && a != b {
            self.upsert(&b, a, weight)?;
        }

        if is_new {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Write a single directed adjacency entry, returns true if it did not exist yet
    fn upsert(&mut self, from: &N, to: N, weight: C) -> Result<bool> {
        let edges = self.adjacency
            .get_mut(from)
            .ok_or_else(|| SearchError::UnknownNode(format!("{from:?}")))?;

        match edges.iter_mut().find(|(neighbor, _)| *neighbor == to) {
            Some(entry) => {
                entry.1 = weight;
                Ok(false)
            }
            None => {
                edges.push((to, weight));
                Ok(true)
            }
        }
    }

    /// Neighbors of a node with the edge weight to each, in insertion order
    pub fn neighbors(&self, id: &N) -> Result<&[(N, C)]> {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| SearchError::UnknownNode(format!("{id:?}")))
    }

    /// Weight of the edge a -> b, None if there is no such edge
    pub fn edge_weight(&self, a: &N, b: &N) -> Option<C> {
        self.adjacency
            .get(a)?
            .iter()
            .find(|(neighbor, _)| neighbor == b)
            .map(|&(_, weight)| weight)
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.adjacency.contains_key(id)
    }

    /// All nodes in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges added, an undirected edge counts once
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Fails with UnknownNode if the node is absent
    pub(crate) fn require_node(&self, id: &N) -> Result<()> {
        if self.contains_node(id) {
            Ok(())
        } else {
            Err(SearchError::UnknownNode(format!("{id:?}")))
        }
    }
}

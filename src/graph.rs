use crate::error::{Result, RouteError};
use fnv::FnvHashMap;
use std::fmt;
use std::hash::Hash;

/// Anything usable as a node identifier.
pub trait NodeKey: Clone + Eq + Hash + fmt::Display {}

impl<T: Clone + Eq + Hash + fmt::Display> NodeKey for T {}

pub type Weight = f64;

/// Undirected weighted graph with non-negative weights.
///
/// Node identifiers are interned to dense indices at build time so the search
/// runs over a plain adjacency list. A `Graph` is never mutated after
/// [`GraphBuilder::build`], which makes concurrent queries on a shared
/// reference safe.
#[derive(Debug, Clone)]
pub struct Graph<N = String> {
    nodes: Vec<N>,
    index: FnvHashMap<N, usize>,
    adj: Vec<Vec<(usize, Weight)>>,
    num_edges: usize,
}

impl<N: NodeKey> Graph<N> {
    pub fn builder() -> GraphBuilder<N> {
        GraphBuilder::new()
    }

    /// Builds a graph from the node -> (neighbor -> weight) form.
    ///
    /// Every listed arc goes through [`GraphBuilder::add_edge`]: one-sided
    /// listings are mirrored, and a pair listed with two different weights is
    /// rejected. Neighbors that never appear as keys still become nodes.
    pub fn from_adjacency<I, M>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, M)>,
        M: IntoIterator<Item = (N, Weight)>,
    {
        let mut builder = GraphBuilder::new();
        for (node, neighbors) in adjacency {
            builder.add_node(node.clone());
            for (neighbor, weight) in neighbors {
                builder.add_edge(node.clone(), neighbor, weight)?;
            }
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges (self-loops count once).
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn neighbors(&self, node: &N) -> Option<impl Iterator<Item = (&N, Weight)>> {
        let idx = self.index_of(node)?;
        Some(self.adj[idx].iter().map(|&(v, w)| (&self.nodes[v], w)))
    }

    pub fn weight(&self, from: &N, to: &N) -> Option<Weight> {
        let (u, v) = (self.index_of(from)?, self.index_of(to)?);
        self.adj[u].iter().find(|&&(n, _)| n == v).map(|&(_, w)| w)
    }

    /// Each undirected edge exactly once, as `(a, b, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, Weight)> {
        self.adj.iter().enumerate().flat_map(move |(u, out)| {
            out.iter()
                .filter(move |&&(v, _)| u <= v)
                .map(move |&(v, w)| (&self.nodes[u], &self.nodes[v], w))
        })
    }

    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub(crate) fn require(&self, node: &N) -> Result<usize> {
        self.index_of(node).ok_or_else(|| RouteError::NodeNotFound {
            node: node.to_string(),
        })
    }

    pub(crate) fn node(&self, idx: usize) -> &N {
        &self.nodes[idx]
    }

    pub(crate) fn adjacency(&self) -> &[Vec<(usize, Weight)>] {
        &self.adj
    }
}

/// Validating builder for [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder<N> {
    nodes: Vec<N>,
    index: FnvHashMap<N, usize>,
    adj: Vec<Vec<(usize, Weight)>>,
    // Keyed by (min index, max index).
    weights: FnvHashMap<(usize, usize), Weight>,
}

impl<N: NodeKey> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> GraphBuilder<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FnvHashMap::default(),
            adj: Vec::new(),
            weights: FnvHashMap::default(),
        }
    }

    /// Adds an isolated node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.intern(node);
        self
    }

    /// Adds the undirected edge `a -- b`.
    pub fn add_edge(&mut self, a: N, b: N, weight: Weight) -> Result<&mut Self> {
        if weight.is_nan() || weight < 0.0 {
            return Err(RouteError::InvalidWeight {
                from: a.to_string(),
                to: b.to_string(),
                weight,
            });
        }

        let u = self.intern(a);
        let v = self.intern(b);
        let key = (u.min(v), u.max(v));
        if let Some(&existing) = self.weights.get(&key) {
            if existing == weight {
                return Ok(self);
            }
            return Err(RouteError::ConflictingEdge {
                from: self.nodes[u].to_string(),
                to: self.nodes[v].to_string(),
                existing,
                weight,
            });
        }

        self.weights.insert(key, weight);
        self.adj[u].push((v, weight));
        if u != v {
            self.adj[v].push((u, weight));
        }
        Ok(self)
    }

    pub fn build(self) -> Graph<N> {
        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.weights.len(),
            "graph built"
        );
        Graph {
            nodes: self.nodes,
            index: self.index,
            adj: self.adj,
            num_edges: self.weights.len(),
        }
    }

    fn intern(&mut self, node: N) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(node.clone());
        self.index.insert(node, idx);
        self.adj.push(Vec::new());
        idx
    }
}

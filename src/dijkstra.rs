use crate::error::{Result, RouteError};
use crate::graph::{Graph, NodeKey, Weight};
use crate::observer::{NoopObserver, SearchObserver};
use hashbrown::HashMap;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::atomic::{self, AtomicBool};

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: OrderedFloat<Weight>,
    node_id: usize,
}

impl State {
    fn new(cost: Weight, node_id: usize) -> Self {
        Self {
            cost: OrderedFloat(cost),
            node_id,
        }
    }
}

// Min-heap by cost
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-known distance from the source for every node of the graph.
///
/// Unreached nodes map to `f64::INFINITY`. After a targeted search stops
/// early, entries for nodes that were never visited are tentative upper
/// bounds rather than final distances. Iteration follows graph insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap<N: NodeKey> {
    entries: Vec<(N, Weight)>,
    index: HashMap<N, usize>,
}

impl<N: NodeKey> DistanceMap<N> {
    fn from_indexed(graph: &Graph<N>, dist: &[Weight]) -> Self {
        let entries: Vec<_> = dist
            .iter()
            .enumerate()
            .map(|(idx, &d)| (graph.node(idx).clone(), d))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, (node, _))| (node.clone(), idx))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, node: &N) -> Option<Weight> {
        self.index.get(node).map(|&idx| self.entries[idx].1)
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.get(node).is_some_and(f64::is_finite)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, Weight)> {
        self.entries.iter().map(|(n, d)| (n, *d))
    }

    /// Entries sorted by ascending distance, unreachable nodes last. Equal
    /// distances keep graph insertion order.
    pub fn sorted(&self) -> Vec<(&N, Weight)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(_, d)| OrderedFloat(d));
        entries
    }
}

/// A source-to-target path and its total cost. Always holds at least one
/// node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<N> {
    nodes: Vec<N>,
    distance: Weight,
}

impl<N> Path<N> {
    pub(crate) fn new(nodes: Vec<N>, distance: Weight) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, distance }
    }

    /// Nodes from source to target, both included.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn distance(&self) -> Weight {
        self.distance
    }

    pub fn source(&self) -> &N {
        &self.nodes[0]
    }

    pub fn target(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl<N: fmt::Display> fmt::Display for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<N> {
    Reached(Path<N>),
    /// No chain of edges connects source and target. No partial path is
    /// returned.
    Unreachable,
}

/// Result of one source/target query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<N: NodeKey> {
    pub source: N,
    pub target: N,
    pub outcome: Outcome<N>,
    pub distances: DistanceMap<N>,
}

impl<N: NodeKey> Route<N> {
    pub fn path(&self) -> Option<&Path<N>> {
        match &self.outcome {
            Outcome::Reached(path) => Some(path),
            Outcome::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, Outcome::Reached(_))
    }

    /// Total distance, `f64::INFINITY` when unreachable.
    pub fn distance(&self) -> Weight {
        self.path().map_or(f64::INFINITY, Path::distance)
    }
}

/// Runs Dijkstra over a borrowed, read-only [`Graph`].
///
/// All working state (distances, predecessors, frontier) is created per call,
/// so one engine can serve many queries and several engines can share a graph
/// across threads.
pub struct ShortestPathEngine<'g, 'o, N> {
    graph: &'g Graph<N>,
    observer: Option<&'o mut dyn SearchObserver<N>>,
    cancel: Option<&'o AtomicBool>,
}

impl<'g, 'o, N: NodeKey> ShortestPathEngine<'g, 'o, N> {
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self {
            graph,
            observer: None,
            cancel: None,
        }
    }

    pub fn observer(mut self, observer: &'o mut dyn SearchObserver<N>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The flag is checked once per frontier pop; once set, the search fails
    /// with [`RouteError::Cancelled`].
    pub fn cancel_flag(mut self, flag: &'o AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run(&mut self, source: &N, target: &N) -> Result<Route<N>> {
        let start = self.graph.require(source)?;
        let goal = self.graph.require(target)?;

        let search = self.search(start, Some(goal))?;
        let outcome = if search.reached {
            Outcome::Reached(search.path_to(self.graph, goal))
        } else {
            Outcome::Unreachable
        };
        tracing::debug!(
            %source,
            %target,
            distance = search.dist[goal],
            visited = search.visited,
            "search finished"
        );

        Ok(Route {
            source: source.clone(),
            target: target.clone(),
            outcome,
            distances: DistanceMap::from_indexed(self.graph, &search.dist),
        })
    }

    /// Distances from `source` to every node; the frontier is drained.
    pub fn run_all(&mut self, source: &N) -> Result<DistanceMap<N>> {
        let start = self.graph.require(source)?;
        let search = self.search(start, None)?;
        tracing::debug!(%source, visited = search.visited, "single-source search finished");
        Ok(DistanceMap::from_indexed(self.graph, &search.dist))
    }

    fn search(&mut self, start: usize, target: Option<usize>) -> Result<Search> {
        match self.observer {
            Some(ref mut observer) => {
                dijkstra(self.graph, start, target, &mut **observer, self.cancel)
            }
            None => dijkstra(self.graph, start, target, &mut NoopObserver, self.cancel),
        }
    }
}

struct Search {
    dist: Vec<Weight>,
    pred: Vec<Option<usize>>,
    reached: bool,
    visited: usize,
}

impl Search {
    fn path_to<N: NodeKey>(&self, graph: &Graph<N>, target: usize) -> Path<N> {
        let mut nodes = vec![graph.node(target).clone()];
        let mut cur = target;
        while let Some(prev) = self.pred[cur] {
            nodes.push(graph.node(prev).clone());
            cur = prev;
        }
        nodes.reverse();
        Path::new(nodes, self.dist[target])
    }
}

fn dijkstra<N, O>(
    graph: &Graph<N>,
    start: usize,
    target: Option<usize>,
    observer: &mut O,
    cancel: Option<&AtomicBool>,
) -> Result<Search>
where
    N: NodeKey,
    O: SearchObserver<N> + ?Sized,
{
    let adj = graph.adjacency();
    let n = adj.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut visited = 0;

    observer.search_started(graph.node(start), target.map(|t| graph.node(t)));
    dist[start] = 0.0;
    heap.push(State::new(0.0, start));

    while let Some(State { cost, node_id }) = heap.pop() {
        if cancel.is_some_and(|flag| flag.load(atomic::Ordering::Relaxed)) {
            return Err(RouteError::Cancelled);
        }
        let cost = cost.into_inner();
        if cost > dist[node_id] {
            continue;
        }
        visited += 1;
        observer.node_visited(graph.node(node_id), cost);

        if target == Some(node_id) {
            observer.target_reached(graph.node(node_id), cost);
            return Ok(Search {
                dist,
                pred,
                reached: true,
                visited,
            });
        }

        for &(next, w) in &adj[node_id] {
            let next_cost = cost + w;
            observer.neighbor_examined(graph.node(next), w, next_cost);
            if next_cost < dist[next] {
                dist[next] = next_cost;
                pred[next] = Some(node_id);
                observer.distance_updated(graph.node(next), next_cost);
                heap.push(State::new(next_cost, next));
            }
        }
    }

    Ok(Search {
        dist,
        pred,
        reached: false,
        visited,
    })
}

/// Shortest path between `source` and `target`.
pub fn shortest_path<N: NodeKey>(graph: &Graph<N>, source: &N, target: &N) -> Result<Route<N>> {
    ShortestPathEngine::new(graph).run(source, target)
}

/// Dijkstra from `source` to all nodes. `f64::INFINITY` when unreachable.
pub fn single_source<N: NodeKey>(graph: &Graph<N>, source: &N) -> Result<DistanceMap<N>> {
    ShortestPathEngine::new(graph).run_all(source)
}

//! Progress hook for a search.
//!
//! The engine reports what it does through [`SearchObserver`]; nothing an
//! observer does can change the order or result of the search.

use crate::graph::{NodeKey, Weight};

/// Receives one call per search step. Every method defaults to a no-op.
pub trait SearchObserver<N> {
    fn search_started(&mut self, _source: &N, _target: Option<&N>) {}

    /// A node was popped with a non-stale entry; `distance` is final.
    fn node_visited(&mut self, _node: &N, _distance: Weight) {}

    /// Called for every neighbor of a visited node, whether or not it improves.
    fn neighbor_examined(&mut self, _neighbor: &N, _weight: Weight, _candidate: Weight) {}

    /// A strictly shorter path to `neighbor` was found.
    fn distance_updated(&mut self, _neighbor: &N, _distance: Weight) {}

    fn target_reached(&mut self, _target: &N, _distance: Weight) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<N> SearchObserver<N> for NoopObserver {}

/// Narrates the search through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<N: NodeKey> SearchObserver<N> for TracingObserver {
    fn search_started(&mut self, source: &N, target: Option<&N>) {
        match target {
            Some(target) => tracing::debug!(%source, %target, "starting search"),
            None => tracing::debug!(%source, "starting single-source search"),
        }
    }

    fn node_visited(&mut self, node: &N, distance: Weight) {
        tracing::debug!(%node, distance, "visiting node");
    }

    fn neighbor_examined(&mut self, neighbor: &N, weight: Weight, candidate: Weight) {
        tracing::trace!(
            %neighbor,
            weight = format_args!("{:.2}", weight),
            candidate = format_args!("{:.2}", candidate),
            "examining neighbor"
        );
    }

    fn distance_updated(&mut self, neighbor: &N, distance: Weight) {
        tracing::debug!(%neighbor, distance = format_args!("{:.2}", distance), "distance updated");
    }

    fn target_reached(&mut self, target: &N, distance: Weight) {
        tracing::debug!(%target, distance, "target reached");
    }
}

/// One recorded observer call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent<N> {
    Started { source: N, target: Option<N> },
    Visited { node: N, distance: Weight },
    Examined { neighbor: N, weight: Weight, candidate: Weight },
    Updated { neighbor: N, distance: Weight },
    TargetReached { target: N, distance: Weight },
}

/// Records every event in order.
#[derive(Debug, Clone)]
pub struct EventLog<N> {
    pub events: Vec<SearchEvent<N>>,
}

impl<N> Default for EventLog<N> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<N: Clone> EventLog<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in the order they were finalized.
    pub fn visited(&self) -> Vec<(N, Weight)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SearchEvent::Visited { node, distance } => Some((node.clone(), *distance)),
                _ => None,
            })
            .collect()
    }
}

impl<N: Clone> SearchObserver<N> for EventLog<N> {
    fn search_started(&mut self, source: &N, target: Option<&N>) {
        self.events.push(SearchEvent::Started {
            source: source.clone(),
            target: target.cloned(),
        });
    }

    fn node_visited(&mut self, node: &N, distance: Weight) {
        self.events.push(SearchEvent::Visited {
            node: node.clone(),
            distance,
        });
    }

    fn neighbor_examined(&mut self, neighbor: &N, weight: Weight, candidate: Weight) {
        self.events.push(SearchEvent::Examined {
            neighbor: neighbor.clone(),
            weight,
            candidate,
        });
    }

    fn distance_updated(&mut self, neighbor: &N, distance: Weight) {
        self.events.push(SearchEvent::Updated {
            neighbor: neighbor.clone(),
            distance,
        });
    }

    fn target_reached(&mut self, target: &N, distance: Weight) {
        self.events.push(SearchEvent::TargetReached {
            target: target.clone(),
            distance,
        });
    }
}

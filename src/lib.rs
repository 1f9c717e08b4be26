//! Point-to-point shortest paths on weighted undirected graphs.
//!
//! ```
//! use routefind::{load::sample_graph, shortest_path};
//!
//! let graph = sample_graph();
//! let route = shortest_path(&graph, &"B".to_string(), &"F".to_string()).unwrap();
//! assert_eq!(route.path().unwrap().to_string(), "B -> E -> C -> F");
//! ```

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod load;
pub mod logging;
pub mod observer;
pub mod render;

pub use dijkstra::{
    shortest_path, single_source, DistanceMap, Outcome, Path, Route, ShortestPathEngine,
};
pub use error::RouteError;
pub use graph::{Graph, GraphBuilder, NodeKey, Weight};
pub use observer::{EventLog, NoopObserver, SearchEvent, SearchObserver, TracingObserver};

use thiserror::Error;

/// Failures surfaced by graph construction and by a search.
///
/// Node identifiers are carried in their `Display` form so the error does not
/// depend on the graph's node type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("node not found in graph: {node}")]
    NodeNotFound { node: String },

    #[error("invalid weight {weight} on edge {from} -- {to}: weights must be non-negative")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("edge {from} -- {to} given twice with different weights ({existing} and {weight})")]
    ConflictingEdge {
        from: String,
        to: String,
        existing: f64,
        weight: f64,
    },

    #[error("search cancelled")]
    Cancelled,
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;

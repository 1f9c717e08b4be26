//! Reading graphs from disk.
//!
//! Two formats are accepted:
//! - JSON adjacency: `{"A": {"B": 3.0, "C": 3.0}, ...}`
//! - CSV edge list with a `from,to,weight` header, one undirected edge per row.

use crate::error::RouteError;
use crate::graph::{Graph, GraphBuilder, Weight};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON graph")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV edge list")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Graph(#[from] RouteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Guesses the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    weight: Weight,
}

pub fn graph_from_json_str(json: &str) -> Result<Graph, LoadError> {
    // BTreeMap keeps node numbering independent of map iteration order.
    let adjacency: BTreeMap<String, BTreeMap<String, Weight>> = serde_json::from_str(json)?;
    Ok(Graph::from_adjacency(adjacency)?)
}

pub fn graph_from_csv_reader<R: Read>(reader: R) -> Result<Graph, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = GraphBuilder::new();
    for result in rdr.deserialize::<EdgeRecord>() {
        let EdgeRecord { from, to, weight } = result?;
        builder.add_edge(from, to, weight)?;
    }
    Ok(builder.build())
}

pub fn load_graph(path: &Path, format: Format) -> Result<Graph, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };
    let graph = match format {
        Format::Json => {
            let text = std::fs::read_to_string(path).map_err(io_err)?;
            graph_from_json_str(&text)?
        }
        Format::Csv => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            graph_from_csv_reader(file)?
        }
    };
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Seven-node reference graph (A..G).
pub fn sample_graph() -> Graph {
    const EDGES: [(&str, &str, Weight); 10] = [
        ("A", "B", 3.0),
        ("A", "C", 3.0),
        ("B", "D", 3.5),
        ("B", "E", 2.8),
        ("C", "E", 2.8),
        ("C", "F", 3.5),
        ("D", "E", 3.1),
        ("D", "G", 10.0),
        ("E", "G", 7.0),
        ("F", "G", 2.5),
    ];

    let mut builder = GraphBuilder::new();
    for (a, b, w) in EDGES {
        if let Err(err) = builder.add_edge(a.to_string(), b.to_string(), w) {
            unreachable!("reference graph is well formed: {err}");
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_graph_shape() {
        let graph = sample_graph();
        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(graph.weight(&"G".into(), &"F".into()), Some(2.5));
    }

    #[test]
    fn json_adjacency_matches_sample() {
        let json = r#"{
            "A": {"B": 3, "C": 3},
            "B": {"A": 3, "D": 3.5, "E": 2.8},
            "C": {"A": 3, "E": 2.8, "F": 3.5},
            "D": {"B": 3.5, "E": 3.1, "G": 10},
            "E": {"B": 2.8, "C": 2.8, "D": 3.1, "G": 7},
            "F": {"G": 2.5, "C": 3.5},
            "G": {"D": 10, "E": 7, "F": 2.5}
        }"#;
        let graph = graph_from_json_str(json).unwrap();
        let sample = sample_graph();
        assert_eq!(graph.node_count(), sample.node_count());
        assert_eq!(graph.edge_count(), sample.edge_count());
        for (a, b, w) in sample.edges() {
            assert_eq!(graph.weight(a, b), Some(w));
        }
    }

    #[test]
    fn json_rejects_negative_weight() {
        let err = graph_from_json_str(r#"{"A": {"B": -2}}"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(RouteError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn json_rejects_garbage() {
        assert!(matches!(
            graph_from_json_str("[1, 2]"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn csv_edge_list() {
        let data = "from,to,weight\nA, B, 1.5\nB,C,2\n";
        let graph = graph_from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.weight(&"C".into(), &"B".into()), Some(2.0));
    }

    #[test]
    fn csv_conflicting_rows() {
        let data = "from,to,weight\nA,B,1\nB,A,2\n";
        let err = graph_from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(RouteError::ConflictingEdge { .. })
        ));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("graph.json");
        std::fs::write(&json_path, r#"{"x": {"y": 1}}"#).unwrap();
        assert_eq!(Format::from_path(&json_path), Format::Json);
        let graph = load_graph(&json_path, Format::Json).unwrap();
        assert_eq!(graph.edge_count(), 1);

        let csv_path = dir.path().join("edges.CSV");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "from,to,weight").unwrap();
        writeln!(file, "x,y,1").unwrap();
        writeln!(file, "y,z,4").unwrap();
        drop(file);
        assert_eq!(Format::from_path(&csv_path), Format::Csv);
        let graph = load_graph(&csv_path, Format::Csv).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn missing_file() {
        let err = load_graph(Path::new("/nonexistent/graph.json"), Format::Json).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

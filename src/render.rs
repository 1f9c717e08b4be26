//! Graphviz output with the route highlighted.

use crate::dijkstra::Path;
use crate::graph::{Graph, NodeKey, Weight};
use hashbrown::HashSet;

/// Consecutive node pairs of `path`, in path order.
pub fn path_edges<N>(path: &Path<N>) -> impl Iterator<Item = (&N, &N)> {
    path.nodes().windows(2).map(|pair| (&pair[0], &pair[1]))
}

fn quote(id: &impl std::fmt::Display) -> String {
    format!("\"{}\"", id.to_string().replace('\\', "\\\\").replace('"', "\\\""))
}

fn weight_label(weight: Weight) -> String {
    let rounded = (weight * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Renders `graph` as an undirected DOT document. Edges along `path` are
/// drawn red; every other edge is gray.
pub fn to_dot<N: NodeKey>(graph: &Graph<N>, path: Option<&Path<N>>) -> String {
    let mut on_path: HashSet<(&N, &N)> = HashSet::new();
    if let Some(path) = path {
        for (a, b) in path_edges(path) {
            on_path.insert((a, b));
            on_path.insert((b, a));
        }
    }

    let mut out = String::from("graph route {\n");
    out.push_str("    node [shape=circle, style=filled, fillcolor=lightblue];\n");
    for node in graph.nodes() {
        out.push_str(&format!("    {};\n", quote(node)));
    }
    for (a, b, w) in graph.edges() {
        let color = if on_path.contains(&(a, b)) {
            "red, penwidth=2"
        } else {
            "gray"
        };
        out.push_str(&format!(
            "    {} -- {} [label=\"{}\", color={}];\n",
            quote(a),
            quote(b),
            weight_label(w),
            color
        ));
    }
    out.push_str("}\n");
    out
}

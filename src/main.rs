use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use routefind::load::{self, Format};
use routefind::{logging, render, single_source, ShortestPathEngine, TracingObserver};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Load a weighted undirected graph and find the shortest route between two nodes.", long_about = None)]
struct Cli {
    /// Path to the graph file (JSON adjacency map or CSV edge list)
    #[arg(short, long, required_unless_present = "sample")]
    graph: Option<PathBuf>,

    /// Input format. Guessed from the file extension if omitted.
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Use the built-in seven-node reference graph instead of a file
    #[arg(long, conflicts_with = "graph")]
    sample: bool,

    /// Node to start from
    #[arg(short, long)]
    source: String,

    /// Node to reach
    #[arg(short, long)]
    target: String,

    /// Write the graph as Graphviz DOT with the route highlighted
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Also print the distance from the source to every node
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Narrate the search (-v), including every neighbor examined (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
}

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => Format::Json,
            InputFormat::Csv => Format::Csv,
        }
    }
}

fn format_distance(d: f64) -> String {
    if d.is_finite() {
        format!("{:.2}", d)
    } else {
        String::from("inf")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let graph = match &cli.graph {
        Some(path) => {
            let format = cli
                .format
                .map(Format::from)
                .unwrap_or_else(|| Format::from_path(path));
            load::load_graph(path, format).with_context(|| format!("loading {}", path.display()))?
        }
        None => load::sample_graph(),
    };

    println!(
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut observer = TracingObserver;
    let route = ShortestPathEngine::new(&graph)
        .observer(&mut observer)
        .run(&cli.source, &cli.target)
        .with_context(|| format!("routing {} -> {}", cli.source, cli.target))?;

    match route.path() {
        Some(path) => {
            println!("Shortest route: {}", path);
            println!("Total distance: {}", format_distance(path.distance()));
        }
        None => {
            println!("No route from {} to {}", route.source, route.target);
            println!("Total distance: {}", format_distance(route.distance()));
        }
    }

    if cli.all {
        let dist = single_source(&graph, &cli.source)?;
        println!("Distances from {}:", cli.source);
        for (node, d) in dist.sorted() {
            println!("  {}: {}", node, format_distance(d));
        }
    }

    if let Some(dot_path) = cli.dot {
        std::fs::write(&dot_path, render::to_dot(&graph, route.path()))
            .with_context(|| format!("writing DOT {}", dot_path.display()))?;
        println!("Wrote DOT to {}", dot_path.display());
    }

    Ok(())
}

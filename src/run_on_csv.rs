use anyhow::{Context, Result};
use clap::Parser;
use routefind::load::{self, Format};
use routefind::{logging, shortest_path};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a graph from a CSV edge list (from,to,weight) and time repeated shortest-route queries.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: PathBuf,

    /// Number of runs. Run i routes from the i-th node to the i-th node from the end (wrapping).
    #[arg(short, long)]
    num_runs: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let graph = load::load_graph(&cli.csv, Format::Csv)
        .with_context(|| format!("loading {}", cli.csv.display()))?;
    let nodes: Vec<&String> = graph.nodes().collect();
    anyhow::ensure!(!nodes.is_empty(), "{} has no edges", cli.csv.display());

    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut reachable = 0;
    for run in 0..cli.num_runs {
        let source = nodes[run % nodes.len()];
        let target = nodes[nodes.len() - 1 - run % nodes.len()];
        let now = Instant::now();
        let route = shortest_path(&graph, source, target)?;
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);
        if route.is_reachable() {
            reachable += 1;
        }
    }
    println!("{:?}", duration_millis);
    println!("Reachable: {}/{}", reachable, cli.num_runs);

    Ok(())
}

//! Print a minimum spanning tree of a graph read from a file or stdin

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]

use std::{
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use partree::Graph;
use tracing_subscriber::prelude::*;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Opts {
    /// Graph file to read, or stdin if omitted
    ///
    /// The first line holds the vertex count, followed by one vertex name
    /// per line, followed by one `<name> <name> <weight>` edge per line.
    input: Option<PathBuf>,

    /// Log filter directives, overriding RUST_LOG
    #[arg(long, env = "PARTREE_LOG")]
    log_filter: Option<String>,

    /// Only print the total weight of the tree
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let opts: Opts = clap::Parser::parse();

    let filter = match opts.log_filter.as_deref() {
        Some(f) => tracing_subscriber::EnvFilter::try_new(f),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new("info")),
    }
    .expect("Invalid log filter");

    tracing::subscriber::set_global_default(
        tracing_subscriber::Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
    )
    .expect("Failed to set default tracing subscriber");

    std::process::exit(match run(opts) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{e:?}");
            1
        },
    });
}

fn run(opts: Opts) -> Result<()> {
    let Opts {
        input,
        log_filter: _,
        quiet,
    } = opts;

    let mut text = String::new();
    if let Some(path) = &input {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph from {}", path.display()))?;
    } else {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read graph from stdin")?;
    }

    let graph: Graph = text.parse().context("Failed to parse graph")?;
    tracing::info!(
        vertices = graph.len(),
        edges = graph.edge_count(),
        "Loaded graph"
    );

    let mut mst = partree::minimum_spanning_tree(&graph)
        .context("Failed to compute a minimum spanning tree")?;
    mst.sort();

    if !quiet {
        for &arc in &mst {
            println!("{}", graph.display_arc(arc));
        }
    }

    println!("total weight: {}", Graph::total_weight(&mst));

    Ok(())
}

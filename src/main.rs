//! Resource discovery simulator CLI.
//!
//! Loads a network configuration, validates it and runs search strategies
//! against it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use p2psearch::analysis::network_graph;
use p2psearch::analysis::report::{self, ReportMetadata, SearchReport, SearchRun};
use p2psearch::config_loader::{self, LoadedNetwork};
use p2psearch::search::{SearchAlgorithm, SearchEngine, SearchParams};

/// Simulate resource discovery strategies on a P2P overlay
#[derive(Parser, Debug)]
#[command(name = "p2psearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the network configuration (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: PathBuf,

    /// Seed for the randomized strategies (entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show network summary and degree statistics
    Info {
        #[arg(long)]
        json: bool,
    },

    /// Run one strategy, optionally several times on the same graph
    Search {
        /// Start peer
        #[arg(long)]
        node: String,

        #[arg(long)]
        resource: String,

        /// Maximum number of hops
        #[arg(long)]
        ttl: u32,

        /// flooding, informed_flooding, random_walk, informed_random_walk, exhaustive_random_walk
        #[arg(long, default_value = "flooding")]
        algo: SearchAlgorithm,

        /// Repeat the search; caches filled by informed strategies carry over
        #[arg(long, default_value = "1")]
        repeat: usize,

        #[arg(long)]
        json: bool,
    },

    /// Run every strategy for the same query, each on a fresh copy of the graph
    Compare {
        #[arg(long)]
        node: String,

        #[arg(long)]
        resource: String,

        #[arg(long)]
        ttl: u32,

        #[arg(long)]
        json: bool,
    },

    /// Execute the searches listed in the configuration, in order, on one graph
    Run {
        #[arg(long)]
        json: bool,
    },

    /// Export the graph view for visualization
    Graph {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// GraphViz DOT instead of JSON
        #[arg(long)]
        dot: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let LoadedNetwork { config, mut graph } = config_loader::load_network(&cli.config)?;
    let mut engine = SearchEngine::from_seed(cli.seed);
    if let Some(seed) = cli.seed {
        info!("Using seed {}", seed);
    }

    let metadata = ReportMetadata::new(&cli.config, graph.peer_count(), cli.seed);

    match cli.command {
        Commands::Info { json } => {
            let summary = network_graph::summarize_network(&graph);
            let degrees = network_graph::degree_stats(&graph);
            if json {
                let payload = serde_json::json!({ "summary": summary, "degrees": degrees });
                println!("{}", report::to_json(&payload)?);
            } else {
                report::print_summary(&summary, &degrees);
            }
        }
        Commands::Search {
            node,
            resource,
            ttl,
            algo,
            repeat,
            json,
        } => {
            let params = SearchParams::new(node, resource, ttl);
            let mut runs = Vec::with_capacity(repeat);
            for i in 0..repeat.max(1) {
                let result = engine
                    .search(&mut graph, &params, algo)
                    .wrap_err_with(|| format!("Search #{} failed", i + 1))?;
                runs.push(SearchRun {
                    algorithm: algo,
                    node_id: params.node_id.clone(),
                    ttl,
                    result,
                });
            }
            emit_runs(SearchReport { metadata, runs }, json, false)?;
        }
        Commands::Compare {
            node,
            resource,
            ttl,
            json,
        } => {
            let params = SearchParams::new(node, resource, ttl);
            let mut runs = Vec::new();
            for algo in SearchAlgorithm::all() {
                let mut fresh = graph.clone();
                let result = engine
                    .search(&mut fresh, &params, algo)
                    .wrap_err_with(|| format!("{} search failed", algo))?;
                runs.push(SearchRun {
                    algorithm: algo,
                    node_id: params.node_id.clone(),
                    ttl,
                    result,
                });
            }
            emit_runs(SearchReport { metadata, runs }, json, true)?;
        }
        Commands::Run { json } => {
            if config.searches.is_empty() {
                info!("No searches listed in {}", cli.config.display());
            }
            let mut runs = Vec::with_capacity(config.searches.len());
            for (i, search) in config.searches.iter().enumerate() {
                let result = engine
                    .search(&mut graph, &search.params(), search.algo)
                    .wrap_err_with(|| format!("Configured search #{} failed", i + 1))?;
                runs.push(SearchRun {
                    algorithm: search.algo,
                    node_id: search.node_id.clone(),
                    ttl: search.ttl,
                    result,
                });
            }
            emit_runs(SearchReport { metadata, runs }, json, false)?;
        }
        Commands::Graph { output, dot } => {
            let rendered = if dot {
                network_graph::generate_dot(&graph, &[])
            } else {
                report::to_json(&network_graph::build_graph_view(&graph))?
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .wrap_err_with(|| format!("Failed to write graph to {}", path.display()))?;
                    info!("Graph written to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
    }

    Ok(())
}

fn emit_runs(search_report: SearchReport, json: bool, table: bool) -> Result<()> {
    if json {
        println!("{}", report::to_json(&search_report)?);
    } else if table {
        println!("{}", report::format_comparison(&search_report.runs));
    } else {
        for (i, run) in search_report.runs.iter().enumerate() {
            println!("\n=== SEARCH {} ===\n", i + 1);
            println!("{}", report::format_search_run(run));
        }
        println!();
    }
    Ok(())
}

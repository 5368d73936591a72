//! Offline path analysis CLI.
//!
//! Enumerates routes between peers, finds peer pairs at a given distance and
//! computes the random-walk probability of a concrete path.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use p2psearch::analysis::{path_analyzer, report};
use p2psearch::config_loader;
use p2psearch::utils::parse_path_list;

#[derive(Parser)]
#[command(name = "path-analyzer")]
#[command(about = "Offline path analysis for P2P overlay networks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the network configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every simple path between two peers within a TTL
    Analyze {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        ttl: u32,

        #[arg(long)]
        json: bool,
    },

    /// List peer pairs whose shortest distance equals a target
    Pairs {
        #[arg(long)]
        distance: usize,

        #[arg(long)]
        json: bool,
    },

    /// Probability that a random walk follows the given path
    Probability {
        /// Comma separated peers, e.g. n1,n2,n5
        #[arg(long)]
        path: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let network = config_loader::load_network(&cli.config)?;
    let graph = &network.graph;

    match cli.command {
        Commands::Analyze { from, to, ttl, json } => {
            let analysis = path_analyzer::analyze_paths(graph, &from, &to, ttl)
                .with_context(|| format!("Path analysis from {} to {} failed", from, to))?;
            if json {
                println!("{}", report::to_json(&analysis)?);
            } else {
                println!("{}", report::format_path_analysis(&analysis));
            }
        }
        Commands::Pairs { distance, json } => {
            log::info!("Scanning {} nodes for pairs at distance {}", graph.peer_count(), distance);
            let pairs = path_analyzer::find_node_pairs_with_distance(graph, distance);
            if json {
                println!("{}", report::to_json(&pairs)?);
            } else {
                println!("{}", report::format_node_pairs(&pairs, distance));
            }
        }
        Commands::Probability { path } => {
            let peers = parse_path_list(&path);
            if peers.is_empty() {
                bail!("Path is empty");
            }
            if let Some(unknown) = peers.iter().find(|id| !graph.has_peer(id)) {
                bail!("Node {} not found", unknown);
            }
            let probability = path_analyzer::path_probability(graph, peers.as_slice());
            println!("Path: {}", peers.join(" -> "));
            println!("Probability: {:.6}", probability);
        }
    }

    Ok(())
}

//! Report generation for search runs and path analyses.
//!
//! Generates both JSON and human-readable text output.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use super::network_graph::{DegreeStats, NetworkSummary};
use super::path_analyzer::{NodePair, PathAnalysis};
use crate::search::{SearchAlgorithm, SearchResult};

/// Context attached to every JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub config_path: String,
    pub node_count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ReportMetadata {
    pub fn new(config_path: &Path, node_count: usize, seed: Option<u64>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            config_path: config_path.display().to_string(),
            node_count,
            seed,
        }
    }
}

/// One search execution together with the strategy that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRun {
    pub algorithm: SearchAlgorithm,
    pub node_id: String,
    pub ttl: u32,
    pub result: SearchResult,
}

/// Output of `search`, `compare` and `run`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub metadata: ReportMetadata,
    pub runs: Vec<SearchRun>,
}

/// Serialize any report as pretty JSON
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Generate JSON report
pub fn generate_json_report<T: Serialize>(report: &T, output_path: &Path) -> Result<()> {
    let json = to_json(report)?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Multi-line description of a single search
pub fn format_search_run(run: &SearchRun) -> String {
    let result = &run.result;
    let mut lines = vec![
        format!("Algorithm: {}", run.algorithm),
        format!("Start: {} (ttl={})", run.node_id, run.ttl),
        format!("Resource: {}", result.resource_id),
    ];

    match &result.location_node_id {
        Some(location) if result.found => {
            lines.push(format!("Found at: {}", location));
            lines.push(format!("Path: {}", result.path_display()));
        }
        _ => lines.push("Found at: not found".to_string()),
    }
    lines.push(format!("Messages: {}", result.total_messages));
    lines.push(format!(
        "Nodes visited: {} [{}]",
        result.total_nodes_visited,
        result.visited_nodes.join(", ")
    ));

    lines.join("\n")
}

/// Side-by-side table of strategies run against the same query
pub fn format_comparison(runs: &[SearchRun]) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{:<24} {:>6} {:>9} {:>9} {:>8}  {}",
        "ALGORITHM", "FOUND", "LOCATION", "MESSAGES", "VISITED", "PATH"
    ));
    lines.push("-".repeat(80));

    for run in runs {
        let r = &run.result;
        lines.push(format!(
            "{:<24} {:>6} {:>9} {:>9} {:>8}  {}",
            run.algorithm.as_str(),
            if r.found { "yes" } else { "no" },
            r.location_node_id.as_deref().unwrap_or("-"),
            r.total_messages,
            r.total_nodes_visited,
            r.path_display()
        ));
    }

    lines.join("\n")
}

pub fn format_path_analysis(analysis: &PathAnalysis) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Paths from {} to {}",
        analysis.origin, analysis.destination
    ));
    lines.push(format!("Shortest distance: {} hops", analysis.shortest_distance));
    lines.push(format!("Paths within TTL: {}", analysis.total_paths));
    lines.push(format!(
        "Best case:  {} ({} hops, p={:.4})",
        analysis.best_case.path.join(" -> "),
        analysis.best_case.length,
        analysis.best_case.probability
    ));
    lines.push(format!(
        "Worst case: {} ({} hops, p={:.4})",
        analysis.worst_case.path.join(" -> "),
        analysis.worst_case.length,
        analysis.worst_case.probability
    ));
    lines.push(String::new());

    for (i, info) in analysis.all_paths.iter().enumerate() {
        lines.push(format!(
            "  {:>3}. [{} hops] p={:.4}  {}",
            i + 1,
            info.length,
            info.probability,
            info.path.join(" -> ")
        ));
    }

    lines.join("\n")
}

pub fn format_node_pairs(pairs: &[NodePair], distance: usize) -> String {
    let mut lines = vec![format!("{} pairs at distance {}", pairs.len(), distance)];
    lines.extend(
        pairs
            .iter()
            .map(|p| format!("  {} <-> {}", p.origin, p.destination)),
    );
    lines.join("\n")
}

/// Print network summary to stdout
pub fn print_summary(summary: &NetworkSummary, degrees: &DegreeStats) {
    println!("\n=== NETWORK SUMMARY ===\n");
    println!("Nodes: {}", summary.node_count);
    println!(
        "Neighbor bounds: {}..={}",
        summary.min_neighbors, summary.max_neighbors
    );
    println!("Resources: {}", summary.total_resources);

    println!("\nDegree:");
    println!("  Min: {}", degrees.min);
    println!("  Max: {}", degrees.max);
    println!("  Mean: {:.2}", degrees.mean);
    println!("  Median: {:.1}", degrees.median);
    println!("  Std dev: {:.2}", degrees.std_dev);

    println!("\nAlgorithms:");
    for algo in SearchAlgorithm::all() {
        println!("  {}", algo);
    }
    println!();
}

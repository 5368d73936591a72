//! Read-only views of the overlay for visualization and summaries.
//!
//! Provides:
//! - The graph payload (nodes with their resources, undirected links)
//! - Network summary (peer count, degree bounds, resource total)
//! - Degree statistics
//! - GraphViz DOT output

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::network::NetworkGraph;

/// A peer as seen by a graph renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub resources: Vec<String>,
    /// Neighbor count
    pub neighbors: usize,
}

/// An undirected edge, listed once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Rendering payload for the whole overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Headline figures of a loaded network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub min_neighbors: usize,
    pub max_neighbors: usize,
    pub total_resources: usize,
}

/// Statistical summary of peer degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Build the rendering payload
pub fn build_graph_view(graph: &NetworkGraph) -> GraphView {
    let nodes = graph
        .peers()
        .iter()
        .map(|peer| GraphNode {
            id: peer.id().to_string(),
            resources: peer.resources().map(|r| r.id.clone()).collect(),
            neighbors: peer.neighbor_count(),
        })
        .collect();

    let mut links = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for peer in graph.peers() {
        for neighbor in peer.neighbors() {
            let key = if peer.id() <= neighbor {
                (peer.id(), neighbor)
            } else {
                (neighbor, peer.id())
            };
            if seen.insert(key) {
                links.push(GraphLink {
                    source: peer.id().to_string(),
                    target: neighbor.to_string(),
                });
            }
        }
    }

    GraphView { nodes, links }
}

pub fn summarize_network(graph: &NetworkGraph) -> NetworkSummary {
    NetworkSummary {
        node_count: graph.peer_count(),
        min_neighbors: graph.min_neighbors(),
        max_neighbors: graph.max_neighbors(),
        total_resources: graph.total_resources(),
    }
}

/// Degree statistics over every peer
pub fn degree_stats(graph: &NetworkGraph) -> DegreeStats {
    let degrees: Vec<usize> = graph.peers().iter().map(|p| p.neighbor_count()).collect();
    calculate_stats(&degrees)
}

fn calculate_stats(values: &[usize]) -> DegreeStats {
    if values.is_empty() {
        return DegreeStats {
            min: 0,
            max: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let mean = sorted.iter().sum::<usize>() as f64 / sorted.len() as f64;

    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
    } else {
        sorted[sorted.len() / 2] as f64
    };

    let variance = sorted
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / sorted.len() as f64;

    DegreeStats {
        min,
        max,
        mean,
        median,
        std_dev: variance.sqrt(),
    }
}

/// GraphViz DOT rendering; `highlight` peers (e.g. a search path) are filled gold
pub fn generate_dot(graph: &NetworkGraph, highlight: &[String]) -> String {
    let view = build_graph_view(graph);
    let mut dot = String::new();
    dot.push_str("graph Overlay {\n");
    dot.push_str("    node [shape=circle];\n");
    dot.push_str(&format!("    label=\"{}\";\n", graph));
    dot.push_str("    labelloc=t;\n\n");

    for node in &view.nodes {
        let color = if highlight.contains(&node.id) {
            "gold"
        } else if node.neighbors == 0 {
            "red"
        } else {
            "lightblue"
        };
        dot.push_str(&format!(
            "    \"{}\" [label=\"{}\\n({})\", fillcolor={}, style=filled];\n",
            node.id,
            node.id,
            node.resources.len(),
            color
        ));
    }

    dot.push('\n');
    for link in &view.links {
        dot.push_str(&format!("    \"{}\" -- \"{}\";\n", link.source, link.target));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_graphs;

    #[test]
    fn test_graph_view_lists_each_edge_once() {
        let graph = test_graphs::triangle();
        let view = build_graph_view(&graph);

        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.links.len(), 3);
        assert_eq!(view.nodes[0].id, "n1");
        assert_eq!(view.nodes[0].resources, vec!["r1"]);
        assert_eq!(view.nodes[0].neighbors, 2);
        assert_eq!(
            view.links[0],
            GraphLink {
                source: "n1".to_string(),
                target: "n2".to_string()
            }
        );
    }

    #[test]
    fn test_graph_view_json_shape() {
        let graph = test_graphs::line();
        let json = serde_json::to_value(build_graph_view(&graph)).unwrap();
        assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(json["links"].as_array().unwrap().len(), 3);
        assert_eq!(json["nodes"][3]["resources"][0], "r1");
    }

    #[test]
    fn test_summary() {
        let graph = test_graphs::demo();
        let summary = summarize_network(&graph);
        assert_eq!(summary.node_count, 12);
        assert_eq!(summary.total_resources, 26);
    }

    #[test]
    fn test_degree_stats() {
        let graph = test_graphs::line();
        let stats = degree_stats(&graph);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 2);
        assert!((stats.mean - 1.5).abs() < 1e-12);
        assert!((stats.median - 1.5).abs() < 1e-12);
        assert!((stats.std_dev - 0.5).abs() < 1e-12);

        assert_eq!(calculate_stats(&[]).max, 0);
    }

    #[test]
    fn test_generate_dot() {
        let graph = test_graphs::line();
        let dot = generate_dot(&graph, &["n1".to_string()]);
        assert!(dot.starts_with("graph Overlay {"));
        assert!(dot.contains("\"n1\" -- \"n2\";"));
        assert!(dot.contains("fillcolor=gold"));
        assert_eq!(dot.matches(" -- ").count(), 3);
    }
}

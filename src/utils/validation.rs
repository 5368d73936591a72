//! Structural validation of a built overlay.
//!
//! Unlike construction errors, findings here never abort anything: every
//! check runs and all violations are returned together so a caller can show
//! them in one pass.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::network::NetworkGraph;

/// Outcome of [`validate_network`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Run every structural check against `graph`
///
/// Checks for:
/// - An empty network
/// - Partitions (every peer reachable from the first one)
/// - Peers outside the `[min_neighbors, max_neighbors]` degree bounds
/// - Peers hosting no resources
/// - Self-loops
pub fn validate_network(graph: &NetworkGraph) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(err) = validate_not_partitioned(graph) {
        errors.push(err);
    }
    errors.extend(validate_neighbor_limits(graph));
    errors.extend(validate_resources(graph));
    errors.extend(validate_no_self_loops(graph));

    for err in &errors {
        log::warn!("Validation: {}", err);
    }
    if errors.is_empty() {
        log::debug!("Network with {} nodes passed validation", graph.peer_count());
    }

    ValidationReport::from_errors(errors)
}

fn validate_not_partitioned(graph: &NetworkGraph) -> Option<String> {
    let first = match graph.peers().first() {
        Some(peer) => peer.id(),
        None => return Some("Network has no nodes".to_string()),
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::from([first]);
    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(peer) = graph.peer(current) {
            queue.extend(peer.neighbors().filter(|n| !visited.contains(n)));
        }
    }

    if visited.len() != graph.peer_count() {
        return Some(format!(
            "Network is partitioned: only {} of {} nodes are reachable",
            visited.len(),
            graph.peer_count()
        ));
    }
    None
}

fn validate_neighbor_limits(graph: &NetworkGraph) -> Vec<String> {
    let mut errors = Vec::new();
    for peer in graph.peers() {
        let count = peer.neighbor_count();
        if count < graph.min_neighbors() {
            errors.push(format!(
                "Node {} has {} neighbors, but minimum is {}",
                peer.id(),
                count,
                graph.min_neighbors()
            ));
        }
        if count > graph.max_neighbors() {
            errors.push(format!(
                "Node {} has {} neighbors, but maximum is {}",
                peer.id(),
                count,
                graph.max_neighbors()
            ));
        }
    }
    errors
}

fn validate_resources(graph: &NetworkGraph) -> Vec<String> {
    graph
        .peers()
        .iter()
        .filter(|peer| peer.resource_count() == 0)
        .map(|peer| format!("Node {} has no resources", peer.id()))
        .collect()
}

// Unreachable through `add_edge`, kept for graphs assembled by other means
fn validate_no_self_loops(graph: &NetworkGraph) -> Vec<String> {
    graph
        .peers()
        .iter()
        .filter(|peer| peer.has_neighbor(peer.id()))
        .map(|peer| format!("Node {} has a self-loop", peer.id()))
        .collect()
}

//! Search outcome and the visit bookkeeping shared by the strategies.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one search invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub resource_id: String,
    pub found: bool,
    pub location_node_id: Option<String>,
    pub total_messages: usize,
    pub total_nodes_visited: usize,
    /// Peers in first-visit order, without duplicates
    pub visited_nodes: Vec<String>,
    /// One concrete route from the start peer to the hosting peer; empty on failure
    pub path: Vec<String>,
}

impl SearchResult {
    /// Successful search ending at `location`
    pub fn found(
        resource_id: &str,
        location: &str,
        total_messages: usize,
        visited: VisitLog,
        path: Vec<String>,
    ) -> Self {
        let visited_nodes = visited.into_order();
        Self {
            resource_id: resource_id.to_string(),
            found: true,
            location_node_id: Some(location.to_string()),
            total_messages,
            total_nodes_visited: visited_nodes.len(),
            visited_nodes,
            path,
        }
    }

    /// Exhausted search. The path is dropped.
    pub fn not_found(resource_id: &str, total_messages: usize, visited: VisitLog) -> Self {
        let visited_nodes = visited.into_order();
        Self {
            resource_id: resource_id.to_string(),
            found: false,
            location_node_id: None,
            total_messages,
            total_nodes_visited: visited_nodes.len(),
            visited_nodes,
            path: Vec::new(),
        }
    }

    /// Path rendered as `n1 -> n2 -> n3`
    pub fn path_display(&self) -> String {
        self.path.join(" -> ")
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchResult(resourceId={}, found={}, location={}, messages={}, nodesVisited={})",
            self.resource_id,
            self.found,
            self.location_node_id.as_deref().unwrap_or("not found"),
            self.total_messages,
            self.total_nodes_visited
        )
    }
}

/// Insertion-ordered set of visited peer ids
#[derive(Debug, Default, Clone)]
pub struct VisitLog {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit; returns false if the peer was already recorded
    pub fn visit(&mut self, peer_id: &str) -> bool {
        if self.seen.contains(peer_id) {
            return false;
        }
        self.seen.insert(peer_id.to_string());
        self.order.push(peer_id.to_string());
        true
    }

    pub fn contains(&self, peer_id: &str) -> bool {
        self.seen.contains(peer_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_order(self) -> Vec<String> {
        self.order
    }
}

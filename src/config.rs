use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::network::{GraphError, NetworkGraph, Peer};
use crate::search::{SearchAlgorithm, SearchParams};
use crate::utils::{is_valid_node_id, node_id};

/// Overlay description: `num_nodes` peers named `n1..nN`, their hosted
/// resources and the undirected edges between them
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    pub num_nodes: usize,
    pub min_neighbors: usize,
    pub max_neighbors: usize,
    /// Peer id -> resource ids hosted there
    pub resources: BTreeMap<String, Vec<String>>,
    pub edges: Vec<(String, String)>,
    /// Scripted searches, executed in order by `p2psearch run`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searches: Vec<SearchConfig>,
}

/// One scripted search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub node_id: String,
    pub resource_id: String,
    pub ttl: u32,
    pub algo: SearchAlgorithm,
}

impl SearchConfig {
    pub fn params(&self) -> SearchParams {
        SearchParams::new(self.node_id.as_str(), self.resource_id.as_str(), self.ttl)
    }
}

/// Configuration errors, raised before or while building the graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("num_nodes must be a positive integer")]
    InvalidNodeCount,
    #[error("max_neighbors must be greater than or equal to min_neighbors")]
    InvalidBounds,
    #[error("resources must be defined and non-empty")]
    NoResources,
    #[error("Self-loop detected: edge from {0} to itself")]
    SelfLoop(String),
    #[error("Invalid node ID in resources: {id}. Must be between n1 and n{num_nodes}")]
    InvalidResourceNode { id: String, num_nodes: usize },
    #[error("Invalid node ID in edges: {id}. Must be between n1 and n{num_nodes}")]
    InvalidEdgeNode { id: String, num_nodes: usize },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl NetworkConfig {
    /// Validate the configuration; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_nodes == 0 {
            return Err(ConfigError::InvalidNodeCount);
        }
        if self.max_neighbors < self.min_neighbors {
            return Err(ConfigError::InvalidBounds);
        }
        if self.resources.is_empty() {
            return Err(ConfigError::NoResources);
        }

        if let Some((a, _)) = self.edges.iter().find(|(a, b)| a == b) {
            return Err(ConfigError::SelfLoop(a.clone()));
        }

        if let Some(id) = self
            .resources
            .keys()
            .find(|id| !is_valid_node_id(id, self.num_nodes))
        {
            return Err(ConfigError::InvalidResourceNode {
                id: id.clone(),
                num_nodes: self.num_nodes,
            });
        }

        if let Some(id) = self
            .edges
            .iter()
            .flat_map(|(a, b)| [a, b])
            .find(|id| !is_valid_node_id(id, self.num_nodes))
        {
            return Err(ConfigError::InvalidEdgeNode {
                id: id.clone(),
                num_nodes: self.num_nodes,
            });
        }

        Ok(())
    }

    /// Validate, then build the graph: peers `n1..nN` in order, their
    /// resources, then the edges
    pub fn build_graph(&self) -> Result<NetworkGraph, ConfigError> {
        self.validate()?;

        let mut graph = NetworkGraph::new(self.min_neighbors, self.max_neighbors)?;
        for i in 1..=self.num_nodes {
            graph.add_peer(Peer::new(node_id(i)))?;
        }
        for (peer_id, resource_ids) in &self.resources {
            for resource_id in resource_ids {
                graph.add_resource(peer_id, resource_id)?;
            }
        }
        for (a, b) in &self.edges {
            graph.add_edge(a, b)?;
        }

        log::debug!(
            "Built network: {} nodes, {} edges, {} resources",
            graph.peer_count(),
            self.edges.len(),
            graph.total_resources()
        );
        Ok(graph)
    }
}

//! Overlay data model.
//!
//! This module contains the peers, the resources they host and the graph
//! that ties them together. Construction errors are reported through
//! [`GraphError`]; structural checks over a finished graph live in
//! [`crate::utils::validation`].

pub mod graph;
pub mod peer;
pub mod resource;

pub use graph::NetworkGraph;
pub use peer::Peer;
pub use resource::Resource;

/// Errors raised while building or mutating a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Node {0} not found")]
    UnknownPeer(String),

    #[error("Node {0} already exists")]
    DuplicatePeer(String),

    #[error("Cannot create edge from node {0} to itself")]
    SelfLoop(String),

    #[error("maxNeighbors ({max}) must be greater than or equal to minNeighbors ({min})")]
    InvalidBounds { min: usize, max: usize },
}

//! The overlay graph: peers plus undirected neighbor relations.

use std::collections::HashMap;
use std::fmt;

use super::peer::Peer;
use super::resource::Resource;
use super::GraphError;

/// In-memory overlay of peers.
///
/// Peers are kept in insertion order; lookups go through an id index. Edges
/// are undirected and stored on both endpoints. Once handed to a search the
/// topology is frozen and only peer caches change.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    min_neighbors: usize,
    max_neighbors: usize,
    peers: Vec<Peer>,
    index: HashMap<String, usize>,
}

impl NetworkGraph {
    /// Create an empty graph with the given degree bounds
    pub fn new(min_neighbors: usize, max_neighbors: usize) -> Result<Self, GraphError> {
        if max_neighbors < min_neighbors {
            return Err(GraphError::InvalidBounds {
                min: min_neighbors,
                max: max_neighbors,
            });
        }
        Ok(Self {
            min_neighbors,
            max_neighbors,
            peers: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn min_neighbors(&self) -> usize {
        self.min_neighbors
    }

    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }

    /// Insert a new peer. Peer ids must be unique.
    pub fn add_peer(&mut self, peer: Peer) -> Result<(), GraphError> {
        if self.index.contains_key(peer.id()) {
            return Err(GraphError::DuplicatePeer(peer.id().to_string()));
        }
        self.index.insert(peer.id().to_string(), self.peers.len());
        self.peers.push(peer);
        Ok(())
    }

    /// Place a resource on an existing peer
    pub fn add_resource(&mut self, peer_id: &str, resource_id: &str) -> Result<(), GraphError> {
        let peer = self
            .peer_mut(peer_id)
            .ok_or_else(|| GraphError::UnknownPeer(peer_id.to_string()))?;
        peer.add_resource(Resource::new(resource_id, peer_id));
        Ok(())
    }

    pub fn peer(&self, peer_id: &str) -> Option<&Peer> {
        self.index.get(peer_id).map(|&i| &self.peers[i])
    }

    pub fn peer_mut(&mut self, peer_id: &str) -> Option<&mut Peer> {
        match self.index.get(peer_id) {
            Some(&i) => Some(&mut self.peers[i]),
            None => None,
        }
    }

    pub fn has_peer(&self, peer_id: &str) -> bool {
        self.index.contains_key(peer_id)
    }

    /// All peers in insertion order
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Connect two distinct existing peers in both directions
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        if !self.has_peer(a) {
            return Err(GraphError::UnknownPeer(a.to_string()));
        }
        if !self.has_peer(b) {
            return Err(GraphError::UnknownPeer(b.to_string()));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a.to_string()));
        }

        let (ia, ib) = (self.index[a], self.index[b]);
        self.peers[ia].add_neighbor(b)?;
        self.peers[ib].add_neighbor(a)?;
        Ok(())
    }

    /// Disconnect two peers. Unknown ids are ignored.
    pub fn remove_edge(&mut self, a: &str, b: &str) {
        if let Some(peer) = self.peer_mut(a) {
            peer.remove_neighbor(b);
        }
        if let Some(peer) = self.peer_mut(b) {
            peer.remove_neighbor(a);
        }
    }

    /// Neighbor ids of a peer, `None` if the peer does not exist
    pub fn neighbors(&self, peer_id: &str) -> Option<Vec<&str>> {
        self.peer(peer_id).map(|p| p.neighbors().collect())
    }

    /// Resources hosted by a peer, `None` if the peer does not exist
    pub fn resources(&self, peer_id: &str) -> Option<Vec<&Resource>> {
        self.peer(peer_id).map(|p| p.resources().collect())
    }

    pub fn resource_count(&self, peer_id: &str) -> Option<usize> {
        self.peer(peer_id).map(Peer::resource_count)
    }

    pub fn total_resources(&self) -> usize {
        self.peers.iter().map(Peer::resource_count).sum()
    }

    /// Authoritative location of a resource (first hosting peer in insertion order)
    pub fn find_resource_location(&self, resource_id: &str) -> Option<&str> {
        self.peers
            .iter()
            .find(|p| p.has_resource(resource_id))
            .map(Peer::id)
    }

    /// Resource list of every peer, keyed by peer id
    pub fn all_resources(&self) -> Vec<(&str, Vec<&Resource>)> {
        self.peers
            .iter()
            .map(|p| (p.id(), p.resources().collect()))
            .collect()
    }

    /// Does `peer_id` exist and currently host `resource_id`?
    pub fn hosts(&self, peer_id: &str, resource_id: &str) -> bool {
        self.peer(peer_id)
            .map_or(false, |p| p.has_resource(resource_id))
    }

    /// Drop every cached location hint
    pub fn clear_caches(&mut self) {
        for peer in &mut self.peers {
            peer.clear_cache();
        }
    }
}

impl fmt::Display for NetworkGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Network(nodes={}, minNeighbors={}, maxNeighbors={})",
            self.peers.len(),
            self.min_neighbors,
            self.max_neighbors
        )
    }
}

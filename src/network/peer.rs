//! Peer (overlay vertex) with its neighbor set, hosted resources and
//! resource-location cache.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use super::resource::Resource;
use super::GraphError;

/// A vertex of the overlay.
///
/// Neighbor and resource collections are ordered so that traversals over the
/// same graph are reproducible. The cache maps a resource id to the peer last
/// known to host it; entries are hints and may be stale.
#[derive(Debug, Clone)]
pub struct Peer {
    id: String,
    neighbors: BTreeSet<String>,
    resources: BTreeMap<String, Resource>,
    cache: HashMap<String, String>,
}

impl Peer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            neighbors: BTreeSet::new(),
            resources: BTreeMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a neighbor id. A peer never lists itself.
    pub fn add_neighbor(&mut self, peer_id: &str) -> Result<(), GraphError> {
        if peer_id == self.id {
            return Err(GraphError::SelfLoop(self.id.clone()));
        }
        self.neighbors.insert(peer_id.to_string());
        Ok(())
    }

    pub fn remove_neighbor(&mut self, peer_id: &str) {
        self.neighbors.remove(peer_id);
    }

    pub fn has_neighbor(&self, peer_id: &str) -> bool {
        self.neighbors.contains(peer_id)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = &str> + '_ {
        self.neighbors.iter().map(String::as_str)
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Host a resource, replacing any resource with the same id
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.insert(resource.id.clone(), resource);
    }

    pub fn has_resource(&self, resource_id: &str) -> bool {
        self.resources.contains_key(resource_id)
    }

    pub fn resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.get(resource_id)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.values()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Record `peer_id` as the last known location of `resource_id`
    pub fn update_cache(&mut self, resource_id: &str, peer_id: &str) {
        self.cache.insert(resource_id.to_string(), peer_id.to_string());
    }

    /// Unverified hint for where `resource_id` lives
    pub fn cached_location(&self, resource_id: &str) -> Option<&str> {
        self.cache.get(resource_id).map(String::as_str)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(id={}, neighbors={}, resources={})",
            self.id,
            self.neighbors.len(),
            self.resources.len()
        )
    }
}

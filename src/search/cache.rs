//! Resource-location hints used by the informed strategies.
//!
//! A cache entry is never trusted on its own: a hit only counts once the
//! referenced peer is confirmed to still host the resource.

use log::{debug, warn};

use crate::network::NetworkGraph;

/// Cached location of `resource_id` at `peer_id`, if present and verified
pub fn verified_location(graph: &NetworkGraph, peer_id: &str, resource_id: &str) -> Option<String> {
    let hint = graph.peer(peer_id)?.cached_location(resource_id)?;

    if graph.hosts(hint, resource_id) {
        debug!("Cache hit at {}: {} -> {}", peer_id, resource_id, hint);
        Some(hint.to_string())
    } else {
        warn!(
            "Ignoring stale cache entry at {}: {} no longer hosted by {}",
            peer_id, resource_id, hint
        );
        None
    }
}

/// Write `location` into the cache of every peer on `path`
pub fn propagate(graph: &mut NetworkGraph, path: &[String], resource_id: &str, location: &str) {
    for peer_id in path {
        if let Some(peer) = graph.peer_mut(peer_id) {
            peer.update_cache(resource_id, location);
        }
    }
    debug!(
        "Cached location {} for {} on {} peers",
        location,
        resource_id,
        path.len()
    );
}

/// Append a cached location to a path unless the path already ends there
pub fn extend_path(mut path: Vec<String>, location: &str) -> Vec<String> {
    if path.last().map(String::as_str) != Some(location) {
        path.push(location.to_string());
    }
    path
}

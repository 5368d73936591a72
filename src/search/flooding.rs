//! Flooding and informed flooding.
//!
//! Both run a TTL-bounded breadth-first flood. Peers are marked visited when
//! popped, not when enqueued, so a peer reached through several predecessors
//! in the same wave is enqueued (and charged a message) once per predecessor.
//! This duplicate traffic is what a real flood broadcast costs.

use std::collections::VecDeque;

use log::{debug, info};
use rand::RngCore;

use super::cache;
use super::result::{SearchResult, VisitLog};
use super::{SearchError, SearchParams, SearchStrategy};
use crate::network::NetworkGraph;

/// Plain TTL-bounded flood
#[derive(Debug, Default, Clone, Copy)]
pub struct Flooding;

/// Flood that consults and reinforces per-peer location caches
#[derive(Debug, Default, Clone, Copy)]
pub struct InformedFlooding;

impl SearchStrategy for Flooding {
    fn name(&self) -> &'static str {
        "Flooding"
    }

    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        _rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError> {
        flood(graph, params, false, self.name())
    }
}

impl SearchStrategy for InformedFlooding {
    fn name(&self) -> &'static str {
        "Informed Flooding"
    }

    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        _rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError> {
        let start = graph
            .peer(&params.node_id)
            .ok_or_else(|| SearchError::NotFound(params.node_id.clone()))?;

        if let Some(location) = cache::verified_location(graph, start.id(), &params.resource_id) {
            info!(
                "[{}] Resource {} served from cache at {} (cached location {})",
                self.name(),
                params.resource_id,
                params.node_id,
                location
            );
            let mut visited = VisitLog::new();
            visited.visit(&params.node_id);
            let path = cache::extend_path(vec![params.node_id.clone()], &location);
            return Ok(SearchResult::found(&params.resource_id, &location, 0, visited, path));
        }

        flood(graph, params, true, self.name())
    }
}

/// One pending delivery of the query
struct FloodItem {
    peer_id: String,
    ttl: u32,
    path: Vec<String>,
}

fn flood(
    graph: &mut NetworkGraph,
    params: &SearchParams,
    informed: bool,
    label: &str,
) -> Result<SearchResult, SearchError> {
    let resource_id = params.resource_id.as_str();
    if !graph.has_peer(&params.node_id) {
        return Err(SearchError::NotFound(params.node_id.clone()));
    }

    let mut visited = VisitLog::new();
    let mut total_messages = 0usize;
    let mut queue = VecDeque::new();
    queue.push_back(FloodItem {
        peer_id: params.node_id.clone(),
        ttl: params.ttl,
        path: vec![params.node_id.clone()],
    });

    while let Some(item) = queue.pop_front() {
        if !visited.visit(&item.peer_id) {
            continue;
        }

        if informed {
            if let Some(location) = cache::verified_location(graph, &item.peer_id, resource_id) {
                cache::propagate(graph, &item.path, resource_id, &location);
                let path = cache::extend_path(item.path, &location);
                info!(
                    "[{}] Resource {} located at {} via cache of {}",
                    label, resource_id, location, item.peer_id
                );
                return Ok(SearchResult::found(resource_id, &location, total_messages, visited, path));
            }
        }

        let Some(peer) = graph.peer(&item.peer_id) else {
            continue;
        };

        if peer.has_resource(resource_id) {
            info!("[{}] Resource {} found at {}", label, resource_id, item.peer_id);
            if informed {
                cache::propagate(graph, &item.path, resource_id, &item.peer_id);
            }
            return Ok(SearchResult::found(
                resource_id,
                &item.peer_id,
                total_messages,
                visited,
                item.path,
            ));
        }

        if item.ttl > 0 {
            for neighbor in peer.neighbors() {
                if visited.contains(neighbor) {
                    continue;
                }
                total_messages += 1;
                let mut path = item.path.clone();
                path.push(neighbor.to_string());
                queue.push_back(FloodItem {
                    peer_id: neighbor.to_string(),
                    ttl: item.ttl - 1,
                    path,
                });
            }
        }
    }

    debug!(
        "[{}] Resource {} not found from {} (ttl={}, messages={})",
        label, resource_id, params.node_id, params.ttl, total_messages
    );
    Ok(SearchResult::not_found(resource_id, total_messages, visited))
}

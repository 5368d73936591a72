//! Random walk and informed random walk.
//!
//! A walk follows one trajectory: at each step it moves to a uniformly chosen
//! neighbor that is not already on its path, paying one message per hop. It
//! stops on success, when the TTL is spent, or at a dead end.

use log::{debug, info};
use rand::{Rng, RngCore};

use super::cache;
use super::result::{SearchResult, VisitLog};
use super::{SearchError, SearchParams, SearchStrategy};
use crate::network::NetworkGraph;

/// Single random trajectory
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomWalk;

/// Random walk that consults and reinforces per-peer location caches
#[derive(Debug, Default, Clone, Copy)]
pub struct InformedRandomWalk;

impl SearchStrategy for RandomWalk {
    fn name(&self) -> &'static str {
        "Random Walk"
    }

    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError> {
        walk(graph, params, rng, false, self.name())
    }
}

impl SearchStrategy for InformedRandomWalk {
    fn name(&self) -> &'static str {
        "Informed Random Walk"
    }

    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError> {
        if !graph.has_peer(&params.node_id) {
            return Err(SearchError::NotFound(params.node_id.clone()));
        }

        if let Some(location) = cache::verified_location(graph, &params.node_id, &params.resource_id) {
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

        walk(graph, params, rng, true, self.name())
    }
}

fn walk(
    graph: &mut NetworkGraph,
    params: &SearchParams,
    rng: &mut dyn RngCore,
    informed: bool,
    label: &str,
) -> Result<SearchResult, SearchError> {
    let resource_id = params.resource_id.as_str();
    if !graph.has_peer(&params.node_id) {
        return Err(SearchError::NotFound(params.node_id.clone()));
    }

    let mut visited = VisitLog::new();
    let mut path: Vec<String> = Vec::new();
    let mut total_messages = 0usize;
    let mut current = params.node_id.clone();
    let mut ttl = params.ttl;

    loop {
        visited.visit(&current);
        path.push(current.clone());

        if informed {
            if let Some(location) = cache::verified_location(graph, &current, resource_id) {
                cache::propagate(graph, &path, resource_id, &location);
                let path = cache::extend_path(path, &location);
                info!(
                    "[{}] Resource {} located at {} via cache of {}",
                    label, resource_id, location, current
                );
                return Ok(SearchResult::found(resource_id, &location, total_messages, visited, path));
            }
        }

        let Some(peer) = graph.peer(&current) else {
            break;
        };

        if peer.has_resource(resource_id) {
            info!("[{}] Resource {} found at {}", label, resource_id, current);
            if informed {
                cache::propagate(graph, &path, resource_id, &current);
            }
            return Ok(SearchResult::found(resource_id, &current, total_messages, visited, path));
        }

        if ttl == 0 {
            debug!("[{}] TTL exhausted at {}", label, current);
            break;
        }

        let candidates: Vec<&str> = peer
            .neighbors()
            .filter(|n| !visited.contains(n))
            .collect();

        if candidates.is_empty() {
            debug!("[{}] Dead end at {}", label, current);
            break;
        }

        let next = candidates[rng.gen_range(0..candidates.len())].to_string();
        total_messages += 1;
        ttl -= 1;
        current = next;
    }

    Ok(SearchResult::not_found(resource_id, total_messages, visited))
}

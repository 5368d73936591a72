//! Exhaustive random walk.
//!
//! Every worklist item is an independent branch with its own visited set, so
//! sibling branches may pass through the same peers. At each peer the branch
//! continues to one randomly chosen unvisited neighbor (the primary
//! continuation, queued first) and spawns a new branch for every other
//! unvisited neighbor. Each spawned branch costs one message.
//!
//! The number of branches is bounded only by the TTL and peer degree and can
//! grow combinatorially. No cap is applied; callers keep both small.

use std::collections::VecDeque;
use std::iter;
use std::rc::Rc;

use log::{debug, info};
use rand::{Rng, RngCore};

use super::result::{SearchResult, VisitLog};
use super::{SearchError, SearchParams, SearchStrategy};
use crate::network::NetworkGraph;

/// Multi-branch random walk
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveRandomWalk;

/// Peers walked by a branch, newest first.
///
/// Sibling branches share their common prefix, so spawning a branch costs one
/// link instead of a copy of the whole visited set. The trail doubles as the
/// branch's path and its visited set.
#[derive(Debug)]
struct Trail {
    peer_id: String,
    parent: Option<Rc<Trail>>,
}

impl Trail {
    fn root(peer_id: &str) -> Rc<Self> {
        Rc::new(Self {
            peer_id: peer_id.to_string(),
            parent: None,
        })
    }

    fn extend(this: &Rc<Self>, peer_id: &str) -> Rc<Self> {
        Rc::new(Self {
            peer_id: peer_id.to_string(),
            parent: Some(Rc::clone(this)),
        })
    }

    fn iter(&self) -> impl Iterator<Item = &Trail> + '_ {
        iter::successors(Some(self), |t| t.parent.as_deref())
    }

    fn contains(&self, peer_id: &str) -> bool {
        self.iter().any(|t| t.peer_id == peer_id)
    }

    /// Start-to-current path
    fn to_path(&self) -> Vec<String> {
        let mut path: Vec<String> = self.iter().map(|t| t.peer_id.clone()).collect();
        path.reverse();
        path
    }
}

struct Branch {
    ttl: u32,
    trail: Rc<Trail>,
}

impl SearchStrategy for ExhaustiveRandomWalk {
    fn name(&self) -> &'static str {
        "Exhaustive Random Walk"
    }

    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError> {
        let resource_id = params.resource_id.as_str();
        if !graph.has_peer(&params.node_id) {
            return Err(SearchError::NotFound(params.node_id.clone()));
        }

        let mut visited = VisitLog::new();
        let mut total_messages = 0usize;
        let mut branches_spawned = 0usize;
        let mut queue = VecDeque::new();
        queue.push_back(Branch {
            ttl: params.ttl,
            trail: Trail::root(&params.node_id),
        });

        while let Some(branch) = queue.pop_front() {
            let current = branch.trail.peer_id.as_str();
            // global visited set is for statistics only
            visited.visit(current);

            let Some(peer) = graph.peer(current) else {
                continue;
            };

            if peer.has_resource(resource_id) {
                info!("[{}] Resource {} found at {}", self.name(), resource_id, current);
                let location = current.to_string();
                let path = branch.trail.to_path();
                return Ok(SearchResult::found(resource_id, &location, total_messages, visited, path));
            }

            if branch.ttl == 0 {
                continue;
            }

            let candidates: Vec<&str> = peer
                .neighbors()
                .filter(|n| !branch.trail.contains(n))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let primary = rng.gen_range(0..candidates.len());
            let order = iter::once(primary).chain((0..candidates.len()).filter(|&i| i != primary));
            for i in order {
                total_messages += 1;
                branches_spawned += 1;
                queue.push_back(Branch {
                    ttl: branch.ttl - 1,
                    trail: Trail::extend(&branch.trail, candidates[i]),
                });
            }
        }

        debug!(
            "[{}] Resource {} not found from {} after {} branches",
            self.name(),
            resource_id,
            params.node_id,
            branches_spawned
        );
        Ok(SearchResult::not_found(resource_id, total_messages, visited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::path_analyzer;
    use crate::search::test_graphs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(graph: &mut NetworkGraph, start: &str, resource: &str, ttl: u32, seed: u64) -> SearchResult {
        let mut rng = StdRng::seed_from_u64(seed);
        ExhaustiveRandomWalk
            .search(graph, &SearchParams::new(start, resource, ttl), &mut rng)
            .unwrap()
    }

    /// Messages spent on a complete graph of `n` peers when nothing is found:
    /// every simple path of 1..=ttl hops from the start is one branch.
    fn complete_graph_messages(n: usize, ttl: usize) -> usize {
        let mut total = 0;
        let mut layer = 1;
        for depth in 1..=ttl {
            if depth >= n {
                break;
            }
            layer *= n - depth;
            total += layer;
        }
        total
    }

    #[test]
    fn test_trail() {
        let root = Trail::root("n1");
        let a = Trail::extend(&root, "n2");
        let b = Trail::extend(&root, "n3");
        let c = Trail::extend(&a, "n4");

        assert_eq!(c.to_path(), vec!["n1", "n2", "n4"]);
        assert_eq!(b.to_path(), vec!["n1", "n3"]);
        assert!(c.contains("n1"));
        assert!(!c.contains("n3"));
        assert!(!root.contains("n2"));
        // siblings share the root link
        assert_eq!(Rc::strong_count(&root), 3);
    }

    #[test]
    fn test_line() {
        let mut graph = test_graphs::line();
        let result = run(&mut graph, "n1", "r1", 3, 0);
        assert!(result.found);
        assert_eq!(result.path, vec!["n1", "n2", "n3", "n4"]);
        assert_eq!(result.total_messages, 3);
        assert_eq!(result.total_nodes_visited, 4);

        let result = run(&mut graph, "n1", "r1", 1, 0);
        assert!(!result.found);
    }

    #[test]
    fn test_resource_at_start() {
        let mut graph = test_graphs::triangle();
        let result = run(&mut graph, "n1", "r1", 3, 0);
        assert!(result.found);
        assert_eq!(result.path, vec!["n1"]);
        assert_eq!(result.total_messages, 0);
    }

    #[test]
    fn test_branches_revisit_peers_seen_by_siblings() {
        let mut graph = test_graphs::triangle();
        let result = run(&mut graph, "n1", "missing", 5, 0);
        // n1->n2, n1->n3, then n2->n3 and n3->n2 on separate branches
        assert_eq!(result.total_messages, 4);
        assert_eq!(result.total_nodes_visited, 3);
    }

    #[test]
    fn test_branch_growth_is_uncapped() {
        // Branch count follows the falling factorial of the degree; nothing
        // truncates it short of the TTL. A K5 with TTL 4 already spawns 64.
        for (n, ttl) in [(4, 3), (5, 3), (5, 4), (6, 5)] {
            let mut graph = test_graphs::complete(n);
            for seed in 0..3 {
                let result = run(&mut graph, "n1", "missing", ttl as u32, seed);
                assert!(!result.found);
                assert_eq!(result.total_messages, complete_graph_messages(n, ttl), "K{} ttl {}", n, ttl);
                assert_eq!(result.total_nodes_visited, n);
            }
        }
        assert_eq!(complete_graph_messages(5, 4), 64);
        assert_eq!(complete_graph_messages(6, 5), 325);
    }

    #[test]
    fn test_finds_along_a_shortest_route() {
        // branches are expanded level by level, so the first hit is at the
        // minimum hop count regardless of the random choices
        let mut graph = test_graphs::demo();
        for seed in 0..20 {
            let result = run(&mut graph, "n1", "r24", 4, seed);
            assert!(result.found);
            let hops = path_analyzer::shortest_distance(&graph, "n1", "n12").unwrap();
            assert_eq!(result.path.len(), hops + 1);
            for step in result.path.windows(2) {
                assert!(graph.peer(&step[0]).unwrap().has_neighbor(&step[1]));
            }
        }
    }

    #[test]
    fn test_never_touches_caches() {
        let mut graph = test_graphs::line();
        run(&mut graph, "n1", "r1", 3, 0);
        assert!(graph.peers().iter().all(|p| p.cached_location("r1").is_none()));
    }
}

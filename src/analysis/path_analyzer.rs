//! Offline path analysis over an overlay graph.
//!
//! Everything here is read-only and ignores peer caches:
//! - shortest hop distance between two peers (BFS)
//! - every simple path within a TTL (backtracking DFS)
//! - the probability that a uniform random walk produces a given path
//! - an aggregate best/worst case report
//! - all peer pairs at a given distance

use std::collections::{HashMap, HashSet, VecDeque};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::network::{NetworkGraph, Peer};

/// Errors reported by [`analyze_paths`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Node {0} not found")]
    UnknownPeer(String),

    #[error("No path found between {origin} and {destination}")]
    NoPath { origin: String, destination: String },

    #[error("No paths found within TTL {ttl}")]
    NoPathWithinTtl { ttl: u32 },
}

/// One concrete route with its random-walk probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathInfo {
    pub path: Vec<String>,
    /// Hop count
    pub length: usize,
    pub probability: f64,
}

/// Aggregate analysis between two peers within a TTL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysis {
    pub origin: String,
    pub destination: String,
    pub shortest_distance: usize,
    /// Every simple path within the TTL, shortest first
    pub all_paths: Vec<PathInfo>,
    pub best_case: PathInfo,
    pub worst_case: PathInfo,
    pub total_paths: usize,
}

/// Two peers at a known distance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePair {
    pub origin: String,
    pub destination: String,
    pub distance: usize,
}

/// Hop count of the shortest route, `None` if unreachable
pub fn shortest_distance(graph: &NetworkGraph, origin: &str, destination: &str) -> Option<usize> {
    if origin == destination {
        return Some(0);
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    visited.insert(origin);
    queue.push_back((origin, 0));

    while let Some((current, distance)) = queue.pop_front() {
        let Some(peer) = graph.peer(current) else {
            continue;
        };

        for neighbor in peer.neighbors() {
            if neighbor == destination {
                return Some(distance + 1);
            }
            if visited.insert(neighbor) {
                queue.push_back((neighbor, distance + 1));
            }
        }
    }

    None
}

/// Hop distance from `origin` to every reachable peer
pub fn distances_from<'a>(graph: &'a NetworkGraph, origin: &'a str) -> HashMap<&'a str, usize> {
    let mut distances: HashMap<&str, usize> = HashMap::new();
    if !graph.has_peer(origin) {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances.insert(origin, 0);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let distance = distances[current];
        let Some(peer) = graph.peer(current) else {
            continue;
        };
        for neighbor in peer.neighbors() {
            if !distances.contains_key(neighbor) {
                distances.insert(neighbor, distance + 1);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// Every simple path from `origin` to `destination` with at most `ttl` hops
pub fn find_all_paths(graph: &NetworkGraph, origin: &str, destination: &str, ttl: u32) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut visited = HashSet::new();
    let mut path = vec![origin.to_string()];
    let max_len = ttl as usize + 1;

    collect_paths(graph, origin, destination, max_len, &mut path, &mut visited, &mut paths);
    paths
}

fn collect_paths(
    graph: &NetworkGraph,
    current: &str,
    destination: &str,
    max_len: usize,
    path: &mut Vec<String>,
    visited: &mut HashSet<String>,
    paths: &mut Vec<Vec<String>>,
) {
    if path.len() > max_len {
        return;
    }

    if current == destination {
        paths.push(path.clone());
        return;
    }

    let Some(peer) = graph.peer(current) else {
        return;
    };

    visited.insert(current.to_string());
    for neighbor in peer.neighbors() {
        if visited.contains(neighbor) {
            continue;
        }
        path.push(neighbor.to_string());
        collect_paths(graph, neighbor, destination, max_len, path, visited, paths);
        path.pop();
    }
    visited.remove(current);
}

/// Probability that a uniform random walk produces exactly `path`.
///
/// Each step contributes `1 / k` where `k` is the number of neighbors of the
/// current peer not already on the path prefix. Returns 0 when a step is not
/// one of those neighbors, and 1 for paths of a single peer or none.
pub fn path_probability<S: AsRef<str>>(graph: &NetworkGraph, path: &[S]) -> f64 {
    if path.len() <= 1 {
        return 1.0;
    }

    let path: Vec<&str> = path.iter().map(|p| AsRef::<str>::as_ref(p)).collect();
    let mut probability = 1.0;
    for i in 0..path.len() - 1 {
        let Some(peer) = graph.peer(path[i]) else {
            return 0.0;
        };
        let prefix = &path[..=i];
        let unvisited: Vec<&str> = peer
            .neighbors()
            .filter(|n| !prefix.contains(n))
            .collect();

        if unvisited.is_empty() || !unvisited.contains(&path[i + 1]) {
            return 0.0;
        }
        probability *= 1.0 / unvisited.len() as f64;
    }

    probability
}

/// Full analysis of the routes between two peers within `ttl` hops
pub fn analyze_paths(
    graph: &NetworkGraph,
    origin: &str,
    destination: &str,
    ttl: u32,
) -> Result<PathAnalysis, AnalysisError> {
    for id in [origin, destination] {
        if !graph.has_peer(id) {
            return Err(AnalysisError::UnknownPeer(id.to_string()));
        }
    }

    let shortest = shortest_distance(graph, origin, destination).ok_or_else(|| AnalysisError::NoPath {
        origin: origin.to_string(),
        destination: destination.to_string(),
    })?;

    let mut all_paths: Vec<PathInfo> = find_all_paths(graph, origin, destination, ttl)
        .into_iter()
        .map(|path| PathInfo {
            length: path.len() - 1,
            probability: path_probability(graph, path.as_slice()),
            path,
        })
        .filter(|info| info.length <= ttl as usize)
        .collect();
    all_paths.sort_by_key(|info| info.length);

    let (Some(best_case), Some(worst_case)) = (all_paths.first().cloned(), all_paths.last().cloned()) else {
        return Err(AnalysisError::NoPathWithinTtl { ttl });
    };

    log::info!(
        "Analyzed {} -> {}: shortest distance {}, {} paths within TTL {}",
        origin,
        destination,
        shortest,
        all_paths.len(),
        ttl
    );

    Ok(PathAnalysis {
        origin: origin.to_string(),
        destination: destination.to_string(),
        shortest_distance: shortest,
        total_paths: all_paths.len(),
        all_paths,
        best_case,
        worst_case,
    })
}

/// Every unordered pair of peers whose shortest distance is `distance`.
///
/// Pairs follow peer insertion order (`origin` before `destination`).
pub fn find_node_pairs_with_distance(graph: &NetworkGraph, distance: usize) -> Vec<NodePair> {
    let ids: Vec<&str> = graph.peers().iter().map(Peer::id).collect();

    (0..ids.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let origin = ids[i];
            let distances = distances_from(graph, origin);
            ids[i + 1..]
                .iter()
                .filter(|dest| distances.get(**dest) == Some(&distance))
                .map(|dest| NodePair {
                    origin: origin.to_string(),
                    destination: dest.to_string(),
                    distance,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_graphs;

    /// `a - b - d` and `a - c - d`, plus `c - e`
    fn diamond() -> NetworkGraph {
        test_graphs::build(
            &[("a", &["ra"]), ("b", &["rb"]), ("c", &["rc"]), ("d", &["rd"]), ("e", &["re"])],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("c", "e")],
        )
    }

    #[test]
    fn test_shortest_distance() {
        let graph = test_graphs::line();
        assert_eq!(shortest_distance(&graph, "n1", "n1"), Some(0));
        assert_eq!(shortest_distance(&graph, "n1", "n2"), Some(1));
        assert_eq!(shortest_distance(&graph, "n1", "n4"), Some(3));
        assert_eq!(shortest_distance(&graph, "n4", "n1"), Some(3));
        assert_eq!(shortest_distance(&graph, "n1", "ghost"), None);
    }

    #[test]
    fn test_unreachable() {
        let graph = test_graphs::build(&[("a", &["r"]), ("b", &["r2"])], &[]);
        assert_eq!(shortest_distance(&graph, "a", "b"), None);
        assert!(find_all_paths(&graph, "a", "b", 5).is_empty());
        assert_eq!(
            analyze_paths(&graph, "a", "b", 5).unwrap_err(),
            AnalysisError::NoPath {
                origin: "a".to_string(),
                destination: "b".to_string()
            }
        );
    }

    #[test]
    fn test_distances_from() {
        let graph = diamond();
        let distances = distances_from(&graph, "a");
        assert_eq!(distances["a"], 0);
        assert_eq!(distances["d"], 2);
        assert_eq!(distances["e"], 2);
        assert!(distances_from(&graph, "ghost").is_empty());
    }

    #[test]
    fn test_find_all_paths() {
        let graph = diamond();
        let mut paths = find_all_paths(&graph, "a", "d", 2);
        paths.sort();
        assert_eq!(paths, vec![vec!["a", "b", "d"], vec!["a", "c", "d"]]);

        // one hop is not enough
        assert!(find_all_paths(&graph, "a", "d", 1).is_empty());

        // longer budgets do not add detours that revisit peers
        let mut paths = find_all_paths(&graph, "b", "c", 10);
        paths.sort();
        assert_eq!(paths, vec![vec!["b", "a", "c"], vec!["b", "d", "c"]]);
    }

    #[test]
    fn test_path_probability() {
        let graph = diamond();
        // a has {b, c}; b has {d} left once a is on the path
        let p = path_probability(&graph, &["a", "b", "d"]);
        assert!((p - 0.5).abs() < 1e-12);
        // c has {d, e} left once a is on the path
        let p = path_probability(&graph, &["a", "c", "d"]);
        assert!((p - 0.25).abs() < 1e-12);

        assert_eq!(path_probability(&graph, &["a"]), 1.0);
        assert_eq!(path_probability::<&str>(&graph, &[]), 1.0);
    }

    #[test]
    fn test_unrealizable_path_probability() {
        let graph = diamond();
        // not an edge
        assert_eq!(path_probability(&graph, &["a", "d"]), 0.0);
        // revisits a peer already on the prefix
        assert_eq!(path_probability(&graph, &["a", "b", "a"]), 0.0);
        // unknown peer
        assert_eq!(path_probability(&graph, &["ghost", "a"]), 0.0);
    }

    #[test]
    fn test_analyze_paths() {
        let graph = test_graphs::demo();
        let analysis = analyze_paths(&graph, "n1", "n12", 4).unwrap();

        assert_eq!(analysis.shortest_distance, 3);
        assert_eq!(analysis.total_paths, analysis.all_paths.len());
        assert_eq!(analysis.best_case.length, 3);
        assert!(analysis.worst_case.length <= 4);
        assert!(analysis
            .all_paths
            .windows(2)
            .all(|w| w[0].length <= w[1].length));
        for info in &analysis.all_paths {
            assert_eq!(info.path.first().map(String::as_str), Some("n1"));
            assert_eq!(info.path.last().map(String::as_str), Some("n12"));
            assert!(info.probability > 0.0 && info.probability <= 1.0);
        }
    }

    #[test]
    fn test_analyze_paths_ttl_too_small() {
        let graph = test_graphs::line();
        assert_eq!(
            analyze_paths(&graph, "n1", "n4", 2).unwrap_err(),
            AnalysisError::NoPathWithinTtl { ttl: 2 }
        );
        assert_eq!(
            analyze_paths(&graph, "n1", "n9", 2).unwrap_err(),
            AnalysisError::UnknownPeer("n9".to_string())
        );
    }

    #[test]
    fn test_analyze_same_peer() {
        let graph = test_graphs::line();
        let analysis = analyze_paths(&graph, "n2", "n2", 0).unwrap();
        assert_eq!(analysis.shortest_distance, 0);
        assert_eq!(analysis.best_case.path, vec!["n2"]);
        assert_eq!(analysis.best_case.probability, 1.0);
    }

    #[test]
    fn test_node_pairs_with_distance() {
        let graph = test_graphs::line();
        let pairs = find_node_pairs_with_distance(&graph, 2);
        let flat: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.origin.as_str(), p.destination.as_str()))
            .collect();
        assert_eq!(flat, vec![("n1", "n3"), ("n2", "n4")]);
        assert!(pairs.iter().all(|p| p.distance == 2));

        assert_eq!(find_node_pairs_with_distance(&graph, 3).len(), 1);
        assert!(find_node_pairs_with_distance(&graph, 4).is_empty());
    }
}

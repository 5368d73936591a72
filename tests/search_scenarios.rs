#[cfg(test)]
mod search_scenarios {
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::{Builder, NamedTempFile};

    use p2psearch::analysis::{network_graph, path_analyzer};
    use p2psearch::config_loader::{self, LoadedNetwork};
    use p2psearch::search::{SearchAlgorithm, SearchEngine, SearchError, SearchParams};

    fn demo_config_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/demo_network.yaml")
    }

    fn load_demo() -> LoadedNetwork {
        config_loader::load_network(&demo_config_path()).unwrap()
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    /// The shipped demo network loads and passes structural validation
    #[test]
    fn test_demo_network_loads() {
        let loaded = load_demo();
        assert_eq!(loaded.graph.peer_count(), 12);
        assert_eq!(loaded.graph.to_string(), "Network(nodes=12, minNeighbors=2, maxNeighbors=4)");
        assert_eq!(loaded.config.searches.len(), 5);

        let summary = network_graph::summarize_network(&loaded.graph);
        assert_eq!(summary.total_resources, 26);
        let view = network_graph::build_graph_view(&loaded.graph);
        assert_eq!(view.links.len(), 17);
    }

    /// Flooding the demo network for r15 reaches n7 through n3
    #[test]
    fn test_flooding_on_demo_network() {
        let LoadedNetwork { mut graph, .. } = load_demo();
        let mut engine = SearchEngine::seeded(1);

        let result = engine
            .search(&mut graph, &SearchParams::new("n1", "r15", 10), SearchAlgorithm::Flooding)
            .unwrap();
        assert!(result.found);
        assert_eq!(result.location_node_id.as_deref(), Some("n7"));
        assert_eq!(result.path, vec!["n1", "n3", "n7"]);
        assert_eq!(result.total_messages, 11);
        assert_eq!(result.visited_nodes, vec!["n1", "n2", "n3", "n4", "n5", "n6", "n7"]);
    }

    /// A repeated informed flood is served from the start peer's cache
    #[test]
    fn test_cache_reinforcement_across_searches() {
        let LoadedNetwork { mut graph, .. } = load_demo();
        let mut engine = SearchEngine::seeded(1);
        let params = SearchParams::new("n1", "r15", 10);

        let first = engine.search(&mut graph, &params, SearchAlgorithm::InformedFlooding).unwrap();
        assert_eq!(first.total_messages, 11);

        let second = engine.search(&mut graph, &params, SearchAlgorithm::InformedFlooding).unwrap();
        assert!(second.found);
        assert_eq!(second.total_messages, 0);
        assert_eq!(second.total_nodes_visited, 1);
        assert_eq!(second.path, vec!["n1", "n7"]);

        // n3 lies on the realized path and learned the location too
        let from_n3 = engine
            .search(&mut graph, &SearchParams::new("n3", "r15", 10), SearchAlgorithm::InformedRandomWalk)
            .unwrap();
        assert_eq!(from_n3.total_messages, 0);
        assert_eq!(from_n3.path, vec!["n3", "n7"]);

        graph.clear_caches();
        let cleared = engine.search(&mut graph, &params, SearchAlgorithm::InformedFlooding).unwrap();
        assert_eq!(cleared.total_messages, 11);
    }

    /// Every strategy keeps its bookkeeping consistent on the demo network
    #[test]
    fn test_all_strategies_bookkeeping() {
        let loaded = load_demo();
        for seed in 0..10 {
            let mut engine = SearchEngine::seeded(seed);
            for algo in SearchAlgorithm::all() {
                for (resource, ttl) in [("r24", 2), ("r24", 5), ("r15", 3), ("missing", 4)] {
                    let mut graph = loaded.graph.clone();
                    let result = engine
                        .search(&mut graph, &SearchParams::new("n1", resource, ttl), algo)
                        .unwrap();

                    assert_eq!(result.total_nodes_visited, result.visited_nodes.len(), "{}", algo);
                    let mut unique = result.visited_nodes.clone();
                    unique.sort();
                    unique.dedup();
                    assert_eq!(unique.len(), result.visited_nodes.len(), "{}", algo);

                    if result.found {
                        assert_eq!(result.path.first().map(String::as_str), Some("n1"));
                        assert!(graph.hosts(result.location_node_id.as_deref().unwrap(), resource));
                    } else {
                        assert!(result.path.is_empty());
                        assert!(result.location_node_id.is_none());
                    }
                }
            }
        }
    }

    /// Seeded engines replay randomized strategies identically
    #[test]
    fn test_seeded_runs_are_reproducible() {
        let loaded = load_demo();
        let params = SearchParams::new("n1", "r24", 6);
        for algo in [SearchAlgorithm::RandomWalk, SearchAlgorithm::ExhaustiveRandomWalk] {
            let mut a = loaded.graph.clone();
            let mut b = loaded.graph.clone();
            let ra = SearchEngine::seeded(7).search(&mut a, &params, algo).unwrap();
            let rb = SearchEngine::seeded(7).search(&mut b, &params, algo).unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn test_unknown_start_peer() {
        let LoadedNetwork { mut graph, .. } = load_demo();
        let mut engine = SearchEngine::seeded(0);
        for algo in SearchAlgorithm::all() {
            let err = engine
                .search(&mut graph, &SearchParams::new("n99", "r1", 3), algo)
                .unwrap_err();
            assert_eq!(err, SearchError::NotFound("n99".to_string()));
        }
    }

    /// Scripted searches run in order on one graph, so caches carry over
    #[test]
    fn test_scripted_searches() {
        let LoadedNetwork { config, mut graph } = load_demo();
        let mut engine = SearchEngine::seeded(3);

        let results: Vec<_> = config
            .searches
            .iter()
            .map(|s| engine.search(&mut graph, &s.params(), s.algo).unwrap())
            .collect();

        assert_eq!(results[0].total_messages, 11);
        assert_eq!(results[1].total_messages, 11);
        assert_eq!(results[2].total_messages, 0);
        assert!(results[4].found);
        assert_eq!(results[4].path.len(), 4);
    }

    #[test]
    fn test_path_analysis_on_demo_network() {
        let loaded = load_demo();
        let graph = &loaded.graph;

        assert_eq!(path_analyzer::shortest_distance(graph, "n1", "n12"), Some(3));

        let analysis = path_analyzer::analyze_paths(graph, "n1", "n12", 4).unwrap();
        assert_eq!(analysis.shortest_distance, 3);
        assert_eq!(analysis.best_case.path, vec!["n1", "n4", "n8", "n12"]);
        assert!(analysis.all_paths.iter().all(|p| p.length <= 4));
        assert_eq!(analysis.total_paths, analysis.all_paths.len());
        assert!(analysis.all_paths.windows(2).all(|w| w[0].length <= w[1].length));

        let err = path_analyzer::analyze_paths(graph, "n1", "n12", 2).unwrap_err();
        assert_eq!(err, path_analyzer::AnalysisError::NoPathWithinTtl { ttl: 2 });

        let neighbors = path_analyzer::find_node_pairs_with_distance(graph, 1);
        assert_eq!(neighbors.len(), 17);
    }

    #[test]
    fn test_partitioned_config_rejected() {
        let yaml = r#"
num_nodes: 4
min_neighbors: 1
max_neighbors: 2
resources:
  n1: [r1]
  n2: [r2]
  n3: [r3]
  n4: [r4]
edges:
  - [n1, n2]
  - [n3, n4]
"#;
        let temp_file = config_file(yaml);
        let err = config_loader::load_network(temp_file.path()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Network is partitioned: only 2 of 4 nodes are reachable"));
    }

    #[test]
    fn test_unknown_algorithm_in_config() {
        let yaml = r#"
num_nodes: 2
min_neighbors: 1
max_neighbors: 1
resources:
  n1: [r1]
  n2: [r2]
edges:
  - [n1, n2]
searches:
  - node_id: n1
    resource_id: r2
    ttl: 1
    algo: depth_first
"#;
        let temp_file = config_file(yaml);
        assert!(config_loader::load_config(temp_file.path()).is_err());
    }
}

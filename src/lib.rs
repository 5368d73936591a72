//! # p2psearch - resource discovery strategies on unstructured P2P overlays
//!
//! This library simulates how a query for a named resource travels through a
//! peer-to-peer overlay and what it costs in messages, under five strategies.
//!
//! ## Overview
//!
//! A network is a set of peers, each hosting some resources and connected to
//! a few neighbors by undirected edges. Given a start peer, a resource and a
//! TTL (hop budget), a strategy answers whether the resource can be found and
//! reports the messages spent, the peers visited and one concrete path.
//!
//! ## Strategies
//!
//! - **Flooding**: TTL-bounded breadth-first broadcast
//! - **Informed flooding**: flooding that consults and fills per-peer location caches
//! - **Random walk**: a single random trajectory
//! - **Informed random walk**: random walk with the same cache behaviour
//! - **Exhaustive random walk**: every branch of a random walk explored in parallel
//!
//! Informed strategies make repeated searches cheaper: after a successful
//! search every peer on the realized path remembers where the resource lives.
//! Cache entries are hints and are verified before being trusted.
//!
//! ## Architecture
//!
//! - `network`: peers, resources and the graph that owns them
//! - `search`: the strategies, their dispatch enum and the seeded search engine
//! - `analysis`: offline path analysis, graph views and report formatting
//! - `config`: the network configuration format
//! - `config_loader`: file loading, graph construction and validation
//! - `utils`: structural validation and peer id helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use p2psearch::config_loader;
//! use p2psearch::search::{SearchAlgorithm, SearchEngine, SearchParams};
//!
//! let mut network = config_loader::load_network(Path::new("network.yaml"))?;
//! let mut engine = SearchEngine::seeded(42);
//!
//! let params = SearchParams::new("n1", "r15", 10);
//! let result = engine.search(&mut network.graph, &params, SearchAlgorithm::InformedFlooding)?;
//! println!("{}", result);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! num_nodes: 4
//! min_neighbors: 1
//! max_neighbors: 2
//! resources:
//!   n1: [r1]
//!   n2: [r2]
//!   n3: [r3]
//!   n4: [r4]
//! edges:
//!   - [n1, n2]
//!   - [n2, n3]
//!   - [n3, n4]
//! searches:
//!   - node_id: n1
//!     resource_id: r4
//!     ttl: 3
//!     algo: flooding
//! ```
//!
//! ## Error Handling
//!
//! Library operations return `thiserror` enums (`GraphError`, `SearchError`,
//! `AnalysisError`, `ConfigError`). File loading and reporting use
//! `color_eyre` for errors with context.

pub mod analysis;
pub mod config;
pub mod config_loader;
pub mod network;
pub mod search;
pub mod utils;

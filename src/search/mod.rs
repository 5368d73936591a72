//! Search strategy engine.
//!
//! Five strategies answer the same question: can `resource_id` be reached
//! from `node_id` within `ttl` hops, and how many messages does it cost?
//!
//! - [`Flooding`]: breadth-first flood bounded by the TTL
//! - [`InformedFlooding`]: flooding that reads and reinforces per-peer caches
//! - [`RandomWalk`]: a single random trajectory
//! - [`InformedRandomWalk`]: random walk with the same cache discipline
//! - [`ExhaustiveRandomWalk`]: random walk that branches at every peer
//!
//! Every strategy implements [`SearchStrategy`] and is selected by the
//! [`SearchAlgorithm`] tag. Randomness is injected as a `&mut dyn RngCore`;
//! [`SearchEngine`] owns a seedable source for callers that do not want to
//! manage one.

pub mod cache;
pub mod exhaustive;
pub mod flooding;
pub mod random_walk;
pub mod result;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::network::NetworkGraph;

pub use exhaustive::ExhaustiveRandomWalk;
pub use flooding::{Flooding, InformedFlooding};
pub use random_walk::{InformedRandomWalk, RandomWalk};
pub use result::{SearchResult, VisitLog};

/// Parameters of a single search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Start peer
    pub node_id: String,
    pub resource_id: String,
    /// Maximum number of hops
    pub ttl: u32,
}

impl SearchParams {
    pub fn new(node_id: impl Into<String>, resource_id: impl Into<String>, ttl: u32) -> Self {
        Self {
            node_id: node_id.into(),
            resource_id: resource_id.into(),
            ttl,
        }
    }
}

/// Errors that abort a search
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Start node {0} not found")]
    NotFound(String),

    #[error("Unknown algorithm type: {0}")]
    UnknownAlgorithm(String),
}

/// A resource discovery strategy
pub trait SearchStrategy: Send + Sync {
    /// Human-readable strategy name
    fn name(&self) -> &'static str;

    /// Run one search. Informed strategies may update peer caches.
    fn search(
        &self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        rng: &mut dyn RngCore,
    ) -> Result<SearchResult, SearchError>;
}

/// Identifier of a search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    Flooding,
    InformedFlooding,
    RandomWalk,
    InformedRandomWalk,
    ExhaustiveRandomWalk,
}

impl SearchAlgorithm {
    /// Every available algorithm, in presentation order
    pub fn all() -> [SearchAlgorithm; 5] {
        [
            Self::Flooding,
            Self::InformedFlooding,
            Self::RandomWalk,
            Self::InformedRandomWalk,
            Self::ExhaustiveRandomWalk,
        ]
    }

    /// Wire identifier, e.g. `informed_flooding`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flooding => "flooding",
            Self::InformedFlooding => "informed_flooding",
            Self::RandomWalk => "random_walk",
            Self::InformedRandomWalk => "informed_random_walk",
            Self::ExhaustiveRandomWalk => "exhaustive_random_walk",
        }
    }

    /// Strategy implementing this algorithm
    pub fn strategy(&self) -> &'static dyn SearchStrategy {
        match self {
            Self::Flooding => &Flooding,
            Self::InformedFlooding => &InformedFlooding,
            Self::RandomWalk => &RandomWalk,
            Self::InformedRandomWalk => &InformedRandomWalk,
            Self::ExhaustiveRandomWalk => &ExhaustiveRandomWalk,
        }
    }

    /// Does this algorithm consult and update peer caches?
    pub fn is_informed(&self) -> bool {
        matches!(self, Self::InformedFlooding | Self::InformedRandomWalk)
    }

    /// Does this algorithm draw from the random source?
    pub fn is_randomized(&self) -> bool {
        matches!(
            self,
            Self::RandomWalk | Self::InformedRandomWalk | Self::ExhaustiveRandomWalk
        )
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|algo| algo.as_str() == s)
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

/// Run `algorithm` against `graph`
pub fn search(
    graph: &mut NetworkGraph,
    params: &SearchParams,
    algorithm: SearchAlgorithm,
    rng: &mut dyn RngCore,
) -> Result<SearchResult, SearchError> {
    algorithm.strategy().search(graph, params, rng)
}

/// Search front end owning the shared random source
pub struct SearchEngine {
    rng: StdRng,
}

impl SearchEngine {
    /// Engine seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a reproducible random source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Engine seeded when `seed` is given, from entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    pub fn search(
        &mut self,
        graph: &mut NetworkGraph,
        params: &SearchParams,
        algorithm: SearchAlgorithm,
    ) -> Result<SearchResult, SearchError> {
        search(graph, params, algorithm, &mut self.rng)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

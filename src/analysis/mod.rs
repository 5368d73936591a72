//! Read-only analysis of overlay networks.
//!
//! Path enumeration and probabilities, graph views for visualization, and
//! report formatting for search runs.

pub mod network_graph;
pub mod path_analyzer;
pub mod report;

pub use network_graph::{build_graph_view, degree_stats, summarize_network, GraphView};
pub use path_analyzer::{analyze_paths, AnalysisError, PathAnalysis};
pub use report::generate_json_report;

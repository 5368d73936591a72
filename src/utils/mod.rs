//! Shared utilities: structural validation and peer identifier helpers.

pub mod node_id;
pub mod validation;

pub use node_id::{is_valid_node_id, node_id, parse_node_index, parse_path_list};
pub use validation::{validate_network, ValidationReport};

//! Resource value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named item hosted by exactly one peer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    /// Peer the resource was originally placed on
    pub origin_node_id: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, origin_node_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            origin_node_id: origin_node_id.into(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource(id={}, nodeId={})", self.id, self.origin_node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_equality() {
        let a = Resource::new("r1", "n1");
        assert_eq!(a, Resource::new("r1", "n1"));
        assert_ne!(a, Resource::new("r1", "n2"));
        assert_ne!(a, Resource::new("r2", "n1"));
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::new("r7", "n3").to_string(), "Resource(id=r7, nodeId=n3)");
    }
}

//! Peer identifier helpers.
//!
//! Configured networks name their peers `n1..nN`.

/// Identifier of the `index`-th peer (1-based)
pub fn node_id(index: usize) -> String {
    format!("n{}", index)
}

/// Index of a `n<k>` identifier, `None` if it does not have that shape
pub fn parse_node_index(id: &str) -> Option<usize> {
    let digits = id.strip_prefix('n')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Is `id` one of `n1..=n{num_nodes}`?
pub fn is_valid_node_id(id: &str, num_nodes: usize) -> bool {
    matches!(parse_node_index(id), Some(k) if (1..=num_nodes).contains(&k))
}

/// Split a comma separated peer list (`n1,n2, n3`), dropping empty entries
pub fn parse_path_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

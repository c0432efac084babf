//! Parent-Chain Cycle Detection
//!
//! Distinguishes "parent not seen yet" from "parent chain loops" for a
//! node the load could not attach. Walks declared parent identifiers, not
//! materialized links, because the nodes in question are exactly the ones
//! that never made it into the tree.

use super::ContentTree;
use std::collections::HashSet;

/// Walk the declared parent chain from `start`, keeping a seen set.
///
/// Returns the looping segment (participating identifiers in walk order)
/// if an identifier repeats. Reaching a true root (no parent identifier)
/// or a dangling identifier means the stall is a missing dependency, not a
/// cyclic one, and yields `None`.
///
/// Invoked by the builder once per stalled resolution pass, not per orphan
/// per pass, to bound cost.
pub(crate) fn detect_cycle(tree: &ContentTree, start: &str) -> Option<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut current = start.to_string();

    loop {
        if !seen.insert(current.clone()) {
            // the loop starts at the first occurrence of the repeated id
            let loop_start = path.iter().position(|id| id == &current).unwrap_or(0);
            return Some(path[loop_start..].to_vec());
        }
        path.push(current.clone());

        let node = tree.get(&current)?;
        match &node.record.parent_id {
            Some(parent_id) => current = parent_id.clone(),
            None => return None,
        }
    }
}

//! Display Projection
//!
//! Projects the tree into the flat, ordered, indentation-annotated
//! sequence the console's rendering layer consumes. The traversal keeps
//! its own explicit stack instead of recursing, so arbitrarily deep trees
//! cannot overflow the call stack. Children are pushed in reverse sibling
//! order so they pop in document order.
//!
//! The projection is read-only and restartable: every render recomputes it
//! from the current tree state.

use super::ContentTree;
use serde::{Deserialize, Serialize};

/// One display-ready row of the flattened tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedNode {
    /// Node identifier
    pub id: String,

    /// Indentation depth (0 = root), stamped during traversal
    pub depth: usize,

    /// Owning content-type identifier
    pub type_id: String,

    /// Owning route identifier
    pub route_id: String,

    /// Last author
    pub author: String,

    /// Whether the node is expanded in the console
    pub expanded: bool,

    /// Whether the node has children (collapsed children still count)
    pub has_children: bool,
}

impl ContentTree {
    /// Flatten the attached tree into display order.
    ///
    /// Depth-first from the root; the children of a collapsed node are
    /// skipped but remain materialized and indexed. Orphaned nodes never
    /// appear in the projection.
    pub fn flatten(&self) -> Vec<FlattenedNode> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(String, usize)> = Vec::new();

        if let Some(root_id) = self.root_id() {
            stack.push((root_id.to_string(), 0));
        }

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(&id) else {
                continue;
            };

            out.push(FlattenedNode {
                id: id.clone(),
                depth,
                type_id: node.type_id.clone(),
                route_id: node.route_id.clone(),
                author: node.record.author.clone(),
                expanded: node.expanded,
                has_children: node.has_children(),
            });

            if node.expanded {
                for child in self.child_ids(&id).into_iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }

        out
    }
}

//! Materialized Tree Nodes
//!
//! A `ContentNode` is one arena entry of the content tree: the owned record
//! plus the structural relations and display state the console needs.
//! Relations are expressed as identifiers into the arena rather than owning
//! references, so detaching a node can never leave a dangling edge behind.

use crate::models::ContentRecord;

/// One materialized node of the content tree.
///
/// Structural relations form a doubly-linked child list per parent:
/// `parent` is a back-reference (never an ownership edge), `first_child`
/// heads the child chain, and `next_sibling`/`prev_sibling` link the chain
/// in both directions.
///
/// Invariants maintained by the tree primitives:
///
/// - if `a.next_sibling == Some(b)` then `b.prev_sibling == Some(a)`
/// - a parent's first child has `prev_sibling == None`
/// - every attached node's parent chain terminates at the root
#[derive(Debug, Clone)]
pub struct ContentNode {
    /// The owned record this node was materialized from
    pub record: ContentRecord,

    /// Owning content-type identifier, denormalized for display lookups
    pub type_id: String,

    /// Owning route identifier, denormalized for display lookups
    pub route_id: String,

    /// Materialized parent (back-reference; None while orphaned or root)
    pub parent: Option<String>,

    /// Head of this node's child chain
    pub first_child: Option<String>,

    /// Next sibling in the parent's child chain
    pub next_sibling: Option<String>,

    /// Previous sibling in the parent's child chain
    pub prev_sibling: Option<String>,

    /// Whether the node's children are shown in the console
    pub expanded: bool,

    /// Indentation level (0 = root); stamped on attach
    pub level: usize,
}

impl ContentNode {
    /// Materialize a node from a record.
    ///
    /// The node starts unattached: no parent back-reference, no siblings,
    /// level 0. A fresh load renders fully expanded, so `expanded`
    /// defaults to true.
    pub fn new(record: ContentRecord) -> Self {
        let type_id = record.type_id.clone();
        let route_id = record.route_id.clone();

        Self {
            record,
            type_id,
            route_id,
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            expanded: true,
            level: 0,
        }
    }

    /// The node's identifier
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// True if this node has at least one child
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentRecord;

    #[test]
    fn test_new_node_is_unattached() {
        let record = ContentRecord::new_with_id(
            "n1".to_string(),
            Some("n0".to_string()),
            "route-1".to_string(),
            "page".to_string(),
            "ada".to_string(),
        );
        let node = ContentNode::new(record);

        assert_eq!(node.id(), "n1");
        assert!(node.parent.is_none());
        assert!(node.first_child.is_none());
        assert!(node.next_sibling.is_none());
        assert!(node.prev_sibling.is_none());
        assert!(node.expanded);
        assert_eq!(node.level, 0);
        assert!(!node.has_children());
    }

    #[test]
    fn test_denormalized_metadata() {
        let record = ContentRecord::new_with_id(
            "n1".to_string(),
            None,
            "route-9".to_string(),
            "article".to_string(),
            "ada".to_string(),
        );
        let node = ContentNode::new(record);

        assert_eq!(node.type_id, "article");
        assert_eq!(node.route_id, "route-9");
    }
}

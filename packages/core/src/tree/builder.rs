//! Tree Builder
//!
//! Drives the three-phase load that turns flat record rows into a content
//! tree: materialize every row, attach the immediately-resolvable
//! hierarchy, then iteratively resolve the remaining orphans under a
//! bounded retry budget.
//!
//! The input is order-irrelevant: a child may arrive before its parent, a
//! declared parent may never arrive, and corrupt data may loop. A stalled
//! resolution pass triggers cycle detection; cycle participants stop being
//! retried, and anything still unresolved when the budget runs out is
//! reported as finally orphaned. The partially built tree always
//! accompanies a resolution failure so the console can render a degraded
//! view.
//!
//! # Examples
//!
//! ```rust
//! use pageforge_core::models::ContentRecord;
//! use pageforge_core::tree::TreeBuilder;
//!
//! let root = ContentRecord::new(None, "route-1".to_string(), "page".to_string(), "ada".to_string());
//! let child = ContentRecord::new(
//!     Some(root.id.clone()),
//!     "route-1".to_string(),
//!     "article".to_string(),
//!     "ada".to_string(),
//! );
//!
//! let load = TreeBuilder::new().load(vec![child, root]).unwrap();
//! assert_eq!(load.stats.nodes_materialized, 2);
//! assert_eq!(load.tree.orphan_count(), 0);
//! ```

use super::cycle::detect_cycle;
use super::{ContentNode, ContentTree};
use crate::models::{ContentRecord, RecordError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Default number of orphan-resolution passes before a load gives up
pub const DEFAULT_MAX_PASSES: usize = 100;

/// Tuning knobs for a load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Maximum orphan-resolution passes before remaining orphans are
    /// reported as unresolved. This is the only termination guarantee on
    /// permanently malformed input, so it must stay finite.
    pub max_passes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl LoadOptions {
    /// Create options with the default retry budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the retry budget
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Statistics describing a completed (or abandoned) load.
///
/// Consumed by the console's diagnostics/log surface; serialized in
/// camelCase like every other wire-facing shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    /// Nodes created during materialization (one per input record)
    pub nodes_materialized: usize,

    /// Orphans attached by resolution passes (immediate attachments in
    /// the hierarchy phase are not counted here)
    pub orphans_resolved: usize,

    /// Resolution passes actually consumed
    pub passes_used: usize,

    /// Identifiers participating in a detected parent-chain cycle
    pub cyclic_ids: Vec<String>,

    /// Identifiers whose parent never resolved within the retry budget
    pub orphaned_ids: Vec<String>,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes materialized, {} orphans resolved over {} passes, {} unresolved, {} cyclic",
            self.nodes_materialized,
            self.orphans_resolved,
            self.passes_used,
            self.orphaned_ids.len(),
            self.cyclic_ids.len()
        )
    }
}

/// A built tree together with its load statistics
#[derive(Debug)]
pub struct TreeLoad {
    pub tree: ContentTree,
    pub stats: LoadStats,
}

/// Errors that can fail a load
#[derive(Error, Debug)]
pub enum LoadError {
    /// No parentless record among the input rows; nothing can anchor the
    /// tree, so no partial tree is returned
    #[error("No root record present among {records} records")]
    NoRoot { records: usize },

    /// More than one parentless record; the hierarchy is ambiguous and no
    /// partial tree is trusted
    #[error("Multiple root records: {ids:?}")]
    MultipleRoots { ids: Vec<String> },

    /// Two input rows share an identifier
    #[error("Duplicate record identifier '{id}'")]
    DuplicateId { id: String },

    /// An input row failed validation
    #[error("Record '{id}' is invalid: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: RecordError,
    },

    /// Orphans or cycles survived the retry budget. The partially built
    /// tree rides along so callers can choose a degraded view; its stats
    /// name the cyclic and finally-orphaned identifiers.
    #[error("Load could not fully resolve the hierarchy: {}", .partial.stats)]
    Unresolved { partial: Box<TreeLoad> },
}

/// Builds a [`ContentTree`] from flat record rows.
///
/// The builder is stateless between loads; each call produces a fresh
/// tree and index. See the module docs for the phase semantics.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: LoadOptions,
}

impl TreeBuilder {
    /// Create a builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with explicit options
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Build a tree from an order-irrelevant sequence of flat records.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NoRoot`] / [`LoadError::MultipleRoots`]: zero or
    ///   several parentless records; fatal, no partial tree
    /// - [`LoadError::DuplicateId`] / [`LoadError::InvalidRecord`]: corrupt
    ///   input rows; fatal, no partial tree
    /// - [`LoadError::Unresolved`]: dangling or cyclic parent references;
    ///   carries the partial tree and full statistics
    pub fn load(&self, records: Vec<ContentRecord>) -> Result<TreeLoad, LoadError> {
        let total = records.len();
        let mut tree = ContentTree::new();
        // Resolution order is the input order; the orphan set in the tree
        // only mirrors membership.
        let mut pending: Vec<String> = Vec::new();
        let mut extra_roots: Vec<String> = Vec::new();

        // Phase 1: materialize one node per record and establish the root.
        for record in records {
            if let Err(source) = record.validate() {
                return Err(LoadError::InvalidRecord {
                    id: record.id.clone(),
                    source,
                });
            }
            if tree.contains(&record.id) || extra_roots.contains(&record.id) {
                return Err(LoadError::DuplicateId { id: record.id });
            }
            if record.is_root() {
                if tree.root_id().is_none() {
                    tree.materialize_root(ContentNode::new(record));
                } else {
                    extra_roots.push(record.id);
                }
            } else {
                pending.push(record.id.clone());
                tree.materialize(ContentNode::new(record));
            }
        }

        let root_id = match tree.root_id() {
            Some(id) => id.to_string(),
            None => return Err(LoadError::NoRoot { records: total }),
        };
        if !extra_roots.is_empty() {
            let mut ids = vec![root_id];
            ids.extend(extra_roots);
            return Err(LoadError::MultipleRoots { ids });
        }

        let mut stats = LoadStats {
            nodes_materialized: tree.len(),
            ..Default::default()
        };

        // Phase 2: immediate hierarchy. Everything whose parent is already
        // attached goes in now; the rest is the orphan table.
        let attached_now = Self::attach_pass(&mut tree, &mut pending);
        tracing::debug!(
            attached = attached_now,
            orphans = pending.len(),
            "immediate hierarchy attached"
        );

        // Phase 3: resolve orphans to a fixed point, bounded by the retry
        // budget. A node attaches only once its parent is itself attached;
        // attaching under a still-orphaned parent would require
        // re-parenting later and corrupt sibling lists.
        let mut cyclic_ids: Vec<String> = Vec::new();
        let mut cyclic_set: HashSet<String> = HashSet::new();

        while stats.passes_used < self.options.max_passes && !pending.is_empty() {
            stats.passes_used += 1;
            let resolved = Self::attach_pass(&mut tree, &mut pending);
            stats.orphans_resolved += resolved;
            tracing::debug!(
                pass = stats.passes_used,
                resolved,
                remaining = pending.len(),
                "orphan resolution pass"
            );

            if resolved == 0 {
                // Stalled: decide missing-vs-cyclic once for this pass.
                let mut found_new = false;
                for id in &pending {
                    if let Some(loop_ids) = detect_cycle(&tree, id) {
                        for member in loop_ids {
                            if cyclic_set.insert(member.clone()) {
                                cyclic_ids.push(member);
                                found_new = true;
                            }
                        }
                    }
                }
                if found_new {
                    tracing::warn!(
                        cyclic = ?cyclic_ids,
                        "cyclic parent chains detected; affected nodes will not be retried"
                    );
                    pending.retain(|id| !cyclic_set.contains(id));
                }
                // Anything else stalled may be a forward reference that a
                // later pass can still resolve; keep consuming the budget.
            }
        }

        stats.orphaned_ids = pending;
        stats.cyclic_ids = cyclic_ids;

        if !stats.orphaned_ids.is_empty() || !stats.cyclic_ids.is_empty() {
            tracing::warn!(%stats, "load completed with unresolved hierarchy");
            return Err(LoadError::Unresolved {
                partial: Box::new(TreeLoad { tree, stats }),
            });
        }

        tracing::debug!(%stats, "load complete");
        Ok(TreeLoad { tree, stats })
    }

    /// One in-order sweep over the pending list, attaching every node
    /// whose parent is attached. Returns the number attached.
    fn attach_pass(tree: &mut ContentTree, pending: &mut Vec<String>) -> usize {
        let before = pending.len();
        pending.retain(|id| {
            let parent = tree.get(id).and_then(|n| n.record.parent_id.clone());
            match parent {
                Some(parent_id) if tree.is_attached(&parent_id) => {
                    tree.attach(id, &parent_id);
                    false
                }
                _ => true,
            }
        });
        before - pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>) -> ContentRecord {
        ContentRecord::new_with_id(
            id.to_string(),
            parent.map(|p| p.to_string()),
            "route-1".to_string(),
            "page".to_string(),
            "ada".to_string(),
        )
    }

    #[test]
    fn load_in_order_uses_no_resolution_passes() {
        let load = TreeBuilder::new()
            .load(vec![
                record("root", None),
                record("a", Some("root")),
                record("b", Some("a")),
            ])
            .unwrap();

        assert_eq!(load.stats.passes_used, 0);
        assert_eq!(load.stats.orphans_resolved, 0);
        assert_eq!(load.tree.orphan_count(), 0);
    }

    #[test]
    fn load_reversed_chain_counts_passes() {
        // deepest descendant first; each pass attaches one level
        let load = TreeBuilder::new()
            .load(vec![
                record("c", Some("b")),
                record("b", Some("a")),
                record("a", Some("root")),
                record("root", None),
            ])
            .unwrap();

        assert_eq!(load.stats.passes_used, 2);
        assert_eq!(load.stats.orphans_resolved, 2);
        assert_eq!(load.tree.child_ids("b"), vec!["c"]);
    }

    #[test]
    fn load_without_root_fails() {
        let err = TreeBuilder::new()
            .load(vec![record("a", Some("b")), record("b", Some("a"))])
            .unwrap_err();

        assert!(matches!(err, LoadError::NoRoot { records: 2 }));
    }

    #[test]
    fn load_with_two_roots_fails() {
        let err = TreeBuilder::new()
            .load(vec![record("r1", None), record("r2", None)])
            .unwrap_err();

        match err {
            LoadError::MultipleRoots { ids } => assert_eq!(ids, vec!["r1", "r2"]),
            other => panic!("expected MultipleRoots, got {other:?}"),
        }
    }

    #[test]
    fn load_with_duplicate_id_fails() {
        let err = TreeBuilder::new()
            .load(vec![
                record("root", None),
                record("a", Some("root")),
                record("a", Some("root")),
            ])
            .unwrap_err();

        assert!(matches!(err, LoadError::DuplicateId { id } if id == "a"));
    }

    #[test]
    fn load_with_invalid_record_fails() {
        let err = TreeBuilder::new()
            .load(vec![record("root", None), record("a", Some("a"))])
            .unwrap_err();

        assert!(matches!(err, LoadError::InvalidRecord { id, .. } if id == "a"));
    }

    #[test]
    fn cycle_members_are_dropped_and_forward_references_still_resolve() {
        // x<->y loop alongside a resolvable reversed chain
        let err = TreeBuilder::new()
            .load(vec![
                record("c", Some("b")),
                record("b", Some("a")),
                record("x", Some("y")),
                record("y", Some("x")),
                record("a", Some("root")),
                record("root", None),
            ])
            .unwrap_err();

        match err {
            LoadError::Unresolved { partial } => {
                let mut cyclic = partial.stats.cyclic_ids.clone();
                cyclic.sort();
                assert_eq!(cyclic, vec!["x", "y"]);
                assert!(partial.stats.orphaned_ids.is_empty());
                // the resolvable chain made it into the tree
                assert!(partial.tree.is_attached("c"));
                assert_eq!(partial.tree.orphan_count(), 2);
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn node_below_cycle_is_finally_orphaned_not_cyclic() {
        // z hangs off the x<->y loop: the loop is reported, z is orphaned
        let err = TreeBuilder::new()
            .load(vec![
                record("root", None),
                record("x", Some("y")),
                record("y", Some("x")),
                record("z", Some("x")),
            ])
            .unwrap_err();

        match err {
            LoadError::Unresolved { partial } => {
                let mut cyclic = partial.stats.cyclic_ids.clone();
                cyclic.sort();
                assert_eq!(cyclic, vec!["x", "y"]);
                assert_eq!(partial.stats.orphaned_ids, vec!["z"]);
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn dangling_parent_consumes_the_whole_budget() {
        let builder = TreeBuilder::with_options(LoadOptions::new().with_max_passes(7));
        let err = builder
            .load(vec![record("root", None), record("lost", Some("never"))])
            .unwrap_err();

        match err {
            LoadError::Unresolved { partial } => {
                assert_eq!(partial.stats.passes_used, 7);
                assert_eq!(partial.stats.orphaned_ids, vec!["lost"]);
                assert!(partial.stats.cyclic_ids.is_empty());
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn stats_display_summarizes_counts() {
        let stats = LoadStats {
            nodes_materialized: 5,
            orphans_resolved: 2,
            passes_used: 3,
            cyclic_ids: vec!["x".to_string()],
            orphaned_ids: vec!["y".to_string(), "z".to_string()],
        };

        assert_eq!(
            stats.to_string(),
            "5 nodes materialized, 2 orphans resolved over 3 passes, 2 unresolved, 1 cyclic"
        );
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stats = LoadStats {
            nodes_materialized: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["nodesMaterialized"], 1);
        assert!(json.get("orphanedIds").is_some());
        assert!(json.get("cyclicIds").is_some());
    }
}

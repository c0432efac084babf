//! PageForge Core Tree Engine
//!
//! This crate turns the flat, order-independent record rows stored by the
//! PageForge console into an in-memory content tree used for rendering,
//! editing, and navigation.
//!
//! # Architecture
//!
//! - **Arena-backed tree**: every materialized node lives in a single
//!   identifier-keyed map; parent/child/sibling relations are identifiers
//!   into that map, never owning references
//! - **Three-phase load**: materialize, attach immediate hierarchy, then
//!   iteratively resolve orphans under a bounded retry budget
//! - **Corruption-tolerant**: dangling parents and cyclic parent chains are
//!   detected and reported instead of looping forever
//! - **Mutation-friendly**: doubly-linked sibling lists support structural
//!   edits (insert, delete with child promotion) without rebuilding
//!
//! # Modules
//!
//! - [`models`] - Flat content record rows as produced by the record store
//! - [`tree`] - The tree engine: builder, edit primitives, cycle detection,
//!   and the display flattener

pub mod models;
pub mod tree;

// Re-export commonly used types
pub use models::*;
pub use tree::*;

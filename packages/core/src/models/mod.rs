//! Data Models
//!
//! This module contains the flat input rows consumed by the tree engine:
//!
//! - `ContentRecord` - One row of the console's content store
//!
//! Records are produced by a query against the record store and are
//! otherwise opaque to the engine; the store remains the source of truth.

mod record;

pub use record::{ContentRecord, RecordError};

//! Content Record Rows
//!
//! This module defines `ContentRecord`, the flat row shape the console's
//! record store hands to the tree engine. Rows arrive in arbitrary order:
//! a child may precede its parent, a parent identifier may never appear at
//! all, and corrupt data may contain cycles. The engine deals with all of
//! that; a record itself only guarantees local well-formedness.
//!
//! # Examples
//!
//! ```rust
//! use pageforge_core::models::ContentRecord;
//!
//! // A root record (no parent)
//! let home = ContentRecord::new(None, "route-main".to_string(), "page".to_string(), "ada".to_string());
//!
//! // A child record pointing at its parent
//! let child = ContentRecord::new(
//!     Some(home.id.clone()),
//!     "route-main".to_string(),
//!     "article".to_string(),
//!     "ada".to_string(),
//! );
//! assert!(child.validate().is_ok());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for individual content records
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Record '{id}' cannot be its own parent")]
    SelfParent { id: String },
}

/// One flat row of the content store.
///
/// # Fields
///
/// - `id`: Unique identifier assigned upstream by the record store
/// - `parent_id`: Optional declared parent identifier; `None` marks the
///   tree root
/// - `route_id`: The route this content is published under
/// - `type_id`: The content type that owns this record's field layout
/// - `author`: Last author, for display in the console
/// - `created_at` / `modified_at`: Store timestamps
///
/// The declared `parent_id` is an assertion made by the store, not a fact
/// about the tree: it may reference a row that never arrives, or
/// participate in a cycle. Resolution happens during load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Unique identifier (assigned upstream)
    pub id: String,

    /// Declared parent identifier (None for the root)
    pub parent_id: Option<String>,

    /// Owning route identifier
    pub route_id: String,

    /// Owning content-type identifier
    pub type_id: String,

    /// Last author
    pub author: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Create a new record with an auto-generated UUID
    ///
    /// # Arguments
    ///
    /// * `parent_id` - Declared parent identifier, `None` for a root record
    /// * `route_id` - Owning route identifier
    /// * `type_id` - Owning content-type identifier
    /// * `author` - Author name
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pageforge_core::models::ContentRecord;
    /// let record = ContentRecord::new(None, "route-1".to_string(), "page".to_string(), "ada".to_string());
    /// assert!(!record.id.is_empty());
    /// assert!(record.parent_id.is_none());
    /// ```
    pub fn new(
        parent_id: Option<String>,
        route_id: String,
        type_id: String,
        author: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            parent_id,
            route_id,
            type_id,
            author,
            created_at: now,
            modified_at: now,
        }
    }

    /// Create a new record with an explicit identifier
    ///
    /// Used when replaying rows whose identifiers were assigned by the
    /// store, and by tests that need deterministic ids.
    pub fn new_with_id(
        id: String,
        parent_id: Option<String>,
        route_id: String,
        type_id: String,
        author: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            parent_id,
            route_id,
            type_id,
            author,
            created_at: now,
            modified_at: now,
        }
    }

    /// Validate local well-formedness of the row
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if:
    /// - `id`, `route_id`, or `type_id` is empty
    /// - the record declares itself as its own parent
    ///
    /// Dangling or cyclic parent references are NOT caught here; those are
    /// properties of the whole row set and are resolved during load.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.is_empty() {
            return Err(RecordError::MissingField("id".to_string()));
        }

        if self.route_id.is_empty() {
            return Err(RecordError::MissingField("route_id".to_string()));
        }

        if self.type_id.is_empty() {
            return Err(RecordError::MissingField("type_id".to_string()));
        }

        if let Some(parent_id) = &self.parent_id {
            if parent_id == &self.id {
                return Err(RecordError::SelfParent {
                    id: self.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// True if this row declares no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
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
    fn test_record_creation() {
        let rec = ContentRecord::new(
            None,
            "route-1".to_string(),
            "page".to_string(),
            "ada".to_string(),
        );

        assert!(!rec.id.is_empty());
        assert_eq!(rec.route_id, "route-1");
        assert_eq!(rec.type_id, "page");
        assert!(rec.is_root());
    }

    #[test]
    fn test_record_with_explicit_id() {
        let rec = record("home", None);
        assert_eq!(rec.id, "home");
        assert!(rec.is_root());

        let child = record("child", Some("home"));
        assert!(!child.is_root());
    }

    #[test]
    fn test_record_validation() {
        assert!(record("home", None).validate().is_ok());
        assert!(record("child", Some("home")).validate().is_ok());
    }

    #[test]
    fn test_record_validation_empty_id() {
        let rec = record("", None);
        assert!(matches!(
            rec.validate(),
            Err(RecordError::MissingField(field)) if field == "id"
        ));
    }

    #[test]
    fn test_record_validation_empty_route() {
        let mut rec = record("home", None);
        rec.route_id = String::new();
        assert!(matches!(rec.validate(), Err(RecordError::MissingField(_))));
    }

    #[test]
    fn test_record_validation_self_parent() {
        let rec = record("home", Some("home"));
        assert!(matches!(
            rec.validate(),
            Err(RecordError::SelfParent { id }) if id == "home"
        ));
    }

    #[test]
    fn test_record_touch() {
        let mut rec = record("home", None);
        let before = rec.modified_at;
        rec.touch();
        assert!(rec.modified_at >= before);
    }

    #[test]
    fn test_record_serialization_camel_case() {
        let rec = record("child", Some("home"));
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["id"], "child");
        assert_eq!(json["parentId"], "home");
        assert_eq!(json["routeId"], "route-1");
        assert_eq!(json["typeId"], "page");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_record_round_trip() {
        let rec = record("child", Some("home"));
        let json = serde_json::to_string(&rec).unwrap();
        let back: ContentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}

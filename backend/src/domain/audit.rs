//! Append-only audit trail for administrator edits to books.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AdminId, Book, BookDraft, BookId};

/// Kind of change recorded by an audit entry. Deletions are not audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
}

impl AuditAction {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        }
    }
}

/// Audit row ready for insertion alongside the book mutation it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub book_id: BookId,
    pub action: AuditAction,
    pub admin_id: AdminId,
    pub old_values: Option<Value>,
    pub new_values: Value,
}

impl NewAuditEntry {
    /// Entry for a freshly created book; there is no prior snapshot.
    pub fn created(book_id: BookId, admin_id: AdminId, draft: &BookDraft) -> Self {
        Self {
            book_id,
            action: AuditAction::Create,
            admin_id,
            old_values: None,
            new_values: snapshot(draft),
        }
    }

    /// Entry for an update: the prior row and the submitted payload.
    pub fn updated(prior: &Book, admin_id: AdminId, draft: &BookDraft) -> Self {
        Self {
            book_id: prior.id,
            action: AuditAction::Update,
            admin_id,
            old_values: Some(snapshot(prior)),
            new_values: snapshot(draft),
        }
    }
}

// Plain data structs with string keys always serialise.
fn snapshot<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Persisted audit row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: i64,
    pub book_id: BookId,
    pub action_type: AuditAction,
    pub admin_id: AdminId,
    pub old_values: Option<Value>,
    pub new_values: Value,
    pub created_at: DateTime<Utc>,
}

//! The secret note record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored secret note.
///
/// At rest the `note` field always holds a well-formed
/// `ivHex:ciphertextHex` token. The only exception is the transient
/// projection returned by
/// [`NoteService::get_decrypted_by_id`](crate::service::NoteService::get_decrypted_by_id),
/// which is a copy and is never persisted.
///
/// Serialized field names follow the collaborator wire shape
/// (`createdAt`, `updatedAt`, `deletedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretNote {
    /// Store-assigned identifier, immutable after creation and never reused.
    pub id: Uuid,

    /// Ciphertext token (plaintext only inside a decrypted projection copy).
    pub note: String,

    /// Set once at creation, never modified.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,

    /// Tombstone timestamp; `None` means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SecretNote {
    /// Returns `true` when the record has not been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

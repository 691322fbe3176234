//! Note store abstraction for record persistence.

use crate::error::StoreError;
use crate::note::SecretNote;
use uuid::Uuid;

/// Persistence contract for secret note records.
///
/// The store is the sole owner of record state: it allocates ids and
/// timestamps, and its consistency guarantees resolve races between
/// concurrent updates (last-writer-wins is acceptable). The service layer
/// only ever hands it ciphertext.
///
/// Implementations must be thread-safe (`Send + Sync`) to support
/// concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use sirnot::store::NoteStore;
///
/// struct MyStore;
///
/// impl NoteStore for MyStore {
///     fn create(&self, ciphertext: &str) -> Result<SecretNote, StoreError> {
///         // Implementation
///     }
///     // ... other methods
/// }
/// ```
pub trait NoteStore: Send + Sync {
    /// Allocates an id and timestamps for a new record, persists it with
    /// the given ciphertext token, and returns the full record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the store rejects the write.
    fn create(&self, ciphertext: &str) -> Result<SecretNote, StoreError>;

    /// Looks up a record by id.
    ///
    /// Soft-deleted records are still returned here; direct lookups do not
    /// filter tombstones.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` if the read fails. A missing id is
    /// `Ok(None)`, not an error.
    fn find_by_id(&self, id: Uuid) -> Result<Option<SecretNote>, StoreError>;

    /// Returns all non-tombstoned records.
    ///
    /// Ordering is store-defined but must be stable within one read;
    /// insertion order is acceptable. An empty store yields an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` if the read fails.
    fn find_all_active(&self) -> Result<Vec<SecretNote>, StoreError>;

    /// Full-record merge write keyed by id: inserts the record if absent,
    /// otherwise overwrites the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the write fails.
    fn upsert(&self, note: &SecretNote) -> Result<(), StoreError>;

    /// Sets the tombstone timestamp on the record with the given id.
    ///
    /// A missing id is a no-op at the store level; existence validation
    /// belongs to the service.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the write fails.
    fn soft_delete(&self, id: Uuid) -> Result<(), StoreError>;
}

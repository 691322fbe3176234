//! Note service: record lifecycle on top of the cipher engine and a store.
//!
//! The service is the only component that invokes the cipher engine, so the
//! store boundary always sees ciphertext. It also classifies store and
//! cipher failures into the stable [`Error`] taxonomy: `NotFound` is raised
//! locally and never wrapped, while every store error is wrapped into
//! [`Error::Storage`] with the operation context preserved. Raw store
//! errors never cross this boundary.

use crate::cipher::CipherEngine;
use crate::error::Error;
use crate::note::SecretNote;
use crate::store::NoteStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Service for creating, reading, updating, and soft-deleting secret notes.
///
/// Every operation is a short sequence of at most one cipher call and
/// one-to-two store calls; nothing is cached across calls, so staleness
/// between concurrent operations on the same id is resolved by the store.
///
/// # Example
///
/// ```ignore
/// use sirnot::cipher::CipherEngine;
/// use sirnot::service::NoteService;
/// use sirnot_store_memory::MemoryNoteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = NoteService::new(MemoryNoteStore::new(), CipherEngine::new());
///
/// let created = service.create("a short secret")?;
/// let decrypted = service.get_decrypted_by_id(created.id)?;
///
/// assert_eq!(decrypted.note, "a short secret");
/// # Ok(())
/// # }
/// ```
pub struct NoteService<S: NoteStore> {
    store: Arc<S>,
    engine: Arc<CipherEngine>,
    empty_list_is_error: bool,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a new service over the given store and cipher engine.
    ///
    /// By default an empty listing is a valid empty vector; see
    /// [`NoteService::with_empty_list_as_error`].
    pub fn new(store: S, engine: CipherEngine) -> Self {
        Self {
            store: Arc::new(store),
            engine: Arc::new(engine),
            empty_list_is_error: false,
        }
    }

    /// Sets the empty-listing policy.
    ///
    /// When enabled, [`NoteService::list_active`] fails with
    /// [`Error::NotFound`] instead of returning an empty vector.
    #[must_use]
    pub fn with_empty_list_as_error(mut self, empty_list_is_error: bool) -> Self {
        self.empty_list_is_error = empty_list_is_error;
        self
    }

    /// Encrypts the plaintext and persists a new record, returning the
    /// stored (ciphertext) form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store rejects the write.
    pub fn create(&self, plaintext: &str) -> Result<SecretNote, Error> {
        let token = self.engine.encrypt(plaintext);
        self.store
            .create(&token)
            .map_err(|e| Error::Storage { operation: "create", source: e })
    }

    /// Returns all active (non-tombstoned) records, still in ciphertext
    /// form, in store-defined order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the read fails, and [`Error::NotFound`]
    /// on an empty result when the empty-listing policy is enabled.
    pub fn list_active(&self) -> Result<Vec<SecretNote>, Error> {
        let notes = self
            .store
            .find_all_active()
            .map_err(|e| Error::Storage { operation: "list", source: e })?;

        if notes.is_empty() && self.empty_list_is_error {
            return Err(Error::NotFound("no active secret notes".to_string()));
        }

        Ok(notes)
    }

    /// Looks up a record by id, returning it in ciphertext form.
    ///
    /// Soft-deleted records remain addressable here for inspection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id, and
    /// [`Error::Storage`] if the read fails.
    pub fn get_by_id(&self, id: Uuid) -> Result<SecretNote, Error> {
        self.store
            .find_by_id(id)
            .map_err(|e| Error::Storage { operation: "lookup", source: e })?
            .ok_or_else(|| not_found(id))
    }

    /// Looks up a record by id and returns a copy with the `note` field
    /// decrypted. The stored record is never mutated by this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id, and
    /// [`Error::MalformedToken`] or [`Error::DecryptionFailed`] if the
    /// stored ciphertext cannot be decrypted (for example, a token produced
    /// by a different process instance).
    pub fn get_decrypted_by_id(&self, id: Uuid) -> Result<SecretNote, Error> {
        let stored = self.get_by_id(id)?;
        let plaintext = self.engine.decrypt(&stored.note)?;
        Ok(SecretNote { note: plaintext, ..stored })
    }

    /// Re-encrypts the new plaintext and merges it into the existing
    /// record, returning the post-update record.
    ///
    /// `id`, `created_at`, and any tombstone are preserved; `note` and
    /// `updated_at` change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id, and
    /// [`Error::Storage`] if the lookup or the upsert fails.
    pub fn update(&self, id: Uuid, plaintext: &str) -> Result<SecretNote, Error> {
        let existing = self.get_by_id(id)?;

        let merged = SecretNote {
            note: self.engine.encrypt(plaintext),
            updated_at: Utc::now(),
            ..existing
        };

        self.store
            .upsert(&merged)
            .map_err(|e| Error::Storage { operation: "update", source: e })?;

        Ok(merged)
    }

    /// Soft-deletes the record with the given id and returns the
    /// pre-deletion snapshot.
    ///
    /// The record is tombstoned, not removed: it disappears from
    /// [`NoteService::list_active`] but stays addressable by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id, and
    /// [`Error::Storage`] if the lookup or the delete fails.
    pub fn remove(&self, id: Uuid) -> Result<SecretNote, Error> {
        let existing = self.get_by_id(id)?;

        self.store
            .soft_delete(id)
            .map_err(|e| Error::Storage { operation: "soft-delete", source: e })?;

        Ok(existing)
    }
}

impl<S: NoteStore> Clone for NoteService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            engine: Arc::clone(&self.engine),
            empty_list_is_error: self.empty_list_is_error,
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("secret note with id {id}"))
}

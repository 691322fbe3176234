//! In-memory note store for `sirnot`.
//!
//! This store keeps records in process memory and is suitable for
//! development and testing environments. Records do not survive the
//! process; neither do the cipher tokens they hold, unless the engine key
//! was externalized.

#![warn(clippy::pedantic, clippy::nursery)]

use chrono::Utc;
use sirnot::error::StoreError;
use sirnot::note::SecretNote;
use sirnot::store::NoteStore;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// In-memory [`NoteStore`] backed by a mutex-guarded vector.
///
/// Insertion order is preserved, so active listings are stable across
/// reads. Ids are v4 UUIDs; timestamps are taken at the store boundary,
/// matching the collaborator contract where the store owns id and
/// timestamp allocation.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<SecretNote>>,
}

impl MemoryNoteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<SecretNote>>, StoreError> {
        self.notes
            .lock()
            .map_err(|_| StoreError::ReadFailed("store mutex poisoned".to_string()))
    }
}

impl NoteStore for MemoryNoteStore {
    fn create(&self, ciphertext: &str) -> Result<SecretNote, StoreError> {
        let now = Utc::now();
        let note = SecretNote {
            id: Uuid::new_v4(),
            note: ciphertext.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.lock()?.push(note.clone());
        Ok(note)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<SecretNote>, StoreError> {
        Ok(self.lock()?.iter().find(|n| n.id == id).cloned())
    }

    fn find_all_active(&self) -> Result<Vec<SecretNote>, StoreError> {
        Ok(self.lock()?.iter().filter(|n| n.is_active()).cloned().collect())
    }

    fn upsert(&self, note: &SecretNote) -> Result<(), StoreError> {
        let mut notes = self.lock()?;

        if let Some(slot) = notes.iter_mut().find(|n| n.id == note.id) {
            *slot = note.clone();
        } else {
            notes.push(note.clone());
        }

        Ok(())
    }

    fn soft_delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut notes = self.lock()?;

        if let Some(slot) = notes.iter_mut().find(|n| n.id == id) {
            slot.deleted_at = Some(Utc::now());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_allocates_distinct_ids() {
        let store = MemoryNoteStore::new();

        let note1 = store.create("aa:bb").expect("Create failed");
        let note2 = store.create("cc:dd").expect("Create failed");

        assert_ne!(note1.id, note2.id);
        assert!(note1.is_active());
        assert_eq!(note1.created_at, note1.updated_at);
    }

    #[test]
    fn test_find_by_id_returns_tombstoned_records() {
        let store = MemoryNoteStore::new();
        let note = store.create("aa:bb").expect("Create failed");

        store.soft_delete(note.id).expect("Soft delete failed");

        let found = store
            .find_by_id(note.id)
            .expect("Lookup failed")
            .expect("Record missing");
        assert!(found.deleted_at.is_some());
    }

    #[test]
    fn test_find_all_active_excludes_tombstones_in_insertion_order() {
        let store = MemoryNoteStore::new();

        let first = store.create("11:11").expect("Create failed");
        let second = store.create("22:22").expect("Create failed");
        let third = store.create("33:33").expect("Create failed");

        store.soft_delete(second.id).expect("Soft delete failed");

        let active = store.find_all_active().expect("Listing failed");
        let ids: Vec<Uuid> = active.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = MemoryNoteStore::new();

        let first = store.create("11:11").expect("Create failed");
        store.create("22:22").expect("Create failed");

        let mut replacement = first.clone();
        replacement.note = "ff:ff".to_string();
        replacement.updated_at = Utc::now();
        store.upsert(&replacement).expect("Upsert failed");

        let active = store.find_all_active().expect("Listing failed");
        assert_eq!(active.len(), 2);
        // Position preserved
        assert_eq!(active[0].id, first.id);
        assert_eq!(active[0].note, "ff:ff");
    }

    #[test]
    fn test_upsert_inserts_when_absent() {
        let store = MemoryNoteStore::new();

        let note = SecretNote {
            id: Uuid::new_v4(),
            note: "aa:bb".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        store.upsert(&note).expect("Upsert failed");

        let found = store
            .find_by_id(note.id)
            .expect("Lookup failed")
            .expect("Record missing");
        assert_eq!(found, note);
    }

    #[test]
    fn test_soft_delete_missing_id_is_noop() {
        let store = MemoryNoteStore::new();
        store.create("aa:bb").expect("Create failed");

        store.soft_delete(Uuid::new_v4()).expect("Soft delete failed");

        assert_eq!(store.find_all_active().expect("Listing failed").len(), 1);
    }
}

//! Basic usage example for `sirnot`.

use sirnot::cipher::CipherEngine;
use sirnot::service::NoteService;
use sirnot_store_memory::MemoryNoteStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("sirnot Basic Usage Example");
    println!("==========================\n");

    // One engine per process; the key lives for the engine's lifetime
    let engine = CipherEngine::new();
    println!("✓ Cipher engine created (AES-256-CBC, per-message IVs)\n");

    let service = NoteService::new(MemoryNoteStore::new(), engine);
    println!("✓ Note service created over an in-memory store\n");

    // Create: the stored record holds a ciphertext token, never plaintext
    let created = service.create("This is a secret note")?;
    println!("Created note {}", created.id);
    println!("  stored token: {}\n", created.note);

    // Decrypt-on-read returns a transient plaintext copy
    let decrypted = service.get_decrypted_by_id(created.id)?;
    println!("Decrypted note: {:?}\n", decrypted.note);

    // Update re-encrypts and refreshes updatedAt
    let updated = service.update(created.id, "This is an updated secret note")?;
    println!("Updated note {} at {}\n", updated.id, updated.updated_at);

    // Soft delete: tombstoned, excluded from listings, still addressable
    service.remove(created.id)?;
    let tombstoned = service.get_by_id(created.id)?;
    println!("Tombstoned at {:?}", tombstoned.deleted_at);
    println!("Active notes: {}", service.list_active()?.len());

    Ok(())
}

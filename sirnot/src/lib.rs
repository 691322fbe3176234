//! # `sirnot`
//!
//! Encryption-at-rest core for short secret notes: a symmetric cipher
//! engine, a persistence contract, and the record lifecycle service that
//! wraps them.
//!
//! ## Features
//!
//! - AES-256-CBC note encryption with per-message IVs
//! - Self-describing `ivHex:ciphertextHex` ciphertext tokens
//! - Create / list / read / decrypt-on-read / update / soft-delete lifecycle
//! - Pluggable [`store::NoteStore`] persistence backends
//! - Stable error taxonomy; store internals never leak to callers
//!
//! ## Example
//!
//! ```rust,ignore
//! use sirnot::prelude::*;
//! use sirnot_store_memory::MemoryNoteStore;
//!
//! let service = NoteService::new(MemoryNoteStore::new(), CipherEngine::new());
//!
//! let created = service.create("a short secret")?;
//! let decrypted = service.get_decrypted_by_id(created.id)?;
//! assert_eq!(decrypted.note, "a short secret");
//! ```

#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cipher;
pub mod error;
pub mod note;
pub mod service;
pub mod store;

pub mod prelude {
    //! Convenience re-exports for common use.
    pub use crate::cipher::CipherEngine;
    pub use crate::error::{Error, StoreError};
    pub use crate::note::SecretNote;
    pub use crate::service::NoteService;
    pub use crate::store::NoteStore;
}

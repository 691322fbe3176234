//! `sirnot` CLI tool for key generation and lifecycle demos.

#![warn(clippy::pedantic, clippy::nursery)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::{rngs::OsRng, RngCore};
use sirnot::cipher::{CipherEngine, KEY_SIZE};
use sirnot::service::NoteService;
use sirnot_store_memory::MemoryNoteStore;

#[derive(Parser)]
#[command(name = "sirnot")]
#[command(about = "sirnot secret-note toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random 256-bit cipher key, printed as hex
    Keygen,
    /// Run the full note lifecycle against an in-memory store
    Demo {
        /// Hex-encoded 256-bit key; a process-lifetime key is generated
        /// when omitted
        #[arg(short, long)]
        key: Option<String>,
        /// Treat an empty active listing as an error
        #[arg(long)]
        strict_list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen => {
            let mut key = [0u8; KEY_SIZE];
            OsRng.fill_bytes(&mut key);
            println!("{}", hex::encode(key));
            Ok(())
        }
        Commands::Demo { key, strict_list } => demo(key.as_deref(), strict_list),
    }
}

fn demo(key: Option<&str>, strict_list: bool) -> anyhow::Result<()> {
    let engine = match key {
        Some(hex_key) => {
            CipherEngine::from_hex_key(hex_key).context("invalid --key material")?
        }
        None => CipherEngine::new(),
    };

    let service = NoteService::new(MemoryNoteStore::new(), engine)
        .with_empty_list_as_error(strict_list);

    let created = service.create("This is a secret note")?;
    println!("created:\n{}", serde_json::to_string_pretty(&created)?);

    let decrypted = service.get_decrypted_by_id(created.id)?;
    println!("decrypted note: {:?}", decrypted.note);

    let updated = service.update(created.id, "This is an updated secret note")?;
    println!("updated:\n{}", serde_json::to_string_pretty(&updated)?);

    let redecrypted = service.get_decrypted_by_id(created.id)?;
    println!("decrypted note after update: {:?}", redecrypted.note);

    let removed = service.remove(created.id)?;
    println!("removed (pre-deletion snapshot): {}", removed.id);

    let tombstoned = service.get_by_id(created.id)?;
    println!(
        "record still addressable, deletedAt = {:?}",
        tombstoned.deleted_at
    );

    match service.list_active() {
        Ok(active) => println!("active notes after remove: {}", active.len()),
        Err(err) => println!("active notes after remove: {err}"),
    }

    Ok(())
}

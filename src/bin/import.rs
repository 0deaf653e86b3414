// src/bin/import.rs
// Load a file-storage JSON dump into the storage engine selected by the
// environment (typically STORAGE_TYPE=db).
//
// Usage: hbnb-import <dump.json>

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use hbnb_api::config::Config;
use hbnb_api::models::{EntityKind, Record};
use hbnb_api::storage::Storage;
use std::collections::{BTreeMap, HashMap};
use std::env;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";

/// Parents before children so a partially applied import stays consistent
fn import_rank(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::State => 0,
        EntityKind::Amenity => 1,
        EntityKind::User => 2,
        EntityKind::City => 3,
        EntityKind::Place => 4,
    }
}

async fn stage(storage: &Storage, record: Record) {
    match record {
        Record::User(user) => storage.new(user).await,
        Record::State(state) => storage.new(state).await,
        Record::City(city) => storage.new(city).await,
        Record::Amenity(amenity) => storage.new(amenity).await,
        Record::Place(place) => storage.new(place).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info,sqlx=warn");
    }
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: hbnb-import <dump.json>");
    };

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        bail!("configuration error: {}", e);
    }

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading {}", path))?;
    let dump: HashMap<String, Record> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path))?;

    let mut records: Vec<Record> = dump.into_values().collect();
    records.sort_by_key(|record| (import_rank(record.kind()), record.base().created_at));

    let storage = Storage::from_config(&config)
        .await
        .context("initializing storage")?;

    let mut imported: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in records {
        *imported.entry(record.kind().as_str()).or_default() += 1;
        stage(&storage, record).await;
    }
    storage.close().await.context("saving imported records")?;

    println!("{}Imported into {} storage{}", BOLD, config.storage_type, RESET);
    for (class, count) in &imported {
        println!("  • {:<8} {}{}{}", class, GREEN, count, RESET);
    }
    Ok(())
}

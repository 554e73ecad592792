use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::{db::MovieStore, error::AppResult, models::MovieRecord};

/// Reads a JSON array of movie records into a new store
pub fn read_from<R: Read>(reader: R) -> AppResult<MovieStore> {
    let records: Vec<MovieRecord> = serde_json::from_reader(reader)?;
    MovieStore::from_records(records)
}

/// Writes the store as a JSON array of records, four-space indented
pub fn write_to<W: Write>(store: &MovieStore, writer: W) -> AppResult<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    store.records().serialize(&mut serializer)?;
    Ok(())
}

/// Loads the dataset file, replacing nothing until it parses cleanly
pub fn load(path: &Path) -> AppResult<MovieStore> {
    let file = File::open(path)?;
    let store = read_from(BufReader::new(file))?;

    tracing::info!(
        path = %path.display(),
        movies = store.len(),
        "Dataset loaded"
    );

    Ok(store)
}

pub fn save(store: &MovieStore, path: &Path) -> AppResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(store, &mut writer)?;
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        movies = store.len(),
        "Dataset saved"
    );

    Ok(())
}

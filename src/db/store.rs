use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Insertion-ordered collection of movie records, unique by title
///
/// Position in the store is the row/column index of the movie in any
/// similarity matrix built from it. Every mutation takes a fresh process-wide
/// generation number, so a matrix can tell whether it still describes the
/// store it was built from.
#[derive(Debug, Clone)]
pub struct MovieStore {
    records: Vec<MovieRecord>,
    positions: HashMap<String, usize>,
    generation: u64,
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
            generation: next_generation(),
        }
    }

    /// Builds a store from records in the given order
    ///
    /// Fails on the first blank or repeated title rather than dropping it, so a
    /// persisted dataset is either taken as-is or rejected.
    pub fn from_records(records: Vec<MovieRecord>) -> AppResult<Self> {
        let mut store = Self::new();
        for record in records {
            store
                .push(record)
                .map_err(|e| AppError::Dataset(e.to_string()))?;
        }
        Ok(store)
    }

    /// Appends a record and returns its index
    pub fn push(&mut self, record: MovieRecord) -> AppResult<usize> {
        if record.title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Movie title cannot be empty".to_string(),
            ));
        }
        if self.positions.contains_key(&record.title) {
            return Err(AppError::InvalidInput(format!(
                "Duplicate movie title: {}",
                record.title
            )));
        }

        let index = self.records.len();
        self.positions.insert(record.title.clone(), index);
        self.records.push(record);
        self.generation = next_generation();
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the movie with exactly this title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    pub fn find(&self, title: &str) -> Option<&MovieRecord> {
        self.position(title).and_then(|index| self.get(index))
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.title.as_str())
    }
}

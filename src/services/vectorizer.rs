use std::collections::{BTreeMap, HashMap};

use crate::models::MovieRecord;

/// Genre tokens observed across a dataset, each bound to a column index
///
/// Columns are assigned in first-seen order, so the same records in the same
/// order always produce the same layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    columns: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn column(&self, token: &str) -> Option<usize> {
        self.columns.get(token).copied()
    }

    pub fn token(&self, column: usize) -> Option<&str> {
        self.tokens.get(column).map(String::as_str)
    }

    /// Tokens in column order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn intern(&mut self, token: &str) -> usize {
        if let Some(&column) = self.columns.get(token) {
            return column;
        }
        let column = self.tokens.len();
        self.tokens.push(token.to_string());
        self.columns.insert(token.to_string(), column);
        column
    }
}

/// Sparse token counts for one movie, keyed by vocabulary column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVector {
    counts: BTreeMap<usize, u32>,
}

impl FeatureVector {
    pub fn count(&self, column: usize) -> u32 {
        self.counts.get(&column).copied().unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero entries in ascending column order
    pub fn entries(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().map(|(&column, &count)| (column, count))
    }

    pub fn dot(&self, other: &FeatureVector) -> u64 {
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries()
            .map(|(column, count)| u64::from(count) * u64::from(large.count(column)))
            .sum()
    }

    /// Squared L2 norm, kept integral so identical vectors compare exactly
    pub fn squared_norm(&self) -> u64 {
        self.entries()
            .map(|(_, count)| u64::from(count) * u64::from(count))
            .sum()
    }

    fn increment(&mut self, column: usize) {
        *self.counts.entry(column).or_insert(0) += 1;
    }
}

/// Splits genre text on anything that is not alphanumeric and lower-cases the pieces
///
/// "Sci-Fi, Action" yields `sci`, `fi`, `action`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Builds the shared vocabulary and one count vector per record, in record order
pub fn vectorize(records: &[MovieRecord]) -> (Vocabulary, Vec<FeatureVector>) {
    let mut vocabulary = Vocabulary::default();
    let mut vectors = Vec::with_capacity(records.len());

    for record in records {
        let mut vector = FeatureVector::default();
        for token in tokenize(&record.genre) {
            let column = vocabulary.intern(&token);
            vector.increment(column);
        }
        vectors.push(vector);
    }

    tracing::debug!(
        records = records.len(),
        vocabulary = vocabulary.len(),
        "Genre features vectorized"
    );

    (vocabulary, vectors)
}

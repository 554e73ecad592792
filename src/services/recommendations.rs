use std::cmp::Ordering;

use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
    models::Recommendation,
    services::similarity::{self, SimilarityMatrix},
};

/// Ranks every other movie by similarity to `title` and keeps the best `n`
///
/// Ties on score go to the movie that comes first in the store, so the output
/// is a total order and repeated calls agree. Fails with `NotBuilt` when
/// `matrix` is absent or was built for a different store state, and with
/// `NotFound` when `title` is not in the store.
pub fn rank(
    store: &MovieStore,
    matrix: Option<&SimilarityMatrix>,
    title: &str,
    n: usize,
) -> AppResult<Vec<Recommendation>> {
    let matrix = matrix
        .filter(|matrix| matrix.matches(store))
        .ok_or(AppError::NotBuilt)?;

    let query = store
        .position(title)
        .ok_or_else(|| AppError::NotFound(title.to_string()))?;

    let row = matrix.row(query).ok_or(AppError::NotBuilt)?;

    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != query)
        .collect();

    scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        ordering => ordering,
    });

    let recommendations = scored
        .into_iter()
        .take(n)
        .filter_map(|(index, score)| {
            store.get(index).map(|record| Recommendation {
                title: record.title.clone(),
                score,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        title = %title,
        requested = n,
        returned = recommendations.len(),
        "Recommendations ranked"
    );

    Ok(recommendations)
}

/// Titles of the `n` movies most similar to `title`, best first
pub fn recommend(
    store: &MovieStore,
    matrix: Option<&SimilarityMatrix>,
    title: &str,
    n: usize,
) -> AppResult<Vec<String>> {
    Ok(rank(store, matrix, title, n)?
        .into_iter()
        .map(|recommendation| recommendation.title)
        .collect())
}

/// A movie store paired with the similarity matrix computed from it
///
/// Replacing the store drops the matrix; it has to be regenerated before the
/// next query.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    store: MovieStore,
    matrix: Option<SimilarityMatrix>,
}

impl Recommender {
    /// Wraps a store without computing similarities yet
    pub fn new(store: MovieStore) -> Self {
        Self {
            store,
            matrix: None,
        }
    }

    /// Wraps a store and builds its similarity matrix
    pub fn build(store: MovieStore) -> AppResult<Self> {
        let mut recommender = Self::new(store);
        recommender.generate_similarity_matrix()?;
        Ok(recommender)
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn matrix(&self) -> Option<&SimilarityMatrix> {
        self.matrix.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.matrix
            .as_ref()
            .is_some_and(|matrix| matrix.matches(&self.store))
    }

    pub fn replace_store(&mut self, store: MovieStore) {
        self.store = store;
        self.matrix = None;
    }

    pub fn generate_similarity_matrix(&mut self) -> AppResult<()> {
        self.matrix = Some(similarity::build_for_store(&self.store)?);
        Ok(())
    }

    pub fn rank(&self, title: &str, n: usize) -> AppResult<Vec<Recommendation>> {
        rank(&self.store, self.matrix.as_ref(), title, n)
    }

    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<String>> {
        recommend(&self.store, self.matrix.as_ref(), title, n)
    }
}

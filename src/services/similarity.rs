use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
    services::vectorizer::{self, FeatureVector},
};

/// Dense pairwise cosine similarities, row-major
///
/// Row and column `i` belong to the movie at index `i` of the store the matrix
/// was built from. `generation` records which store state that was; a
/// matrix is never patched, only rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    cells: Vec<f64>,
    generation: Option<u64>,
}

impl SimilarityMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Generation of the store this matrix was built for, if it came from one
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Whether this matrix was built from the store's current contents
    pub fn matches(&self, store: &MovieStore) -> bool {
        self.generation == Some(store.generation()) && self.size == store.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.size || column >= self.size {
            return None;
        }
        Some(self.cells[row * self.size + column])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }
}

/// Cosine similarity of two count vectors, 0.0 when either is the zero vector
///
/// Norms stay integral until the final division so that two identical vectors
/// score exactly 1.0.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let denominator = (a.squared_norm() as f64 * b.squared_norm() as f64).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    let result = a.dot(b) as f64 / denominator;
    if !result.is_finite() {
        return 0.0;
    }
    result.clamp(0.0, 1.0)
}

/// Computes the full similarity matrix for a set of feature vectors
///
/// Each unordered pair is computed once and mirrored. This is O(n²·d); fine for
/// catalogues of tens or hundreds of movies.
pub fn build(vectors: &[FeatureVector]) -> AppResult<SimilarityMatrix> {
    if vectors.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let size = vectors.len();
    let mut cells = vec![0.0; size * size];

    for i in 0..size {
        for j in i..size {
            let score = cosine_similarity(&vectors[i], &vectors[j]);
            cells[i * size + j] = score;
            cells[j * size + i] = score;
        }
    }

    Ok(SimilarityMatrix {
        size,
        cells,
        generation: None,
    })
}

/// Vectorizes the store's genres and builds a matrix bound to its current generation
pub fn build_for_store(store: &MovieStore) -> AppResult<SimilarityMatrix> {
    let (vocabulary, vectors) = vectorizer::vectorize(store.records());
    let mut matrix = build(&vectors)?;
    matrix.generation = Some(store.generation());

    tracing::info!(
        movies = matrix.size(),
        vocabulary = vocabulary.len(),
        generation = store.generation(),
        "Similarity matrix built"
    );

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;

    fn record(title: &str, genre: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: 2000,
            genre: genre.to_string(),
            director: String::new(),
            plot: String::new(),
            rating: 0.0,
        }
    }

    fn store(entries: &[(&str, &str)]) -> MovieStore {
        MovieStore::from_records(
            entries
                .iter()
                .map(|(title, genre)| record(title, genre))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_build_empty_fails() {
        assert!(matches!(build(&[]), Err(AppError::EmptyDataset)));
        assert!(matches!(
            build_for_store(&MovieStore::new()),
            Err(AppError::EmptyDataset)
        ));
    }

    #[test]
    fn test_matrix_shape_and_bounds() {
        let store = store(&[
            ("Inception", "Action, Adventure, Sci-Fi"),
            ("The Matrix", "Action, Sci-Fi"),
            ("Frozen", "Animation, Adventure, Comedy"),
            ("Pulp Fiction", "Crime, Drama"),
            ("Untitled", ""),
        ]);
        let matrix = build_for_store(&store).unwrap();

        assert_eq!(matrix.size(), store.len());
        for i in 0..matrix.size() {
            assert_eq!(matrix.row(i).unwrap().len(), store.len());
            for j in 0..matrix.size() {
                let score = matrix.get(i, j).unwrap();
                assert!((0.0..=1.0).contains(&score));
                assert_eq!(score, matrix.get(j, i).unwrap());
            }
        }
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), Some(1.0));
        }
    }

    #[test]
    fn test_zero_vector_row_is_zero() {
        let store = store(&[("A", "Drama"), ("B", "")]);
        let matrix = build_for_store(&store).unwrap();

        assert_eq!(matrix.row(1).unwrap(), &[0.0, 0.0]);
        assert_eq!(matrix.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_all_empty_genres_give_zero_matrix() {
        let store = store(&[("A", ""), ("B", ""), ("C", "")]);
        let matrix = build_for_store(&store).unwrap();

        assert!((0..3).all(|i| matrix.row(i).unwrap().iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_identical_genres_score_exactly_one() {
        let store = store(&[
            ("Toy Story", "Animation, Adventure, Comedy"),
            ("Finding Nemo", "Drama"),
            ("Toy Story 2", "Animation, Adventure, Comedy"),
        ]);
        let matrix = build_for_store(&store).unwrap();

        assert_eq!(matrix.get(0, 2), Some(1.0));
        assert_eq!(matrix.get(2, 0), Some(1.0));
    }

    #[test]
    fn test_partial_overlap_score() {
        let store = store(&[("A", "Action, Sci-Fi"), ("B", "Action"), ("C", "Comedy")]);
        let matrix = build_for_store(&store).unwrap();

        // a = action + sci + fi, b = action: 1 / sqrt(3)
        let expected = 1.0 / 3f64.sqrt();
        assert!((matrix.get(0, 1).unwrap() - expected).abs() < 1e-12);
        assert_eq!(matrix.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_out_of_range_lookups() {
        let matrix = build_for_store(&store(&[("A", "Drama")])).unwrap();
        assert_eq!(matrix.get(0, 1), None);
        assert!(matrix.row(1).is_none());
    }

    #[test]
    fn test_matrix_tracks_store_generation() {
        let mut store = store(&[("A", "Drama"), ("B", "Drama")]);
        let matrix = build_for_store(&store).unwrap();
        assert!(matrix.matches(&store));

        store.push(record("C", "Comedy")).unwrap();
        assert!(!matrix.matches(&store));

        let detached = build(&vectorizer::vectorize(store.records()).1).unwrap();
        assert_eq!(detached.generation(), None);
        assert!(!detached.matches(&store));
    }
}

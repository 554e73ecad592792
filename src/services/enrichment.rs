use std::path::Path;

use crate::{
    db::{dataset, MovieStore},
    error::{AppError, AppResult},
    services::providers::MetadataProvider,
};

/// Fetches metadata for each title, in order, into a new store
///
/// A title that cannot be fetched, for whatever reason, is logged and left
/// out; one bad lookup never aborts the batch. Blank titles are skipped
/// without a request, and a fetched movie whose title is already in the store
/// is dropped so titles stay unique.
pub async fn enrich<S: AsRef<str>>(provider: &dyn MetadataProvider, titles: &[S]) -> MovieStore {
    let mut store = MovieStore::new();
    let mut skipped = 0usize;

    for title in titles.iter().map(AsRef::as_ref) {
        if title.trim().is_empty() {
            continue;
        }

        let record = match provider.fetch_movie(title).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    provider = provider.name(),
                    error = %e,
                    "Skipping movie, metadata fetch failed"
                );
                skipped += 1;
                continue;
            }
        };

        if let Err(e) = store.push(record) {
            tracing::warn!(title = %title, error = %e, "Skipping movie");
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::warn!(
            enriched = store.len(),
            skipped = skipped,
            "Partial dataset enrichment"
        );
    }

    tracing::info!(movies = store.len(), provider = provider.name(), "Dataset enriched");

    store
}

/// Loads the dataset at `path`, or builds and saves it when the file is missing
///
/// `provider` is only consulted for the build; a missing file with no provider
/// is an input error. An enrichment that produced nothing is not written, so
/// the next run tries the fetch again.
pub async fn load_or_enrich<S: AsRef<str>>(
    path: &Path,
    titles: &[S],
    provider: Option<&dyn MetadataProvider>,
) -> AppResult<MovieStore> {
    if path.is_file() {
        return dataset::load(path);
    }

    let provider = provider.ok_or_else(|| {
        AppError::InvalidInput(format!(
            "No dataset at {} and no metadata provider configured",
            path.display()
        ))
    })?;

    let store = enrich(provider, titles).await;
    if store.is_empty() {
        tracing::warn!(path = %path.display(), "Enrichment produced no movies, dataset not saved");
    } else {
        dataset::save(&store, path)?;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;
    use crate::services::providers::MockMetadataProvider;

    fn record(title: &str, genre: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: 2010,
            genre: genre.to_string(),
            director: String::new(),
            plot: String::new(),
            rating: 7.5,
        }
    }

    fn provider() -> MockMetadataProvider {
        let mut mock = MockMetadataProvider::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_movie().returning(|title| match title {
            "Missing" => Err(AppError::NotFound(title.to_string())),
            "Flaky" => Err(AppError::ExternalApi("status 500".to_string())),
            "The Matrix Reloaded" => Ok(record("The Matrix", "Action, Sci-Fi")),
            other => Ok(record(other, "Drama")),
        });
        mock
    }

    #[tokio::test]
    async fn test_enrich_keeps_order() {
        let provider = provider();
        let store = enrich(&provider, &["Inception", "Up", "Coco"]).await;

        let titles: Vec<&str> = store.titles().collect();
        assert_eq!(titles, vec!["Inception", "Up", "Coco"]);
    }

    #[tokio::test]
    async fn test_enrich_skips_failures() {
        let provider = provider();
        let store = enrich(&provider, &["Inception", "Missing", "Flaky", "Up"]).await;

        let titles: Vec<&str> = store.titles().collect();
        assert_eq!(titles, vec!["Inception", "Up"]);
    }

    #[tokio::test]
    async fn test_enrich_skips_duplicate_results() {
        let provider = provider();
        let store = enrich(&provider, &["The Matrix", "The Matrix Reloaded"]).await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.find("The Matrix").unwrap().genre, "Drama");
    }

    #[test]
    fn test_enrich_never_fetches_blank_titles() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_movie()
            .withf(|title| title == "Up")
            .times(1)
            .returning(|title| Ok(record(title, "Animation")));

        let store = tokio_test::block_on(enrich(&mock, &["", "   ", "Up"]));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_load_or_enrich_saves_new_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies_dataset.json");
        let provider = provider();

        let store = load_or_enrich(&path, &["Thor", "Frozen"], Some(&provider as &dyn MetadataProvider))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(path.is_file());

        let reloaded = load_or_enrich::<&str>(&path, &[], None).await.unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[tokio::test]
    async fn test_load_or_enrich_requires_provider_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies_dataset.json");

        let result = load_or_enrich(&path, &["Thor"], None).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_load_or_enrich_does_not_save_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies_dataset.json");
        let provider = provider();

        let store = load_or_enrich(&path, &["Missing"], Some(&provider as &dyn MetadataProvider))
            .await
            .unwrap();
        assert!(store.is_empty());
        assert!(!path.exists());
    }
}

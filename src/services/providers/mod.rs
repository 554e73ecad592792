//! Movie metadata provider abstraction
//!
//! The recommender only needs one operation from the outside world: turn a
//! title into a `MovieRecord`. Providers report a missing title as
//! `AppError::NotFound` and transport trouble as `HttpClient`/`ExternalApi`;
//! enrichment treats both the same way and skips the title.

use crate::{error::AppResult, models::MovieRecord};

pub mod omdb;

pub use omdb::OmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for a single title
    async fn fetch_movie(&self, title: &str) -> AppResult<MovieRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

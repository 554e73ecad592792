//! OMDb API provider
//!
//! Looks titles up with `GET /?apikey=..&t=<title>`, which returns the single
//! best match or an in-band `"Response": "False"` when nothing matches.

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, OmdbMovie},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    fn lookup_url(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch_movie(&self, title: &str) -> AppResult<MovieRecord> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Movie title cannot be empty".to_string(),
            ));
        }

        let response = self
            .http_client
            .get(self.lookup_url())
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(title = %title, response = %response_text, "Raw OMDb API response");

        let movie: OmdbMovie = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        let record = movie.into_record(title)?;

        tracing::info!(
            query = %title,
            title = %record.title,
            year = record.year,
            provider = "omdb",
            "Movie details fetched"
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

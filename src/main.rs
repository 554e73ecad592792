use std::time::Duration;

use movie_recommender::{
    api::{create_router, AppState},
    catalog::SEED_TITLES,
    config::{Config, RunMode},
    services::{
        enrichment,
        providers::{MetadataProvider, OmdbProvider},
        Recommender,
    },
    session,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    // The API key is only needed when there is no dataset to load
    let provider = if config.dataset_path.is_file() {
        None
    } else {
        Some(OmdbProvider::new(
            config.require_api_key()?.to_string(),
            config.omdb_api_url.clone(),
            Duration::from_secs(config.fetch_timeout_secs),
        )?)
    };

    let store = enrichment::load_or_enrich(
        &config.dataset_path,
        SEED_TITLES,
        provider.as_ref().map(|p| p as &dyn MetadataProvider),
    )
    .await?;

    let recommender = Recommender::build(store)?;

    match config.mode {
        RunMode::Interactive => {
            let count = config.recommendation_count;
            tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                session::run(&recommender, count, stdin.lock(), stdout.lock())
            })
            .await??;
        }
        RunMode::Serve => {
            let state = AppState::new(
                recommender,
                config.dataset_path.clone(),
                config.recommendation_count,
            );
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
            tracing::info!(address = %config.bind_address(), "Server running");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

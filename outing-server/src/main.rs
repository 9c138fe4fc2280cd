use std::error::Error;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use outing_server::cache::{CacheConfig, TripCache};
use outing_server::generator::{FixtureGenerator, GeminiConfig, GeminiGenerator, TripGenerator};
use outing_server::pipeline::{Pipeline, PipelineConfig};
use outing_server::web::{AppState, create_router};

/// Read and parse an optional environment variable.
fn env_parse<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{name}={raw:?}: {e}")),
        Err(_) => Ok(None),
    }
}

/// Pick the generator: a fixture file if one is configured, else Gemini.
fn build_generator() -> Result<Arc<dyn TripGenerator>, Box<dyn Error>> {
    if let Ok(path) = std::env::var("OUTING_FIXTURE") {
        info!(%path, "serving recommendations from fixture");
        return Ok(Arc::new(FixtureGenerator::from_file(path)?));
    }

    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
        warn!("GEMINI_API_KEY not set. Generator calls will fail.");
        String::new()
    });

    let mut config = GeminiConfig::new(api_key);
    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        config = config.with_model(model);
    }
    info!(model = %config.model, "using Gemini generator");

    Ok(Arc::new(GeminiGenerator::new(config)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut cache_config = CacheConfig::default();
    if let Some(secs) = env_parse::<u64>("OUTING_CACHE_TTL_SECS")? {
        cache_config = cache_config.with_ttl(Duration::from_secs(secs));
    }
    if let Some(max) = env_parse::<u64>("OUTING_CACHE_MAX_ENTRIES")? {
        cache_config = cache_config.with_max_capacity(max);
    }

    let mut pipeline_config = PipelineConfig::default();
    if let Some(secs) = env_parse::<u64>("OUTING_GENERATION_TIMEOUT_SECS")? {
        pipeline_config = pipeline_config.with_generation_timeout(secs);
    }

    let pipeline = Pipeline::new(
        build_generator()?,
        TripCache::new(&cache_config),
        pipeline_config,
    );

    let app = create_router(AppState::new(pipeline));

    let addr: SocketAddr = env_parse("OUTING_BIND")?
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "outing recommender listening");
    info!("  GET    /health     - Health check");
    info!("  POST   /api/trips  - Recommend outings");
    info!("  GET    /api/cache  - Cache statistics");
    info!("  DELETE /api/cache  - Clear the cache");

    axum::serve(listener, app).await?;

    Ok(())
}

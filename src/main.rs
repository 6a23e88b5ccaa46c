use std::time::Duration;
use tickersignal::{app, config::Config, AppState};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickersignal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting tickersignal server on {}:{}", config.host, config.port);
    info!(
        "Sentiment strategy: {}, thresholds: {:?}",
        config.sentiment_strategy.name(),
        config.thresholds
    );

    let state = AppState::from_config(config)?;

    // Periodically drop expired price series
    {
        let cache = state.pipeline.market_data().cache();
        let ttl = state.config.price_cache_ttl;
        if cache.is_enabled() {
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(ttl.max(Duration::from_secs(60))).await;
                    let removed = cache.purge_expired();
                    if removed > 0 {
                        debug!("Purged {} expired price series", removed);
                    }
                }
            });
        }
    }

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("tickersignal server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

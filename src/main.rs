use spacetraveling::app;
use spacetraveling::config::AppConfig;
use spacetraveling::state::AppState;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Log initialized");

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Content source: {} (locale={}, home pageSize={})",
        config.prismic.endpoint,
        config.locale.as_str(),
        config.home_page_size
    );

    let http_client = reqwest::Client::builder()
        .user_agent("SpaceTraveling/1.0")
        .timeout(Duration::from_secs(10))
        .build()?;

    let port = config.port;
    let app_state = AppState::new(config, http_client);

    spacetraveling::pregenerate(&app_state).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Blog server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}

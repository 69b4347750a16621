use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod engine;
mod routes;
mod types;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var("STRATEGY_CONFIG").ok();
    let port: u16 = std::env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(8080);

    let generator = engine::load_generator(config_path.as_deref())?;
    match &config_path {
        Some(path) => tracing::info!("loaded engine config v{} from {}", generator.config().version, path),
        None => tracing::info!("using built-in engine config v{}", generator.config().version),
    }

    let state = routes::AppState {
        generator: Arc::new(generator),
    };
    let app = routes::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

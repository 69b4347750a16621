mod config;
mod model;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use strategy_engine::StrategyGenerator;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing_subscriber::EnvFilter;

use config::TrackCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let tracks_dir = resolve_tracks_dir();
    let catalog = TrackCatalog::load_dir(&tracks_dir)
        .with_context(|| format!("failed to load tracks from {}", tracks_dir.display()))?;
    tracing::info!(
        "loaded {} tracks from {}: {}",
        catalog.len(),
        tracks_dir.display(),
        catalog.names().collect::<Vec<_>>().join(", ")
    );

    let catalog = Arc::new(catalog);
    let generator = Arc::new(StrategyGenerator::default());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8765".to_string());
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind TCP listener at {}", bind_addr))?;
    tracing::info!("pit wall feed listening on ws://{}", bind_addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!("connection from {}", peer);
                tokio::spawn(handle_connection(stream, catalog.clone(), generator.clone()));
            }
            Err(e) => {
                tracing::warn!("accept error: {}", e);
                // small delay to avoid tight loop in case of persistent errors
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, catalog: Arc<TrackCatalog>, generator: Arc<StrategyGenerator>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!("websocket handshake failed: {}", e);
            return;
        }
    };
    let (mut write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!("read error, closing: {}", e);
                break;
            }
        };
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else { continue };

        let reply = model::answer(text, &catalog, &generator);
        if let model::FeedReply::Strategies { track, strategies, .. } = &reply {
            tracing::info!(
                "[ {} ] {} plan(s): {}",
                track,
                strategies.len(),
                strategies.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(" | ")
            );
        }

        let out = match serde_json::to_string(&reply) {
            Ok(out) => out,
            Err(e) => {
                tracing::error!("failed to encode reply: {}", e);
                continue;
            }
        };
        if let Err(e) = write.send(Message::Text(out)).await {
            tracing::debug!("write error, closing: {}", e);
            break;
        }
    }
}

fn resolve_tracks_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TRACKS_DIR") {
        return PathBuf::from(dir);
    }

    // Common run paths: workspace root, or the crate directory
    let candidates = [
        PathBuf::from("tracks"),
        PathBuf::from("../tracks"),
        {
            let mut p = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            p.pop(); // exe dir
            p.push("tracks");
            p
        },
    ];

    for c in candidates {
        if c.is_dir() {
            return c;
        }
    }

    // Fallback to default relative path; load_dir() will error
    PathBuf::from("tracks")
}

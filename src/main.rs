//! QuadraMaster · Quadratic Tutor Backend
//!
//! - Axum HTTP + WebSocket API
//! - Optional hint service over an OpenAI-compatible endpoint
//! - Static bundle fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   OPENAI_API_KEY     : enables generated hints if present
//!   OPENAI_BASE_URL    : default "https://api.openai.com/v1"
//!   OPENAI_HINT_MODEL  : default "gpt-4o-mini"
//!   TUTOR_CONFIG_PATH  : path to TOML config (hint prompts, fallback texts, practice bank)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use quadramaster_backend::routes::build_router;
use quadramaster_backend::state::AppState;
use quadramaster_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let _sweeper = state.spawn_session_sweeper();
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quadramaster", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if tokio::signal::ctrl_c().await.is_ok() {
    info!(target: "quadramaster", "Shutdown requested");
  }
}

//! Math Dungeon · Question Backend
//!
//! - Axum HTTP + WebSocket API over the question engine
//! - Optional TOML stage tables merged onto the built-in ones
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   GAME_CONFIG_PATH : path to TOML stage tables (optional)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use math_dungeon::routes::build_router;
use math_dungeon::state::AppState;
use math_dungeon::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // A broken stage table must stop startup rather than serve bad questions.
  let state = match AppState::from_env() {
    Ok(state) => Arc::new(state),
    Err(e) => {
      error!(target: "math_dungeon", error = %e, "Invalid game configuration");
      return Err(e.into());
    }
  };

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "math_dungeon", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "math_dungeon", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "math_dungeon", error = %e, "Failed to listen for ctrl-c");
  }
}

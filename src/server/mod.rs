//! HTTP JSON API over the generator and the search engine.

mod handlers;
mod rate_limit;
mod router;
mod state;

pub use handlers::{ExploreParams, SearchRequest};
pub use rate_limit::RateLimiter;
pub use router::create_router;
pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::config::BabelConfig;

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(config: BabelConfig) -> Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config)?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        mode = state.config().library.mode.as_str(),
        enhanced = state.search().enhanced_enabled(),
        "babel listening"
    );

    run(listener, state, shutdown_signal()).await
}

/// Serve `state` on an already-bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

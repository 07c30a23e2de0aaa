pub mod api;
pub mod assets;
pub mod router;

use std::future::Future;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::app::SharedState;

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn start_server<F>(state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config().socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Fingerprint sheet server listening on http://{}", addr);

    serve(listener, state, shutdown).await
}

/// Serve the router on an already-bound listener.
pub async fn serve<F>(listener: TcpListener, state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router::create_router(state);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

//! HTTP transport for docstore
//!
//! Maps paths and methods onto [`Database`](docstore_engine::Database)
//! operations and failures onto status codes. All store semantics live in
//! the engine; this crate only parses requests and formats responses.

mod error;
mod handlers;
mod router;

pub use error::{ApiError, ServerError};
pub use router::router;

use docstore_config::Config;
use docstore_engine::Database;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serve `db` on an already bound listener until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    db: Database,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!("docstore listening on http://{}", local_addr);

    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| {
            error!("server error: {}", e);
            ServerError::Serve(e)
        })
}

/// Open the configured store and serve it until Ctrl-C
pub async fn run(config: &Config) -> Result<(), ServerError> {
    let db = Database::open(config).await?;
    let listener = bind(config.bind_addr).await?;

    serve(listener, db, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
        }
    })
    .await
}

/// Bind a TCP listener, reporting the address on failure
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

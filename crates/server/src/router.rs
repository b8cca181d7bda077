//! Request routing
//!
//! Every known path answers unknown methods with the same 404 page as
//! unknown paths.

use crate::handlers;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use docstore_engine::Database;
use std::time::Instant;
use tracing::debug;

/// Build the application router over a shared database
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(handlers::home).fallback(handlers::not_found))
        .route("/status", get(handlers::status).fallback(handlers::not_found))
        .route(
            "/get/:file",
            get(handlers::get_value).fallback(handlers::not_found),
        )
        .route(
            "/set",
            patch(handlers::set_value).fallback(handlers::not_found),
        )
        .route(
            "/remove",
            patch(handlers::remove_value).fallback(handlers::not_found),
        )
        .route(
            "/write/:file",
            post(handlers::write_file).fallback(handlers::not_found),
        )
        .route(
            "/deleteFile/:file",
            delete(handlers::delete_file).fallback(handlers::not_found),
        )
        .route("/merge", post(handlers::merge).fallback(handlers::not_found))
        .route("/union", patch(handlers::union).fallback(handlers::not_found))
        .route(
            "/intersect",
            patch(handlers::intersect).fallback(handlers::not_found),
        )
        .route(
            "/difference",
            patch(handlers::difference).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(db)
}

async fn log_request(req: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!("Handling {} {}", method, path);
    let response = next.run(req).await;

    debug!(
        "Handled {} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        start_time.elapsed()
    );
    response
}

//! veriseal library - HTTP handlers and application setup.
//!
//! this crate provides the http server and handlers for the veriseal
//! product authentication server:
//! - [`handlers`]: http request handlers for verification, provenance and admin endpoints
//! - [`engine`]: the atomic verify-and-consume engine
//! - [`symbol`]: trait seams for the external QR codec collaborators
//! - [`cli`]: command-line interface implementation

#![warn(missing_docs)]

/// command-line interface implementation.
pub mod cli;
/// the verification engine.
pub mod engine;
/// http request handlers.
pub mod handlers;
/// external symbol codec collaborator seams.
pub mod symbol;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use veriseal_db::VerisealDb;
use veriseal_types::Config;

use symbol::SymbolDecoder;

/// shared application state.
#[derive(Clone)]
pub struct AppState {
    /// database connection for persistent storage.
    pub db: VerisealDb,
    /// server configuration.
    pub config: Config,
    /// decoder collaborator for the image scan endpoint.
    pub decoder: Arc<dyn SymbolDecoder>,
}

/// create the axum application with all routes.
///
/// `decoder` is the external QR decoding collaborator; when `None`, the
/// `/scan` endpoint reports every image as unreadable and clients are
/// expected to decode symbols themselves and call `/verify`.
pub fn create_app(
    db: VerisealDb,
    config: Config,
    decoder: Option<Arc<dyn SymbolDecoder>>,
) -> Router {
    let state = AppState {
        db,
        config,
        decoder: decoder.unwrap_or_else(|| Arc::new(symbol::DisabledDecoder)),
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/verify", post(handlers::verify))
        .route("/scan", post(handlers::scan))
        .route(
            "/provenance/locations",
            post(handlers::attach_location).get(handlers::search_locations),
        )
        .route("/provenance/ratings", post(handlers::attach_rating))
        .route(
            "/provenance/ratings/{product_id}",
            get(handlers::product_rating),
        )
        .route(
            "/admin/products",
            post(handlers::register_product),
        )
        .route("/admin/tokens", get(handlers::list_tokens))
        .with_state(state)
}

pub mod bootstrap;
pub mod catalog;
pub mod errors;
pub mod health;

use std::sync::Arc;

use axum::Router;
use catalog_db::ProductRepository;
use tower_http::trace::TraceLayer;

/// Full HTTP surface: catalog routes, health probe, request tracing.
pub fn app(products: Arc<dyn ProductRepository>) -> Router {
    catalog::router(products.clone())
        .merge(health::router(products))
        .layer(TraceLayer::new_for_http())
}

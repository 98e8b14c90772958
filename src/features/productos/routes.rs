use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::productos::handlers;
use crate::features::productos::services::ProductoService;

/// Create routes for the productos feature
pub fn routes(service: Arc<ProductoService>) -> Router {
    Router::new()
        .route(
            "/api/producto",
            get(handlers::list_productos).post(handlers::create_producto),
        )
        .route(
            "/api/producto/{id}",
            get(handlers::get_producto)
                .put(handlers::update_producto)
                .delete(handlers::deactivate_producto),
        )
        .with_state(service)
}

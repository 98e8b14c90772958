use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::insumos::handlers;
use crate::features::insumos::services::InsumoService;

/// Create routes for the insumos feature
pub fn routes(service: Arc<InsumoService>) -> Router {
    Router::new()
        .route(
            "/api/insumo",
            get(handlers::list_insumos).post(handlers::create_insumo),
        )
        .route(
            "/api/insumo/{id}",
            get(handlers::get_insumo)
                .put(handlers::update_insumo)
                .delete(handlers::deactivate_insumo),
        )
        .with_state(service)
}

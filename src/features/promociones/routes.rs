use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::promociones::handlers;
use crate::features::promociones::services::PromocionService;

/// Create routes for the promociones feature
pub fn routes(service: Arc<PromocionService>) -> Router {
    Router::new()
        .route(
            "/api/promocion",
            get(handlers::list_promociones).post(handlers::create_promocion),
        )
        .route(
            "/api/promocion/{id}",
            get(handlers::get_promocion).put(handlers::update_promocion),
        )
        .with_state(service)
}

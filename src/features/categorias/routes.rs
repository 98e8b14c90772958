use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categorias::handlers;
use crate::features::categorias::services::CategoriaService;

/// Create routes for the categorias feature
pub fn routes(service: Arc<CategoriaService>) -> Router {
    Router::new()
        .route(
            "/api/categoria/{tipo}",
            get(handlers::list_categorias).post(handlers::create_categoria),
        )
        .route(
            "/api/categoria/{tipo}/{id}",
            get(handlers::get_categoria)
                .put(handlers::update_categoria)
                .delete(handlers::deactivate_categoria),
        )
        .with_state(service)
}

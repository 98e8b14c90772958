use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::usuarios::handlers;
use crate::features::usuarios::services::UsuarioService;

/// Create routes for the usuarios feature
pub fn routes(service: Arc<UsuarioService>) -> Router {
    Router::new()
        .route("/api/usuario", get(handlers::list_usuarios))
        .route("/api/usuario/{id}", get(handlers::get_usuario))
        .route("/api/usuario/puntos", put(handlers::update_puntos_sin_id))
        .route("/api/usuario/puntos/{id}", put(handlers::update_puntos))
        .with_state(service)
}

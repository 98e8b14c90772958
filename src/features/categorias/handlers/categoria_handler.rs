use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{require_id, AppJson};
use crate::features::categorias::dtos::{CategoriaResponseDto, ListCategoriasQuery};
use crate::features::categorias::models::CategoriaTipo;
use crate::features::categorias::services::CategoriaService;
use crate::schemas::{CategoriaInput, Schema};
use crate::shared::types::{estado_filter, ApiResponse, Meta};

/// Unknown families answer 404, as any unknown route would
fn parse_tipo(raw: &str) -> Result<CategoriaTipo> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Familia de categorías '{}' no existe", raw)))
}

/// List categories of one family
#[utoipa::path(
    get,
    path = "/api/categoria/{tipo}",
    params(
        ("tipo" = String, Path, description = "insumo, producto or promocion"),
        ListCategoriasQuery
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoriaResponseDto>>),
        (status = 404, description = "Unknown family")
    ),
    tag = "categorias"
)]
pub async fn list_categorias(
    State(service): State<Arc<CategoriaService>>,
    Path(tipo): Path<String>,
    Query(query): Query<ListCategoriasQuery>,
) -> Result<Json<ApiResponse<Vec<CategoriaResponseDto>>>> {
    let tipo = parse_tipo(&tipo)?;
    let estado = estado_filter(query.activo.as_deref(), query.estado.as_deref());

    let categorias = service.list(tipo, estado).await?;
    let meta = Meta::total(categorias.len());
    Ok(Json(ApiResponse::success(Some(categorias), None, Some(meta))))
}

/// Create a category in one family
#[utoipa::path(
    post,
    path = "/api/categoria/{tipo}",
    params(("tipo" = String, Path, description = "insumo, producto or promocion")),
    request_body = CategoriaInput,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoriaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown family")
    ),
    tag = "categorias"
)]
pub async fn create_categoria(
    State(service): State<Arc<CategoriaService>>,
    Path(tipo): Path<String>,
    AppJson(input): AppJson<CategoriaInput>,
) -> Result<(StatusCode, Json<ApiResponse<CategoriaResponseDto>>)> {
    let tipo = parse_tipo(&tipo)?;
    let record = input.parse()?;

    let categoria = service.create(tipo, record).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(categoria),
            Some("Categoría creada".to_string()),
            None,
        )),
    ))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categoria/{tipo}/{id}",
    params(
        ("tipo" = String, Path, description = "insumo, producto or promocion"),
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoriaResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_categoria(
    State(service): State<Arc<CategoriaService>>,
    Path((tipo, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CategoriaResponseDto>>> {
    let tipo = parse_tipo(&tipo)?;
    let id = require_id(&id)?;

    let categoria = service.get(tipo, id).await?;
    Ok(Json(ApiResponse::success(Some(categoria), None, None)))
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/api/categoria/{tipo}/{id}",
    params(
        ("tipo" = String, Path, description = "insumo, producto or promocion"),
        ("id" = String, Path, description = "Category id")
    ),
    request_body = CategoriaInput,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoriaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn update_categoria(
    State(service): State<Arc<CategoriaService>>,
    Path((tipo, id)): Path<(String, String)>,
    AppJson(input): AppJson<CategoriaInput>,
) -> Result<Json<ApiResponse<CategoriaResponseDto>>> {
    let tipo = parse_tipo(&tipo)?;
    let id = require_id(&id)?;
    let record = input.parse()?;

    let categoria = service.update(tipo, id, record).await?;
    Ok(Json(ApiResponse::success(
        Some(categoria),
        Some("Categoría actualizada".to_string()),
        None,
    )))
}

/// Deactivate a category
#[utoipa::path(
    delete,
    path = "/api/categoria/{tipo}/{id}",
    params(
        ("tipo" = String, Path, description = "insumo, producto or promocion"),
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deactivated", body = ApiResponse<CategoriaResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn deactivate_categoria(
    State(service): State<Arc<CategoriaService>>,
    Path((tipo, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CategoriaResponseDto>>> {
    let tipo = parse_tipo(&tipo)?;
    let id = require_id(&id)?;

    let categoria = service.deactivate(tipo, id).await?;
    Ok(Json(ApiResponse::success(
        Some(categoria),
        Some("Categoría desactivada".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::core::error::{AppError, Result};
    use crate::core::store::{EstadoRepository, Repository};
    use crate::features::categorias::models::{Categoria, CategoriaFilter, NuevaCategoria};
    use crate::features::categorias::routes;
    use crate::features::categorias::services::CategoriaService;
    use crate::shared::test_helpers::test_app;
    use crate::shared::types::Estado;

    /// Store whose every call fails the way an unreachable database does
    struct UnreachableStore;

    #[async_trait]
    impl Repository<Categoria> for UnreachableStore {
        async fn list(&self, _filter: &CategoriaFilter) -> Result<Vec<Categoria>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn get_by_id(&self, _id: &str) -> Result<Option<Categoria>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _record: NuevaCategoria) -> Result<Categoria> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn update(&self, _id: &str, _record: NuevaCategoria) -> Result<Option<Categoria>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[async_trait]
    impl EstadoRepository<Categoria> for UnreachableStore {
        async fn set_estado(&self, _id: &str, _estado: Estado) -> Result<Option<Categoria>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_crud_within_one_family() {
        let app = test_app();

        let response = app
            .server
            .post("/api/categoria/insumo")
            .json(&json!({ "nombre": "Harinas" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["data"]["id_categoria"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["tipo"], "insumo");

        let path = format!("/api/categoria/insumo/{}", id);
        let updated: Value = app
            .server
            .put(&path)
            .json(&json!({ "nombre": "Harinas y féculas" }))
            .await
            .json();
        assert_eq!(updated["data"]["nombre"], "Harinas y féculas");

        let deactivated: Value = app.server.delete(&path).await.json();
        assert_eq!(deactivated["data"]["estado"], "inactivo");

        let activas: Value = app
            .server
            .get("/api/categoria/insumo")
            .add_query_param("activo", "true")
            .await
            .json();
        assert_eq!(activas["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_family_mismatch_and_unknown_family() {
        let app = test_app();
        let created: Value = app
            .server
            .post("/api/categoria/producto")
            .json(&json!({ "nombre": "Pizzas" }))
            .await
            .json();
        let id = created["data"]["id_categoria"].as_str().unwrap();

        app.server
            .get(&format!("/api/categoria/promocion/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .put(&format!("/api/categoria/insumo/{}", id))
            .json(&json!({ "nombre": "Otra" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .get("/api/categoria/bebida")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let app = test_app();
        let response = app
            .server
            .post("/api/categoria/promocion")
            .json(&json!({ "nombre": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["violations"][0]["field"], "nombre");
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let app = test_app();
        for nombre in ["Verduras", "Harinas", "Lácteos"] {
            app.server
                .post("/api/categoria/insumo")
                .json(&json!({ "nombre": nombre }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let body: Value = app.server.get("/api/categoria/insumo").await.json();
        let nombres: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["nombre"].as_str().unwrap())
            .collect();
        assert_eq!(nombres, vec!["Harinas", "Lácteos", "Verduras"]);
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let service = Arc::new(CategoriaService::new(Arc::new(UnreachableStore)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let listed = server.get("/api/categoria/insumo").await;
        listed.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = listed.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error interno al acceder a los datos");
        let text = body.to_string().to_lowercase();
        assert!(!text.contains("pool"));
        assert!(!text.contains("sqlx"));

        server
            .post("/api/categoria/insumo")
            .json(&json!({ "nombre": "Harinas" }))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, PathId};
use crate::features::promociones::dtos::{ListPromocionesQuery, PromocionResponseDto};
use crate::features::promociones::models::PromocionFilter;
use crate::features::promociones::services::PromocionService;
use crate::schemas::{PromocionInput, Schema};
use crate::shared::types::{id_filter, ApiResponse, Meta};

/// List promotions
#[utoipa::path(
    get,
    path = "/api/promocion",
    params(ListPromocionesQuery),
    responses(
        (status = 200, description = "List of promotions", body = ApiResponse<Vec<PromocionResponseDto>>),
    ),
    tag = "promociones"
)]
pub async fn list_promociones(
    State(service): State<Arc<PromocionService>>,
    Query(query): Query<ListPromocionesQuery>,
) -> Result<Json<ApiResponse<Vec<PromocionResponseDto>>>> {
    let filter = PromocionFilter {
        id_categoria: id_filter(query.id_categoria.as_deref()),
        vigente: query.vigente_en(Utc::now().date_naive()),
    };

    let promociones = service.list(filter).await?;
    let meta = Meta::total(promociones.len());
    Ok(Json(ApiResponse::success(Some(promociones), None, Some(meta))))
}

/// Create a promotion
///
/// `productos` is usually empty at creation; every listed id must exist.
#[utoipa::path(
    post,
    path = "/api/promocion",
    request_body = PromocionInput,
    responses(
        (status = 201, description = "Promotion created", body = ApiResponse<PromocionResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "promociones"
)]
pub async fn create_promocion(
    State(service): State<Arc<PromocionService>>,
    AppJson(input): AppJson<PromocionInput>,
) -> Result<(StatusCode, Json<ApiResponse<PromocionResponseDto>>)> {
    let record = input.parse()?;

    let promocion = service.create(record).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(promocion),
            Some("Promoción creada".to_string()),
            None,
        )),
    ))
}

/// Get a promotion by id
#[utoipa::path(
    get,
    path = "/api/promocion/{id}",
    params(("id" = String, Path, description = "Promotion id")),
    responses(
        (status = 200, description = "Promotion found", body = ApiResponse<PromocionResponseDto>),
        (status = 404, description = "Promotion not found")
    ),
    tag = "promociones"
)]
pub async fn get_promocion(
    State(service): State<Arc<PromocionService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<PromocionResponseDto>>> {
    let promocion = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(promocion), None, None)))
}

/// Replace a promotion
#[utoipa::path(
    put,
    path = "/api/promocion/{id}",
    params(("id" = String, Path, description = "Promotion id")),
    request_body = PromocionInput,
    responses(
        (status = 200, description = "Promotion updated", body = ApiResponse<PromocionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Promotion not found")
    ),
    tag = "promociones"
)]
pub async fn update_promocion(
    State(service): State<Arc<PromocionService>>,
    PathId(id): PathId,
    AppJson(input): AppJson<PromocionInput>,
) -> Result<Json<ApiResponse<PromocionResponseDto>>> {
    let record = input.parse()?;

    let promocion = service.update(&id, record).await?;
    Ok(Json(ApiResponse::success(
        Some(promocion),
        Some("Promoción actualizada".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::features::categorias::models::CategoriaTipo;
    use crate::shared::test_helpers::{seed_categoria, test_app};
    use crate::shared::types::Estado;

    fn body(cat: &str, productos: Vec<&str>) -> Value {
        json!({
            "nombre": "Martes de empanadas",
            "descripcion": "Docena a precio especial",
            "precio_base": 24,
            "precio_oferta": "18.00",
            "fecha_inicio": "2024-06-01",
            "fecha_fin": "2024-06-30T00:00:00.000Z",
            "dia_promocion": ["MARTES"],
            "id_cat_promocion": cat,
            "productos": productos,
        })
    }

    #[tokio::test]
    async fn test_create_update_and_filter() {
        let app = test_app();
        let cat = seed_categoria(&app.stores, CategoriaTipo::Promocion, Estado::Activo).await;
        let cat_producto =
            seed_categoria(&app.stores, CategoriaTipo::Producto, Estado::Activo).await;

        let producto: Value = app
            .server
            .post("/api/producto")
            .json(&json!({"nombre": "Empanada", "precio_base": 2, "id_cat_producto": cat_producto}))
            .await
            .json();
        let id_producto = producto["data"]["id_producto"].as_str().unwrap().to_string();

        let response = app.server.post("/api/promocion").json(&body(&cat, vec![])).await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["data"]["fecha_fin"], "2024-06-30");
        assert_eq!(created["data"]["productos"], json!([]));

        let path = format!(
            "/api/promocion/{}",
            created["data"]["id_promocion"].as_str().unwrap()
        );
        app.server
            .put(&path)
            .json(&body(&cat, vec![&id_producto]))
            .await
            .assert_status_ok();
        let fetched: Value = app.server.get(&path).await.json();
        assert_eq!(fetched["data"]["productos"], json!([id_producto]));
        assert_eq!(fetched["data"]["dia_promocion"], json!(["MARTES"]));

        let vigentes: Value = app
            .server
            .get("/api/promocion")
            .add_query_param("vigente", "2024-06-10")
            .await
            .json();
        assert_eq!(vigentes["meta"]["total"], 1);

        let vencidas: Value = app
            .server
            .get("/api/promocion")
            .add_query_param("vigente", "2024-07-10")
            .await
            .json();
        assert_eq!(vencidas["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_offer_above_base_rejected() {
        let app = test_app();
        let cat = seed_categoria(&app.stores, CategoriaTipo::Promocion, Estado::Activo).await;
        let mut input = body(&cat, vec![]);
        input["precio_oferta"] = json!(30);

        let response = app.server.post("/api/promocion").json(&input).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["violations"][0]["field"], "precio_oferta");
        assert!(app.stores.promociones.is_empty().await);
    }

    #[tokio::test]
    async fn test_promotions_cannot_be_deleted() {
        let app = test_app();
        app.server
            .delete("/api/promocion/any")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}

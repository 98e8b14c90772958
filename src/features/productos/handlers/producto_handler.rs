use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, PathId};
use crate::features::productos::dtos::{ListProductosQuery, ProductoResponseDto};
use crate::features::productos::models::ProductoFilter;
use crate::features::productos::services::ProductoService;
use crate::schemas::{ProductoInput, Schema};
use crate::shared::types::{estado_filter, id_filter, ApiResponse, Meta};

/// List products
#[utoipa::path(
    get,
    path = "/api/producto",
    params(ListProductosQuery),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductoResponseDto>>),
    ),
    tag = "productos"
)]
pub async fn list_productos(
    State(service): State<Arc<ProductoService>>,
    Query(query): Query<ListProductosQuery>,
) -> Result<Json<ApiResponse<Vec<ProductoResponseDto>>>> {
    let filter = ProductoFilter {
        estado: estado_filter(query.activo.as_deref(), query.estado.as_deref()),
        id_categoria: id_filter(query.id_categoria.as_deref()),
    };

    let productos = service.list(filter).await?;
    let meta = Meta::total(productos.len());
    Ok(Json(ApiResponse::success(Some(productos), None, Some(meta))))
}

/// Create a product
///
/// The product category must exist and be active.
#[utoipa::path(
    post,
    path = "/api/producto",
    request_body = ProductoInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductoResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "productos"
)]
pub async fn create_producto(
    State(service): State<Arc<ProductoService>>,
    AppJson(input): AppJson<ProductoInput>,
) -> Result<(StatusCode, Json<ApiResponse<ProductoResponseDto>>)> {
    let record = input.parse()?;

    let producto = service.create(record).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(producto),
            Some("Producto creado".to_string()),
            None,
        )),
    ))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/producto/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductoResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "productos"
)]
pub async fn get_producto(
    State(service): State<Arc<ProductoService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<ProductoResponseDto>>> {
    let producto = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(producto), None, None)))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/api/producto/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductoInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    tag = "productos"
)]
pub async fn update_producto(
    State(service): State<Arc<ProductoService>>,
    PathId(id): PathId,
    AppJson(input): AppJson<ProductoInput>,
) -> Result<Json<ApiResponse<ProductoResponseDto>>> {
    let record = input.parse()?;

    let producto = service.update(&id, record).await?;
    Ok(Json(ApiResponse::success(
        Some(producto),
        Some("Producto actualizado".to_string()),
        None,
    )))
}

/// Deactivate a product
#[utoipa::path(
    delete,
    path = "/api/producto/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deactivated", body = ApiResponse<ProductoResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "productos"
)]
pub async fn deactivate_producto(
    State(service): State<Arc<ProductoService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<ProductoResponseDto>>> {
    let producto = service.deactivate(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(producto),
        Some("Producto desactivado".to_string()),
        None,
    )))
}

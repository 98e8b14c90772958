use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, PathId};
use crate::features::insumos::dtos::{InsumoResponseDto, ListInsumosQuery};
use crate::features::insumos::models::InsumoFilter;
use crate::features::insumos::services::InsumoService;
use crate::schemas::{InsumoInput, Schema};
use crate::shared::types::{estado_filter, id_filter, ApiResponse, Meta};

/// List supplies
#[utoipa::path(
    get,
    path = "/api/insumo",
    params(ListInsumosQuery),
    responses(
        (status = 200, description = "List of supplies", body = ApiResponse<Vec<InsumoResponseDto>>),
    ),
    tag = "insumos"
)]
pub async fn list_insumos(
    State(service): State<Arc<InsumoService>>,
    Query(query): Query<ListInsumosQuery>,
) -> Result<Json<ApiResponse<Vec<InsumoResponseDto>>>> {
    let filter = InsumoFilter {
        estado: estado_filter(query.activo.as_deref(), query.estado.as_deref()),
        id_categoria: id_filter(query.id_categoria.as_deref()),
    };

    let insumos = service.list(filter).await?;
    let meta = Meta::total(insumos.len());
    Ok(Json(ApiResponse::success(Some(insumos), None, Some(meta))))
}

/// Create a supply
///
/// The supply category must exist and be active.
#[utoipa::path(
    post,
    path = "/api/insumo",
    request_body = InsumoInput,
    responses(
        (status = 201, description = "Supply created", body = ApiResponse<InsumoResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "insumos"
)]
pub async fn create_insumo(
    State(service): State<Arc<InsumoService>>,
    AppJson(input): AppJson<InsumoInput>,
) -> Result<(StatusCode, Json<ApiResponse<InsumoResponseDto>>)> {
    let record = input.parse()?;

    let insumo = service.create(record).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(insumo),
            Some("Insumo creado".to_string()),
            None,
        )),
    ))
}

/// Get a supply by id
#[utoipa::path(
    get,
    path = "/api/insumo/{id}",
    params(("id" = String, Path, description = "Supply id")),
    responses(
        (status = 200, description = "Supply found", body = ApiResponse<InsumoResponseDto>),
        (status = 404, description = "Supply not found")
    ),
    tag = "insumos"
)]
pub async fn get_insumo(
    State(service): State<Arc<InsumoService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<InsumoResponseDto>>> {
    let insumo = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(insumo), None, None)))
}

/// Replace a supply
#[utoipa::path(
    put,
    path = "/api/insumo/{id}",
    params(("id" = String, Path, description = "Supply id")),
    request_body = InsumoInput,
    responses(
        (status = 200, description = "Supply updated", body = ApiResponse<InsumoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Supply not found")
    ),
    tag = "insumos"
)]
pub async fn update_insumo(
    State(service): State<Arc<InsumoService>>,
    PathId(id): PathId,
    AppJson(input): AppJson<InsumoInput>,
) -> Result<Json<ApiResponse<InsumoResponseDto>>> {
    let record = input.parse()?;

    let insumo = service.update(&id, record).await?;
    Ok(Json(ApiResponse::success(
        Some(insumo),
        Some("Insumo actualizado".to_string()),
        None,
    )))
}

/// Deactivate a supply
#[utoipa::path(
    delete,
    path = "/api/insumo/{id}",
    params(("id" = String, Path, description = "Supply id")),
    responses(
        (status = 200, description = "Supply deactivated", body = ApiResponse<InsumoResponseDto>),
        (status = 404, description = "Supply not found")
    ),
    tag = "insumos"
)]
pub async fn deactivate_insumo(
    State(service): State<Arc<InsumoService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<InsumoResponseDto>>> {
    let insumo = service.deactivate(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(insumo),
        Some("Insumo desactivado".to_string()),
        None,
    )))
}

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, PathId};
use crate::features::usuarios::dtos::UsuarioResponseDto;
use crate::features::usuarios::services::UsuarioService;
use crate::schemas::{PuntosInput, Schema};
use crate::shared::types::{ApiResponse, Meta};

/// List users
#[utoipa::path(
    get,
    path = "/api/usuario",
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UsuarioResponseDto>>),
    ),
    tag = "usuarios"
)]
pub async fn list_usuarios(
    State(service): State<Arc<UsuarioService>>,
) -> Result<Json<ApiResponse<Vec<UsuarioResponseDto>>>> {
    let usuarios = service.list().await?;
    let meta = Meta::total(usuarios.len());
    Ok(Json(ApiResponse::success(Some(usuarios), None, Some(meta))))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/usuario/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UsuarioResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "usuarios"
)]
pub async fn get_usuario(
    State(service): State<Arc<UsuarioService>>,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<UsuarioResponseDto>>> {
    let usuario = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(usuario), None, None)))
}

/// Set a user's points balance
///
/// The body is validated before the user is looked up, so an invalid body
/// never touches the store.
#[utoipa::path(
    put,
    path = "/api/usuario/puntos/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = PuntosInput,
    responses(
        (status = 200, description = "Points updated", body = ApiResponse<UsuarioResponseDto>),
        (status = 400, description = "Invalid body or missing id"),
        (status = 404, description = "User not found")
    ),
    tag = "usuarios"
)]
pub async fn update_puntos(
    State(service): State<Arc<UsuarioService>>,
    PathId(id): PathId,
    AppJson(input): AppJson<PuntosInput>,
) -> Result<Json<ApiResponse<UsuarioResponseDto>>> {
    let record = input.parse()?;

    let usuario = service.update_puntos(&id, record).await?;
    Ok(Json(ApiResponse::success(
        Some(usuario),
        Some("Puntos actualizados".to_string()),
        None,
    )))
}

/// `PUT /api/usuario/puntos` without an id
pub async fn update_puntos_sin_id() -> AppError {
    AppError::BadRequest("Falta el id del usuario".to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{seed_usuario, test_app};

    #[tokio::test]
    async fn test_negative_points_rejected_without_mutation() {
        let app = test_app();
        let usuario = seed_usuario(&app.stores, 30).await;

        let response = app
            .server
            .put("/api/usuario/puntos/abc")
            .json(&json!({ "puntos": -5 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["violations"][0]["field"], "puntos");

        app.server
            .put(&format!("/api/usuario/puntos/{}", usuario.id_usuario))
            .json(&json!({ "puntos": -5 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let stored = app.stores.usuarios.find(&usuario.id_usuario).await.unwrap();
        assert_eq!(stored.puntos, 30);
    }

    #[tokio::test]
    async fn test_non_numeric_points_report_violation() {
        let app = test_app();
        let usuario = seed_usuario(&app.stores, 30).await;

        let response = app
            .server
            .put(&format!("/api/usuario/puntos/{}", usuario.id_usuario))
            .json(&json!({ "puntos": "abc" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["violations"][0]["field"], "puntos");
        assert_eq!(body["violations"][0]["code"], "type");
        assert!(!body["message"].as_str().unwrap().contains("integer"));

        let stored = app.stores.usuarios.find(&usuario.id_usuario).await.unwrap();
        assert_eq!(stored.puntos, 30);
    }

    #[tokio::test]
    async fn test_malformed_json_gets_spanish_message() {
        let app = test_app();
        let usuario = seed_usuario(&app.stores, 30).await;

        let response = app
            .server
            .put(&format!("/api/usuario/puntos/{}", usuario.id_usuario))
            .text("{\"puntos\": ")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "El cuerpo de la solicitud no es JSON válido");
    }

    #[tokio::test]
    async fn test_set_points_is_idempotent() {
        let app = test_app();
        let usuario = seed_usuario(&app.stores, 0).await;
        let path = format!("/api/usuario/puntos/{}", usuario.id_usuario);

        let first: Value = app.server.put(&path).json(&json!({ "puntos": "120" })).await.json();
        let second: Value = app.server.put(&path).json(&json!({ "puntos": 120 })).await.json();
        assert_eq!(first["data"]["puntos"], 120);
        assert_eq!(second["data"]["puntos"], 120);

        let fetched: Value = app
            .server
            .get(&format!("/api/usuario/{}", usuario.id_usuario))
            .await
            .json();
        assert_eq!(fetched["data"]["puntos"], 120);
        assert_eq!(fetched["data"]["email"], usuario.email);
    }

    #[tokio::test]
    async fn test_missing_id_and_unknown_user() {
        let app = test_app();
        app.server
            .put("/api/usuario/puntos")
            .json(&json!({ "puntos": 1 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        app.server
            .put("/api/usuario/puntos/abc")
            .json(&json!({ "puntos": 1 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_usuarios() {
        let app = test_app();
        seed_usuario(&app.stores, 1).await;
        seed_usuario(&app.stores, 2).await;

        let body: Value = app.server.get("/api/usuario").await.json();
        assert_eq!(body["meta"]["total"], 2);
    }
}

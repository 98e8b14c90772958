use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::schemas::Violations;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

lazy_static! {
    /// Leading field path serde reports before a data error, e.g. `puntos: ...`
    static ref FIELD_PATH_REGEX: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*|\[\d+\])*): ").unwrap();
}

const DATA_ERROR_PREFIX: &str = "into the target type: ";

/// Field a JSON data error points at, or `body` when serde gave no path
fn rejected_field(details: &str) -> String {
    let source = details
        .split_once(DATA_ERROR_PREFIX)
        .map_or(details, |(_, rest)| rest);
    FIELD_PATH_REGEX
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| "body".to_string(), |m| m.as_str().to_string())
}

impl From<AppJsonRejection> for AppError {
    fn from(rejection: AppJsonRejection) -> Self {
        let details = rejection.0.body_text();
        tracing::warn!(details = %details, "Rejected JSON body");

        match rejection.0 {
            JsonRejection::JsonDataError(_) => {
                let field = rejected_field(&details);
                AppError::InvalidInput(Violations::single(
                    field,
                    "type",
                    "El valor no tiene un formato válido",
                ))
            }
            JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest("El cuerpo de la solicitud no es JSON válido".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => AppError::BadRequest(
                "La solicitud debe enviarse con Content-Type application/json".to_string(),
            ),
            _ => AppError::BadRequest("No se pudo leer el cuerpo de la solicitud".to_string()),
        }
    }
}

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Resource id taken from the single path parameter of an id-scoped route.
///
/// Blank ids are rejected with 400 before the handler runs.
pub struct PathId(pub String);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Falta el id del recurso".to_string()))?;

        require_id(&raw).map(|id| Self(id.to_string()))
    }
}

/// Trims a path id, rejecting blank values
pub fn require_id(raw: &str) -> Result<&str, AppError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("Falta el id del recurso".to_string()));
    }
    Ok(id)
}

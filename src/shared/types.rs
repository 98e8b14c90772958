use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schemas::Violations;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    /// Per-field schema violations, only present on 400 responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Violations>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: i64::try_from(total).unwrap_or(i64::MAX),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            violations: None,
        }
    }

    pub fn error(message: Option<String>, violations: Option<Violations>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            violations,
        }
    }
}

// =============================================================================
// ESTADO
// =============================================================================

/// Lifecycle status of a catalog record.
///
/// Records are never removed: deactivating one moves it to `Inactivo`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "estado_registro", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Estado {
    #[default]
    Activo,
    Inactivo,
}

impl Estado {
    pub const ALL: [Estado; 2] = [Estado::Activo, Estado::Inactivo];

    pub fn is_activo(self) -> bool {
        matches!(self, Estado::Activo)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Estado::Activo => "activo",
            Estado::Inactivo => "inactivo",
        }
    }

    /// Interprets the legacy `activo=true|false` query parameter.
    /// Anything else means "no filter".
    pub fn from_activo_param(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(Estado::Activo),
            "false" => Some(Estado::Inactivo),
            _ => None,
        }
    }
}

impl From<bool> for Estado {
    fn from(activo: bool) -> Self {
        if activo {
            Estado::Activo
        } else {
            Estado::Inactivo
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Estado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Estado::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("estado desconocido: {}", s))
    }
}

// =============================================================================
// QUERY FILTERS
// =============================================================================

/// Status filter from list query parameters.
///
/// `estado=activo|inactivo` wins over the legacy `activo=true|false`;
/// unrecognized values mean "no filter".
pub fn estado_filter(activo: Option<&str>, estado: Option<&str>) -> Option<Estado> {
    estado
        .and_then(|e| e.parse::<Estado>().ok())
        .or_else(|| activo.and_then(Estado::from_activo_param))
}

/// Equality filter on an id; blank means "no filter"
pub fn id_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_filter_precedence() {
        assert_eq!(estado_filter(Some("true"), None), Some(Estado::Activo));
        assert_eq!(
            estado_filter(Some("true"), Some("inactivo")),
            Some(Estado::Inactivo)
        );
        assert_eq!(estado_filter(Some("quizas"), None), None);
        assert_eq!(estado_filter(Some("false"), Some("otro")), Some(Estado::Inactivo));
        assert_eq!(estado_filter(None, None), None);
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter(Some(" c1 ")), Some("c1".to_string()));
        assert_eq!(id_filter(Some("")), None);
        assert_eq!(id_filter(None), None);
    }

    #[test]
    fn test_activo_param() {
        assert_eq!(Estado::from_activo_param("true"), Some(Estado::Activo));
        assert_eq!(Estado::from_activo_param("false"), Some(Estado::Inactivo));
        assert_eq!(Estado::from_activo_param("TRUE"), None);
        assert_eq!(Estado::from_activo_param("1"), None);
        assert_eq!(Estado::from_activo_param(""), None);
    }

    #[test]
    fn test_estado_from_str() {
        assert_eq!("activo".parse::<Estado>(), Ok(Estado::Activo));
        assert_eq!(" Inactivo ".parse::<Estado>(), Ok(Estado::Inactivo));
        assert!("borrado".parse::<Estado>().is_err());
    }

    #[test]
    fn test_error_envelope_omits_empty_violations() {
        let body = ApiResponse::<()>::error(Some("x".into()), None);
        let value = serde_json::to_value(body).unwrap();
        assert!(value.get("violations").is_none());
        assert_eq!(value["success"], false);
    }
}

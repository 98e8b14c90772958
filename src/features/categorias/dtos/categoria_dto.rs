use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::categorias::models::{Categoria, CategoriaTipo};
use crate::shared::types::Estado;

/// Response DTO for categoria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoriaResponseDto {
    pub id_categoria: String,
    pub tipo: CategoriaTipo,
    pub nombre: String,
    pub estado: Estado,
    /// Derived from `estado`
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Categoria> for CategoriaResponseDto {
    fn from(c: Categoria) -> Self {
        Self {
            id_categoria: c.id_categoria,
            tipo: c.tipo,
            nombre: c.nombre,
            activo: c.estado.is_activo(),
            estado: c.estado,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCategoriasQuery {
    /// `true` for active only, `false` for inactive only
    pub activo: Option<String>,
    /// `activo` or `inactivo`; takes precedence over `activo`
    pub estado: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::usuarios::models::Usuario;

/// Response DTO for usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UsuarioResponseDto {
    pub id_usuario: String,
    pub nombre: String,
    pub email: String,
    pub puntos: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponseDto {
    fn from(u: Usuario) -> Self {
        Self {
            id_usuario: u.id_usuario,
            nombre: u.nombre,
            email: u.email,
            puntos: u.puntos,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

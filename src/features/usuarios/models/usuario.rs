use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for usuario
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Usuario {
    pub id_usuario: String,
    pub nombre: String,
    pub email: String,
    pub puntos: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Usuario {
    /// Fresh user with a server-assigned id, as the sign-up flow stores it
    pub fn new(nombre: impl Into<String>, email: impl Into<String>, puntos: i32) -> Self {
        let now = Utc::now();
        Self {
            id_usuario: crate::core::store::new_id(),
            nombre: nombre.into(),
            email: email.into(),
            puntos,
            created_at: now,
            updated_at: now,
        }
    }
}

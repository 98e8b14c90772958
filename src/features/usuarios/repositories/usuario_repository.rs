use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::core::store::MemoryStore;
use crate::features::usuarios::models::Usuario;

const COLUMNS: &str = "id_usuario, nombre, email, puntos, created_at, updated_at";

/// Users are created outside this service, so the store only reads them and
/// overwrites points.
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Usuario>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Usuario>>;

    /// Last write wins; `None` when the user does not exist
    async fn update_puntos(&self, id: &str, puntos: i32) -> Result<Option<Usuario>>;
}

/// PostgreSQL-backed user store
pub struct PgUsuarioRepository {
    pool: PgPool,
}

impl PgUsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsuarioRepository for PgUsuarioRepository {
    async fn list(&self) -> Result<Vec<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {} FROM usuario ORDER BY nombre, id_usuario",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list usuarios: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {} FROM usuario WHERE id_usuario = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get usuario {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn update_puntos(&self, id: &str, puntos: i32) -> Result<Option<Usuario>> {
        sqlx::query_as::<_, Usuario>(&format!(
            "UPDATE usuario SET puntos = $2, updated_at = NOW() \
             WHERE id_usuario = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(puntos)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update puntos of usuario {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl UsuarioRepository for MemoryStore<Usuario> {
    async fn list(&self) -> Result<Vec<Usuario>> {
        let mut usuarios = self.all().await;
        usuarios.sort_by(|a, b| {
            a.nombre
                .cmp(&b.nombre)
                .then_with(|| a.id_usuario.cmp(&b.id_usuario))
        });
        Ok(usuarios)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Usuario>> {
        Ok(self.find(id).await)
    }

    async fn update_puntos(&self, id: &str, puntos: i32) -> Result<Option<Usuario>> {
        Ok(self
            .modify(id, |u| {
                u.puntos = puntos;
                u.updated_at = Utc::now();
                true
            })
            .await)
    }
}

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::core::store::{new_id, EstadoRepository, Repository};
use crate::features::categorias::models::{Categoria, CategoriaFilter, NuevaCategoria};
use crate::shared::types::Estado;

const COLUMNS: &str = "id_categoria, tipo, nombre, estado, created_at, updated_at";

/// PostgreSQL-backed category store
pub struct PgCategoriaRepository {
    pool: PgPool,
}

impl PgCategoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Categoria> for PgCategoriaRepository {
    async fn list(&self, filter: &CategoriaFilter) -> Result<Vec<Categoria>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM categoria WHERE TRUE", COLUMNS));
        if let Some(tipo) = filter.tipo {
            query.push(" AND tipo = ").push_bind(tipo);
        }
        if let Some(estado) = filter.estado {
            query.push(" AND estado = ").push_bind(estado);
        }
        query.push(" ORDER BY nombre, id_categoria");

        query
            .build_query_as::<Categoria>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categorias: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!(
            "SELECT {} FROM categoria WHERE id_categoria = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get categoria {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn create(&self, record: NuevaCategoria) -> Result<Categoria> {
        sqlx::query_as::<_, Categoria>(&format!(
            "INSERT INTO categoria (id_categoria, tipo, nombre, estado) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        ))
        .bind(new_id())
        .bind(record.tipo)
        .bind(&record.datos.nombre)
        .bind(record.datos.estado)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create categoria: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: &str, record: NuevaCategoria) -> Result<Option<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!(
            "UPDATE categoria SET nombre = $3, estado = $4, updated_at = NOW() \
             WHERE id_categoria = $1 AND tipo = $2 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(record.tipo)
        .bind(&record.datos.nombre)
        .bind(record.datos.estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update categoria {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl EstadoRepository<Categoria> for PgCategoriaRepository {
    async fn set_estado(&self, id: &str, estado: Estado) -> Result<Option<Categoria>> {
        sqlx::query_as::<_, Categoria>(&format!(
            "UPDATE categoria SET estado = $2, updated_at = NOW() \
             WHERE id_categoria = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set estado of categoria {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::core::store::{new_id, EstadoRepository, Repository};
use crate::features::insumos::models::{Insumo, InsumoFilter};
use crate::schemas::InsumoRecord;
use crate::shared::types::Estado;

const COLUMNS: &str = "id_insumo, nombre, cantidad, medida, id_cat_insumo, estado, img_url, \
                       created_at, updated_at";

/// PostgreSQL-backed supply store
pub struct PgInsumoRepository {
    pool: PgPool,
}

impl PgInsumoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Insumo> for PgInsumoRepository {
    async fn list(&self, filter: &InsumoFilter) -> Result<Vec<Insumo>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM insumo WHERE TRUE", COLUMNS));
        if let Some(estado) = filter.estado {
            query.push(" AND estado = ").push_bind(estado);
        }
        if let Some(id_categoria) = &filter.id_categoria {
            query.push(" AND id_cat_insumo = ").push_bind(id_categoria.clone());
        }
        query.push(" ORDER BY id_insumo");

        query
            .build_query_as::<Insumo>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list insumos: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Insumo>> {
        sqlx::query_as::<_, Insumo>(&format!(
            "SELECT {} FROM insumo WHERE id_insumo = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get insumo {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn create(&self, record: InsumoRecord) -> Result<Insumo> {
        sqlx::query_as::<_, Insumo>(&format!(
            "INSERT INTO insumo (id_insumo, nombre, cantidad, medida, id_cat_insumo, estado, img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        ))
        .bind(new_id())
        .bind(&record.nombre)
        .bind(record.cantidad)
        .bind(record.medida)
        .bind(&record.id_cat_insumo)
        .bind(record.estado)
        .bind(&record.img_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create insumo: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: &str, record: InsumoRecord) -> Result<Option<Insumo>> {
        sqlx::query_as::<_, Insumo>(&format!(
            "UPDATE insumo SET nombre = $2, cantidad = $3, medida = $4, id_cat_insumo = $5, \
             estado = $6, img_url = $7, updated_at = NOW() \
             WHERE id_insumo = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(&record.nombre)
        .bind(record.cantidad)
        .bind(record.medida)
        .bind(&record.id_cat_insumo)
        .bind(record.estado)
        .bind(&record.img_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update insumo {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl EstadoRepository<Insumo> for PgInsumoRepository {
    async fn set_estado(&self, id: &str, estado: Estado) -> Result<Option<Insumo>> {
        sqlx::query_as::<_, Insumo>(&format!(
            "UPDATE insumo SET estado = $2, updated_at = NOW() WHERE id_insumo = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set estado of insumo {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

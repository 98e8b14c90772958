use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::core::store::{new_id, EstadoRepository, Repository};
use crate::features::productos::models::{Producto, ProductoFilter};
use crate::schemas::ProductoRecord;
use crate::shared::types::Estado;

const COLUMNS: &str = "id_producto, nombre, descripcion, precio_base, id_cat_producto, estado, \
                       img_url, created_at, updated_at";

/// PostgreSQL-backed product store
pub struct PgProductoRepository {
    pool: PgPool,
}

impl PgProductoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Producto> for PgProductoRepository {
    async fn list(&self, filter: &ProductoFilter) -> Result<Vec<Producto>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM producto WHERE TRUE", COLUMNS));
        if let Some(estado) = filter.estado {
            query.push(" AND estado = ").push_bind(estado);
        }
        if let Some(id_categoria) = &filter.id_categoria {
            query.push(" AND id_cat_producto = ").push_bind(id_categoria.clone());
        }
        query.push(" ORDER BY id_producto");

        query
            .build_query_as::<Producto>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list productos: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "SELECT {} FROM producto WHERE id_producto = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get producto {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn create(&self, record: ProductoRecord) -> Result<Producto> {
        sqlx::query_as::<_, Producto>(&format!(
            "INSERT INTO producto \
             (id_producto, nombre, descripcion, precio_base, id_cat_producto, estado, img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        ))
        .bind(new_id())
        .bind(&record.nombre)
        .bind(&record.descripcion)
        .bind(record.precio_base)
        .bind(&record.id_cat_producto)
        .bind(record.estado)
        .bind(&record.img_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create producto: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: &str, record: ProductoRecord) -> Result<Option<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "UPDATE producto SET nombre = $2, descripcion = $3, precio_base = $4, \
             id_cat_producto = $5, estado = $6, img_url = $7, updated_at = NOW() \
             WHERE id_producto = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(&record.nombre)
        .bind(&record.descripcion)
        .bind(record.precio_base)
        .bind(&record.id_cat_producto)
        .bind(record.estado)
        .bind(&record.img_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update producto {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl EstadoRepository<Producto> for PgProductoRepository {
    async fn set_estado(&self, id: &str, estado: Estado) -> Result<Option<Producto>> {
        sqlx::query_as::<_, Producto>(&format!(
            "UPDATE producto SET estado = $2, updated_at = NOW() \
             WHERE id_producto = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set estado of producto {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

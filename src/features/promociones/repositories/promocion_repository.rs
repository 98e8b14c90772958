use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::core::store::{new_id, Repository};
use crate::features::promociones::models::{Promocion, PromocionFilter, PromocionRow};
use crate::schemas::PromocionRecord;

const COLUMNS: &str = "id_promocion, nombre, descripcion, precio_base, precio_oferta, \
                       fecha_inicio, fecha_fin, dia_promocion, id_cat_promocion, img_url, \
                       created_at, updated_at";

/// PostgreSQL-backed promotion store.
///
/// Writes touch `promocion` and `promocion_producto`, so create and update
/// run inside one transaction.
pub struct PgPromocionRepository {
    pool: PgPool,
}

impl PgPromocionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Product links for the given promotions, keyed by promotion id
    async fn links(&self, ids: &[String]) -> Result<HashMap<String, Vec<String>>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT id_promocion, id_producto FROM promocion_producto \
             WHERE id_promocion = ANY($1) ORDER BY id_producto",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load promocion_producto links: {:?}", e);
            AppError::Database(e)
        })?;

        let mut links: HashMap<String, Vec<String>> = HashMap::new();
        for (id_promocion, id_producto) in rows {
            links.entry(id_promocion).or_default().push(id_producto);
        }
        Ok(links)
    }
}

/// Replaces every product link of one promotion
async fn replace_links(conn: &mut PgConnection, id: &str, productos: &[String]) -> Result<()> {
    sqlx::query("DELETE FROM promocion_producto WHERE id_promocion = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if !productos.is_empty() {
        sqlx::query(
            "INSERT INTO promocion_producto (id_promocion, id_producto) \
             SELECT $1, UNNEST($2::text[])",
        )
        .bind(id)
        .bind(productos)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

fn day_names(record: &PromocionRecord) -> Vec<String> {
    record
        .dia_promocion
        .iter()
        .map(|d| d.as_str().to_string())
        .collect()
}

#[async_trait]
impl Repository<Promocion> for PgPromocionRepository {
    async fn list(&self, filter: &PromocionFilter) -> Result<Vec<Promocion>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM promocion WHERE TRUE", COLUMNS));
        if let Some(id_categoria) = &filter.id_categoria {
            query
                .push(" AND id_cat_promocion = ")
                .push_bind(id_categoria.clone());
        }
        if let Some(fecha) = filter.vigente {
            query
                .push(" AND fecha_inicio <= ")
                .push_bind(fecha)
                .push(" AND fecha_fin >= ")
                .push_bind(fecha);
        }
        query.push(" ORDER BY id_promocion");

        let rows = query
            .build_query_as::<PromocionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list promociones: {:?}", e);
                AppError::Database(e)
            })?;

        let ids: Vec<String> = rows.iter().map(|r| r.id_promocion.clone()).collect();
        let mut links = self.links(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let productos = links.remove(&row.id_promocion).unwrap_or_default();
                row.into_promocion(productos)
            })
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Promocion>> {
        let row = sqlx::query_as::<_, PromocionRow>(&format!(
            "SELECT {} FROM promocion WHERE id_promocion = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get promocion {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };
        let productos = self
            .links(&[id.to_string()])
            .await?
            .remove(id)
            .unwrap_or_default();
        Ok(Some(row.into_promocion(productos)))
    }

    async fn create(&self, record: PromocionRecord) -> Result<Promocion> {
        let id = new_id();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PromocionRow>(&format!(
            "INSERT INTO promocion (id_promocion, nombre, descripcion, precio_base, precio_oferta, \
             fecha_inicio, fecha_fin, dia_promocion, id_cat_promocion, img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            COLUMNS
        ))
        .bind(&id)
        .bind(&record.nombre)
        .bind(&record.descripcion)
        .bind(record.precio_base)
        .bind(record.precio_oferta)
        .bind(record.fecha_inicio)
        .bind(record.fecha_fin)
        .bind(day_names(&record))
        .bind(&record.id_cat_promocion)
        .bind(&record.img_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create promocion: {:?}", e);
            AppError::Database(e)
        })?;

        replace_links(&mut *tx, &id, &record.productos).await?;
        tx.commit().await?;

        Ok(row.into_promocion(record.productos))
    }

    async fn update(&self, id: &str, record: PromocionRecord) -> Result<Option<Promocion>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PromocionRow>(&format!(
            "UPDATE promocion SET nombre = $2, descripcion = $3, precio_base = $4, \
             precio_oferta = $5, fecha_inicio = $6, fecha_fin = $7, dia_promocion = $8, \
             id_cat_promocion = $9, img_url = $10, updated_at = NOW() \
             WHERE id_promocion = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(&record.nombre)
        .bind(&record.descripcion)
        .bind(record.precio_base)
        .bind(record.precio_oferta)
        .bind(record.fecha_inicio)
        .bind(record.fecha_fin)
        .bind(day_names(&record))
        .bind(&record.id_cat_promocion)
        .bind(&record.img_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update promocion {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        replace_links(&mut *tx, id, &record.productos).await?;
        tx.commit().await?;

        Ok(Some(row.into_promocion(record.productos)))
    }
}

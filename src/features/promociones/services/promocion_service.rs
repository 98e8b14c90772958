use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::store::Repository;
use crate::features::categorias::models::CategoriaTipo;
use crate::features::categorias::CategoriaService;
use crate::features::productos::ProductoService;
use crate::features::promociones::dtos::PromocionResponseDto;
use crate::features::promociones::models::{Promocion, PromocionFilter};
use crate::schemas::{PromocionRecord, Violations};

/// Service for promotion operations
pub struct PromocionService {
    repo: Arc<dyn Repository<Promocion>>,
    categorias: Arc<CategoriaService>,
    productos: Arc<ProductoService>,
}

impl PromocionService {
    pub fn new(
        repo: Arc<dyn Repository<Promocion>>,
        categorias: Arc<CategoriaService>,
        productos: Arc<ProductoService>,
    ) -> Self {
        Self {
            repo,
            categorias,
            productos,
        }
    }

    pub async fn list(&self, filter: PromocionFilter) -> Result<Vec<PromocionResponseDto>> {
        let promociones = self.repo.list(&filter).await?;
        let nombres = self.categorias.nombres(CategoriaTipo::Promocion).await?;

        Ok(promociones
            .into_iter()
            .map(|p| {
                let cat = nombres.get(&p.id_cat_promocion).cloned();
                PromocionResponseDto::new(p, cat)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<PromocionResponseDto> {
        let promocion = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.to_dto(promocion).await
    }

    pub async fn create(&self, record: PromocionRecord) -> Result<PromocionResponseDto> {
        self.categorias
            .ensure_activa(
                CategoriaTipo::Promocion,
                &record.id_cat_promocion,
                "id_cat_promocion",
            )
            .await?;
        self.ensure_productos(&record).await?;

        let promocion = self.repo.create(record).await?;
        tracing::info!(
            "Promocion creada: {} ({}, {} productos)",
            promocion.nombre,
            promocion.id_promocion,
            promocion.productos.len()
        );
        self.to_dto(promocion).await
    }

    /// Full replacement, product links included
    pub async fn update(&self, id: &str, record: PromocionRecord) -> Result<PromocionResponseDto> {
        self.ensure_productos(&record).await?;

        let promocion = self
            .repo
            .update(id, record)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Promocion {} actualizada", id);
        self.to_dto(promocion).await
    }

    async fn ensure_productos(&self, record: &PromocionRecord) -> Result<()> {
        let found = self.productos.existing(&record.productos).await?;
        if found.len() == record.productos.len() {
            return Ok(());
        }

        let missing: Vec<&str> = record
            .productos
            .iter()
            .filter(|p| !found.contains(p))
            .map(String::as_str)
            .collect();
        Err(AppError::InvalidInput(Violations::single(
            "productos",
            "reference",
            format!("Productos inexistentes: {}", missing.join(", ")),
        )))
    }

    async fn to_dto(&self, promocion: Promocion) -> Result<PromocionResponseDto> {
        let cat = self
            .categorias
            .nombres(CategoriaTipo::Promocion)
            .await?
            .remove(&promocion.id_cat_promocion);
        Ok(PromocionResponseDto::new(promocion, cat))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Promoción '{}' no encontrada", id))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::core::store::MemoryStore;
    use crate::features::categorias::models::Categoria;
    use crate::features::productos::models::Producto;
    use crate::features::promociones::models::DiaSemana;
    use crate::schemas::{CategoriaRecord, ProductoRecord};
    use crate::shared::constants::{IMG_DEFAULT_PRODUCTO, IMG_DEFAULT_PROMOCION};
    use crate::shared::types::Estado;

    struct Fixture {
        service: PromocionService,
        productos: Arc<ProductoService>,
        cat_promocion: String,
        cat_producto: String,
    }

    async fn setup() -> Fixture {
        let categorias = Arc::new(CategoriaService::new(Arc::new(
            MemoryStore::<Categoria>::new(),
        )));
        let activa = |nombre: &str| CategoriaRecord {
            nombre: nombre.to_string(),
            estado: Estado::Activo,
        };
        let cat_promocion = categorias
            .create(CategoriaTipo::Promocion, activa("Combos"))
            .await
            .unwrap()
            .id_categoria;
        let cat_producto = categorias
            .create(CategoriaTipo::Producto, activa("Empanadas"))
            .await
            .unwrap()
            .id_categoria;

        let productos = Arc::new(ProductoService::new(
            Arc::new(MemoryStore::<Producto>::new()),
            categorias.clone(),
        ));
        let service = PromocionService::new(
            Arc::new(MemoryStore::<Promocion>::new()),
            categorias,
            productos.clone(),
        );
        Fixture {
            service,
            productos,
            cat_promocion,
            cat_producto,
        }
    }

    fn combo(cat: &str, productos: Vec<String>) -> PromocionRecord {
        PromocionRecord {
            nombre: "Docena".to_string(),
            descripcion: String::new(),
            precio_base: Decimal::from(20),
            precio_oferta: Decimal::from(15),
            fecha_inicio: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            fecha_fin: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            dia_promocion: vec![DiaSemana::Martes],
            id_cat_promocion: cat.to_string(),
            img_url: IMG_DEFAULT_PROMOCION.to_string(),
            productos,
        }
    }

    async fn producto(f: &Fixture) -> String {
        f.productos
            .create(ProductoRecord {
                nombre: "Empanada de carne".to_string(),
                descripcion: String::new(),
                precio_base: Decimal::from(2),
                id_cat_producto: f.cat_producto.clone(),
                img_url: IMG_DEFAULT_PRODUCTO.to_string(),
                estado: Estado::Activo,
            })
            .await
            .unwrap()
            .id_producto
    }

    #[tokio::test]
    async fn test_update_replaces_links() {
        let f = setup().await;
        let a = producto(&f).await;
        let b = producto(&f).await;

        let promo = f
            .service
            .create(combo(&f.cat_promocion, vec![a.clone()]))
            .await
            .unwrap();
        assert_eq!(promo.productos, vec![a]);
        assert_eq!(promo.cat_promocion.as_deref(), Some("Combos"));

        f.service
            .update(&promo.id_promocion, combo(&f.cat_promocion, vec![b.clone()]))
            .await
            .unwrap();
        let fetched = f.service.get(&promo.id_promocion).await.unwrap();
        assert_eq!(fetched.productos, vec![b]);
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let f = setup().await;
        let err = f
            .service
            .create(combo(&f.cat_promocion, vec!["ghost".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref v) if v.has("productos")));
    }

    #[tokio::test]
    async fn test_vigente_filter() {
        let f = setup().await;
        f.service
            .create(combo(&f.cat_promocion, Vec::new()))
            .await
            .unwrap();

        let en_junio = f
            .service
            .list(PromocionFilter {
                id_categoria: None,
                vigente: NaiveDate::from_ymd_opt(2024, 6, 15),
            })
            .await
            .unwrap();
        assert_eq!(en_junio.len(), 1);

        let en_julio = f
            .service
            .list(PromocionFilter {
                id_categoria: None,
                vigente: NaiveDate::from_ymd_opt(2024, 7, 1),
            })
            .await
            .unwrap();
        assert!(en_julio.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let f = setup().await;
        let err = f
            .service
            .update("nope", combo(&f.cat_promocion, Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

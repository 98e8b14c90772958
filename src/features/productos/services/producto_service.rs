use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::store::EstadoRepository;
use crate::features::categorias::models::CategoriaTipo;
use crate::features::categorias::CategoriaService;
use crate::features::productos::dtos::ProductoResponseDto;
use crate::features::productos::models::{Producto, ProductoFilter};
use crate::schemas::ProductoRecord;
use crate::shared::types::Estado;

/// Service for product operations
pub struct ProductoService {
    repo: Arc<dyn EstadoRepository<Producto>>,
    categorias: Arc<CategoriaService>,
}

impl ProductoService {
    pub fn new(
        repo: Arc<dyn EstadoRepository<Producto>>,
        categorias: Arc<CategoriaService>,
    ) -> Self {
        Self { repo, categorias }
    }

    pub async fn list(&self, filter: ProductoFilter) -> Result<Vec<ProductoResponseDto>> {
        let productos = self.repo.list(&filter).await?;
        let nombres = self.categorias.nombres(CategoriaTipo::Producto).await?;

        Ok(productos
            .into_iter()
            .map(|p| {
                let cat = nombres.get(&p.id_cat_producto).cloned();
                ProductoResponseDto::new(p, cat)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<ProductoResponseDto> {
        let producto = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.to_dto(producto).await
    }

    /// Ids of the given products that exist, in input order
    pub async fn existing(&self, ids: &[String]) -> Result<Vec<String>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if self.repo.get_by_id(id).await?.is_some() {
                found.push(id.clone());
            }
        }
        Ok(found)
    }

    pub async fn create(&self, record: ProductoRecord) -> Result<ProductoResponseDto> {
        self.categorias
            .ensure_activa(
                CategoriaTipo::Producto,
                &record.id_cat_producto,
                "id_cat_producto",
            )
            .await?;

        let producto = self.repo.create(record).await?;
        tracing::info!(
            "Producto creado: {} ({})",
            producto.nombre,
            producto.id_producto
        );
        self.to_dto(producto).await
    }

    pub async fn update(&self, id: &str, record: ProductoRecord) -> Result<ProductoResponseDto> {
        let producto = self
            .repo
            .update(id, record)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Producto {} actualizado", id);
        self.to_dto(producto).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<ProductoResponseDto> {
        let producto = self
            .repo
            .set_estado(id, Estado::Inactivo)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Producto {} desactivado", id);
        self.to_dto(producto).await
    }

    async fn to_dto(&self, producto: Producto) -> Result<ProductoResponseDto> {
        let cat = self
            .categorias
            .nombres(CategoriaTipo::Producto)
            .await?
            .remove(&producto.id_cat_producto);
        Ok(ProductoResponseDto::new(producto, cat))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Producto '{}' no encontrado", id))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::core::store::MemoryStore;
    use crate::features::categorias::models::Categoria;
    use crate::schemas::CategoriaRecord;
    use crate::shared::constants::IMG_DEFAULT_PRODUCTO;

    async fn setup() -> (ProductoService, String) {
        let categorias = Arc::new(CategoriaService::new(Arc::new(
            MemoryStore::<Categoria>::new(),
        )));
        let cat = categorias
            .create(
                CategoriaTipo::Producto,
                CategoriaRecord {
                    nombre: "Pizzas".to_string(),
                    estado: Estado::Activo,
                },
            )
            .await
            .unwrap();
        let service = ProductoService::new(Arc::new(MemoryStore::<Producto>::new()), categorias);
        (service, cat.id_categoria)
    }

    fn muzzarella(id_cat: &str) -> ProductoRecord {
        ProductoRecord {
            nombre: "Muzzarella".to_string(),
            descripcion: "Grande, 8 porciones".to_string(),
            precio_base: Decimal::new(1250, 2),
            id_cat_producto: id_cat.to_string(),
            img_url: IMG_DEFAULT_PRODUCTO.to_string(),
            estado: Estado::Activo,
        }
    }

    #[tokio::test]
    async fn test_update_then_get_reflects_submitted_fields() {
        let (service, cat) = setup().await;
        let producto = service.create(muzzarella(&cat)).await.unwrap();

        let mut record = muzzarella(&cat);
        record.nombre = "Napolitana".to_string();
        record.precio_base = Decimal::new(1400, 2);
        record.estado = Estado::Inactivo;
        service.update(&producto.id_producto, record).await.unwrap();

        let fetched = service.get(&producto.id_producto).await.unwrap();
        assert_eq!(fetched.nombre, "Napolitana");
        assert_eq!(fetched.precio_base, Decimal::new(1400, 2));
        assert_eq!(fetched.estado, Estado::Inactivo);
        assert!(!fetched.activo);
        assert_eq!(fetched.cat_producto.as_deref(), Some("Pizzas"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category() {
        let (service, _) = setup().await;
        let err = service.create(muzzarella("nope")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref v) if v.has("id_cat_producto")));
    }

    #[tokio::test]
    async fn test_existing_keeps_known_ids() {
        let (service, cat) = setup().await;
        let producto = service.create(muzzarella(&cat)).await.unwrap();

        let ids = vec!["ghost".to_string(), producto.id_producto.clone()];
        assert_eq!(
            service.existing(&ids).await.unwrap(),
            vec![producto.id_producto]
        );
    }
}

use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::store::EstadoRepository;
use crate::features::categorias::models::CategoriaTipo;
use crate::features::categorias::CategoriaService;
use crate::features::insumos::dtos::InsumoResponseDto;
use crate::features::insumos::models::{Insumo, InsumoFilter};
use crate::schemas::InsumoRecord;
use crate::shared::types::Estado;

/// Service for supply operations
pub struct InsumoService {
    repo: Arc<dyn EstadoRepository<Insumo>>,
    categorias: Arc<CategoriaService>,
}

impl InsumoService {
    pub fn new(repo: Arc<dyn EstadoRepository<Insumo>>, categorias: Arc<CategoriaService>) -> Self {
        Self { repo, categorias }
    }

    pub async fn list(&self, filter: InsumoFilter) -> Result<Vec<InsumoResponseDto>> {
        let insumos = self.repo.list(&filter).await?;
        let nombres = self.categorias.nombres(CategoriaTipo::Insumo).await?;

        Ok(insumos
            .into_iter()
            .map(|i| {
                let cat = nombres.get(&i.id_cat_insumo).cloned();
                InsumoResponseDto::new(i, cat)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<InsumoResponseDto> {
        let insumo = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.to_dto(insumo).await
    }

    /// Creates a supply. The category must exist and be active; updates do
    /// not re-check it.
    pub async fn create(&self, record: InsumoRecord) -> Result<InsumoResponseDto> {
        self.categorias
            .ensure_activa(CategoriaTipo::Insumo, &record.id_cat_insumo, "id_cat_insumo")
            .await?;

        let insumo = self.repo.create(record).await?;
        tracing::info!("Insumo creado: {} ({})", insumo.nombre, insumo.id_insumo);
        self.to_dto(insumo).await
    }

    pub async fn update(&self, id: &str, record: InsumoRecord) -> Result<InsumoResponseDto> {
        let insumo = self
            .repo
            .update(id, record)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Insumo {} actualizado", id);
        self.to_dto(insumo).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<InsumoResponseDto> {
        let insumo = self
            .repo
            .set_estado(id, Estado::Inactivo)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Insumo {} desactivado", id);
        self.to_dto(insumo).await
    }

    async fn to_dto(&self, insumo: Insumo) -> Result<InsumoResponseDto> {
        let cat = self
            .categorias
            .nombres(CategoriaTipo::Insumo)
            .await?
            .remove(&insumo.id_cat_insumo);
        Ok(InsumoResponseDto::new(insumo, cat))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Insumo '{}' no encontrado", id))
}

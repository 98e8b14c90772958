use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::store::EstadoRepository;
use crate::features::categorias::dtos::CategoriaResponseDto;
use crate::features::categorias::models::{
    Categoria, CategoriaFilter, CategoriaTipo, NuevaCategoria,
};
use crate::schemas::{CategoriaRecord, Violations};
use crate::shared::types::Estado;

/// Service for category operations
pub struct CategoriaService {
    repo: Arc<dyn EstadoRepository<Categoria>>,
}

impl CategoriaService {
    pub fn new(repo: Arc<dyn EstadoRepository<Categoria>>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        tipo: CategoriaTipo,
        estado: Option<Estado>,
    ) -> Result<Vec<CategoriaResponseDto>> {
        let filter = CategoriaFilter {
            tipo: Some(tipo),
            estado,
        };
        let categorias = self.repo.list(&filter).await?;
        Ok(categorias.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, tipo: CategoriaTipo, id: &str) -> Result<CategoriaResponseDto> {
        self.find(tipo, id).await.map(Into::into)
    }

    pub async fn create(
        &self,
        tipo: CategoriaTipo,
        record: CategoriaRecord,
    ) -> Result<CategoriaResponseDto> {
        let categoria = self
            .repo
            .create(NuevaCategoria {
                tipo,
                datos: record,
            })
            .await?;

        tracing::info!(
            "Categoria de {} creada: {} ({})",
            tipo,
            categoria.nombre,
            categoria.id_categoria
        );
        Ok(categoria.into())
    }

    pub async fn update(
        &self,
        tipo: CategoriaTipo,
        id: &str,
        record: CategoriaRecord,
    ) -> Result<CategoriaResponseDto> {
        let categoria = self
            .repo
            .update(
                id,
                NuevaCategoria {
                    tipo,
                    datos: record,
                },
            )
            .await?
            .ok_or_else(|| not_found(tipo, id))?;

        tracing::info!("Categoria {} actualizada", id);
        Ok(categoria.into())
    }

    /// Soft delete: the row stays, marked `inactivo`
    pub async fn deactivate(&self, tipo: CategoriaTipo, id: &str) -> Result<CategoriaResponseDto> {
        self.find(tipo, id).await?;
        let categoria = self
            .repo
            .set_estado(id, Estado::Inactivo)
            .await?
            .ok_or_else(|| not_found(tipo, id))?;

        tracing::info!("Categoria {} desactivada", id);
        Ok(categoria.into())
    }

    /// Checks that `id` names an active category of `tipo`.
    ///
    /// Failure is reported as a violation on `field`, the form field that
    /// carried the reference.
    pub async fn ensure_activa(&self, tipo: CategoriaTipo, id: &str, field: &str) -> Result<()> {
        match self.repo.get_by_id(id).await? {
            Some(c) if c.tipo == tipo && c.estado.is_activo() => Ok(()),
            _ => Err(AppError::InvalidInput(Violations::single(
                field,
                "reference",
                "La categoría seleccionada no existe o está inactiva",
            ))),
        }
    }

    /// Category names of one family keyed by id, inactive ones included
    pub async fn nombres(&self, tipo: CategoriaTipo) -> Result<HashMap<String, String>> {
        let filter = CategoriaFilter {
            tipo: Some(tipo),
            estado: None,
        };
        Ok(self
            .repo
            .list(&filter)
            .await?
            .into_iter()
            .map(|c| (c.id_categoria, c.nombre))
            .collect())
    }

    async fn find(&self, tipo: CategoriaTipo, id: &str) -> Result<Categoria> {
        self.repo
            .get_by_id(id)
            .await?
            .filter(|c| c.tipo == tipo)
            .ok_or_else(|| not_found(tipo, id))
    }
}

fn not_found(tipo: CategoriaTipo, id: &str) -> AppError {
    AppError::NotFound(format!("Categoría de {} '{}' no encontrada", tipo, id))
}

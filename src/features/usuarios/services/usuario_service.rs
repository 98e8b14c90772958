use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::usuarios::dtos::UsuarioResponseDto;
use crate::features::usuarios::repositories::UsuarioRepository;
use crate::schemas::PuntosRecord;

/// Service for user operations
pub struct UsuarioService {
    repo: Arc<dyn UsuarioRepository>,
}

impl UsuarioService {
    pub fn new(repo: Arc<dyn UsuarioRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<UsuarioResponseDto>> {
        let usuarios = self.repo.list().await?;
        Ok(usuarios.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> Result<UsuarioResponseDto> {
        self.repo
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Overwrites the balance; there is no ledger
    pub async fn update_puntos(&self, id: &str, record: PuntosRecord) -> Result<UsuarioResponseDto> {
        let usuario = self
            .repo
            .update_puntos(id, record.puntos)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Puntos del usuario {} fijados en {}", id, usuario.puntos);
        Ok(usuario.into())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Usuario '{}' no encontrado", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::features::usuarios::models::Usuario;

    #[tokio::test]
    async fn test_update_puntos_overwrites() {
        let store = Arc::new(MemoryStore::<Usuario>::new());
        let ana = Usuario::new("Ana", "ana@example.com", 40);
        store.insert(ana.id_usuario.clone(), ana.clone()).await;
        let service = UsuarioService::new(store);

        let updated = service
            .update_puntos(&ana.id_usuario, PuntosRecord { puntos: 15 })
            .await
            .unwrap();
        assert_eq!(updated.puntos, 15);

        let again = service
            .update_puntos(&ana.id_usuario, PuntosRecord { puntos: 15 })
            .await
            .unwrap();
        assert_eq!(again.puntos, 15);
        assert_eq!(service.get(&ana.id_usuario).await.unwrap().puntos, 15);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let service = UsuarioService::new(Arc::new(MemoryStore::<Usuario>::new()));
        assert!(matches!(
            service.update_puntos("abc", PuntosRecord { puntos: 1 }).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let store = Arc::new(MemoryStore::<Usuario>::new());
        for nombre in ["Zoe", "Ana"] {
            let u = Usuario::new(nombre, format!("{}@example.com", nombre), 0);
            store.insert(u.id_usuario.clone(), u).await;
        }
        let nombres: Vec<String> = UsuarioService::new(store)
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.nombre)
            .collect();
        assert_eq!(nombres, vec!["Ana", "Zoe"]);
    }
}

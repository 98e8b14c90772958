//! Query and mutation hooks.
//!
//! Queries read through the [`QueryCache`]. Mutations never retry: a success
//! emits a notification and drops every cached query of the mutated
//! resource, a failure emits a fixed-text error notification.

use std::future::Future;
use std::sync::Arc;

use super::api::ApiClient;
use super::cache::{ListFilter, QueryCache, QueryKey};
use super::error::{ClientError, Result};
use super::notify::{Notification, Notifier};
use super::resources::{Accion, Deactivable, Editable, Noun, Resource, Usuarios};
use crate::features::usuarios::dtos::UsuarioResponseDto;
use crate::schemas::{PuntosInput, Schema, Violations};

/// Data, loading and error state of one query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the hooks share: one HTTP client, one cache, one notifier
#[derive(Clone)]
pub struct ClientContext {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl ClientContext {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: Arc::new(api),
            cache: Arc::new(QueryCache::new()),
            notifier,
        }
    }

    pub fn queries(&self) -> Queries {
        Queries {
            api: Arc::clone(&self.api),
            cache: Arc::clone(&self.cache),
        }
    }

    pub fn mutations(&self) -> Mutations {
        Mutations {
            api: Arc::clone(&self.api),
            cache: Arc::clone(&self.cache),
            notifier: Arc::clone(&self.notifier),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }
}

#[derive(Clone)]
pub struct Queries {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
}

impl Queries {
    pub async fn list<R: Resource>(
        &self,
        resource: &R,
        filter: &ListFilter,
    ) -> QueryState<Vec<R::Item>> {
        let key = QueryKey::list(&resource.key(), filter);
        if let Some(items) = self.cache.get::<Vec<R::Item>>(&key).await {
            return QueryState::Ready(items);
        }

        match self
            .api
            .get::<Vec<R::Item>>(&resource.path(), &filter.pairs())
            .await
        {
            Ok(items) => {
                self.cache.put(key, &items).await;
                QueryState::Ready(items)
            }
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", resource.key(), e);
                QueryState::Failed(resource.load_error())
            }
        }
    }

    pub async fn get<R: Resource>(&self, resource: &R, id: &str) -> QueryState<R::Item> {
        let key = QueryKey::item(&resource.key(), id);
        if let Some(item) = self.cache.get::<R::Item>(&key).await {
            return QueryState::Ready(item);
        }

        match self.api.get::<R::Item>(&resource.item_path(id), &[]).await {
            Ok(item) => {
                self.cache.put(key, &item).await;
                QueryState::Ready(item)
            }
            Err(e) => {
                tracing::warn!("Failed to get {} {}: {}", resource.key(), id, e);
                QueryState::Failed(resource.load_error())
            }
        }
    }
}

#[derive(Clone)]
pub struct Mutations {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl Mutations {
    pub async fn create<R: Editable>(&self, resource: &R, input: &R::Input) -> Result<R::Item> {
        let path = resource.path();
        let call = self.api.post::<_, R::Item>(&path, input);
        self.settle(resource, Accion::Crear, call).await
    }

    pub async fn update<R: Editable>(
        &self,
        resource: &R,
        id: &str,
        input: &R::Input,
    ) -> Result<R::Item> {
        let path = resource.item_path(id.trim());
        let call = async move {
            require_id(id)?;
            self.api.put::<_, R::Item>(&path, input).await
        };
        self.settle(resource, Accion::Actualizar, call).await
    }

    pub async fn deactivate<R: Deactivable>(&self, resource: &R, id: &str) -> Result<R::Item> {
        let path = resource.item_path(id.trim());
        let call = async move {
            require_id(id)?;
            self.api.delete::<R::Item>(&path).await
        };
        self.settle(resource, Accion::Desactivar, call).await
    }

    /// Overwrites a user's points balance after validating it locally
    pub async fn update_puntos(&self, id: &str, input: &PuntosInput) -> Result<UsuarioResponseDto> {
        let outcome: Result<UsuarioResponseDto> = async {
            require_id(id)?;
            input.parse()?;
            self.api
                .put::<_, UsuarioResponseDto>(&format!("/api/usuario/puntos/{}", id.trim()), input)
                .await
        }
        .await;

        match outcome {
            Ok(usuario) => {
                self.notifier.notify(Notification::success(
                    "Puntos Actualizados",
                    "Los puntos del usuario han sido actualizados exitosamente",
                ));
                self.cache.invalidate_resource(&Usuarios.key()).await;
                Ok(usuario)
            }
            Err(e) => {
                tracing::warn!("Failed to update puntos of {}: {}", id, e);
                self.notifier.notify(Notification::error(
                    "Ocurrió un error al actualizar los puntos",
                ));
                Err(e)
            }
        }
    }

    async fn settle<R, T, F>(&self, resource: &R, accion: Accion, call: F) -> Result<T>
    where
        R: Resource,
        F: Future<Output = Result<T>>,
    {
        let noun: Noun = resource.noun();
        match call.await {
            Ok(item) => {
                self.notifier.notify(Notification::success(
                    noun.success_title(accion),
                    noun.success_description(accion),
                ));
                self.cache.invalidate_resource(&resource.key()).await;
                for dependent in resource.dependents() {
                    self.cache.invalidate_resource(&dependent).await;
                }
                Ok(item)
            }
            Err(e) => {
                tracing::warn!("Mutation on {} failed: {}", resource.key(), e);
                self.notifier
                    .notify(Notification::error(noun.failure_description(accion)));
                Err(e)
            }
        }
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ClientError::Invalid(Violations::single(
            "id",
            "required",
            "Falta el id del recurso",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::notify::ToastQueue;
    use crate::client::resources::{Categorias, Insumos};
    use crate::core::store::Repository;
    use crate::features::categorias::models::{CategoriaTipo, NuevaCategoria};
    use crate::schemas::{CategoriaRecord, InsumoInput};
    use crate::shared::test_helpers::{seed_categoria, seed_usuario, spawn_app};
    use crate::shared::types::Estado;
    use rust_decimal::Decimal;

    async fn context() -> (ClientContext, Arc<ToastQueue>, crate::app::InMemoryStores) {
        let (base_url, stores) = spawn_app().await;
        let toasts = Arc::new(ToastQueue::new());
        let ctx = ClientContext::new(ApiClient::new(base_url), toasts.clone());
        (ctx, toasts, stores)
    }

    fn harina(cat: &str) -> InsumoInput {
        InsumoInput {
            nombre: "Harina".to_string(),
            cantidad: Some(Decimal::from(10)),
            medida: "KG".to_string(),
            id_cat_insumo: cat.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache_until_mutation() {
        let (ctx, _, stores) = context().await;
        let cats = Categorias(CategoriaTipo::Insumo);
        let filter = ListFilter::activos();

        let first = ctx.queries().list(&cats, &filter).await;
        assert_eq!(first.data().map(Vec::len), Some(0));

        // Written behind the client's back: the cached list still wins
        stores
            .categorias
            .create(NuevaCategoria {
                tipo: CategoriaTipo::Insumo,
                datos: CategoriaRecord {
                    nombre: "Secos".to_string(),
                    estado: Estado::Activo,
                },
            })
            .await
            .unwrap();
        let cached = ctx.queries().list(&cats, &filter).await;
        assert_eq!(cached.data().map(Vec::len), Some(0));

        let input = crate::schemas::CategoriaInput {
            nombre: "Lácteos".to_string(),
            estado: None,
        };
        ctx.mutations().create(&cats, &input).await.unwrap();

        let fresh = ctx.queries().list(&cats, &filter).await;
        assert_eq!(fresh.data().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_create_notifies_and_invalidates() {
        let (ctx, toasts, stores) = context().await;
        let cat = seed_categoria(&stores, CategoriaTipo::Insumo, Estado::Activo).await;

        ctx.queries().list(&Insumos, &ListFilter::new()).await;
        assert!(!ctx.cache().is_empty().await);

        let created = ctx.mutations().create(&Insumos, &harina(&cat)).await.unwrap();
        assert_eq!(created.nombre, "Harina");
        assert!(ctx.cache().is_empty().await);

        let toasts = toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Insumo Creado");
        assert_eq!(
            toasts[0].description,
            "El insumo ha sido creado exitosamente"
        );
    }

    #[tokio::test]
    async fn test_category_rename_refreshes_dependent_lists() {
        let (ctx, _, _) = context().await;
        let cats = Categorias(CategoriaTipo::Insumo);
        let harinas = crate::schemas::CategoriaInput {
            nombre: "Harinas".to_string(),
            estado: None,
        };
        let cat = ctx.mutations().create(&cats, &harinas).await.unwrap();
        ctx.mutations()
            .create(&Insumos, &harina(&cat.id_categoria))
            .await
            .unwrap();

        let before = ctx.queries().list(&Insumos, &ListFilter::new()).await;
        assert_eq!(
            before.data().unwrap()[0].cat_insumo.as_deref(),
            Some("Harinas")
        );

        let cereales = crate::schemas::CategoriaInput {
            nombre: "Cereales".to_string(),
            estado: None,
        };
        ctx.mutations()
            .update(&cats, &cat.id_categoria, &cereales)
            .await
            .unwrap();

        let after = ctx.queries().list(&Insumos, &ListFilter::new()).await;
        assert_eq!(
            after.data().unwrap()[0].cat_insumo.as_deref(),
            Some("Cereales")
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_emits_fixed_text() {
        let (ctx, toasts, stores) = context().await;
        let cat = seed_categoria(&stores, CategoriaTipo::Insumo, Estado::Inactivo).await;

        let err = ctx
            .mutations()
            .create(&Insumos, &harina(&cat))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));

        let toasts = toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].is_error());
        assert_eq!(
            toasts[0].description,
            "Ocurrió un error al crear el insumo"
        );
    }

    #[tokio::test]
    async fn test_deactivate_then_filtered_list() {
        let (ctx, toasts, stores) = context().await;
        let cat = seed_categoria(&stores, CategoriaTipo::Insumo, Estado::Activo).await;
        let created = ctx.mutations().create(&Insumos, &harina(&cat)).await.unwrap();

        let off = ctx
            .mutations()
            .deactivate(&Insumos, &created.id_insumo)
            .await
            .unwrap();
        assert_eq!(off.estado, Estado::Inactivo);

        let activos = ctx.queries().list(&Insumos, &ListFilter::activos()).await;
        assert_eq!(activos.data().map(Vec::len), Some(0));
        assert_eq!(toasts.drain()[1].title, "Insumo Desactivado");
    }

    #[tokio::test]
    async fn test_get_of_missing_item_fails_with_fixed_text() {
        let (ctx, _, _) = context().await;
        let state = ctx.queries().get(&Insumos, "nope").await;
        assert_eq!(state.error(), Some("Error al leer los insumos"));
    }

    #[tokio::test]
    async fn test_negative_puntos_never_reach_the_server() {
        let (ctx, toasts, stores) = context().await;
        let usuario = seed_usuario(&stores, 10).await;

        let err = ctx
            .mutations()
            .update_puntos(&usuario.id_usuario, &PuntosInput { puntos: Some(-5) })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Invalid(_)));
        assert!(toasts.drain()[0].is_error());

        let stored = stores.usuarios.find(&usuario.id_usuario).await.unwrap();
        assert_eq!(stored.puntos, 10);
    }

    #[tokio::test]
    async fn test_update_puntos_overwrites_balance() {
        let (ctx, toasts, stores) = context().await;
        let usuario = seed_usuario(&stores, 10).await;

        let updated = ctx
            .mutations()
            .update_puntos(&usuario.id_usuario, &PuntosInput { puntos: Some(150) })
            .await
            .unwrap();
        assert_eq!(updated.puntos, 150);
        assert_eq!(toasts.drain()[0].title, "Puntos Actualizados");
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_locally() {
        let (ctx, _, _) = context().await;
        let err = ctx
            .mutations()
            .update(&Insumos, "  ", &harina("c"))
            .await
            .unwrap_err();
        assert!(err.violations().unwrap().has("id"));
    }
}

//! Service wiring and the API router, shared by the binary and the tests.

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use sqlx::PgPool;

use crate::core::store::MemoryStore;
use crate::features::categorias::models::Categoria;
use crate::features::categorias::repositories::PgCategoriaRepository;
use crate::features::categorias::{routes as categorias_routes, CategoriaService};
use crate::features::insumos::models::Insumo;
use crate::features::insumos::repositories::PgInsumoRepository;
use crate::features::insumos::{routes as insumos_routes, InsumoService};
use crate::features::productos::models::Producto;
use crate::features::productos::repositories::PgProductoRepository;
use crate::features::productos::{routes as productos_routes, ProductoService};
use crate::features::promociones::models::Promocion;
use crate::features::promociones::repositories::PgPromocionRepository;
use crate::features::promociones::{routes as promociones_routes, PromocionService};
use crate::features::usuarios::models::Usuario;
use crate::features::usuarios::repositories::PgUsuarioRepository;
use crate::features::usuarios::{routes as usuarios_routes, UsuarioService};

/// One service per feature, ready to be mounted
#[derive(Clone)]
pub struct AppServices {
    pub categorias: Arc<CategoriaService>,
    pub insumos: Arc<InsumoService>,
    pub productos: Arc<ProductoService>,
    pub promociones: Arc<PromocionService>,
    pub usuarios: Arc<UsuarioService>,
}

/// Process-local stores behind the services built by [`AppServices::in_memory`].
///
/// Users have no create route, so callers seed them through `usuarios`.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    pub categorias: Arc<MemoryStore<Categoria>>,
    pub insumos: Arc<MemoryStore<Insumo>>,
    pub productos: Arc<MemoryStore<Producto>>,
    pub promociones: Arc<MemoryStore<Promocion>>,
    pub usuarios: Arc<MemoryStore<Usuario>>,
}

impl AppServices {
    pub fn postgres(pool: PgPool) -> Self {
        let categorias = Arc::new(CategoriaService::new(Arc::new(PgCategoriaRepository::new(
            pool.clone(),
        ))));
        let productos = Arc::new(ProductoService::new(
            Arc::new(PgProductoRepository::new(pool.clone())),
            Arc::clone(&categorias),
        ));
        let insumos = Arc::new(InsumoService::new(
            Arc::new(PgInsumoRepository::new(pool.clone())),
            Arc::clone(&categorias),
        ));
        let promociones = Arc::new(PromocionService::new(
            Arc::new(PgPromocionRepository::new(pool.clone())),
            Arc::clone(&categorias),
            Arc::clone(&productos),
        ));
        let usuarios = Arc::new(UsuarioService::new(Arc::new(PgUsuarioRepository::new(pool))));

        Self {
            categorias,
            insumos,
            productos,
            promociones,
            usuarios,
        }
    }

    pub fn in_memory(stores: &InMemoryStores) -> Self {
        let categorias = Arc::new(CategoriaService::new(stores.categorias.clone()));
        let productos = Arc::new(ProductoService::new(
            stores.productos.clone(),
            Arc::clone(&categorias),
        ));
        let insumos = Arc::new(InsumoService::new(
            stores.insumos.clone(),
            Arc::clone(&categorias),
        ));
        let promociones = Arc::new(PromocionService::new(
            stores.promociones.clone(),
            Arc::clone(&categorias),
            Arc::clone(&productos),
        ));
        let usuarios = Arc::new(UsuarioService::new(stores.usuarios.clone()));

        Self {
            categorias,
            insumos,
            productos,
            promociones,
            usuarios,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Every API route plus `/health`, without the HTTP layers added by `main`
pub fn api_router(services: &AppServices) -> Router {
    Router::new()
        .merge(productos_routes::routes(Arc::clone(&services.productos)))
        .merge(insumos_routes::routes(Arc::clone(&services.insumos)))
        .merge(promociones_routes::routes(Arc::clone(&services.promociones)))
        .merge(categorias_routes::routes(Arc::clone(&services.categorias)))
        .merge(usuarios_routes::routes(Arc::clone(&services.usuarios)))
        .route("/health", get(health_check))
}

#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use fake::{
    faker::internet::en::SafeEmail,
    faker::name::en::{FirstName, Name},
    Fake,
};

#[cfg(test)]
use crate::app::{api_router, AppServices, InMemoryStores};
#[cfg(test)]
use crate::core::store::Repository;
#[cfg(test)]
use crate::features::categorias::models::{CategoriaTipo, NuevaCategoria};
#[cfg(test)]
use crate::features::usuarios::models::Usuario;
#[cfg(test)]
use crate::schemas::CategoriaRecord;
#[cfg(test)]
use crate::shared::types::Estado;

/// Router over fresh in-memory stores, plus the stores for seeding
#[cfg(test)]
pub struct TestApp {
    pub server: TestServer,
    pub stores: InMemoryStores,
}

#[cfg(test)]
pub fn test_app() -> TestApp {
    let stores = InMemoryStores::default();
    let router = api_router(&AppServices::in_memory(&stores));
    let server = TestServer::new(router).expect("test server");
    TestApp { server, stores }
}

/// Serves the API on an ephemeral local port, returning its base URL
#[cfg(test)]
pub async fn spawn_app() -> (String, InMemoryStores) {
    let stores = InMemoryStores::default();
    let router = api_router(&AppServices::in_memory(&stores));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    (format!("http://{}", addr), stores)
}

#[cfg(test)]
pub async fn seed_categoria(
    stores: &InMemoryStores,
    tipo: CategoriaTipo,
    estado: Estado,
) -> String {
    let nombre: String = FirstName().fake();
    stores
        .categorias
        .create(NuevaCategoria {
            tipo,
            datos: CategoriaRecord { nombre, estado },
        })
        .await
        .expect("seed categoria")
        .id_categoria
}

#[cfg(test)]
pub async fn seed_usuario(stores: &InMemoryStores, puntos: i32) -> Usuario {
    let nombre: String = Name().fake();
    let email: String = SafeEmail().fake();
    let usuario = Usuario::new(nombre, email, puntos);
    stores
        .usuarios
        .insert(usuario.id_usuario.clone(), usuario.clone())
        .await;
    usuario
}

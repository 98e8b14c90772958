use utoipa::{Modify, OpenApi};

use crate::features::categorias::{
    dtos as categorias_dtos, handlers as categorias_handlers, models as categorias_models,
};
use crate::features::insumos::{
    dtos as insumos_dtos, handlers as insumos_handlers, models as insumos_models,
};
use crate::features::productos::{dtos as productos_dtos, handlers as productos_handlers};
use crate::features::promociones::{
    dtos as promociones_dtos, handlers as promociones_handlers, models as promociones_models,
};
use crate::features::usuarios::{dtos as usuarios_dtos, handlers as usuarios_handlers};
use crate::schemas;
use crate::shared::types::{ApiResponse, Estado, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Productos
        productos_handlers::list_productos,
        productos_handlers::create_producto,
        productos_handlers::get_producto,
        productos_handlers::update_producto,
        productos_handlers::deactivate_producto,
        // Insumos
        insumos_handlers::list_insumos,
        insumos_handlers::create_insumo,
        insumos_handlers::get_insumo,
        insumos_handlers::update_insumo,
        insumos_handlers::deactivate_insumo,
        // Promociones
        promociones_handlers::list_promociones,
        promociones_handlers::create_promocion,
        promociones_handlers::get_promocion,
        promociones_handlers::update_promocion,
        // Categorias
        categorias_handlers::list_categorias,
        categorias_handlers::create_categoria,
        categorias_handlers::get_categoria,
        categorias_handlers::update_categoria,
        categorias_handlers::deactivate_categoria,
        // Usuarios
        usuarios_handlers::list_usuarios,
        usuarios_handlers::get_usuario,
        usuarios_handlers::update_puntos,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Estado,
            schemas::FieldViolation,
            schemas::Violations,
            // Productos
            schemas::ProductoInput,
            productos_dtos::ProductoResponseDto,
            ApiResponse<productos_dtos::ProductoResponseDto>,
            ApiResponse<Vec<productos_dtos::ProductoResponseDto>>,
            // Insumos
            insumos_models::TipoMedida,
            schemas::InsumoInput,
            insumos_dtos::InsumoResponseDto,
            ApiResponse<insumos_dtos::InsumoResponseDto>,
            ApiResponse<Vec<insumos_dtos::InsumoResponseDto>>,
            // Promociones
            promociones_models::DiaSemana,
            schemas::PromocionInput,
            promociones_dtos::PromocionResponseDto,
            ApiResponse<promociones_dtos::PromocionResponseDto>,
            ApiResponse<Vec<promociones_dtos::PromocionResponseDto>>,
            // Categorias
            categorias_models::CategoriaTipo,
            schemas::CategoriaInput,
            categorias_dtos::CategoriaResponseDto,
            ApiResponse<categorias_dtos::CategoriaResponseDto>,
            ApiResponse<Vec<categorias_dtos::CategoriaResponseDto>>,
            // Usuarios
            schemas::PuntosInput,
            usuarios_dtos::UsuarioResponseDto,
            ApiResponse<usuarios_dtos::UsuarioResponseDto>,
            ApiResponse<Vec<usuarios_dtos::UsuarioResponseDto>>,
        )
    ),
    tags(
        (name = "productos", description = "Menu products"),
        (name = "insumos", description = "Kitchen supplies"),
        (name = "promociones", description = "Promotions and their linked products"),
        (name = "categorias", description = "Supply, product and promotion categories"),
        (name = "usuarios", description = "Users and loyalty points"),
    ),
    info(
        title = "Catálogo Admin API",
        version = "0.1.0",
        description = "Productos, insumos, promociones, categorías y puntos de usuario",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/producto",
            "/api/producto/{id}",
            "/api/insumo",
            "/api/insumo/{id}",
            "/api/promocion",
            "/api/promocion/{id}",
            "/api/categoria/{tipo}",
            "/api/categoria/{tipo}/{id}",
            "/api/usuario",
            "/api/usuario/{id}",
            "/api/usuario/puntos/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Admin".into(),
            version: "9.9.9".into(),
            description: "d".into(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Admin");
        assert_eq!(doc.info.version, "9.9.9");
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::productos::models::Producto;
use crate::shared::types::Estado;

/// Response DTO for producto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductoResponseDto {
    pub id_producto: String,
    pub nombre: String,
    pub descripcion: String,
    #[schema(value_type = String, example = "12.50")]
    pub precio_base: Decimal,
    pub id_cat_producto: String,
    pub cat_producto: Option<String>,
    pub estado: Estado,
    pub activo: bool,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductoResponseDto {
    pub fn new(producto: Producto, cat_producto: Option<String>) -> Self {
        Self {
            id_producto: producto.id_producto,
            nombre: producto.nombre,
            descripcion: producto.descripcion,
            precio_base: producto.precio_base,
            id_cat_producto: producto.id_cat_producto,
            cat_producto,
            activo: producto.estado.is_activo(),
            estado: producto.estado,
            img_url: producto.img_url,
            created_at: producto.created_at,
            updated_at: producto.updated_at,
        }
    }
}

/// Query params for listing products
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductosQuery {
    /// `true` for active only, `false` for inactive only
    pub activo: Option<String>,
    /// `activo` or `inactivo`; takes precedence over `activo`
    pub estado: Option<String>,
    /// Product category id
    pub id_categoria: Option<String>,
}

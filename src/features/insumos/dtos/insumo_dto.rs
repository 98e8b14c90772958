use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::insumos::models::{Insumo, TipoMedida};
use crate::shared::types::Estado;

/// Response DTO for insumo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsumoResponseDto {
    pub id_insumo: String,
    pub nombre: String,
    #[schema(value_type = String, example = "10.5")]
    pub cantidad: Decimal,
    pub medida: TipoMedida,
    pub id_cat_insumo: String,
    /// Name of the supply category, when it still exists
    pub cat_insumo: Option<String>,
    pub estado: Estado,
    pub activo: bool,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InsumoResponseDto {
    pub fn new(insumo: Insumo, cat_insumo: Option<String>) -> Self {
        Self {
            id_insumo: insumo.id_insumo,
            nombre: insumo.nombre,
            cantidad: insumo.cantidad,
            medida: insumo.medida,
            id_cat_insumo: insumo.id_cat_insumo,
            cat_insumo,
            activo: insumo.estado.is_activo(),
            estado: insumo.estado,
            img_url: insumo.img_url,
            created_at: insumo.created_at,
            updated_at: insumo.updated_at,
        }
    }
}

/// Query params for listing supplies
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInsumosQuery {
    /// `true` for active only, `false` for inactive only
    pub activo: Option<String>,
    /// `activo` or `inactivo`; takes precedence over `activo`
    pub estado: Option<String>,
    /// Supply category id
    pub id_categoria: Option<String>,
}

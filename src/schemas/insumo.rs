use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{check, parse_enum, parse_estado, Schema, Violations};
use crate::features::insumos::models::TipoMedida;
use crate::shared::constants::{IMG_DEFAULT_INSUMO, MAX_IMG_URL_LEN, MAX_NOMBRE_LEN};
use crate::shared::types::Estado;
use crate::shared::validation::{cantidad_valida, not_blank};

/// Supply as submitted by the create and update forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct InsumoInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_NOMBRE_LEN, message = "El nombre no puede superar 100 caracteres")
    )]
    pub nombre: String,

    /// Accepts a number or a numeric string
    #[validate(
        required(message = "La cantidad es obligatoria"),
        custom(function = "cantidad_valida")
    )]
    #[serde(deserialize_with = "crate::shared::coerce::lenient_decimal")]
    #[schema(value_type = Option<String>, example = "10.5")]
    pub cantidad: Option<Decimal>,

    /// One of the fixed unit types (KG, GR, LT, ML, UNIDAD)
    #[validate(custom(function = "medida_requerida"))]
    pub medida: String,

    #[validate(custom(function = "not_blank"))]
    pub id_cat_insumo: String,

    #[validate(
        length(max = MAX_IMG_URL_LEN),
        regex(path = *crate::shared::validation::IMG_URL_REGEX, message = "La imagen debe ser una URL válida")
    )]
    pub img_url: String,

    /// `activo` or `inactivo`; defaults to `activo`
    pub estado: Option<String>,
}

impl Default for InsumoInput {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            cantidad: None,
            medida: String::new(),
            id_cat_insumo: String::new(),
            img_url: IMG_DEFAULT_INSUMO.to_string(),
            estado: None,
        }
    }
}

fn medida_requerida(value: &str) -> Result<(), ValidationError> {
    not_blank(value).map_err(|e| e.with_message("Selecciona una medida".into()))
}

/// Supply that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct InsumoRecord {
    pub nombre: String,
    pub cantidad: Decimal,
    pub medida: TipoMedida,
    pub id_cat_insumo: String,
    pub img_url: String,
    pub estado: Estado,
}

impl Schema for InsumoInput {
    type Record = InsumoRecord;

    fn parse(&self) -> Result<InsumoRecord, Violations> {
        let mut violations = check(self);

        let medida = parse_enum::<TipoMedida>(
            "medida",
            &self.medida,
            &mut violations,
            "La medida no es válida",
        );
        let estado = parse_estado(self.estado.as_deref(), &mut violations);

        match (violations.is_empty(), self.cantidad, medida, estado) {
            (true, Some(cantidad), Some(medida), Some(estado)) => Ok(InsumoRecord {
                nombre: self.nombre.trim().to_string(),
                cantidad,
                medida,
                id_cat_insumo: self.id_cat_insumo.trim().to_string(),
                img_url: self.img_url.trim().to_string(),
                estado,
            }),
            _ => Err(violations),
        }
    }
}

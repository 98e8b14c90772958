use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{check, parse_estado, Schema, Violations};
use crate::shared::constants::{
    IMG_DEFAULT_PRODUCTO, MAX_DESCRIPCION_LEN, MAX_IMG_URL_LEN, MAX_NOMBRE_LEN,
};
use crate::shared::types::Estado;
use crate::shared::validation::{not_blank, precio_valido};

/// Product as submitted by the create and update forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ProductoInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_NOMBRE_LEN, message = "El nombre no puede superar 100 caracteres")
    )]
    pub nombre: String,

    #[validate(length(
        max = MAX_DESCRIPCION_LEN,
        message = "La descripción no puede superar 500 caracteres"
    ))]
    pub descripcion: String,

    #[validate(
        required(message = "El precio base es obligatorio"),
        custom(function = "precio_valido")
    )]
    #[serde(deserialize_with = "crate::shared::coerce::lenient_decimal")]
    #[schema(value_type = Option<String>, example = "12.50")]
    pub precio_base: Option<Decimal>,

    #[validate(custom(function = "not_blank"))]
    pub id_cat_producto: String,

    #[validate(
        length(max = MAX_IMG_URL_LEN),
        regex(path = *crate::shared::validation::IMG_URL_REGEX, message = "La imagen debe ser una URL válida")
    )]
    pub img_url: String,

    pub estado: Option<String>,
}

impl Default for ProductoInput {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            precio_base: None,
            id_cat_producto: String::new(),
            img_url: IMG_DEFAULT_PRODUCTO.to_string(),
            estado: None,
        }
    }
}

/// Product that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductoRecord {
    pub nombre: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub id_cat_producto: String,
    pub img_url: String,
    pub estado: Estado,
}

impl Schema for ProductoInput {
    type Record = ProductoRecord;

    fn parse(&self) -> Result<ProductoRecord, Violations> {
        let mut violations = check(self);
        let estado = parse_estado(self.estado.as_deref(), &mut violations);

        match (violations.is_empty(), self.precio_base, estado) {
            (true, Some(precio_base), Some(estado)) => Ok(ProductoRecord {
                nombre: self.nombre.trim().to_string(),
                descripcion: self.descripcion.trim().to_string(),
                precio_base,
                id_cat_producto: self.id_cat_producto.trim().to_string(),
                img_url: self.img_url.trim().to_string(),
                estado,
            }),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_producto() {
        let input = ProductoInput {
            nombre: "Empanada".to_string(),
            descripcion: "De carne".to_string(),
            precio_base: Some(Decimal::new(350, 2)),
            id_cat_producto: "cat".to_string(),
            estado: Some("inactivo".to_string()),
            ..Default::default()
        };
        let record = input.parse().unwrap();
        assert_eq!(record.precio_base, Decimal::new(350, 2));
        assert_eq!(record.estado, Estado::Inactivo);
    }

    #[test]
    fn test_rejects_negative_price_and_long_description() {
        let input = ProductoInput {
            nombre: "Empanada".to_string(),
            descripcion: "x".repeat(501),
            precio_base: Some(Decimal::new(-1, 0)),
            id_cat_producto: "cat".to_string(),
            ..Default::default()
        };
        let violations = input.parse().unwrap_err();
        assert!(violations.has("precio_base"));
        assert!(violations.has("descripcion"));
    }

    #[test]
    fn test_rejects_price_the_column_would_round() {
        let input: ProductoInput = serde_json::from_str(
            r#"{"nombre":"Empanada","precio_base":1.005,"id_cat_producto":"cat"}"#,
        )
        .unwrap();
        let violations = input.parse().unwrap_err();
        assert_eq!(
            violations.messages_for("precio_base"),
            vec!["El valor admite como máximo 2 decimales"]
        );
    }

    #[test]
    fn test_rejects_bad_image() {
        let input = ProductoInput {
            nombre: "Empanada".to_string(),
            precio_base: Some(Decimal::ONE),
            id_cat_producto: "cat".to_string(),
            img_url: "foto.png".to_string(),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().has("img_url"));
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{check, parse_enum, FieldViolation, Schema, Violations};
use crate::features::promociones::models::DiaSemana;
use crate::shared::constants::{
    IMG_DEFAULT_PROMOCION, MAX_DESCRIPCION_LEN, MAX_IMG_URL_LEN, MAX_NOMBRE_LEN,
};
use crate::shared::validation::{not_blank, precio_valido};

/// Promotion as submitted by the create and update forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct PromocionInput {
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
    #[schema(value_type = Option<String>, example = "20.00")]
    pub precio_base: Option<Decimal>,

    #[validate(
        required(message = "El precio de oferta es obligatorio"),
        custom(function = "precio_valido")
    )]
    #[serde(deserialize_with = "crate::shared::coerce::lenient_decimal")]
    #[schema(value_type = Option<String>, example = "15.00")]
    pub precio_oferta: Option<Decimal>,

    #[serde(deserialize_with = "crate::shared::coerce::lenient_date")]
    #[validate(required(message = "La fecha de inicio es obligatoria"))]
    pub fecha_inicio: Option<NaiveDate>,

    #[serde(deserialize_with = "crate::shared::coerce::lenient_date")]
    #[validate(required(message = "La fecha de fin es obligatoria"))]
    pub fecha_fin: Option<NaiveDate>,

    /// Weekdays the promotion applies to; empty means every day
    pub dia_promocion: Vec<String>,

    #[validate(custom(function = "not_blank"))]
    pub id_cat_promocion: String,

    #[validate(
        length(max = MAX_IMG_URL_LEN),
        regex(path = *crate::shared::validation::IMG_URL_REGEX, message = "La imagen debe ser una URL válida")
    )]
    pub img_url: String,

    /// Linked product ids
    pub productos: Vec<String>,
}

impl Default for PromocionInput {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            precio_base: None,
            precio_oferta: None,
            fecha_inicio: None,
            fecha_fin: None,
            dia_promocion: Vec::new(),
            id_cat_promocion: String::new(),
            img_url: IMG_DEFAULT_PROMOCION.to_string(),
            productos: Vec::new(),
        }
    }
}

/// Promotion that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PromocionRecord {
    pub nombre: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub precio_oferta: Decimal,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dia_promocion: Vec<DiaSemana>,
    pub id_cat_promocion: String,
    pub img_url: String,
    pub productos: Vec<String>,
}

impl Schema for PromocionInput {
    type Record = PromocionRecord;

    fn parse(&self) -> Result<PromocionRecord, Violations> {
        let mut violations = check(self);

        if let (Some(base), Some(oferta)) = (self.precio_base, self.precio_oferta) {
            if oferta > base {
                violations.push(FieldViolation::new(
                    "precio_oferta",
                    "range",
                    "El precio de oferta no puede superar al precio base",
                ));
            }
        }
        if let (Some(inicio), Some(fin)) = (self.fecha_inicio, self.fecha_fin) {
            if fin < inicio {
                violations.push(FieldViolation::new(
                    "fecha_fin",
                    "range",
                    "La fecha de fin debe ser posterior a la de inicio",
                ));
            }
        }

        let mut dias: Vec<DiaSemana> = Vec::with_capacity(self.dia_promocion.len());
        for raw in &self.dia_promocion {
            if let Some(dia) = parse_enum::<DiaSemana>(
                "dia_promocion",
                raw,
                &mut violations,
                "El día de la promoción no es válido",
            ) {
                if !dias.contains(&dia) {
                    dias.push(dia);
                }
            }
        }
        dias.sort();

        let mut productos: Vec<String> = self
            .productos
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        productos.sort();
        productos.dedup();

        match (
            violations.is_empty(),
            self.precio_base,
            self.precio_oferta,
            self.fecha_inicio,
            self.fecha_fin,
        ) {
            (true, Some(precio_base), Some(precio_oferta), Some(fecha_inicio), Some(fecha_fin)) => {
                Ok(PromocionRecord {
                    nombre: self.nombre.trim().to_string(),
                    descripcion: self.descripcion.trim().to_string(),
                    precio_base,
                    precio_oferta,
                    fecha_inicio,
                    fecha_fin,
                    dia_promocion: dias,
                    id_cat_promocion: self.id_cat_promocion.trim().to_string(),
                    img_url: self.img_url.trim().to_string(),
                    productos,
                })
            }
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dos_por_uno() -> PromocionInput {
        PromocionInput {
            nombre: "2x1 en empanadas".to_string(),
            precio_base: Some(Decimal::from(20)),
            precio_oferta: Some(Decimal::from(15)),
            fecha_inicio: NaiveDate::from_ymd_opt(2024, 6, 1),
            fecha_fin: NaiveDate::from_ymd_opt(2024, 6, 30),
            dia_promocion: vec!["MARTES".into(), "LUNES".into(), "MARTES".into()],
            id_cat_promocion: "cat".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_promocion_sorts_and_dedups_days() {
        let record = dos_por_uno().parse().unwrap();
        assert_eq!(record.dia_promocion, vec![DiaSemana::Lunes, DiaSemana::Martes]);
        assert!(record.productos.is_empty());
    }

    #[test]
    fn test_offer_above_base_rejected() {
        let mut input = dos_por_uno();
        input.precio_oferta = Some(Decimal::from(25));
        let violations = input.parse().unwrap_err();
        assert!(violations.has("precio_oferta"));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut input = dos_por_uno();
        input.fecha_fin = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert!(input.parse().unwrap_err().has("fecha_fin"));
    }

    #[test]
    fn test_unknown_day_rejected() {
        let mut input = dos_por_uno();
        input.dia_promocion = vec!["FERIADO".into()];
        assert!(input.parse().unwrap_err().has("dia_promocion"));
    }

    #[test]
    fn test_json_body_with_timestamps() {
        let input: PromocionInput = serde_json::from_str(
            r#"{
                "nombre": "Combo",
                "descripcion": "",
                "precio_base": "10",
                "precio_oferta": 8,
                "fecha_inicio": "2024-06-01T00:00:00.000Z",
                "fecha_fin": "2024-06-02",
                "dia_promocion": ["VIERNES"],
                "id_cat_promocion": "c1",
                "productos": []
            }"#,
        )
        .unwrap();
        let record = input.parse().unwrap();
        assert_eq!(record.fecha_inicio, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(record.img_url, IMG_DEFAULT_PROMOCION);
    }
}

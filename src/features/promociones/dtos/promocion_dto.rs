use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::promociones::models::{DiaSemana, Promocion};

/// Response DTO for promocion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromocionResponseDto {
    pub id_promocion: String,
    pub nombre: String,
    pub descripcion: String,
    #[schema(value_type = String, example = "20.00")]
    pub precio_base: Decimal,
    #[schema(value_type = String, example = "15.00")]
    pub precio_oferta: Decimal,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dia_promocion: Vec<DiaSemana>,
    pub id_cat_promocion: String,
    pub cat_promocion: Option<String>,
    pub img_url: String,
    pub productos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromocionResponseDto {
    pub fn new(promocion: Promocion, cat_promocion: Option<String>) -> Self {
        Self {
            id_promocion: promocion.id_promocion,
            nombre: promocion.nombre,
            descripcion: promocion.descripcion,
            precio_base: promocion.precio_base,
            precio_oferta: promocion.precio_oferta,
            fecha_inicio: promocion.fecha_inicio,
            fecha_fin: promocion.fecha_fin,
            dia_promocion: promocion.dia_promocion,
            id_cat_promocion: promocion.id_cat_promocion,
            cat_promocion,
            img_url: promocion.img_url,
            productos: promocion.productos,
            created_at: promocion.created_at,
            updated_at: promocion.updated_at,
        }
    }
}

/// Query params for listing promotions
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPromocionesQuery {
    /// Promotion category id
    pub id_categoria: Option<String>,
    /// `YYYY-MM-DD`, or `true`/`hoy` for today
    pub vigente: Option<String>,
}

impl ListPromocionesQuery {
    /// Date the listing must be valid on; unrecognized values mean no filter
    pub fn vigente_en(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self.vigente.as_deref().map(str::trim) {
            Some("true") | Some("hoy") => Some(today),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vigente_param() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let query = |v: &str| ListPromocionesQuery {
            id_categoria: None,
            vigente: Some(v.to_string()),
        };
        assert_eq!(query("hoy").vigente_en(today), Some(today));
        assert_eq!(query("true").vigente_en(today), Some(today));
        assert_eq!(
            query("2024-01-02").vigente_en(today),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(query("mañana").vigente_en(today), None);
        assert_eq!(ListPromocionesQuery::default().vigente_en(today), None);
    }
}

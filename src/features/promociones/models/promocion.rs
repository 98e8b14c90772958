use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::store::Entity;
use crate::schemas::PromocionRecord;

/// Weekday a promotion applies to, ordered Monday first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiaSemana {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl DiaSemana {
    pub const ALL: [DiaSemana; 7] = [
        DiaSemana::Lunes,
        DiaSemana::Martes,
        DiaSemana::Miercoles,
        DiaSemana::Jueves,
        DiaSemana::Viernes,
        DiaSemana::Sabado,
        DiaSemana::Domingo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiaSemana::Lunes => "LUNES",
            DiaSemana::Martes => "MARTES",
            DiaSemana::Miercoles => "MIERCOLES",
            DiaSemana::Jueves => "JUEVES",
            DiaSemana::Viernes => "VIERNES",
            DiaSemana::Sabado => "SABADO",
            DiaSemana::Domingo => "DOMINGO",
        }
    }
}

impl fmt::Display for DiaSemana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiaSemana {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiaSemana::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| format!("día desconocido: {}", s))
    }
}

/// Database row for promocion; weekdays are stored as `TEXT[]` and product
/// links live in `promocion_producto`.
#[derive(Debug, Clone, FromRow)]
pub struct PromocionRow {
    pub id_promocion: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub precio_oferta: Decimal,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dia_promocion: Vec<String>,
    pub id_cat_promocion: String,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromocionRow {
    /// Unknown stored weekdays are dropped
    pub fn into_promocion(self, productos: Vec<String>) -> Promocion {
        let mut dias: Vec<DiaSemana> = self
            .dia_promocion
            .iter()
            .filter_map(|d| d.parse().ok())
            .collect();
        dias.sort();
        dias.dedup();

        Promocion {
            id_promocion: self.id_promocion,
            nombre: self.nombre,
            descripcion: self.descripcion,
            precio_base: self.precio_base,
            precio_oferta: self.precio_oferta,
            fecha_inicio: self.fecha_inicio,
            fecha_fin: self.fecha_fin,
            dia_promocion: dias,
            id_cat_promocion: self.id_cat_promocion,
            img_url: self.img_url,
            productos,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Promocion {
    pub id_promocion: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub precio_oferta: Decimal,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dia_promocion: Vec<DiaSemana>,
    pub id_cat_promocion: String,
    pub img_url: String,
    /// Linked product ids, sorted
    pub productos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promocion {
    /// Whether `date` falls inside the promotion window, both ends included
    pub fn vigente_en(&self, date: NaiveDate) -> bool {
        self.fecha_inicio <= date && date <= self.fecha_fin
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromocionFilter {
    pub id_categoria: Option<String>,
    pub vigente: Option<NaiveDate>,
}

impl Entity for Promocion {
    type Record = PromocionRecord;
    type Filter = PromocionFilter;

    fn from_record(id: String, record: PromocionRecord, now: DateTime<Utc>) -> Self {
        Self {
            id_promocion: id,
            nombre: record.nombre,
            descripcion: record.descripcion,
            precio_base: record.precio_base,
            precio_oferta: record.precio_oferta,
            fecha_inicio: record.fecha_inicio,
            fecha_fin: record.fecha_fin,
            dia_promocion: record.dia_promocion,
            id_cat_promocion: record.id_cat_promocion,
            img_url: record.img_url,
            productos: record.productos,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, record: PromocionRecord, now: DateTime<Utc>) {
        self.nombre = record.nombre;
        self.descripcion = record.descripcion;
        self.precio_base = record.precio_base;
        self.precio_oferta = record.precio_oferta;
        self.fecha_inicio = record.fecha_inicio;
        self.fecha_fin = record.fecha_fin;
        self.dia_promocion = record.dia_promocion;
        self.id_cat_promocion = record.id_cat_promocion;
        self.img_url = record.img_url;
        self.productos = record.productos;
        self.updated_at = now;
    }

    fn matches(&self, filter: &PromocionFilter) -> bool {
        filter
            .id_categoria
            .as_deref()
            .is_none_or(|c| c == self.id_cat_promocion)
            && filter.vigente.is_none_or(|d| self.vigente_en(d))
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::store::{Entity, SoftDelete};
use crate::schemas::InsumoRecord;
use crate::shared::types::Estado;

/// Unit a supply quantity is measured in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "tipo_medida", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoMedida {
    Kg,
    Gr,
    Lt,
    Ml,
    Unidad,
}

impl TipoMedida {
    pub const ALL: [TipoMedida; 5] = [
        TipoMedida::Kg,
        TipoMedida::Gr,
        TipoMedida::Lt,
        TipoMedida::Ml,
        TipoMedida::Unidad,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TipoMedida::Kg => "KG",
            TipoMedida::Gr => "GR",
            TipoMedida::Lt => "LT",
            TipoMedida::Ml => "ML",
            TipoMedida::Unidad => "UNIDAD",
        }
    }
}

impl fmt::Display for TipoMedida {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoMedida {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipoMedida::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| format!("medida desconocida: {}", s))
    }
}

/// Database model for insumo
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Insumo {
    pub id_insumo: String,
    pub nombre: String,
    pub cantidad: Decimal,
    pub medida: TipoMedida,
    pub id_cat_insumo: String,
    pub estado: Estado,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct InsumoFilter {
    pub estado: Option<Estado>,
    pub id_categoria: Option<String>,
}

impl Entity for Insumo {
    type Record = InsumoRecord;
    type Filter = InsumoFilter;

    fn from_record(id: String, record: InsumoRecord, now: DateTime<Utc>) -> Self {
        Self {
            id_insumo: id,
            nombre: record.nombre,
            cantidad: record.cantidad,
            medida: record.medida,
            id_cat_insumo: record.id_cat_insumo,
            estado: record.estado,
            img_url: record.img_url,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, record: InsumoRecord, now: DateTime<Utc>) {
        self.nombre = record.nombre;
        self.cantidad = record.cantidad;
        self.medida = record.medida;
        self.id_cat_insumo = record.id_cat_insumo;
        self.estado = record.estado;
        self.img_url = record.img_url;
        self.updated_at = now;
    }

    fn matches(&self, filter: &InsumoFilter) -> bool {
        filter.estado.is_none_or(|e| e == self.estado)
            && filter
                .id_categoria
                .as_deref()
                .is_none_or(|c| c == self.id_cat_insumo)
    }
}

impl SoftDelete for Insumo {
    fn set_estado(&mut self, estado: Estado, now: DateTime<Utc>) {
        self.estado = estado;
        self.updated_at = now;
    }
}

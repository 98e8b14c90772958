use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::core::store::{Entity, SoftDelete};
use crate::schemas::ProductoRecord;
use crate::shared::types::Estado;

/// Database model for producto
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Producto {
    pub id_producto: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub id_cat_producto: String,
    pub estado: Estado,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductoFilter {
    pub estado: Option<Estado>,
    pub id_categoria: Option<String>,
}

impl Entity for Producto {
    type Record = ProductoRecord;
    type Filter = ProductoFilter;

    fn from_record(id: String, record: ProductoRecord, now: DateTime<Utc>) -> Self {
        Self {
            id_producto: id,
            nombre: record.nombre,
            descripcion: record.descripcion,
            precio_base: record.precio_base,
            id_cat_producto: record.id_cat_producto,
            estado: record.estado,
            img_url: record.img_url,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, record: ProductoRecord, now: DateTime<Utc>) {
        self.nombre = record.nombre;
        self.descripcion = record.descripcion;
        self.precio_base = record.precio_base;
        self.id_cat_producto = record.id_cat_producto;
        self.estado = record.estado;
        self.img_url = record.img_url;
        self.updated_at = now;
    }

    fn matches(&self, filter: &ProductoFilter) -> bool {
        filter.estado.is_none_or(|e| e == self.estado)
            && filter
                .id_categoria
                .as_deref()
                .is_none_or(|c| c == self.id_cat_producto)
    }
}

impl SoftDelete for Producto {
    fn set_estado(&mut self, estado: Estado, now: DateTime<Utc>) {
        self.estado = estado;
        self.updated_at = now;
    }
}

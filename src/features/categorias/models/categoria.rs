use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::store::{Entity, SoftDelete};
use crate::schemas::CategoriaRecord;
use crate::shared::types::Estado;

/// Family a category classifies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "tipo_categoria", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CategoriaTipo {
    Insumo,
    Producto,
    Promocion,
}

impl CategoriaTipo {
    pub const ALL: [CategoriaTipo; 3] = [
        CategoriaTipo::Insumo,
        CategoriaTipo::Producto,
        CategoriaTipo::Promocion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoriaTipo::Insumo => "insumo",
            CategoriaTipo::Producto => "producto",
            CategoriaTipo::Promocion => "promocion",
        }
    }
}

impl fmt::Display for CategoriaTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoriaTipo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoriaTipo::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("tipo de categoría desconocido: {}", s))
    }
}

/// Database model for categoria
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Categoria {
    pub id_categoria: String,
    pub tipo: CategoriaTipo,
    pub nombre: String,
    pub estado: Estado,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated category bound to its family
#[derive(Debug, Clone, PartialEq)]
pub struct NuevaCategoria {
    pub tipo: CategoriaTipo,
    pub datos: CategoriaRecord,
}

#[derive(Debug, Clone, Default)]
pub struct CategoriaFilter {
    pub tipo: Option<CategoriaTipo>,
    pub estado: Option<Estado>,
}

impl Entity for Categoria {
    type Record = NuevaCategoria;
    type Filter = CategoriaFilter;

    fn listing_order(&self, other: &Self) -> Ordering {
        self.nombre
            .cmp(&other.nombre)
            .then_with(|| self.id_categoria.cmp(&other.id_categoria))
    }

    fn from_record(id: String, record: NuevaCategoria, now: DateTime<Utc>) -> Self {
        Self {
            id_categoria: id,
            tipo: record.tipo,
            nombre: record.datos.nombre,
            estado: record.datos.estado,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, record: NuevaCategoria, now: DateTime<Utc>) {
        self.nombre = record.datos.nombre;
        self.estado = record.datos.estado;
        self.updated_at = now;
    }

    fn matches(&self, filter: &CategoriaFilter) -> bool {
        filter.tipo.is_none_or(|t| t == self.tipo)
            && filter.estado.is_none_or(|e| e == self.estado)
    }

    fn accepts(&self, record: &NuevaCategoria) -> bool {
        record.tipo == self.tipo
    }
}

impl SoftDelete for Categoria {
    fn set_estado(&mut self, estado: Estado, now: DateTime<Utc>) {
        self.estado = estado;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_from_path_segment() {
        assert_eq!("insumo".parse::<CategoriaTipo>(), Ok(CategoriaTipo::Insumo));
        assert_eq!("promocion".parse::<CategoriaTipo>(), Ok(CategoriaTipo::Promocion));
        assert!("Insumo".parse::<CategoriaTipo>().is_err());
        assert!("bebida".parse::<CategoriaTipo>().is_err());
    }

    #[test]
    fn test_update_refuses_other_family() {
        let now = Utc::now();
        let nueva = |tipo| NuevaCategoria {
            tipo,
            datos: CategoriaRecord {
                nombre: "Harinas".into(),
                estado: Estado::Activo,
            },
        };
        let cat = Categoria::from_record("c1".into(), nueva(CategoriaTipo::Insumo), now);
        assert!(cat.accepts(&nueva(CategoriaTipo::Insumo)));
        assert!(!cat.accepts(&nueva(CategoriaTipo::Producto)));
    }
}

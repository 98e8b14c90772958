use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{check, parse_estado, Schema, Violations};
use crate::shared::constants::MAX_NOMBRE_LEN;
use crate::shared::types::Estado;
use crate::shared::validation::not_blank;

/// Category of any family; the family comes from the route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CategoriaInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_NOMBRE_LEN, message = "El nombre no puede superar 100 caracteres")
    )]
    pub nombre: String,

    pub estado: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoriaRecord {
    pub nombre: String,
    pub estado: Estado,
}

impl Schema for CategoriaInput {
    type Record = CategoriaRecord;

    fn parse(&self) -> Result<CategoriaRecord, Violations> {
        let mut violations = check(self);
        let estado = parse_estado(self.estado.as_deref(), &mut violations);

        match (violations.is_empty(), estado) {
            (true, Some(estado)) => Ok(CategoriaRecord {
                nombre: self.nombre.trim().to_string(),
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
    fn test_categoria_defaults_to_activo() {
        let input = CategoriaInput {
            nombre: "Harinas".to_string(),
            estado: None,
        };
        assert_eq!(input.parse().unwrap().estado, Estado::Activo);
    }

    #[test]
    fn test_categoria_requires_name() {
        assert!(CategoriaInput::default().parse().unwrap_err().has("nombre"));
    }
}
